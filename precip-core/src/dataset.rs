//! Uploaded datasets offered for selection.
//!
//! The server has no JSON listing endpoint. The index page renders the list as
//! `<option>` elements of the `fileSelect` dropdown, each carrying the row count
//! and date range in `data-*` attributes:
//!
//! ```html
//! <option value="3" data-rows="8760" data-start="2020-01-01" data-end="2020-12-31">moab.csv</option>
//! ```
//!
//! [`DatasetCatalog::from_index_html`] extracts those options so that the
//! catalog can be reloaded from outside a browser.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

static FILE_SELECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<select[^>]*\bid\s*=\s*"fileSelect"[^>]*>(.*?)</select>"#)
        .expect("valid select regex")
});

static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<option\b([^>]*)>(.*?)</option>").expect("valid option regex")
});

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid attribute regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

/// A previously uploaded and server-parsed precipitation time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// Server-side integer identifier.
    pub id: i64,
    /// Label shown in the dropdown (usually the original file name).
    pub name: String,
    /// Number of parsed rows.
    pub rows_count: u64,
    /// First timestamp in the series, as rendered by the server.
    pub date_range_start: String,
    /// Last timestamp in the series, as rendered by the server.
    pub date_range_end: String,
}

impl Dataset {
    /// Info line shown under the selector once a dataset is chosen.
    pub fn info_line(&self) -> String {
        format!(
            "Rows: {} | Date Range: {} to {}",
            self.rows_count, self.date_range_start, self.date_range_end
        )
    }
}

/// The datasets currently offered to the user, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    pub fn new(datasets: Vec<Dataset>) -> Self {
        Self { datasets }
    }

    /// Resolve a raw selection value to a dataset.
    ///
    /// The value is the text of an `<option value>`; anything that is not an
    /// integer id present in the catalog resolves to `None`.
    pub fn find(&self, value: &str) -> Option<&Dataset> {
        let id = value.trim().parse::<i64>().ok()?;
        self.get(id)
    }

    pub fn get(&self, id: i64) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Parse the dataset options out of the server's index page.
    ///
    /// Only the `fileSelect` dropdown is scanned when present. Options with an
    /// empty or non-integer value (the "-- Select --" placeholder) are skipped.
    pub fn from_index_html(html: &str) -> Self {
        let scope = FILE_SELECT_RE
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(html);

        let datasets = OPTION_RE
            .captures_iter(scope)
            .filter_map(|caps| {
                let attrs = parse_attributes(caps.get(1).map_or("", |m| m.as_str()));
                let id = attrs.get("value")?.trim().parse::<i64>().ok()?;
                let label = caps.get(2).map_or("", |m| m.as_str());
                Some(Dataset {
                    id,
                    name: clean_label(label),
                    rows_count: attrs
                        .get("data-rows")
                        .and_then(|rows| rows.trim().parse::<u64>().ok())
                        .unwrap_or(0),
                    date_range_start: attrs.get("data-start").cloned().unwrap_or_default(),
                    date_range_end: attrs.get("data-end").cloned().unwrap_or_default(),
                })
            })
            .collect::<Vec<_>>();

        log::debug!("Parsed {} datasets from index page", datasets.len());
        Self { datasets }
    }
}

impl<'a> IntoIterator for &'a DatasetCatalog {
    type Item = &'a Dataset;
    type IntoIter = std::slice::Iter<'a, Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.datasets.iter()
    }
}

fn parse_attributes(raw: &str) -> HashMap<String, String> {
    ATTRIBUTE_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3))?.as_str();
            Some((name, unescape(value)))
        })
        .collect()
}

fn clean_label(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, "");
    unescape(&text.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_PAGE: &str = r#"
<html><body>
  <select id="seasonPreset"><option value="7">not a dataset</option></select>
  <select class="form-select" id="fileSelect">
    <option value="">-- Select a file --</option>
    <option value="12" data-rows="8760" data-start="2019-01-01 00:00:00" data-end="2019-12-31 23:00:00">
        moab_2019.csv
        <small>(8760 rows)</small>
    </option>
    <option value="4" data-rows="120" data-start="2021-03-01" data-end="2021-03-05">R&amp;D.csv</option>
  </select>
</body></html>
"#;

    #[test]
    fn test_parse_index_options() {
        let catalog = DatasetCatalog::from_index_html(INDEX_PAGE);
        assert_eq!(catalog.len(), 2);

        let first = catalog.get(12).unwrap();
        assert_eq!(first.name, "moab_2019.csv (8760 rows)");
        assert_eq!(first.rows_count, 8760);
        assert_eq!(first.date_range_start, "2019-01-01 00:00:00");
        assert_eq!(first.date_range_end, "2019-12-31 23:00:00");

        let second = catalog.get(4).unwrap();
        assert_eq!(second.name, "R&D.csv");
    }

    #[test]
    fn test_parse_scans_whole_page_without_file_select() {
        let html = r#"<option value='9' data-rows='10' data-start='a' data-end='b'>x.csv</option>"#;
        let catalog = DatasetCatalog::from_index_html(html);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(9).unwrap().date_range_end, "b");
    }

    #[test]
    fn test_parse_empty_page() {
        let catalog = DatasetCatalog::from_index_html("<html></html>");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_find_by_raw_value() {
        let catalog = DatasetCatalog::from_index_html(INDEX_PAGE);
        assert_eq!(catalog.find(" 4 ").map(|d| d.id), Some(4));
        assert!(catalog.find("").is_none());
        assert!(catalog.find("abc").is_none());
        assert!(catalog.find("99").is_none());
    }

    #[test]
    fn test_info_line() {
        let dataset = Dataset {
            id: 1,
            name: "moab.csv".to_string(),
            rows_count: 42,
            date_range_start: "2020-01-01".to_string(),
            date_range_end: "2020-02-01".to_string(),
        };
        assert_eq!(
            dataset.info_line(),
            "Rows: 42 | Date Range: 2020-01-01 to 2020-02-01"
        );
    }
}
