//! Result view model: partitions returned plots by precipitation type and
//! formats the comparison statistics.
//!
//! Nothing here touches a DOM or a terminal; the web app and the CLI each
//! render a [`ResultsView`] their own way.

use crate::exchange::{ComparisonStats, ImageMap, PlotResponse};
use crate::plot::PrecipType;
use serde::Serialize;
use serde_json::Value;

/// p-value below which a difference is reported as significant.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Shown when filtering leaves nothing to display.
pub const NO_PLOTS_NOTICE: &str = "No plots were generated. Please check your selections.";

/// Shown when the server answered without plots or an error.
pub const NOTHING_GENERATED_NOTICE: &str = "No plots generated";

/// Shown under the statistics table.
pub const STATS_INTERPRETATION: &str = "p < 0.05 indicates statistically significant difference. \
Cohen's d: |d| < 0.2 (negligible), 0.2-0.5 (small), 0.5-0.8 (medium), > 0.8 (large)";

/// A single rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotCard {
    pub precip: PrecipType,
    /// Plot name for regular plots (prefix stripped), full key for comparison plots.
    pub key: String,
    /// Human-readable plot name.
    pub title: String,
    /// Base64-encoded PNG.
    pub image: String,
}

impl PlotCard {
    /// Card heading, e.g. `Rain - Annual Totals`.
    pub fn heading(&self) -> String {
        format!("{} - {}", self.precip.label(), self.title)
    }

    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.image)
    }
}

/// One statistics table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow {
    pub precip_label: String,
    pub operating: String,
    pub climatology: String,
    pub t_test: String,
    pub mann_whitney: String,
    pub ks_test: String,
    pub cohens_d: String,
    pub significant: bool,
}

impl StatsRow {
    pub fn new(precip: &str, stats: &ComparisonStats) -> Self {
        Self {
            precip_label: capitalize(precip),
            operating: format!(
                "{} ± {}",
                to_fixed(stats.operating_mean, 2),
                to_fixed(stats.operating_std, 2)
            ),
            climatology: format!(
                "{} ± {}",
                to_fixed(stats.climatology_mean, 2),
                to_fixed(stats.climatology_std, 2)
            ),
            t_test: to_fixed(stats.t_test_pvalue, 4),
            mann_whitney: to_fixed(stats.mannwhitney_pvalue, 4),
            ks_test: to_fixed(stats.ks_test_pvalue, 4),
            cohens_d: to_fixed(stats.cohens_d, 3),
            significant: stats.is_significant(),
        }
    }

    pub fn significance_label(&self) -> &'static str {
        if self.significant {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Period comparison analysis: statistics table plus comparison charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSection {
    pub stats: Vec<StatsRow>,
    pub plots: Vec<PlotCard>,
}

impl ComparisonSection {
    /// The statistics table is only shown when the server sent statistics.
    pub fn has_stats(&self) -> bool {
        !self.stats.is_empty()
    }
}

/// Everything the results region shows for one `/process` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub rain: Vec<PlotCard>,
    pub snow: Vec<PlotCard>,
    /// Present when the response carried any comparison plot keys.
    pub comparison: Option<ComparisonSection>,
}

impl ResultsView {
    pub fn from_response(response: &PlotResponse) -> Self {
        let mut rain = Vec::new();
        let mut snow = Vec::new();

        for (key, value) in &response.plots {
            let Some((precip, name)) = PrecipType::split_key(key) else {
                log::debug!("Skipping plot with unrecognised key {}", key);
                continue;
            };
            let Some(image) = image_of(value) else {
                continue;
            };
            let card = PlotCard {
                precip,
                key: name.to_string(),
                title: title_case(name),
                image: image.to_string(),
            };
            match precip {
                PrecipType::Rain => rain.push(card),
                PrecipType::Snow => snow.push(card),
            }
        }

        let comparison = (!response.comparison_plots.is_empty()).then(|| ComparisonSection {
            stats: response
                .comparison_stats
                .iter()
                .map(|(precip, stats)| StatsRow::new(precip, stats))
                .collect(),
            plots: comparison_cards(&response.comparison_plots),
        });

        Self {
            rain,
            snow,
            comparison,
        }
    }

    /// True when there is nothing to show and [`NO_PLOTS_NOTICE`] applies.
    pub fn is_empty(&self) -> bool {
        self.rain.is_empty() && self.snow.is_empty() && self.comparison.is_none()
    }

    /// Every card in display order: rain, snow, comparison.
    pub fn cards(&self) -> impl Iterator<Item = &PlotCard> {
        self.rain
            .iter()
            .chain(self.snow.iter())
            .chain(self.comparison.iter().flat_map(|c| c.plots.iter()))
    }
}

fn comparison_cards(plots: &ImageMap) -> Vec<PlotCard> {
    plots
        .iter()
        .filter_map(|(key, value)| {
            let image = image_of(value)?;
            let precip = if key.starts_with(PrecipType::Rain.prefix()) {
                PrecipType::Rain
            } else {
                PrecipType::Snow
            };
            Some(PlotCard {
                precip,
                key: key.clone(),
                title: comparison_display_name(key),
                image: image.to_string(),
            })
        })
        .collect()
}

/// A renderable image: a non-empty string. Null, false and empty values mean
/// the server failed to draw that plot and are skipped.
fn image_of(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Either of the two location tests below the threshold.
pub fn is_significant(t_test_pvalue: f64, mannwhitney_pvalue: f64) -> bool {
    t_test_pvalue < SIGNIFICANCE_THRESHOLD || mannwhitney_pvalue < SIGNIFICANCE_THRESHOLD
}

/// Friendly name of a comparison plot key.
pub fn comparison_display_name(key: &str) -> String {
    if key.contains("comparison_histogram") {
        "Distribution Comparison".to_string()
    } else if key.contains("anomaly") {
        "Anomaly Plot".to_string()
    } else {
        title_case(key)
    }
}

/// `monthly_heatmap` -> `Monthly Heatmap`: underscores become spaces and the
/// first character of every word is upper-cased.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }
    out
}

/// Fixed-point formatting that rounds halves away from zero.
///
/// `format!("{:.N}")` rounds exact ties to even (`0.125` -> `0.12`); the
/// statistics table rounds them up in magnitude (`0.125` -> `0.13`). Rounding
/// is done on the exact decimal expansion of the value, so `1.005` (stored as
/// `1.00499...`) still gives `1.00`. Negative zero prints without a sign.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // 1100 fractional digits cover the full expansion of any f64.
    let exact = format!("{:.1100}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept_frac, rest) = frac_part.split_at(digits.min(frac_part.len()));

    let mut kept: Vec<u8> = int_part.bytes().chain(kept_frac.bytes()).collect();
    if rest.as_bytes().first().is_some_and(|&d| d >= b'5') {
        round_up(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&String::from_utf8_lossy(&kept[..int_len]));
    if digits > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(&kept[int_len..]));
    }
    out
}

/// Add one unit in the last place to a string of ASCII digits.
fn round_up(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> PlotResponse {
        serde_json::from_value(value).unwrap()
    }

    fn stats(t: f64, mw: f64) -> serde_json::Value {
        json!({
            "operating_mean": 12.3456, "operating_std": 1.2,
            "climatology_mean": 10.0, "climatology_std": 0.456,
            "t_test_pvalue": t, "mannwhitney_pvalue": mw,
            "ks_test_pvalue": 0.123456, "cohens_d": 0.45678,
        })
    }

    #[test]
    fn partitions_by_prefix_and_skips_falsy() {
        let view = ResultsView::from_response(&response(json!({
            "plots": {"rain_a": "X", "snow_b": "Y", "rain_c": null}
        })));
        assert_eq!(view.rain.len(), 1);
        assert_eq!(view.rain[0].key, "a");
        assert_eq!(view.rain[0].image, "X");
        assert_eq!(view.snow.len(), 1);
        assert_eq!(view.snow[0].key, "b");
        assert!(view.comparison.is_none());
        assert!(!view.is_empty());
    }

    #[test]
    fn keeps_server_order_within_groups() {
        let view = ResultsView::from_response(&response(json!({
            "plots": {
                "rain_seasonal_boxplot": "1",
                "snow_annual_totals": "2",
                "rain_annual_totals": "3",
                "rain_monthly_heatmap": "4",
                "hail_annual_totals": "5",
                "snow_monthly_heatmap": false,
                "snow_monthly_climatology": ""
            }
        })));
        let rain: Vec<&str> = view.rain.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            rain,
            vec!["Seasonal Boxplot", "Annual Totals", "Monthly Heatmap"]
        );
        assert_eq!(view.snow.len(), 1);
        assert_eq!(view.snow[0].heading(), "Snow - Annual Totals");
    }

    #[test]
    fn empty_when_nothing_renderable() {
        let view = ResultsView::from_response(&response(json!({
            "plots": {"rain_a": null, "snow_b": null}
        })));
        assert!(view.is_empty());
        assert_eq!(view.cards().count(), 0);
    }

    #[test]
    fn comparison_section_labels_and_names() {
        let view = ResultsView::from_response(&response(json!({
            "plots": {},
            "comparison_plots": {
                "rain_comparison_histogram": "A",
                "snow_anomaly": "B",
                "snow_comparison_histogram": null,
                "rain_seasonal_shift": "C"
            },
            "comparison_stats": {"rain": stats(0.03, 0.9)}
        })));
        let section = view.comparison.as_ref().unwrap();
        let headings: Vec<String> = section.plots.iter().map(PlotCard::heading).collect();
        assert_eq!(
            headings,
            vec![
                "Rain - Distribution Comparison",
                "Snow - Anomaly Plot",
                "Rain - Rain Seasonal Shift",
            ]
        );
        assert_eq!(section.stats.len(), 1);
        assert!(!view.is_empty());
    }

    #[test]
    fn comparison_section_present_even_if_all_images_failed() {
        let view = ResultsView::from_response(&response(json!({
            "plots": {},
            "comparison_plots": {"rain_anomaly": null}
        })));
        let section = view.comparison.as_ref().unwrap();
        assert!(section.plots.is_empty());
        assert!(!view.is_empty());
    }

    #[test]
    fn comparison_plots_without_stats_hide_the_table() {
        let view = ResultsView::from_response(&response(json!({
            "plots": {},
            "comparison_plots": {"rain_anomaly": "A"}
        })));
        let section = view.comparison.as_ref().unwrap();
        assert_eq!(section.plots.len(), 1);
        assert!(!section.has_stats());

        let view = ResultsView::from_response(&response(json!({
            "plots": {},
            "comparison_plots": {"rain_anomaly": "A"},
            "comparison_stats": {"rain": stats(0.5, 0.5)}
        })));
        assert!(view.comparison.as_ref().unwrap().has_stats());
    }

    #[test]
    fn stats_without_comparison_plots_are_not_shown() {
        let view = ResultsView::from_response(&response(json!({
            "plots": {},
            "comparison_stats": {"rain": stats(0.5, 0.5)}
        })));
        assert!(view.comparison.is_none());
        assert!(view.is_empty());
    }

    #[test]
    fn stats_row_formatting() {
        let parsed: ComparisonStats = serde_json::from_value(stats(0.03, 0.9)).unwrap();
        let row = StatsRow::new("rain", &parsed);
        assert_eq!(row.precip_label, "Rain");
        assert_eq!(row.operating, "12.35 ± 1.20");
        assert_eq!(row.climatology, "10.00 ± 0.46");
        assert_eq!(row.t_test, "0.0300");
        assert_eq!(row.mann_whitney, "0.9000");
        assert_eq!(row.ks_test, "0.1235");
        assert_eq!(row.cohens_d, "0.457");
        assert!(row.significant);
        assert_eq!(row.significance_label(), "Yes");
    }

    #[test]
    fn stats_row_rounds_ties_away_from_zero() {
        let parsed: ComparisonStats = serde_json::from_value(json!({
            "operating_mean": 0.125, "operating_std": 2.375,
            "climatology_mean": -0.125, "climatology_std": 0.0,
            "t_test_pvalue": 0.03125, "mannwhitney_pvalue": 0.5,
            "ks_test_pvalue": 0.00005, "cohens_d": 0.0625,
        }))
        .unwrap();
        let row = StatsRow::new("snow", &parsed);
        assert_eq!(row.operating, "0.13 ± 2.38");
        assert_eq!(row.climatology, "-0.13 ± 0.00");
        assert_eq!(row.t_test, "0.0313");
        assert_eq!(row.mann_whitney, "0.5000");
        assert_eq!(row.cohens_d, "0.063");
    }

    #[test]
    fn to_fixed_uses_the_exact_stored_value() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(-0.0625, 3), "-0.063");
        // 1.005 and 0.995 are stored just below the half.
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.995, 2), "0.99");
        assert_eq!(to_fixed(9.999, 2), "10.00");
        assert_eq!(to_fixed(12.3456, 2), "12.35");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn significance_is_an_or_of_two_tests() {
        assert!(is_significant(0.03, 0.9));
        assert!(is_significant(0.9, 0.049));
        assert!(!is_significant(0.05, 0.05));
        assert!(!is_significant(0.2, 0.7));
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("monthly_heatmap"), "Monthly Heatmap");
        assert_eq!(title_case("annual_totals_2"), "Annual Totals 2");
        assert_eq!(title_case("a-b"), "A-B");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn data_uri_embeds_png() {
        let card = PlotCard {
            precip: PrecipType::Rain,
            key: "a".to_string(),
            title: "A".to_string(),
            image: "iVBOR".to_string(),
        };
        assert_eq!(card.data_uri(), "data:image/png;base64,iVBOR");
    }
}
