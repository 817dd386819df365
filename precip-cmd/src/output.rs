//! Writing a results view to disk and the terminal.

use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use precip_core::view::{PlotCard, ResultsView, StatsRow};
use std::fs;
use std::path::{Path, PathBuf};

const STATS_HEADERS: [&str; 8] = [
    "Precipitation Type",
    "Operating Mean (mm)",
    "Climatology Mean (mm)",
    "t-test p-value",
    "Mann-Whitney p-value",
    "KS-test p-value",
    "Cohen's d",
    "Significant?",
];

/// Decode every card of `view` into a PNG under `dir`.
///
/// Files are named `rain_<plot>.png`, `snow_<plot>.png` and
/// `comparison_<key>.png`. Cards whose payload is not valid base64 are skipped
/// with a warning. Returns the written paths in display order.
pub fn write_images(view: &ResultsView, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let regular = view
        .rain
        .iter()
        .chain(view.snow.iter())
        .map(|card| (format!("{}{}", card.precip.prefix(), card.key), card));
    let comparison = view
        .comparison
        .iter()
        .flat_map(|section| section.plots.iter())
        .map(|card| (format!("comparison_{}", card.key), card));

    let mut written = Vec::new();
    for (stem, card) in regular.chain(comparison) {
        let path = dir.join(format!("{}.png", sanitize(&stem)));
        if write_card(card, &path)? {
            written.push(path);
        }
    }

    info!("Wrote {} images to {}", written.len(), dir.display());
    Ok(written)
}

fn write_card(card: &PlotCard, path: &Path) -> anyhow::Result<bool> {
    let bytes = match STANDARD.decode(card.image.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Skipping {}: invalid base64 image ({})", card.heading(), e);
            return Ok(false);
        }
    };
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Keep plot keys usable as file names.
fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn row_cells(row: &StatsRow) -> [&str; 8] {
    [
        row.precip_label.as_str(),
        row.operating.as_str(),
        row.climatology.as_str(),
        row.t_test.as_str(),
        row.mann_whitney.as_str(),
        row.ks_test.as_str(),
        row.cohens_d.as_str(),
        row.significance_label(),
    ]
}

/// Render the statistics as an aligned plain-text table.
pub fn format_stats_table(rows: &[StatsRow]) -> String {
    let mut widths = STATS_HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row_cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 8]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(STATS_HEADERS));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&line(row_cells(row)));
        out.push('\n');
    }
    out
}

/// Export the statistics table as CSV.
pub fn write_stats_csv(rows: &[StatsRow], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(STATS_HEADERS)?;
    for row in rows {
        writer.write_record(row_cells(row))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_core::PlotResponse;
    use serde_json::json;

    // 1x1 transparent PNG
    const PNG_BASE64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn view() -> ResultsView {
        let response: PlotResponse = serde_json::from_value(json!({
            "plots": {
                "rain_annual_totals": PNG_BASE64,
                "snow_annual_totals": "%%% not base64 %%%",
                "snow_monthly_heatmap": null
            },
            "comparison_plots": {"rain_comparison_histogram": PNG_BASE64},
            "comparison_stats": {
                "rain": {
                    "operating_mean": 1.5, "operating_std": 0.25,
                    "climatology_mean": 2.0, "climatology_std": 0.5,
                    "t_test_pvalue": 0.5, "mannwhitney_pvalue": 0.01,
                    "ks_test_pvalue": 0.2, "cohens_d": -0.8
                }
            }
        }))
        .unwrap();
        ResultsView::from_response(&response)
    }

    #[test]
    fn writes_decodable_images_and_skips_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_images(&view(), dir.path()).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "rain_annual_totals.png",
                "comparison_rain_comparison_histogram.png"
            ]
        );

        let bytes = fs::read(&written[0]).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        write_images(&view(), &nested).unwrap();
        assert!(nested.join("rain_annual_totals.png").exists());
    }

    #[test]
    fn sanitizes_unexpected_key_characters() {
        assert_eq!(sanitize("rain_../etc"), "rain____etc");
        assert_eq!(sanitize("snow_monthly-heatmap"), "snow_monthly-heatmap");
    }

    #[test]
    fn stats_table_has_header_and_rows() {
        let view = view();
        let stats = &view.comparison.as_ref().unwrap().stats;
        let table = format_stats_table(stats);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Precipitation Type"));
        assert!(lines[2].starts_with("Rain"));
        assert!(lines[2].contains("1.50 ± 0.25"));
        assert!(lines[2].contains("0.0100"));
        assert!(lines[2].contains("-0.800"));
        assert!(lines[2].ends_with("Yes"));
    }

    #[test]
    fn stats_csv_round_trips_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let view = view();
        write_stats_csv(&view.comparison.as_ref().unwrap().stats, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("Precipitation Type"));
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.get(0), Some("Rain"));
        assert_eq!(record.get(2), Some("2.00 ± 0.50"));
        assert_eq!(record.get(7), Some("Yes"));
    }
}
