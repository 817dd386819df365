//! Comparison statistics table.

use dioxus::prelude::*;
use precip_core::view::{StatsRow, STATS_INTERPRETATION};

const CELL_STYLE: &str = "padding: 6px 10px; border-bottom: 1px solid #DDD; text-align: left;";

/// One row per precipitation type with means, p-values, effect size and a
/// significance badge.
#[component]
pub fn StatsTable(rows: Vec<StatsRow>) -> Element {
    rsx! {
        div {
            style: "margin: 8px 0 16px 0; overflow-x: auto;",
            table {
                style: "border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        th { style: CELL_STYLE, "Precipitation Type" }
                        th { style: CELL_STYLE, "Operating Mean (mm)" }
                        th { style: CELL_STYLE, "Climatology Mean (mm)" }
                        th { style: CELL_STYLE, "t-test p-value" }
                        th { style: CELL_STYLE, "Mann-Whitney p-value" }
                        th { style: CELL_STYLE, "KS-test p-value" }
                        th { style: CELL_STYLE, "Cohen's d" }
                        th { style: CELL_STYLE, "Significant?" }
                    }
                }
                tbody {
                    for row in rows {
                        StatsTableRow { key: "{row.precip_label}", row: row.clone() }
                    }
                }
            }
            p {
                style: "font-size: 12px; color: #666; margin-top: 6px;",
                "{STATS_INTERPRETATION}"
            }
        }
    }
}

#[component]
fn StatsTableRow(row: StatsRow) -> Element {
    let badge = if row.significant {
        "background: #2E7D32; color: white; padding: 2px 8px; border-radius: 10px;"
    } else {
        "background: #9E9E9E; color: white; padding: 2px 8px; border-radius: 10px;"
    };
    let significant = row.significance_label();

    rsx! {
        tr {
            td { style: CELL_STYLE, strong { "{row.precip_label}" } }
            td { style: CELL_STYLE, "{row.operating}" }
            td { style: CELL_STYLE, "{row.climatology}" }
            td { style: CELL_STYLE, "{row.t_test}" }
            td { style: CELL_STYLE, "{row.mann_whitney}" }
            td { style: CELL_STYLE, "{row.ks_test}" }
            td { style: CELL_STYLE, "{row.cohens_d}" }
            td { style: CELL_STYLE, span { style: badge, "{significant}" } }
        }
    }
}
