//! Catalogs of plot types, precipitation types, seasons and months.
//!
//! Plot keys returned by the server have the form `{rain|snow}_{plot_name}`.
//! Plot types and seasons travel as plain strings; these catalogs only drive
//! the choices offered by the front ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two precipitation series every plot is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipType {
    Rain,
    Snow,
}

impl PrecipType {
    pub const ALL: [PrecipType; 2] = [PrecipType::Rain, PrecipType::Snow];

    /// Key prefix used by the server, e.g. `rain_`.
    pub fn prefix(&self) -> &'static str {
        match self {
            PrecipType::Rain => "rain_",
            PrecipType::Snow => "snow_",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrecipType::Rain => "Rain",
            PrecipType::Snow => "Snow",
        }
    }

    /// Heading of the results group for this series.
    pub fn section_title(&self) -> &'static str {
        match self {
            PrecipType::Rain => "Rain Plots",
            PrecipType::Snow => "Snow Plots",
        }
    }

    /// Split a plot key into its precipitation type and plot name.
    pub fn split_key(key: &str) -> Option<(PrecipType, &str)> {
        PrecipType::ALL
            .into_iter()
            .find_map(|precip| key.strip_prefix(precip.prefix()).map(|name| (precip, name)))
    }
}

impl fmt::Display for PrecipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plot types the server knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotType {
    MonthlyHeatmap,
    MonthlyClimatology,
    SeasonalBoxplot,
    AnnualTotals,
    MonthlyDistribution,
    MonthlyHistogram,
}

impl PlotType {
    /// Every plot type, in the order "generate all" produces them.
    pub const ALL: [PlotType; 6] = [
        PlotType::MonthlyHeatmap,
        PlotType::MonthlyClimatology,
        PlotType::SeasonalBoxplot,
        PlotType::AnnualTotals,
        PlotType::MonthlyDistribution,
        PlotType::MonthlyHistogram,
    ];

    /// Wire identifier sent in `plot_types`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotType::MonthlyHeatmap => "monthly_heatmap",
            PlotType::MonthlyClimatology => "monthly_climatology",
            PlotType::SeasonalBoxplot => "seasonal_boxplot",
            PlotType::AnnualTotals => "annual_totals",
            PlotType::MonthlyDistribution => "monthly_distribution",
            PlotType::MonthlyHistogram => "monthly_histogram",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlotType::MonthlyHeatmap => "Monthly Totals Heatmap",
            PlotType::MonthlyClimatology => "Monthly Climatology",
            PlotType::SeasonalBoxplot => "Seasonal Boxplot",
            PlotType::AnnualTotals => "Annual Totals",
            PlotType::MonthlyDistribution => "Monthly Distribution",
            PlotType::MonthlyHistogram => "Monthly Histogram",
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlotType::ALL
            .into_iter()
            .find(|plot| plot.as_str() == s)
            .ok_or_else(|| format!("unknown plot type: {}", s))
    }
}

/// Meteorological seasons as `(code, label)`.
pub const SEASONS: [(&str, &str); 4] = [
    ("DJF", "Winter (Dec-Feb)"),
    ("MAM", "Spring (Mar-May)"),
    ("JJA", "Summer (Jun-Aug)"),
    ("SON", "Fall (Sep-Nov)"),
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a month number (1 = January).
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}
