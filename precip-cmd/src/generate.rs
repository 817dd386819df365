//! Plot generation against an uploaded dataset.

use crate::output;
use anyhow::Context;
use chrono::Local;
use clap::Args;
use log::{info, warn};
use precip_core::client::PrecipClient;
use precip_core::plot::PlotType;
use precip_core::view::{StatsRow, NOTHING_GENERATED_NOTICE, NO_PLOTS_NOTICE, STATS_INTERPRETATION};
use precip_core::{
    ComparisonRanges, PlotControls, ProcessOutcome, ResultsView, Session, SubmitError,
};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Dataset id, as shown by `datasets`
    #[arg(short, long)]
    pub file_id: String,

    /// Month to include (1-12); repeat for several months
    #[arg(short, long = "month")]
    pub months: Vec<u32>,

    /// Season to include (DJF, MAM, JJA, SON); repeat for several seasons
    #[arg(long = "season")]
    pub seasons: Vec<String>,

    /// Plot type to draw; repeat for several plot types
    #[arg(short, long = "plot-type", long_help = plot_type_help())]
    pub plot_types: Vec<String>,

    /// Generate every plot type (overrides --plot-type)
    #[arg(short, long)]
    pub all: bool,

    /// Compare an operating period against a climatology baseline
    #[arg(long, requires_all = ["op_start", "op_end", "clim_start", "clim_end"])]
    pub compare: bool,

    /// Operating period start (YYYY-MM-DD)
    #[arg(long)]
    pub op_start: Option<String>,

    /// Operating period end (YYYY-MM-DD)
    #[arg(long)]
    pub op_end: Option<String>,

    /// Climatology period start (YYYY-MM-DD)
    #[arg(long)]
    pub clim_start: Option<String>,

    /// Climatology period end (YYYY-MM-DD)
    #[arg(long)]
    pub clim_end: Option<String>,

    /// Directory for the decoded PNG files (default: plots_<timestamp>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the comparison statistics to this CSV file
    #[arg(long)]
    pub stats_csv: Option<PathBuf>,
}

fn plot_type_help() -> String {
    let names = PlotType::ALL
        .iter()
        .map(|plot| format!("  {:<22} {}", plot.as_str(), plot.label()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Plot type to draw; repeat for several plot types. Known types:\n{}", names)
}

impl GenerateArgs {
    /// Control state equivalent to these arguments.
    pub fn controls(&self) -> PlotControls {
        let mut controls = PlotControls {
            generate_all: self.all,
            enable_comparison: self.compare,
            comparison: ComparisonRanges {
                op_start: self.op_start.clone().unwrap_or_default(),
                op_end: self.op_end.clone().unwrap_or_default(),
                clim_start: self.clim_start.clone().unwrap_or_default(),
                clim_end: self.clim_end.clone().unwrap_or_default(),
            },
            ..Default::default()
        };
        for &month in &self.months {
            controls.set_month(month, true);
        }
        for season in &self.seasons {
            controls.set_season(season, true);
        }
        for plot_type in &self.plot_types {
            controls.set_plot_type(plot_type, true);
        }
        controls
    }
}

/// Validate, submit, and save the returned plots.
pub async fn run_generate(server: &str, args: GenerateArgs) -> anyhow::Result<()> {
    let client = PrecipClient::new(server);
    let catalog = client
        .datasets()
        .await
        .context("Failed to load the dataset list")?;

    let mut session = Session::new();
    if let Some(dataset) = session.select(&args.file_id, &catalog) {
        info!("{}: {}", dataset.name, dataset.info_line());
    }

    let request = match session.begin_generate(&args.controls(), &catalog) {
        Ok(request) => request,
        Err(SubmitError::Invalid(err)) if err.requires_reload() => {
            anyhow::bail!(
                "{} Run `precip-cli datasets` to see the available files.",
                err
            );
        }
        Err(err) => return Err(err.into()),
    };

    let outcome = client.process(&request).await;
    session.finish_generate();

    let response = match outcome.context("Plot generation failed")? {
        ProcessOutcome::Plots(response) => response,
        ProcessOutcome::NoPlots => {
            println!("{}", NOTHING_GENERATED_NOTICE);
            return Ok(());
        }
    };

    let view = ResultsView::from_response(&response);
    if view.is_empty() {
        println!("{}", NO_PLOTS_NOTICE);
        return Ok(());
    }

    let out_dir = args.output.unwrap_or_else(default_output_dir);
    let written = output::write_images(&view, &out_dir)?;
    println!(
        "Rain plots: {} | Snow plots: {} | Comparison plots: {}",
        view.rain.len(),
        view.snow.len(),
        view.comparison.as_ref().map_or(0, |c| c.plots.len())
    );
    for path in &written {
        println!("  {}", path.display());
    }

    let stats = view
        .comparison
        .as_ref()
        .filter(|c| c.has_stats())
        .map(|c| c.stats.as_slice());
    if let Some(stats) = stats {
        println!();
        println!("Statistical Test Results");
        print!("{}", output::format_stats_table(stats));
        println!("{}", STATS_INTERPRETATION);
    }
    if let Some(path) = &args.stats_csv {
        if export_stats(stats, path)? {
            println!("Statistics written to {}", path.display());
        } else {
            println!("No comparison statistics returned; {} not written.", path.display());
        }
    }

    Ok(())
}

/// Write the statistics CSV when there are statistics. Returns whether a file was written.
fn export_stats(stats: Option<&[StatsRow]>, path: &Path) -> anyhow::Result<bool> {
    match stats {
        Some(rows) => {
            output::write_stats_csv(rows, path)?;
            Ok(true)
        }
        None => {
            warn!(
                "--stats-csv {} ignored: the response has no comparison statistics",
                path.display()
            );
            Ok(false)
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(format!("plots_{}", Local::now().format("%Y%m%d_%H%M%S")))
}
