//! Precipitation CLI - upload datasets and generate analysis plots from the command line.

use clap::Parser;
use precip_cmd::DEFAULT_SERVER;

#[derive(Parser)]
#[command(
    name = "precip-cli",
    version,
    about = "Precipitation data analysis client"
)]
struct Cli {
    /// Base URL of the analysis server
    #[arg(short, long, global = true, env = "PRECIP_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: precip_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using server {}", cli.server);
    precip_cmd::run(&cli.server, cli.command).await
}
