//! Command implementations for the precipitation CLI.
//!
//! Provides subcommands for listing, uploading and deleting datasets and for
//! generating plots from an uploaded dataset.

use clap::Subcommand;

pub mod datasets;
pub mod generate;
pub mod output;
pub mod upload;

pub use generate::GenerateArgs;
pub use precip_core::client::DEFAULT_SERVER;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the datasets available on the server
    Datasets,

    /// Upload a CSV file of precipitation observations
    Upload {
        /// Path to the CSV file
        file: std::path::PathBuf,
    },

    /// Generate plots (and optionally a period comparison) for a dataset
    Generate(GenerateArgs),

    /// Remove a dataset from the server's list
    Delete {
        /// Dataset id, as shown by `datasets`
        file_id: i64,
    },
}

pub async fn run(server: &str, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Datasets => datasets::run_list(server).await,
        Command::Upload { file } => upload::run_upload(server, &file).await,
        Command::Generate(args) => generate::run_generate(server, args).await,
        Command::Delete { file_id } => datasets::run_delete(server, file_id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn parses_generate_with_repeated_filters() {
        let cli = TestCli::try_parse_from([
            "precip-cli",
            "generate",
            "--file-id",
            "3",
            "--month",
            "12",
            "--month",
            "1",
            "--season",
            "DJF",
            "--plot-type",
            "annual_totals",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.file_id, "3");
        assert_eq!(args.months, vec![12, 1]);
        assert_eq!(args.seasons, vec!["DJF".to_string()]);
        assert_eq!(args.plot_types, vec!["annual_totals".to_string()]);
        assert!(!args.all);
        assert!(!args.compare);
    }

    #[test]
    fn parses_delete() {
        let cli = TestCli::try_parse_from(["precip-cli", "delete", "42"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { file_id: 42 }));
    }

    #[test]
    fn upload_requires_a_path() {
        assert!(TestCli::try_parse_from(["precip-cli", "upload"]).is_err());
    }
}
