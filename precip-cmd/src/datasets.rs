//! Listing and deleting datasets.

use anyhow::Context;
use log::info;
use precip_core::client::PrecipClient;

/// Print every dataset offered by the server.
pub async fn run_list(server: &str) -> anyhow::Result<()> {
    let client = PrecipClient::new(server);
    let catalog = client
        .datasets()
        .await
        .context("Failed to load the dataset list")?;

    if catalog.is_empty() {
        println!("No datasets uploaded yet.");
        return Ok(());
    }

    println!("{:>6}  {:<40}  {}", "ID", "NAME", "DETAILS");
    for dataset in &catalog {
        println!(
            "{:>6}  {:<40}  {}",
            dataset.id,
            dataset.name,
            dataset.info_line()
        );
    }
    info!("{} datasets available", catalog.len());
    Ok(())
}

/// Soft-delete a dataset on the server.
pub async fn run_delete(server: &str, file_id: i64) -> anyhow::Result<()> {
    let client = PrecipClient::new(server);
    client
        .delete_dataset(file_id)
        .await
        .with_context(|| format!("Failed to delete dataset {}", file_id))?;
    println!("Dataset {} removed.", file_id);
    Ok(())
}
