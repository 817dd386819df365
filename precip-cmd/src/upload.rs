//! Uploading a CSV file to the server.

use anyhow::Context;
use precip_core::client::PrecipClient;
use precip_core::Session;
use std::path::Path;

/// Upload `path` and print the server's summary of the parsed file.
pub async fn run_upload(server: &str, path: &Path) -> anyhow::Result<()> {
    let mut session = Session::new();
    let path = session.begin_upload(Some(path).filter(|p| !p.as_os_str().is_empty()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid file name: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let client = PrecipClient::new(server);
    let result = client.upload(file_name, bytes).await;
    session.finish_upload();

    let receipt = result.context("Upload failed")?;
    println!("Success! {}", receipt.summary());
    if let Some(id) = receipt.file_id {
        println!("Dataset id: {}", id);
    }
    Ok(())
}
