//! HTTP client for the precipitation analysis server.
//!
//! Works natively (CLI) and on wasm32 (web front end) through reqwest. Every
//! response is read into an [`HttpReply`] and handed to [`crate::exchange`], so
//! the client itself never interprets status codes or bodies. No retries and no
//! timeouts are applied.

use crate::dataset::DatasetCatalog;
use crate::error::{ExchangeError, ServerError};
use crate::exchange::{self, HttpReply, ProcessOutcome, UploadReceipt};
use crate::request::PlotRequest;
use log::info;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

/// Server address used when none is configured.
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct PrecipClient {
    http: Client,
    base_url: String,
}

impl PrecipClient {
    /// Create a client for the server at `base_url` (scheme and host, no trailing path).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the datasets currently offered by the server's index page.
    pub async fn datasets(&self) -> Result<DatasetCatalog, ExchangeError> {
        info!("Loading dataset list from {}", self.base_url);
        let reply = read_reply(self.http.get(self.url("/")).send().await?).await?;
        if !reply.is_success() {
            return Err(ServerError::from_reply(&reply).into());
        }
        Ok(DatasetCatalog::from_index_html(&reply.body))
    }

    /// Upload a CSV file as multipart field `file`.
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, ExchangeError> {
        info!("Uploading {} ({} bytes)", file_name, bytes.len());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        exchange::interpret_upload(&read_reply(response).await?)
    }

    /// Submit a plot job.
    pub async fn process(&self, request: &PlotRequest) -> Result<ProcessOutcome, ExchangeError> {
        info!("Requesting plots for dataset {}", request.file_id);
        let response = self
            .http
            .post(self.url("/process"))
            .json(request)
            .send()
            .await?;
        exchange::interpret_process(&read_reply(response).await?)
    }

    /// Soft-delete a dataset so it is no longer offered.
    pub async fn delete_dataset(&self, id: i64) -> Result<(), ExchangeError> {
        info!("Deleting dataset {}", id);
        let response = self
            .http
            .delete(self.url(&format!("/delete_file/{}", id)))
            .send()
            .await?;
        exchange::interpret_ack(&read_reply(response).await?)
    }
}

async fn read_reply(response: Response) -> Result<HttpReply, ExchangeError> {
    let status = response.status();
    let body = response.text().await?;
    Ok(HttpReply::new(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slashes() {
        let client = PrecipClient::new("http://example.test:5000//");
        assert_eq!(client.base_url(), "http://example.test:5000");
        assert_eq!(client.url("/process"), "http://example.test:5000/process");
    }
}
