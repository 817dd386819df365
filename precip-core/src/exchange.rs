//! Normalization of server responses into a single success or failure outcome.
//!
//! The server may answer with well-formed JSON, a JSON error, a plain-text or
//! HTML error page, or an empty body, depending on where a failure happened
//! upstream. Every response goes through the same tiers:
//!
//! 1. Non-2xx status: the message comes from a JSON `error` field, else the raw
//!    body text, else `Server error: {status} {status_text}`.
//! 2. 2xx with an empty or whitespace-only body: `Empty response from server`.
//! 3. 2xx with a body that does not parse: `Invalid JSON response: {parse error}`.
//! 4. Parsed payload: classified per endpoint.

use crate::error::{ExchangeError, ServerError};
use crate::view;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Number of body characters logged when a body fails to parse.
const DIAGNOSTIC_PREVIEW_CHARS: usize = 500;

/// Mapping of plot key to base64 PNG (or a falsy value when a plot failed).
pub type ImageMap = Map<String, Value>;

/// Transport-independent view of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl ServerError {
    /// Extract the failure message of a non-2xx reply.
    ///
    /// Never fails: a body that is not JSON degrades to its text, and an empty
    /// body (or JSON without an `error`) degrades to the generic status line.
    pub fn from_reply(reply: &HttpReply) -> Self {
        let generic = || ServerError::Generic {
            status: reply.status,
            status_text: reply.status_text.clone(),
        };

        match serde_json::from_str::<Value>(&reply.body) {
            Ok(json) => error_message(&json)
                .map(ServerError::Json)
                .unwrap_or_else(generic),
            Err(_) if reply.body.is_empty() => generic(),
            Err(_) => ServerError::Text(reply.body.clone()),
        }
    }
}

/// Statistical contrast between the operating and climatology periods.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ComparisonStats {
    pub operating_mean: f64,
    pub operating_std: f64,
    pub climatology_mean: f64,
    pub climatology_std: f64,
    pub t_test_pvalue: f64,
    pub mannwhitney_pvalue: f64,
    pub ks_test_pvalue: f64,
    pub cohens_d: f64,
}

impl ComparisonStats {
    /// Significant when either the t-test or the Mann-Whitney test passes.
    pub fn is_significant(&self) -> bool {
        view::is_significant(self.t_test_pvalue, self.mannwhitney_pvalue)
    }
}

/// Successful `/process` payload. Map orders follow the server's JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlotResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub plots: ImageMap,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comparison_plots: ImageMap,
    #[serde(default, deserialize_with = "ordered_stats")]
    pub comparison_stats: Vec<(String, ComparisonStats)>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<ImageMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ImageMap>::deserialize(deserializer)?.unwrap_or_default())
}

fn ordered_stats<'de, D>(deserializer: D) -> Result<Vec<(String, ComparisonStats)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(precip, stats)| {
            serde_json::from_value::<ComparisonStats>(stats)
                .map(|stats| (precip, stats))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

/// Classified `/process` payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// `success` with a `plots` field.
    Plots(PlotResponse),
    /// Neither plots nor an error: nothing was generated.
    NoPlots,
}

/// Successful `/upload` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub file_id: Option<i64>,
    pub filename: String,
    pub rows_count: u64,
    pub date_range: String,
}

impl UploadReceipt {
    pub fn summary(&self) -> String {
        format!(
            "File \"{}\" uploaded successfully. Rows: {} | Date Range: {}",
            self.filename, self.rows_count, self.date_range
        )
    }
}

/// Interpret a `/process` reply.
pub fn interpret_process(reply: &HttpReply) -> Result<ProcessOutcome, ExchangeError> {
    let payload = decode_payload(reply)?;

    if field_is_truthy(&payload, "success") && field_is_truthy(&payload, "plots") {
        let response = serde_json::from_value::<PlotResponse>(payload)
            .map_err(|e| ExchangeError::InvalidJson(e.to_string()))?;
        log::info!(
            "Received {} plots and {} comparison plots",
            response.plots.len(),
            response.comparison_plots.len()
        );
        return Ok(ProcessOutcome::Plots(response));
    }

    if let Some(message) = error_message(&payload) {
        return Err(ExchangeError::Application(message));
    }

    log::warn!("Server returned neither plots nor an error");
    Ok(ProcessOutcome::NoPlots)
}

/// Interpret an `/upload` reply.
pub fn interpret_upload(reply: &HttpReply) -> Result<UploadReceipt, ExchangeError> {
    let payload = decode_payload(reply)?;

    if !field_is_truthy(&payload, "success") {
        return Err(ExchangeError::Application(
            error_message(&payload).unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    serde_json::from_value::<UploadReceipt>(payload)
        .map_err(|e| ExchangeError::InvalidJson(e.to_string()))
}

/// Interpret a reply from an endpoint that only acknowledges with `{success: true}`.
pub fn interpret_ack(reply: &HttpReply) -> Result<(), ExchangeError> {
    let payload = decode_payload(reply)?;
    if field_is_truthy(&payload, "success") {
        Ok(())
    } else {
        Err(ExchangeError::Application(
            error_message(&payload).unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

/// Tiers 1-3: status, empty body, JSON parse.
fn decode_payload(reply: &HttpReply) -> Result<Value, ExchangeError> {
    if !reply.is_success() {
        let err = ServerError::from_reply(reply);
        log::warn!("Server replied {} {}: {}", reply.status, reply.status_text, err);
        return Err(err.into());
    }

    if reply.body.trim().is_empty() {
        return Err(ExchangeError::EmptyBody);
    }

    serde_json::from_str::<Value>(&reply.body).map_err(|e| {
        log::error!(
            "JSON parse error. Response text: {}",
            reply
                .body
                .chars()
                .take(DIAGNOSTIC_PREVIEW_CHARS)
                .collect::<String>()
        );
        ExchangeError::InvalidJson(e.to_string())
    })
}

/// The `error` field of a payload, when it carries a message.
fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        other if is_truthy(other) && !other.is_string() => Some(other.to_string()),
        _ => None,
    }
}

fn field_is_truthy(payload: &Value, field: &str) -> bool {
    payload.get(field).is_some_and(is_truthy)
}

/// JSON truthiness as browsers evaluate it.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
