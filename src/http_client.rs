use crate::error::ApiError;
use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

/// Error body returned by the device (`{"error": "..."}`)
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Create the HTTP client shared by all device requests
///
/// # Arguments
/// * `timeout` - Upper bound for a whole request including the body
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to create HTTP client")
}

/// Extract the `error` field from a JSON error body, if there is one
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
}

/// Handle HTTP response by checking status and extracting body
///
/// This is a common utility for processing device responses.
/// A `409 Conflict` is mapped to [`ApiError::Conflict`], every other
/// non-success status to [`ApiError::Status`].
///
/// # Arguments
/// * `res` - The HTTP response to handle
/// * `context_msg` - Context message describing the request (e.g., "POST /api/next")
///
/// # Returns
/// * `Ok(String)` - The response body if the status is successful
/// * `Err` - If the status is not successful or reading the body fails
pub async fn handle_http_response(res: Response, context_msg: &str) -> Result<String, ApiError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("failed to read response body: {e}")))?;

    if status.is_success() {
        return Ok(body);
    }

    debug!("{context_msg} failed with status {status} and body: {body}");

    let message = error_message(&body);

    if status == StatusCode::CONFLICT {
        Err(ApiError::Conflict { message })
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Decode a successful response body
pub fn parse_json<T: DeserializeOwned>(body: &str, context_msg: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::Malformed(format!("failed to parse {context_msg} response: {e}")))
}
