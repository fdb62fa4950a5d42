use reqwest::Response;

use crate::errors::{Error, RequestError, Result};

/// Convert non-2xx responses into a structured error that includes the server body.
///
/// If the status is successful (2xx), the original response is returned.
/// If the status is an error (4xx or 5xx), the response body is consumed:
/// the Reef error envelope (`{"error": {"code", "message"}}`) is preferred,
/// the raw body is the fallback, and the canonical status reason covers an
/// unreadable body.
pub(crate) async fn check_http_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = match response.text().await {
        Ok(body) => extract_error_message(&body).unwrap_or(body),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string(),
    };

    Err(Error::from(RequestError::Server { status, message }))
}

/// Pull the human-readable message out of a Reef JSON error body.
///
/// Accepts both the nested envelope (`{"error": {"code": 4012,
/// "message": "..."}}`) and the flat form (`{"message": "..."}`). Returns
/// `None` for anything else so the caller falls back to the raw body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(envelope) = value.get("error") {
        let message = envelope.get("message")?.as_str()?;
        return match envelope.get("code").and_then(|c| c.as_i64()) {
            Some(code) => Some(format!("{message} (code {code})")),
            None => Some(message.to_string()),
        };
    }

    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

/// Percent-encode a value destined for a URL path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
