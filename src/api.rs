use crate::errors::{ConfabError, ConfabResult};
use crate::logging::{self, RequestLog};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

/// HTTP client for the reply server. The endpoint is injected at
/// construction, so tests can point it at a local mock server.
#[derive(Debug, Clone)]
pub struct ReplyClient {
    client: Client,
    endpoint: String,
}

impl ReplyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ReplyClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one user message and returns the reply text.
    ///
    /// Error responses surface the body text when the server sent one,
    /// falling back to the status text so there is always a readable
    /// reason.
    pub async fn send_message(&self, text: &str) -> ConfabResult<String> {
        let payload = json!({ "msg": text });
        let started = Instant::now();

        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ConfabError::api_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        logging::log_request(&RequestLog {
            endpoint: self.endpoint.clone(),
            request_summary: logging::summarize_request(text),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let reason = if error_text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                error_text
            };
            return Err(ConfabError::api_error(reason));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ConfabError::api_error(format!("Failed to parse reply: {}", e)))?;

        Ok(extract_reply(&body))
    }
}

/// Pulls the reply text out of a response document. Servers here
/// answer with {"reply": ...}, but {"message": ...} and bare JSON
/// values are accepted too so a mismatched build still shows
/// something readable instead of being dropped.
fn extract_reply(body: &Value) -> String {
    if let Some(reply) = body.get("reply").and_then(Value::as_str) {
        return reply.to_string();
    }
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
