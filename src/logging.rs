// src/logging.rs

use crate::config::get_config;
use crate::errors::{ConfabError, ConfabResult};
use flexi_logger::{FileSpec, Logger, LoggerHandle};

const SUMMARY_LIMIT: usize = 48;

/// One outbound reply request, recorded after the response arrives.
#[derive(Debug, Clone)]
pub struct RequestLog {
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Starts the file logger. The returned handle must stay alive for the
/// lifetime of the program or logging shuts down.
pub fn init_logging() -> ConfabResult<LoggerHandle> {
    let config = get_config();

    let handle = Logger::try_with_str(&config.log_level)
        .map_err(|e| ConfabError::config_error(format!("Invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().basename("confab").suppress_timestamp())
        .append()
        .start()
        .map_err(|e| ConfabError::config_error(format!("Failed to start logger: {}", e)))?;

    Ok(handle)
}

/// Records a completed request to the log file.
pub fn log_request(entry: &RequestLog) {
    log::info!(
        "{} - {} - Status: {} - Time: {}ms",
        entry.endpoint,
        entry.request_summary,
        entry.response_status,
        entry.response_time_ms
    );
}

/// Shortens a message for the request log line.
pub fn summarize_request(text: &str) -> String {
    if text.chars().count() <= SUMMARY_LIMIT {
        text.to_string()
    } else {
        let head: String = text.chars().take(SUMMARY_LIMIT).collect();
        format!("{}...", head)
    }
}
