use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between asking for a city and holding its forecast.
///
/// None of these are fatal: the caller reports them and keeps the previous
/// slot contents untouched.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to perform HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No weather data found for {city}.")]
    Empty { city: String },
}

impl ForecastError {
    /// True for failures that happened before a response body could be used.
    pub fn is_transport(&self) -> bool {
        matches!(self, ForecastError::Transport(_) | ForecastError::Status { .. })
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
