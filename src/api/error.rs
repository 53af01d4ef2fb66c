use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} responded with HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} returned an unexpected payload: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },

    #[error("invalid clock time '{0}' in timings response")]
    InvalidTime(String),

    #[error("{0}")]
    Unavailable(String),
}
