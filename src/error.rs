use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status code {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

impl TrackerError {
    /// Transport failures and timeouts, as opposed to a reply we could not use.
    pub fn is_transport(&self) -> bool {
        matches!(self, TrackerError::Request(e) if !e.is_decode())
    }
}
