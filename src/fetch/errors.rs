use thiserror::Error;

/// Failure modes of the backend fetch boundary.
///
/// All of these surface to the page as a generic error string with a manual
/// retry affordance; none are retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned status {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Decode(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(feature = "http")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
