use thiserror::Error;

/// Failures of a single topology pipeline run.
///
/// Every variant takes the same path: it is reported once through the
/// diagnostic channel and the run stops before anything is written to the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Topology request failed: {0}")]
    Transport(String),

    #[error("Topology request to {url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Topology payload could not be parsed: {0}")]
    Parse(String),

    #[error("Rendering surface unavailable: {0}")]
    Render(String),
}

impl From<serde_json::Error> for TopologyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Convenience type alias for Results using TopologyError
pub type TopologyResult<T> = Result<T, TopologyError>;
