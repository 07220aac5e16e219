use std::fmt;

/// Why a view could not be loaded from the backend.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Connection, TLS or timeout failure before any response arrived.
    Transport { endpoint: String, detail: String },
    /// Backend answered with a non-2xx status.
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Body was not the expected JSON shape, or the envelope said `ok: false`.
    Malformed { endpoint: String, detail: String },
}

impl FetchError {
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Malformed { endpoint, .. } => endpoint,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { endpoint, detail } => {
                write!(f, "request to {endpoint} failed: {detail}")
            }
            Self::Status {
                endpoint,
                status,
                body,
            } => write!(f, "{endpoint} returned HTTP {status}: {body}"),
            Self::Malformed { endpoint, detail } => {
                write!(f, "unexpected response from {endpoint}: {detail}")
            }
        }
    }
}

impl std::error::Error for FetchError {}
