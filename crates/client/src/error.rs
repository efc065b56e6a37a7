use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Query,
    Upload,
    Areas,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Query => "query/",
            Endpoint::Upload => "upload/",
            Endpoint::Areas => "areas/",
        }
    }

    /// Shown when the server gave no usable error body.
    fn fallback_message(self) -> &'static str {
        match self {
            Endpoint::Query | Endpoint::Areas => {
                "Could not connect to the analytics API. Check that the backend is running."
            }
            Endpoint::Upload => "Upload failed. Ensure file is .xlsx or .csv.",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Query => "query",
            Endpoint::Upload => "upload",
            Endpoint::Areas => "areas",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("{endpoint} request returned {status} without an error body")]
    Status { endpoint: Endpoint, status: u16 },
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// The single human-readable line shown inline to the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Status { endpoint, .. } | ClientError::Transport { endpoint, .. } => {
                endpoint.fallback_message().to_string()
            }
            ClientError::Decode { .. } => {
                "The analytics API returned a response this dashboard cannot read.".to_string()
            }
            ClientError::UnsupportedFile(_) => {
                "Invalid file type. Only Excel (.xlsx, .xls) and CSV are supported.".to_string()
            }
            ClientError::Io { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
        }
    }
}
