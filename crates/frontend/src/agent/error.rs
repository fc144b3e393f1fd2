use thiserror::Error;

const APOLOGY: &str = "Sorry, something went wrong. ";

/// Failure of a single `/ask` exchange, classified where it happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
    #[error("Failed to send request: {0}")]
    Connection(String),

    #[error("Request blocked by CORS: {0}")]
    Cors(String),

    #[error("API Error ({status}): {detail}")]
    NotFound { status: u16, detail: String },

    #[error("API Error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("API Error ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl AskError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            404 => Self::NotFound { status, detail },
            500..=599 => Self::Server { status, detail },
            _ => Self::Rejected { status, detail },
        }
    }

    /// Classify a failure of the fetch itself.
    pub fn from_fetch_failure(message: String) -> Self {
        if message.contains("CORS") {
            Self::Cors(message)
        } else {
            Self::Connection(message)
        }
    }

    /// Canned text shown in the chat in place of the raw detail.
    pub fn user_message(&self) -> String {
        let hint = match self {
            Self::Connection(_) => {
                "Unable to connect to the server. Please check your internet connection."
            }
            Self::Cors(_) => "Cross-origin request blocked. The API server may have CORS issues.",
            Self::NotFound { .. } => "API endpoint not found. The server may be misconfigured.",
            Self::Server { .. } => "Server error. Please try again later.",
            Self::Rejected { .. } | Self::Parse(_) => "Please try again.",
        };
        format!("{}{}", APOLOGY, hint)
    }
}

/// Failure to bind the chat widget to the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("chat element #{0} not found")]
    MissingElement(String),
}
