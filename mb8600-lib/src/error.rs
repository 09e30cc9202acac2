use thiserror::Error;

/// The primary error type for the `mb8600-lib` library.
#[derive(Error, Debug)]
pub enum HnapError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Failed to initialize HTTP client: {0}")]
    Init(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid signing key: {0}")]
    Key(String),

    #[error("Failed to serialize request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Action {action} received non-OK status code: {status}")]
    NonOkStatus { action: String, status: u16 },

    #[error("Malformed response to {action}: {source}")]
    MalformedResponse {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No response from modem for {0}")]
    NoResponse(String),

    #[error("Login failed during {0} phase")]
    LoginFailed(crate::auth::LoginPhase),

    #[error("Malformed record {record:?}: {message}")]
    MalformedRecord { record: String, message: String },
}

impl HnapError {
    pub(crate) fn malformed_record(record: &str, message: impl Into<String>) -> Self {
        HnapError::MalformedRecord {
            record: record.to_string(),
            message: message.into(),
        }
    }
}
