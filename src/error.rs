use thiserror::Error;

use crate::lifecycle::TicketAction;
use crate::types::TicketStatus;

#[derive(Error, Debug)]
pub enum BantayError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("action '{action}' is not permitted while ticket is {status}")]
    NotPermitted {
        action: TicketAction,
        status: TicketStatus,
    },

    #[error("ticket {0} not found")]
    TicketNotFound(u64),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid event type '{0}'")]
    InvalidEventType(String),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BantayError>;
