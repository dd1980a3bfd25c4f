use thiserror::Error;

/// The error taxonomy every backend operation reports. The server maps these onto HTTP statuses; nothing in the
/// engine retries automatically.
#[derive(Debug, Error)]
pub enum MarketGatewayError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("{0} was not found")]
    NotFound(String),
    #[error("Insufficient stock for: {}", items.join(", "))]
    InsufficientStock { items: Vec<String> },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid request: {0}")]
    ValidationError(String),
}

impl MarketGatewayError {
    pub fn not_found<S: std::fmt::Display>(what: S) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::ValidationError(msg.into())
    }
}
