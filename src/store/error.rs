use std::fmt;

use tokio_postgres::error::SqlState;

/// Result type for chat store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for chat store operations
#[derive(Debug)]
pub enum StoreError {
    /// Validation error - invalid input data
    ValidationError(String),

    /// Connection error - database unreachable or authentication failure
    ConnectionError(String),

    /// Not found error - session doesn't exist
    NotFoundError(String),

    /// Database error - SQL errors, constraint violations
    DatabaseError(String),

    /// Pool error - connection pool issues
    PoolError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            StoreError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            StoreError::NotFoundError(msg) => write!(f, "Not found: {}", msg),
            StoreError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            StoreError::PoolError(msg) => write!(f, "Pool error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            // A message pointing at a missing session trips the foreign key
            if db_error.code() == &SqlState::FOREIGN_KEY_VIOLATION {
                return StoreError::NotFoundError(
                    db_error
                        .detail()
                        .unwrap_or("referenced chat session does not exist")
                        .to_string(),
                );
            }

            return StoreError::DatabaseError(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }

        if err.is_closed() {
            return StoreError::ConnectionError(err.to_string());
        }

        StoreError::DatabaseError(err.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::PoolError(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::ConnectionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StoreError::NotFoundError("chat session 42".to_string());
        assert_eq!(err.to_string(), "Not found: chat session 42");

        let err = StoreError::ValidationError("bad url".to_string());
        assert_eq!(err.to_string(), "Validation error: bad url");
    }
}
