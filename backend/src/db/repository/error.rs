//! Error types for reading store operations.
//!
//! Every variant carries an [`ErrorContext`] describing which store operation
//! failed and whether retrying it can help.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context attached to a [`RepositoryError`].
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Store operation being performed (e.g. "insert_many", "query_non_null")
    pub operation: Option<String>,
    /// Entity involved, usually "reading"
    pub entity: Option<String>,
    /// Position of the offending item within a batch, if any
    pub index: Option<usize>,
    /// Free-form details
    pub details: Option<String>,
    /// Whether the failed operation may succeed if repeated
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(index) = self.index {
            parts.push(format!("index={}", index));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Pool or connection failure; usually transient.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// Query execution failure.
    #[error("Query error: {message} {context}")]
    QueryError {
        message: String,
        context: ErrorContext,
    },

    /// A batch was rejected before anything was written.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// A write transaction failed to commit.
    #[error("Transaction error: {message} {context}")]
    TransactionError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::connection_with_context(message, ErrorContext::default())
    }

    /// Connection errors are always retryable.
    pub fn connection_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: context.retryable(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::query_with_context(message, ErrorContext::default())
    }

    pub fn query_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::QueryError {
            message: message.into(),
            context,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::validation_with_context(message, ErrorContext::default())
    }

    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ValidationError {
            message: message.into(),
            context,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::TransactionError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::internal_with_context(message, ErrorContext::default())
    }

    pub fn internal_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::InternalError {
            message: message.into(),
            context,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    /// Whether the caller supplied bad data (as opposed to a store failure).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::TransactionError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Set the operation name in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::TransactionError { context, .. }
            | Self::InternalError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(kind, info) => {
                let context =
                    ErrorContext::default().with_details(format!("db_error_kind={:?}", kind));
                // Serialization failures succeed when the transaction is replayed.
                let context = if matches!(
                    kind,
                    diesel::result::DatabaseErrorKind::SerializationFailure
                ) {
                    context.retryable()
                } else {
                    context
                };
                RepositoryError::QueryError {
                    message: info.message().to_string(),
                    context,
                }
            }
            diesel::result::Error::RollbackTransaction => {
                RepositoryError::transaction("Transaction rolled back")
            }
            diesel::result::Error::DeserializationError(e) => {
                RepositoryError::internal(format!("Deserialization error: {}", e))
            }
            diesel::result::Error::SerializationError(e) => {
                RepositoryError::internal(format!("Serialization error: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection_with_context(
            err.to_string(),
            ErrorContext::default().with_details("pool_error"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_retryable() {
        assert!(RepositoryError::connection("down").is_retryable());
        assert!(!RepositoryError::validation("bad").is_retryable());
    }

    #[test]
    fn test_context_display() {
        let err = RepositoryError::validation_with_context(
            "non-finite humidity",
            ErrorContext::new("insert_many").with_entity("reading").with_index(4),
        );
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Data validation error: non-finite humidity [operation=insert_many, entity=reading, index=4]"
        );
    }

    #[test]
    fn test_with_operation_overrides_context() {
        let err = RepositoryError::internal("boom").with_operation("count");
        assert_eq!(err.context().operation.as_deref(), Some("count"));
    }
}
