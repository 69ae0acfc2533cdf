use thiserror::Error;

/// Core error type for table operations
#[derive(Error, Debug)]
pub enum TableError {
    /// IO errors from file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow errors from Arrow operations
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    /// Parquet format errors
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Schema-related errors
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid argument errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unsupported operation errors
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Internal errors that shouldn't happen
    #[error("Internal error: {0}")]
    Internal(String),

    /// UTF-8 decoding errors
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A failure wrapped with what the caller was doing at the time
    #[error("{0}: {1}")]
    Context(String, #[source] Box<TableError>),
}

/// Result type alias for table operations
pub type Result<T> = std::result::Result<T, TableError>;

impl TableError {
    /// Create a new schema error
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        TableError::Schema(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TableError::InvalidArgument(msg.into())
    }

    /// Create a new unsupported operation error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        TableError::Unsupported(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        TableError::Internal(msg.into())
    }
}

/// Extension trait to add context to errors
pub trait ErrorContext<T> {
    /// Add context with a closure that's only called on error
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<TableError>,
{
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T> {
        self.map_err(|e| TableError::Context(f().into(), Box::new(e.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TableError::schema("mismatched schemas");
        assert_eq!(err.to_string(), "Schema error: mismatched schemas");

        let err = TableError::invalid_argument("negative offset");
        assert_eq!(err.to_string(), "Invalid argument: negative offset");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: TableError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_with_context() {
        fn failing_operation() -> Result<()> {
            let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
            Err(io_err.into())
        }

        let filename = "data.feather";
        let result = failing_operation().with_context(|| format!("opening {}", filename));

        assert!(result.is_err());
        let err = result.unwrap_err();
        // the wrapped error keeps its own message in the chain
        assert!(err.to_string().contains("opening data.feather"));
        assert!(err.to_string().contains("IO error"));
    }
}
