use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Column '{requested}' not found. Available: {available:?}")]
    MissingColumn {
        requested: String,
        available: Vec<String>,
    },

    #[error("Dataset is empty, nothing to analyze")]
    EmptyDataset,

    #[error("Row {row} has no value for column '{column}'")]
    MalformedRow { row: usize, column: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors the caller can fix by changing the input or settings.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Error::MissingColumn { .. }
                | Error::MalformedRow { .. }
                | Error::EmptyDataset
                | Error::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_lists_available() {
        let err = Error::MissingColumn {
            requested: "comment".to_string(),
            available: vec!["feedback".to_string(), "rating".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("'comment'"));
        assert!(message.contains("feedback"));
        assert!(message.contains("rating"));
        assert!(err.is_user_correctable());
    }

    #[test]
    fn test_io_is_not_user_correctable() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!err.is_user_correctable());
    }
}
