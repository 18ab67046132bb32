use thiserror::Error;

/// costsheet error types
#[derive(Error, Debug)]
pub enum ReportError {
    /// The external cost-diff source failed for an account
    #[allow(dead_code)] // Constructed by source implementations
    #[error("cost source failed for account {account}: {message}")]
    DataSource { account: String, message: String },

    /// A raw data point's timestamp did not match the expected format
    #[error("invalid timestamp {raw:?} for account {account}: {source}")]
    TimestampParse {
        account: String,
        raw: String,
        source: chrono::ParseError,
    },

    /// Internal invariant violation while describing cells
    #[error("layout error: {0}")]
    Layout(String),

    /// Spreadsheet backend error
    #[error("sheet error: {0}")]
    Sheet(#[from] rust_xlsxwriter::XlsxError),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input document
    #[error("input error: {0}")]
    Input(String),
}

/// Result type alias for costsheet
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::DataSource {
            account: "111111111111".into(),
            message: "query timed out".into(),
        };
        assert_eq!(
            err.to_string(),
            "cost source failed for account 111111111111: query timed out"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReportError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_timestamp_parse_display_carries_context() {
        let parse_err =
            chrono::NaiveDateTime::parse_from_str("bogus", "%Y-%m-%dT%H:%M:%S%.3fZ").unwrap_err();
        let err = ReportError::TimestampParse {
            account: "222222222222".into(),
            raw: "bogus".into(),
            source: parse_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("222222222222"));
        assert!(msg.contains("bogus"));
    }
}
