//! Error type shared by the tally library crates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    /// User-entered amount is not a finite decimal number
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Keyword table or settings rejected
    #[error("configuration error: {0}")]
    Config(String),

    #[error("import error: {0}")]
    Import(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl TallyError {
    pub fn invalid_date(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::InvalidAmount(_))
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for TallyError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

pub type TallyResult<T> = Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_display() {
        let err = TallyError::InvalidAmount("abc".into());
        assert_eq!(err.to_string(), "invalid amount: 'abc'");
        assert!(err.is_invalid_amount());
    }

    #[test]
    fn test_invalid_date_display() {
        let err = TallyError::invalid_date("2026-13-01", "input is out of range");
        assert_eq!(
            err.to_string(),
            "invalid date '2026-13-01': input is out of range"
        );
        assert!(!err.is_invalid_amount());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TallyError = io_err.into();
        assert!(matches!(err, TallyError::Io(_)));
    }
}
