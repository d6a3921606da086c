use thiserror::Error;

#[derive(Error, Debug)]
pub enum StandingsError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Improperly formatted CSV: {reason}")]
    FormatError { reason: String },

    #[error("Unable to determine custom field name in header row {row}")]
    SchemaError { row: usize },

    #[error("Cannot exclude '{group}', no such group")]
    ValidationError { group: String },

    #[error("Found {found} cars in group {group}: Expected {expected}")]
    GroupSizeError {
        found: usize,
        group: String,
        expected: usize,
    },

    #[error("Invalid {field} '{value}' in row {row}: {reason}")]
    ParseError {
        field: String,
        value: String,
        row: usize,
        reason: String,
    },

    #[error("Row {row} has no column {index} ({field})")]
    MissingColumnError {
        row: usize,
        index: usize,
        field: String,
    },

    #[error("Row {row} appears before any heat marker")]
    OrphanRowError { row: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Broad grouping used when logging a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Scoring,
    Configuration,
    System,
}

impl StandingsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StandingsError::FormatError { .. }
            | StandingsError::SchemaError { .. }
            | StandingsError::ParseError { .. }
            | StandingsError::MissingColumnError { .. }
            | StandingsError::OrphanRowError { .. }
            | StandingsError::CsvError(_) => ErrorCategory::Input,
            StandingsError::ValidationError { .. } | StandingsError::GroupSizeError { .. } => {
                ErrorCategory::Scoring
            }
            StandingsError::ConfigError { .. }
            | StandingsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            StandingsError::IoError(_) | StandingsError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub(crate) fn parse(field: &str, value: &str, row: usize, reason: impl ToString) -> Self {
        StandingsError::ParseError {
            field: field.to_string(),
            value: value.to_string(),
            row,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StandingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = StandingsError::ValidationError {
            group: "Tigers".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot exclude 'Tigers', no such group");

        let err = StandingsError::GroupSizeError {
            found: 2,
            group: "3".to_string(),
            expected: 1,
        };
        assert_eq!(err.to_string(), "Found 2 cars in group 3: Expected 1");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            StandingsError::SchemaError { row: 4 }.category(),
            ErrorCategory::Input
        );
        assert_eq!(
            StandingsError::ValidationError {
                group: "x".to_string()
            }
            .category(),
            ErrorCategory::Scoring
        );
        assert_eq!(
            StandingsError::ConfigError {
                message: "bad".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
    }
}
