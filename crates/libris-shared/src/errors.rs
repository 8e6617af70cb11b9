#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
    #[error("Minimum length not met. {min} required but found {actual}")]
    MinNotMet { min: usize, actual: usize },
    #[error("Invalid format: {0}")]
    InvalidFormat(&'static str),
}

/// Request arguments rejected before being sent
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct InvalidArgsError {
    pub field: &'static str,
    pub reason: ConversionError,
}

impl InvalidArgsError {
    pub fn new(field: &'static str, reason: ConversionError) -> Self {
        Self { field, reason }
    }
}
