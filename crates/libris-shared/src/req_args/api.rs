use crate::{
    errors::{ConversionError, InvalidArgsError},
    req_args::validate_length,
};

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone)]
pub struct BookSearchReqArgs {
    /// Matched case-insensitively against title and author, empty lists all
    pub search: String,
}

/// The editable fields of a book, used to add and update
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    pub publication_year: i32,
    pub total_copies: i64,
    pub location: String,
}

impl BookDraft {
    pub fn validate(&self) -> Result<(), InvalidArgsError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("isbn", &self.isbn),
            ("publisher", &self.publisher),
            ("location", &self.location),
        ] {
            validate_length(field, value, 1, usize::MAX)?;
        }
        if self.publication_year < 0 {
            return Err(InvalidArgsError::new(
                "publication_year",
                ConversionError::InvalidFormat("publication year cannot be negative"),
            ));
        }
        if self.total_copies < 1 {
            return Err(InvalidArgsError::new(
                "total_copies",
                ConversionError::InvalidFormat("total copies must be at least 1"),
            ));
        }
        Ok(())
    }
}
