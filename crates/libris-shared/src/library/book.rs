use crate::id::DbId;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    pub publication_year: i32,
    pub copies_available: i64,
    pub total_copies: i64,
    pub location: String,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.copies_available > 0
    }
}
