use super::{Fine, Loan};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct PopularBook {
    pub title: String,
    pub count: u64,
}

/// Circulation summary available to librarians
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Report {
    pub total_books: u64,
    pub total_loans: u64,
    /// Sum of fines already paid
    pub total_fines: f64,
    pub overdue_loans: Vec<Loan>,
    pub unpaid_fines: Vec<Fine>,
    pub most_popular_books: Vec<PopularBook>,
}
