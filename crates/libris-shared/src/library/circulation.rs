use chrono::NaiveDateTime;

use crate::id::DbId;

/// Minimal user reference embedded in loans and fines
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Loan {
    pub id: DbId,
    pub user_id: DbId,
    pub user: UserSummary,
    pub book_id: DbId,
    pub book_title: String,
    pub due_date: NaiveDateTime,
    pub return_date: Option<NaiveDateTime>,
}

impl Loan {
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.return_date.is_none() && self.due_date < now
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Hold {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub hold_date: NaiveDateTime,
    pub book_title: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Fine {
    pub id: DbId,
    pub user_id: DbId,
    pub user: UserSummary,
    pub amount: f64,
    pub description: String,
    pub paid: bool,
}
