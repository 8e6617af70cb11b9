//! Records served by the library backend

mod book;
mod circulation;
mod report;

pub use book::Book;
pub use circulation::{Fine, Hold, Loan, UserSummary};
pub use report::{PopularBook, Report};

use crate::uac::UserProfile;

/// Response of the dashboard endpoint, also used to fetch the profile after
/// login
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Dashboard {
    pub user: UserProfile,
    /// Loans not yet returned
    #[serde(default)]
    pub loans: Vec<Loan>,
    /// Fines not yet paid
    #[serde(default)]
    pub fines: Vec<Fine>,
}

impl Dashboard {
    pub fn outstanding_fines_total(&self) -> f64 {
        self.fines
            .iter()
            .filter(|fine| !fine.paid)
            .map(|fine| fine.amount)
            .sum()
    }
}
