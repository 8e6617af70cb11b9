//! Shared items related to user account control

mod responses;
mod role;
mod user;

pub use responses::{LoginResponse, MessageResponse};
pub use role::Role;
pub use user::{UserProfile, UserProfileDiff, Username};
