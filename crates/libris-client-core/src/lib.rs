//! Stores functionality that should be shared between different clients of the
//! library backend: the persisted session, the authenticated request client
//! and the navigation guard.
//!
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;
mod errors;
pub mod navigation;
mod session;
pub mod storage;

pub use client::{Client, LoginOutcome, UiCallBack, NO_ARGUMENT};
pub use errors::{ResponseError, SessionError};
pub use navigation::{GuardDecision, Navigation, View};
pub use session::{Session, SessionStore};
