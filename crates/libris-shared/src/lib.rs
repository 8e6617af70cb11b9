//! Code shared between the client core, its front-ends and the test backend

#![warn(unused_crate_dependencies)]


pub mod const_config;
pub mod errors;
pub mod id;
pub mod library;
pub mod req_args;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
