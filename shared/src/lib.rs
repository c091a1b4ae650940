//! Shared types and models for the SmartYield advisory workspace
//!
//! This crate contains the domain model, validation, the offline estimator
//! and presentation helpers shared between the server and the WASM client.

pub mod estimator;
pub mod models;
pub mod presentation;
pub mod session;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
