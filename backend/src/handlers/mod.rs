//! HTTP handlers

pub mod health;
pub mod proxy;
pub mod workspace;

pub use health::health_check;
pub use proxy::proxy;
