//! External API integrations

pub mod smartyield;

pub use smartyield::{ForwardedResponse, UpstreamError, YieldApi, YieldApiClient};
