//! Domain models for the SmartYield workspace

mod advice;
mod crop;
mod farmer;
mod lifecycle;
mod prediction;
mod reference;
mod weather;

pub use advice::*;
pub use crop::*;
pub use farmer::*;
pub use lifecycle::*;
pub use prediction::*;
pub use reference::*;
pub use weather::*;
