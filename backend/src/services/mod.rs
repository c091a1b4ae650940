//! Business logic services for the SmartYield server

pub mod reference;
pub mod session;
pub mod workspace;

pub use reference::ReferenceService;
pub use session::{SessionService, SessionStatus};
pub use workspace::{with_fallback, WorkspaceOutcome, WorkspaceService};
