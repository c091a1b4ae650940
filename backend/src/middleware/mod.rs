//! Request extractors and middleware

pub mod session;

pub use session::CurrentSession;
