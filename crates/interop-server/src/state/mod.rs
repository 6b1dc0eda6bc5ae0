//! Shared application state.

pub mod session;
pub mod store;

pub use session::AuthenticatedUser;
pub use store::AppState;
