//! User Accounts
//!
//! Persistence seam plus the HTTP handlers bound by the user route files.

pub mod handlers;
pub mod store;

// Re-export commonly used items
pub use handlers::{info, login, logout, register};
pub use store::{InMemoryUserStore, User, UserStore};
