//! Member domain - registration, verification, and lookup of club members.

pub mod activities;
pub mod models;

// Re-export commonly used types
pub use models::member::Member;
