//! Member domain activities - business logic functions

mod register_member;
mod verify_member;

pub use register_member::{register_member, welcome_email_data};
pub use verify_member::verify_member;
