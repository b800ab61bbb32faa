// Club Member Onboarding - API Core
//
// This crate provides the backend API for onboarding new club members:
// recording signups, emailing verification codes, whitelisting minecraft
// usernames on the game server, and verifying codes submitted via Discord.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
