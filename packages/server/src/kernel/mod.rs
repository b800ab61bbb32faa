//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod member_store;
pub mod test_dependencies;
pub mod traits;
pub mod whitelist_client;

pub use deps::{SendGridAdapter, ServerDeps};
pub use member_store::PgMemberStore;
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use whitelist_client::WhitelistClient;
