// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "register a member") lives in domain activities that
// use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMailer)

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domains::member::Member;

// =============================================================================
// Member Store Trait (Infrastructure - persistence)
// =============================================================================

/// Keyed collection of member records.
///
/// Point reads/writes by id plus attribute-equality search. Callers assume
/// read-after-write consistency on the same key.
#[async_trait]
pub trait BaseMemberStore: Send + Sync {
    /// Insert a new record, returning the stored row.
    async fn insert(&self, member: &Member) -> Result<Member>;

    /// Point read by id.
    async fn get(&self, id: Uuid) -> Result<Option<Member>>;

    /// Overwrite the full record under its id.
    async fn update(&self, member: &Member) -> Result<Member>;

    /// All records matching every supplied attribute (logical AND).
    async fn find_by_attributes(
        &self,
        discord_id: Option<&str>,
        minecraft_username: Option<&str>,
    ) -> Result<Vec<Member>>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Mailer Trait (Infrastructure - transactional email)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send the templated welcome email to one recipient.
    async fn send_welcome_email(
        &self,
        recipient: &str,
        recipient_name: &str,
        template_data: Value,
    ) -> Result<()>;
}

// =============================================================================
// Whitelist Trait (Infrastructure - game server access list)
// =============================================================================

#[async_trait]
pub trait BaseWhitelistService: Send + Sync {
    /// Ask the game server to whitelist an in-game username.
    async fn add_player(&self, minecraft_username: &str) -> Result<()>;
}
