//! PostgreSQL-backed member store.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::BaseMemberStore;
use crate::domains::member::Member;

/// Member store over the `members` table (implements BaseMemberStore)
#[derive(Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseMemberStore for PgMemberStore {
    async fn insert(&self, member: &Member) -> Result<Member> {
        member.insert(&self.pool).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Member>> {
        Member::find_by_id(id, &self.pool).await
    }

    async fn update(&self, member: &Member) -> Result<Member> {
        member.update(&self.pool).await
    }

    async fn find_by_attributes(
        &self,
        discord_id: Option<&str>,
        minecraft_username: Option<&str>,
    ) -> Result<Vec<Member>> {
        Member::find_by_attributes(discord_id, minecraft_username, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
