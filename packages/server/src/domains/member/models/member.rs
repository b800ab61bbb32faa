use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Shown in emails for optional fields the member did not supply.
/// Never persisted.
pub const PLACEHOLDER: &str = "N/A";

/// Member model - SQL persistence layer
///
/// One row per person. `verification_code` and `is_verified` are written by
/// the registration workflow after the row is inserted; `discord_id` is set
/// only when a verification code is redeemed.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,

    // Contact details. At least one of email/unsw_id is non-empty once a
    // record has passed registration.
    pub email: Option<String>,
    pub unsw_id: Option<String>,

    pub discord_username: Option<String>,
    pub minecraft_username: Option<String>,

    // Verification state
    pub discord_id: Option<String>,
    pub is_verified: bool,
    pub verification_code: Option<String>,

    /// Caller-supplied signup timestamp, stored verbatim.
    pub timestamp: String,

    pub created_at: DateTime<Utc>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Member {
    /// Whether the record carries any deliverable address.
    pub fn has_contact(&self) -> bool {
        self.contact_email().is_some()
    }

    /// Institutional address derived from `unsw_id`, if one is present.
    pub fn unsw_email(&self) -> Option<String> {
        non_empty(self.unsw_id.as_deref()).map(|id| format!("{}@ad.unsw.edu.au", id))
    }

    /// Address the welcome email is delivered to.
    ///
    /// An institutional id takes precedence over `email` for delivery; the
    /// stored `email` field is left untouched either way.
    pub fn contact_email(&self) -> Option<String> {
        self.unsw_email()
            .or_else(|| non_empty(self.email.as_deref()).map(str::to_string))
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Find member by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new member
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO members (
                id,
                first_name,
                last_name,
                email,
                unsw_id,
                discord_username,
                minecraft_username,
                discord_id,
                is_verified,
                verification_code,
                timestamp
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.email)
        .bind(&self.unsw_id)
        .bind(&self.discord_username)
        .bind(&self.minecraft_username)
        .bind(&self.discord_id)
        .bind(self.is_verified)
        .bind(&self.verification_code)
        .bind(&self.timestamp)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Overwrite the full record under its id
    pub async fn update(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE members SET
                first_name = $2,
                last_name = $3,
                email = $4,
                unsw_id = $5,
                discord_username = $6,
                minecraft_username = $7,
                discord_id = $8,
                is_verified = $9,
                verification_code = $10,
                timestamp = $11
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.email)
        .bind(&self.unsw_id)
        .bind(&self.discord_username)
        .bind(&self.minecraft_username)
        .bind(&self.discord_id)
        .bind(self.is_verified)
        .bind(&self.verification_code)
        .bind(&self.timestamp)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All records matching every supplied attribute (logical AND)
    pub async fn find_by_attributes(
        discord_id: Option<&str>,
        minecraft_username: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let members = match (discord_id, minecraft_username) {
            (Some(d), Some(m)) => {
                sqlx::query_as::<_, Self>(
                    "SELECT * FROM members
                     WHERE discord_id = $1 AND minecraft_username = $2
                     ORDER BY created_at",
                )
                .bind(d)
                .bind(m)
                .fetch_all(pool)
                .await?
            }
            (Some(d), None) => {
                sqlx::query_as::<_, Self>(
                    "SELECT * FROM members WHERE discord_id = $1 ORDER BY created_at",
                )
                .bind(d)
                .fetch_all(pool)
                .await?
            }
            (None, Some(m)) => {
                sqlx::query_as::<_, Self>(
                    "SELECT * FROM members WHERE minecraft_username = $1 ORDER BY created_at",
                )
                .bind(m)
                .fetch_all(pool)
                .await?
            }
            // Zero predicates match everything.
            (None, None) => {
                sqlx::query_as::<_, Self>("SELECT * FROM members ORDER BY created_at")
                    .fetch_all(pool)
                    .await?
            }
        };

        Ok(members)
    }
}
