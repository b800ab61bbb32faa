// Test fixtures

use chrono::Utc;
use server_core::domains::member::Member;
use uuid::Uuid;

/// A registered member mid-verification: code assigned, not yet verified.
pub fn unverified_member(code: &str) -> Member {
    Member {
        id: Uuid::new_v4(),
        first_name: "Alex".to_string(),
        last_name: "Nguyen".to_string(),
        email: Some("alex@example.com".to_string()),
        unsw_id: None,
        discord_username: Some("alex#1234".to_string()),
        minecraft_username: Some("AlexCraft".to_string()),
        discord_id: None,
        is_verified: false,
        verification_code: Some(code.to_string()),
        timestamp: "2024-03-01T10:00:00Z".to_string(),
        created_at: Utc::now(),
    }
}
