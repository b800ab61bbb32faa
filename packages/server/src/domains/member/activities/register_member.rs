//! Register member workflow - runs once per newly inserted member record.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domains::member::models::member::{Member, PLACEHOLDER};
use crate::kernel::ServerDeps;

/// Complete onboarding for a newly inserted member record.
///
/// Reads the record, assigns its verification code, fires the whitelist
/// notification (best-effort, detached), then sends the welcome email. The
/// email send is the only awaited side effect; its failure is the failure of
/// the whole invocation. The code assignment has already been committed by
/// then, so a failed send leaves the member registered but unnotified.
pub async fn register_member(member_id: Uuid, deps: &ServerDeps) -> Result<()> {
    info!("Registering member: {}", member_id);

    let member = deps
        .store
        .get(member_id)
        .await?
        .with_context(|| format!("member {} not found", member_id))?;

    // Without a deliverable address the workflow cannot proceed.
    if !member.has_contact() {
        bail!("member {} has neither email nor unsw_id", member_id);
    }

    // Assigned once, never regenerated.
    let member = Member {
        is_verified: false,
        verification_code: Some(Uuid::new_v4().to_string()),
        ..member
    };
    let member = deps.store.update(&member).await?;

    if let Some(minecraft_username) = member
        .minecraft_username
        .as_deref()
        .filter(|u| !u.is_empty())
    {
        notify_whitelist(minecraft_username.to_string(), deps);
    }

    let recipient = member
        .contact_email()
        .context("member has no deliverable address")?;
    deps.mailer
        .send_welcome_email(&recipient, &member.full_name(), welcome_email_data(&member))
        .await
        .context("welcome email send failed")?;

    info!("Member registered successfully: {}", member.id);

    Ok(())
}

/// Spawn the whitelist call on a detached task; the outcome is only logged.
fn notify_whitelist(minecraft_username: String, deps: &ServerDeps) {
    let Some(whitelist) = deps.whitelist.clone() else {
        debug!(
            "No whitelist server configured, skipping {}",
            minecraft_username
        );
        return;
    };

    tokio::spawn(async move {
        if let Err(e) = whitelist.add_player(&minecraft_username).await {
            error!(error = %e, "Whitelist notification failed for {}", minecraft_username);
        }
    });
}

/// Personalization payload for the welcome email template.
///
/// Optional fields the member did not supply render as the placeholder so the
/// template never shows an empty slot.
pub fn welcome_email_data(member: &Member) -> Value {
    json!({
        "user_id": member.id.to_string(),
        "first_name": member.first_name,
        "last_name": member.last_name,
        "email": member.email.as_deref().filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER),
        "unsw_email": member.unsw_email().unwrap_or_else(|| PLACEHOLDER.to_string()),
        "discord_username": member.discord_username.as_deref().filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER),
        "minecraft_username": member.minecraft_username.as_deref().filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER),
        "verification_code": member.verification_code.as_deref().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::TestDependencies;
    use chrono::Utc;
    use std::time::Duration;

    fn bare_member(email: Option<&str>, unsw_id: Option<&str>) -> Member {
        Member {
            id: Uuid::new_v4(),
            first_name: "Alex".to_string(),
            last_name: "Nguyen".to_string(),
            email: email.map(str::to_string),
            unsw_id: unsw_id.map(str::to_string),
            discord_username: None,
            minecraft_username: None,
            discord_id: None,
            is_verified: false,
            verification_code: None,
            timestamp: "2024-03-01T10:00:00Z".to_string(),
            created_at: Utc::now(),
        }
    }

    async fn wait_for_whitelist(deps: &TestDependencies, name: &str) -> bool {
        for _ in 0..100 {
            if deps.whitelist.was_whitelisted(name) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        false
    }

    #[tokio::test]
    async fn assigns_code_and_sends_welcome_email() {
        let deps = TestDependencies::new();
        let member = bare_member(Some("alex@example.com"), None);
        deps.store.seed(member.clone());

        register_member(member.id, &deps.server_deps()).await.unwrap();

        let stored = deps.store.all().into_iter().next().unwrap();
        assert!(!stored.is_verified);
        assert!(stored.verification_code.is_some());

        let sent = deps.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "alex@example.com");
        assert_eq!(sent[0].recipient_name, "Alex Nguyen");
        assert_eq!(
            sent[0].template_data["verification_code"],
            stored.verification_code.unwrap()
        );
    }

    #[tokio::test]
    async fn unsw_id_derives_delivery_address() {
        let deps = TestDependencies::new();
        let member = bare_member(Some("alex@example.com"), Some("z5555555"));
        deps.store.seed(member.clone());

        register_member(member.id, &deps.server_deps()).await.unwrap();

        let sent = deps.mailer.sent();
        assert_eq!(sent[0].recipient, "z5555555@ad.unsw.edu.au");
        // Stored email field is unmodified.
        let stored = deps.store.all().into_iter().next().unwrap();
        assert_eq!(stored.email.as_deref(), Some("alex@example.com"));
    }

    #[tokio::test]
    async fn fails_without_contact_info_and_sends_nothing() {
        let deps = TestDependencies::new();
        let member = bare_member(None, None);
        deps.store.seed(member.clone());

        let result = register_member(member.id, &deps.server_deps()).await;

        assert!(result.is_err());
        assert!(deps.mailer.sent().is_empty());
        assert!(deps.whitelist.calls().is_empty());
    }

    #[tokio::test]
    async fn whitelists_minecraft_username_without_blocking() {
        let deps = TestDependencies::new();
        let member = Member {
            minecraft_username: Some("AlexCraft".to_string()),
            ..bare_member(Some("alex@example.com"), None)
        };
        deps.store.seed(member.clone());

        register_member(member.id, &deps.server_deps()).await.unwrap();

        assert!(wait_for_whitelist(&deps, "AlexCraft").await);
    }

    #[tokio::test]
    async fn whitelist_failure_does_not_fail_registration() {
        let deps = TestDependencies::new();
        deps.whitelist.fail_next();
        let member = Member {
            minecraft_username: Some("AlexCraft".to_string()),
            ..bare_member(Some("alex@example.com"), None)
        };
        deps.store.seed(member.clone());

        register_member(member.id, &deps.server_deps()).await.unwrap();

        assert_eq!(deps.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn email_failure_leaves_member_registered_but_unnotified() {
        let deps = TestDependencies::failing_mailer();
        let member = bare_member(Some("alex@example.com"), None);
        deps.store.seed(member.clone());

        let result = register_member(member.id, &deps.server_deps()).await;

        assert!(result.is_err());
        // The code assignment was committed before the send failed.
        let stored = deps.store.all().into_iter().next().unwrap();
        assert!(stored.verification_code.is_some());
        assert!(!stored.is_verified);
    }

    #[test]
    fn payload_uses_placeholders_for_missing_fields() {
        let member = bare_member(Some("alex@example.com"), None);
        let data = welcome_email_data(&member);

        assert_eq!(data["email"], "alex@example.com");
        assert_eq!(data["unsw_email"], PLACEHOLDER);
        assert_eq!(data["discord_username"], PLACEHOLDER);
        assert_eq!(data["minecraft_username"], PLACEHOLDER);
        assert_eq!(data["user_id"], member.id.to_string());
    }

    #[test]
    fn payload_carries_both_addresses_when_present() {
        let member = Member {
            discord_username: Some("alex#1234".to_string()),
            minecraft_username: Some("AlexCraft".to_string()),
            verification_code: Some("code-1".to_string()),
            ..bare_member(Some("alex@example.com"), Some("z5555555"))
        };
        let data = welcome_email_data(&member);

        assert_eq!(data["email"], "alex@example.com");
        assert_eq!(data["unsw_email"], "z5555555@ad.unsw.edu.au");
        assert_eq!(data["discord_username"], "alex#1234");
        assert_eq!(data["minecraft_username"], "AlexCraft");
        assert_eq!(data["verification_code"], "code-1");
    }
}
