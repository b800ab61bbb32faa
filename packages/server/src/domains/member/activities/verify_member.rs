//! Verify member - redeem an emailed verification code.

use anyhow::Result;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domains::member::Member;
use crate::kernel::ServerDeps;

/// Redeem a verification code for a member.
///
/// Returns `None` when no record exists under `member_id`, otherwise the
/// member's verification status after the attempt. An already-verified
/// member short-circuits without re-checking the code; a wrong code changes
/// nothing and reports `false`.
pub async fn verify_member(
    member_id: Uuid,
    code: &str,
    discord_id: &str,
    deps: &ServerDeps,
) -> Result<Option<bool>> {
    let Some(member) = deps.store.get(member_id).await? else {
        return Ok(None);
    };

    if member.is_verified {
        debug!("Member {} already verified", member_id);
        return Ok(Some(true));
    }

    // Byte-for-byte comparison against the stored code.
    if member.verification_code.as_deref() != Some(code) {
        info!("Verification code mismatch for member {}", member_id);
        return Ok(Some(false));
    }

    let member = Member {
        is_verified: true,
        discord_id: Some(discord_id.to_string()),
        ..member
    };
    let member = deps.store.update(&member).await?;
    info!("Member verified: {}", member.id);

    Ok(Some(member.is_verified))
}
