use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::domains::member::activities::{register_member, verify_member};
use crate::domains::member::Member;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub timestamp: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub unsw_id: Option<String>,
    pub discord_username: Option<String>,
    pub minecraft_username: Option<String>,
}

/// PUT /addUser
///
/// Inserts a new member record and kicks off the registration workflow on a
/// detached task. The response does not wait for the welcome email.
pub async fn add_user(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<AddUserRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let first_name = non_empty(body.first_name)
        .ok_or_else(|| ApiError::Validation("first_name is required".to_string()))?;
    let last_name = non_empty(body.last_name)
        .ok_or_else(|| ApiError::Validation("last_name is required".to_string()))?;
    let timestamp = body
        .timestamp
        .ok_or_else(|| ApiError::Validation("timestamp is required".to_string()))?;

    let email = non_empty(body.email);
    let unsw_id = non_empty(body.unsw_id);

    // Contact info is a precondition on the write: nothing is persisted for a
    // record that could never receive its welcome email.
    if email.is_none() && unsw_id.is_none() {
        return Err(ApiError::Validation(
            "one of email or unsw_id is required".to_string(),
        ));
    }

    let member = Member {
        id: Uuid::new_v4(),
        first_name,
        last_name,
        email,
        unsw_id,
        discord_username: non_empty(body.discord_username),
        minecraft_username: non_empty(body.minecraft_username),
        discord_id: None,
        is_verified: false,
        verification_code: None,
        timestamp,
        created_at: chrono::Utc::now(),
    };

    let member = state.deps.store.insert(&member).await?;
    info!("Member record created: {}", member.id);

    // The insert trigger: onboarding continues off the request path.
    let deps = state.deps.clone();
    let member_id = member.id;
    tokio::spawn(async move {
        if let Err(e) = register_member(member_id, &deps).await {
            error!(error = %e, "Registration workflow failed for member {}", member_id);
        }
    });

    Ok((StatusCode::OK, "OK"))
}

#[derive(Debug, Deserialize)]
pub struct VerifyUserRequest {
    pub user_id: Option<String>,
    pub verification_code: Option<String>,
    pub discord_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyUserResponse {
    pub is_verified: bool,
}

/// POST /verifyUser
///
/// Redeems an emailed verification code. Always answers with the member's
/// current verification status; a wrong code simply reports `false`.
pub async fn verify_user(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<VerifyUserRequest>,
) -> Result<Json<VerifyUserResponse>, ApiError> {
    let (Some(user_id), Some(code), Some(discord_id)) = (
        non_empty(body.user_id),
        non_empty(body.verification_code),
        non_empty(body.discord_id),
    ) else {
        return Err(ApiError::Validation(
            "user_id, verification_code and discord_id are required".to_string(),
        ));
    };

    // An id that doesn't parse can't name any record.
    let member_id = Uuid::parse_str(&user_id).map_err(|_| ApiError::UserNotFound)?;

    let is_verified = verify_member(member_id, &code, &discord_id, &state.deps)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(VerifyUserResponse { is_verified }))
}

#[derive(Debug, Deserialize)]
pub struct FindUserRequest {
    pub discord_id: Option<String>,
    pub minecraft_username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FindUserResponse {
    pub results: Vec<Member>,
}

/// POST /findUser
///
/// Returns every record matching all supplied attributes (logical AND).
pub async fn find_user(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<FindUserRequest>,
) -> Result<Json<FindUserResponse>, ApiError> {
    let discord_id = non_empty(body.discord_id);
    let minecraft_username = non_empty(body.minecraft_username);

    if discord_id.is_none() && minecraft_username.is_none() {
        return Err(ApiError::Validation(
            "at least one of discord_id or minecraft_username is required".to_string(),
        ));
    }

    let results = state
        .deps
        .store
        .find_by_attributes(discord_id.as_deref(), minecraft_username.as_deref())
        .await?;

    Ok(Json(FindUserResponse { results }))
}
