//! Member REST API handlers
//!
//! Every handler except `health` re-verifies the caller's token; writes
//! additionally require ADMIN.

use crate::{AppState, CreateMemberRequest, MemberResponse, MemberSummary, UpdateMemberRequest};

use ms_auth::hash_password;
use ms_core::{ADMIN_ROLE, MemberStatus, NewMember, USER_ROLE};
use ms_web::{ApiError, ApiResult, Authenticated, Page, PageQuery};

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

const READ_ROLES: &[&str] = &[ADMIN_ROLE, USER_ROLE];

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    payload: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MemberResponse>)> {
    user.require_role(ADMIN_ROLE)?;
    let Json(req) = payload?;
    req.validate()?;

    let username = req.username.trim().to_string();
    let email = req.email.trim().to_string();
    log::info!("Creating member {} requested by {}", username, user.username);

    if state.members.exists_by_username(&username).await? {
        return Err(ApiError::conflict(format!(
            "Username already exists: {}",
            username
        )));
    }
    if state.members.exists_by_email(&email).await? {
        return Err(ApiError::conflict(format!("Email already exists: {}", email)));
    }

    // bcrypt is CPU-bound
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("password hashing task failed: {}", e)))??;

    // A concurrent insert of the same username/email surfaces as DbError::Conflict
    let member = state
        .members
        .create(&NewMember {
            username,
            password_hash,
            email,
            full_name: req.full_name,
            phone_number: req.phone_number,
            status: MemberStatus::Active,
        })
        .await?;

    log::info!("Created member {} with ID {}", member.username, member.id);
    Ok((StatusCode::CREATED, Json(member.into())))
}

/// GET /members?page=&size=
pub async fn list_members(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Page<MemberSummary>>> {
    user.require_any_role(READ_ROLES)?;
    let Query(page) = query?;
    page.validate()?;

    let members = state.members.find_page(page.page, page.size).await?;
    let total = state.members.count().await?;

    Ok(Json(
        Page::new(members, page, total).map(MemberSummary::from),
    ))
}

/// GET /members/all
pub async fn list_all_members(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> ApiResult<Json<Vec<MemberSummary>>> {
    user.require_any_role(READ_ROLES)?;

    let members = state.members.find_all().await?;
    Ok(Json(members.into_iter().map(MemberSummary::from).collect()))
}

/// GET /members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> ApiResult<Json<MemberResponse>> {
    user.require_any_role(READ_ROLES)?;

    let member = state
        .members
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member not found: ID {}", id)))?;

    Ok(Json(member.into()))
}

/// GET /members/username/{username}
pub async fn get_member_by_username(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(username): Path<String>,
) -> ApiResult<Json<MemberResponse>> {
    user.require_any_role(READ_ROLES)?;

    let member = state
        .members
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member not found: username {}", username)))?;

    Ok(Json(member.into()))
}

/// GET /members/status/{status}
pub async fn list_members_by_status(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<MemberSummary>>> {
    user.require_any_role(READ_ROLES)?;
    let status: MemberStatus = status.parse()?;

    let members = state.members.find_by_status(status).await?;
    Ok(Json(members.into_iter().map(MemberSummary::from).collect()))
}

/// GET /members/search?name=
pub async fn search_members(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<MemberSummary>>> {
    user.require_any_role(READ_ROLES)?;
    let Query(NameQuery { name }) = query?;

    let members = state.members.search_by_name(&name).await?;
    Ok(Json(members.into_iter().map(MemberSummary::from).collect()))
}

/// PUT /members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateMemberRequest>, JsonRejection>,
) -> ApiResult<Json<MemberResponse>> {
    user.require_role(ADMIN_ROLE)?;
    let Json(req) = payload?;
    let update = req.into_update()?;

    let member = state
        .members
        .update(id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member not found: ID {}", id)))?;

    log::info!("Updated member {} by {}", id, user.username);
    Ok(Json(member.into()))
}

/// DELETE /members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    user.require_role(ADMIN_ROLE)?;

    if !state.members.delete(id).await? {
        return Err(ApiError::not_found(format!("Member not found: ID {}", id)));
    }

    log::info!("Deleted member {} by {}", id, user.username);
    Ok(Json(json!({
        "message": "Member deleted successfully",
        "memberId": id.to_string(),
    })))
}

/// GET /members/stats/active-count
pub async fn active_member_count(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
) -> ApiResult<Json<Value>> {
    user.require_any_role(READ_ROLES)?;

    let count = state.members.count_active().await?;
    Ok(Json(json!({ "activeCount": count })))
}

/// GET /members/health
pub async fn health() -> Json<Value> {
    Json(ms_web::health_body("member-service"))
}
