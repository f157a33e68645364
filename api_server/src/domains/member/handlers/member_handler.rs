use axum::{extract::{Path, State}, http::StatusCode, Json};
use crate::domains::member::models::{Member, MemberPatch, MemberResponse, OnboardingRequest};
use crate::shared::errors::MemberError;
use crate::shared::middleware::AuthenticatedMember;
use crate::shared::services::AppState;

/// 회원 목록
#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "All members", body = Vec<MemberResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Members"
)]
pub async fn list_members(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MemberResponse>>, (StatusCode, Json<serde_json::Value>)> {
    let members = app_state
        .member_state
        .member_service
        .list_members()
        .await
        .map_err(|e: MemberError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let mut responses = Vec::with_capacity(members.len());
    for member in &members {
        responses.push(to_response(&app_state, member).await?);
    }
    Ok(Json(responses))
}

/// 회원 조회
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(("id" = u64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Member not found")
    ),
    tag = "Members"
)]
pub async fn get_member(
    State(app_state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MemberResponse>, (StatusCode, Json<serde_json::Value>)> {
    let member = app_state
        .member_state
        .member_service
        .get_member(id)
        .await
        .map_err(|e: MemberError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(to_response(&app_state, &member).await?))
}

/// 내 정보 조회
/// Current member (from the access token)
#[utoipa::path(
    get,
    path = "/api/members/me",
    responses(
        (status = 200, description = "Current member", body = MemberResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Member no longer exists")
    ),
    security(("BearerAuth" = [])),
    tag = "Members"
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    authenticated: AuthenticatedMember,
) -> Result<Json<MemberResponse>, (StatusCode, Json<serde_json::Value>)> {
    get_member(State(app_state), Path(authenticated.member_id)).await
}

/// 회원 부분 수정
/// Partial update; omitted fields keep their values
#[utoipa::path(
    patch,
    path = "/api/members/{id}",
    params(("id" = u64, Path, description = "Member ID")),
    request_body = MemberPatch,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Nickname already in use")
    ),
    tag = "Members"
)]
pub async fn patch_member(
    State(app_state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<MemberPatch>,
) -> Result<Json<MemberResponse>, (StatusCode, Json<serde_json::Value>)> {
    let member = app_state
        .member_state
        .member_service
        .patch_member(id, patch)
        .await
        .map_err(|e: MemberError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(to_response(&app_state, &member).await?))
}

/// 회원 삭제 (온보딩 카테고리, 티켓 함께 삭제)
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(("id" = u64, Path, description = "Member ID")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found")
    ),
    tag = "Members"
)]
pub async fn delete_member(
    State(app_state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .member_state
        .member_service
        .delete_member(id)
        .await
        .map_err(|e: MemberError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(StatusCode::NO_CONTENT)
}

/// 온보딩 카테고리 전체 교체
#[utoipa::path(
    put,
    path = "/api/members/{id}/categorys",
    params(("id" = u64, Path, description = "Member ID")),
    request_body = OnboardingRequest,
    responses(
        (status = 200, description = "Categories replaced", body = MemberResponse),
        (status = 404, description = "Member or category not found")
    ),
    tag = "Members"
)]
pub async fn replace_categories(
    State(app_state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<MemberResponse>, (StatusCode, Json<serde_json::Value>)> {
    let member_state = &app_state.member_state;

    let member = member_state
        .member_service
        .get_member(id)
        .await
        .map_err(|e: MemberError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let categories = member_state
        .onboarding_service
        .replace_categories(&member, &request.categorys)
        .await
        .map_err(|e: MemberError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let names = categories.into_iter().map(|c| c.name).collect();
    Ok(Json(MemberResponse::new(&member, names)))
}

async fn to_response(
    app_state: &AppState,
    member: &Member,
) -> Result<MemberResponse, (StatusCode, Json<serde_json::Value>)> {
    let names = app_state
        .member_state
        .onboarding_service
        .member_category_names(member.id)
        .await
        .map_err(|e: MemberError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(MemberResponse::new(member, names))
}
