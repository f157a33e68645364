use axum::{extract::{Multipart, State}, http::StatusCode, Json};
use crate::domains::auth::models::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshTokenRequest, TokenResponse,
};
use crate::shared::errors::AuthError;
use crate::shared::services::{AppState, UploadFile};
use crate::shared::utils::MultipartParts;

/// 소셜 로그인 (multipart)
/// - `request`: LoginRequest JSON (텍스트 파트 또는 application/json Blob)
/// - `profileImage`: 프로필 이미지 파일 (선택)
/// - `categorys`: 카테고리 이름 JSON 배열 또는 이름별 반복 파트 (선택, 없으면 기존 유지)
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(content = LoginRequest, content_type = "multipart/form-data",
        description = "`request` JSON part, optional `profileImage` file, optional `categorys` part(s)"),
    responses(
        (status = 201, description = "Logged in (member created on first login)", body = LoginResponse),
        (status = 400, description = "Malformed request"),
        (status = 404, description = "Unknown category"),
        (status = 409, description = "Nickname already in use"),
        (status = 500, description = "Image upload failed or internal error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<LoginResponse>), (StatusCode, Json<serde_json::Value>)> {
    let (request, profile_image, categorys) = parse_login(multipart)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let response = app_state
        .auth_state
        .auth_service
        .login(request, profile_image, categorys)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// 토큰 갱신 핸들러
/// Refresh token handler
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token pair rotated", body = TokenResponse),
        (status = 401, description = "Unknown refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<serde_json::Value>)> {
    let tokens = app_state
        .auth_state
        .auth_service
        .refresh(&request.refresh_token)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(tokens))
}

/// 로그아웃 핸들러
/// Logout handler
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 204, description = "Refresh token cleared"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .auth_state
        .auth_service
        .logout(&request.refresh_token)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(StatusCode::NO_CONTENT)
}

async fn parse_login(
    multipart: Multipart,
) -> Result<(LoginRequest, Option<UploadFile>, Option<Vec<String>>), AuthError> {
    let mut parts = MultipartParts::read(multipart).await?;

    let request_json = parts
        .values("request")?
        .into_iter()
        .next()
        .ok_or_else(|| AuthError::InvalidRequest("Missing `request` part".to_string()))?;
    let request: LoginRequest = serde_json::from_str(&request_json)
        .map_err(|e| AuthError::InvalidRequest(format!("Invalid `request` part: {}", e)))?;

    let mut categorys: Option<Vec<String>> = None;
    for value in parts.values("categorys")? {
        let names = categorys.get_or_insert_with(Vec::new);
        if value.trim_start().starts_with('[') {
            let list: Vec<String> = serde_json::from_str(&value)
                .map_err(|e| AuthError::InvalidRequest(format!("Invalid `categorys` part: {}", e)))?;
            names.extend(list);
        } else {
            names.push(value);
        }
    }

    let profile_image = parts.take_file("profileImage");
    Ok((request, profile_image, categorys))
}
