// =====================================================
// 소셜 로그인 / 토큰 API 통합 테스트
// =====================================================

mod common;
use common::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

/// 신규 회원 로그인: 회원 생성 + 카테고리 연결 + 토큰 발급
#[tokio::test]
async fn test_first_login_creates_member() {
    let app = TestApp::new();

    let request = login_request(
        json!({ "socialId": "u1", "socialType": "GOOGLE", "nickname": "alice" }),
        Some(&["sports", "music"]),
    )
    .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["member"]["nickname"], "alice");
    assert_eq!(body["member"]["categorys"], json!(["sports", "music"]));
    assert_eq!(body["member"]["marketingAgree"], "DISAGREE");
    assert_eq!(body["member"]["pushAgree"], "DISAGREE");
    assert_eq!(body["token"]["refreshToken"].as_str().unwrap().len(), 64);

    let access_token = body["token"]["accessToken"].as_str().unwrap();
    let claims = app.state.auth_state.jwt_service.verify_access_token(access_token).unwrap();
    assert_eq!(claims.member_id, body["member"]["id"].as_u64().unwrap());
    assert_eq!(app.store.member_count(), 1);
}

/// 두 번째 로그인 (categorys 없음): 같은 회원, 기존 카테고리 유지, 같은 refresh token
#[tokio::test]
async fn test_second_login_keeps_categories_and_refresh_token() {
    let app = TestApp::new();

    let first = login_request(
        json!({ "socialId": "u1", "socialType": "GOOGLE", "nickname": "alice" }),
        Some(&["sports", "music"]),
    )
    .into_request("/api/auth/login");
    let (_, first) = app.send(first).await;

    let second = login_request(json!({ "socialId": "u1", "socialType": "GOOGLE" }), None)
        .into_request("/api/auth/login");
    let (status, second) = app.send(second).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["member"]["id"], first["member"]["id"]);
    assert_eq!(second["member"]["nickname"], "alice");
    assert_eq!(second["member"]["categorys"], json!(["sports", "music"]));
    assert_eq!(second["token"]["refreshToken"], first["token"]["refreshToken"]);
    assert_eq!(app.store.member_count(), 1);
}

/// 같은 닉네임으로 재로그인하는 것은 허용
#[tokio::test]
async fn test_relogin_with_own_nickname() {
    let app = TestApp::new();

    for _ in 0..2 {
        let request = login_request(
            json!({ "socialId": "u1", "socialType": "KAKAO", "nickname": "alice", "pushAgree": "AGREE" }),
            None,
        )
        .into_request("/api/auth/login");
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["member"]["pushAgree"], "AGREE");
    }
}

/// 다른 회원이 쓰는 닉네임: 409, 회원 생성/변경 없음
#[tokio::test]
async fn test_duplicate_nickname_fails_before_mutation() {
    let app = TestApp::new();

    let alice = login_request(json!({ "socialId": "u1", "socialType": "GOOGLE", "nickname": "alice" }), None)
        .into_request("/api/auth/login");
    app.send(alice).await;

    let intruder = login_request(
        json!({ "socialId": "u2", "socialType": "GOOGLE", "nickname": "alice", "marketingAgree": "AGREE" }),
        Some(&["movie"]),
    )
    .into_request("/api/auth/login");
    let (status, body) = app.send(intruder).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "NICKNAME_DUPLICATE");
    assert_eq!(app.store.member_count(), 1);
    assert!(app.storage.keys().is_empty());
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let app = TestApp::new();

    let request = login_request(json!({ "socialId": "u1", "socialType": "APPLE" }), Some(&["cooking"]))
        .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "CATEGORY_NOT_FOUND");
}

/// 프로필 이미지는 Member/profileUrl/<uuid>.<ext> 키로 원본 그대로 업로드
#[tokio::test]
async fn test_login_uploads_profile_image() {
    let app = TestApp::new();
    let image = png_bytes(300, 300);

    let request = login_request(json!({ "socialId": "u1", "socialType": "NAVER" }), None)
        .file("profileImage", "me.PNG", "image/png", &image)
        .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::CREATED);
    let keys = app.storage.keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with("Member/profileUrl/"));
    assert!(keys[0].ends_with(".png"));

    let stored = app.storage.get(&keys[0]).unwrap();
    assert_eq!(stored.body, image);
    assert_eq!(stored.content_type, "image/png");
    assert_eq!(body["member"]["profileUrl"], format!("{CDN_BASE}{}", keys[0]));
}

#[tokio::test]
async fn test_empty_profile_image_fails_upload() {
    let app = TestApp::new();

    let request = login_request(json!({ "socialId": "u1", "socialType": "NAVER" }), None)
        .file("profileImage", "me.png", "image/png", &[])
        .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["errorCode"], "IMAGE_UPLOAD_FAIL");
}

#[tokio::test]
async fn test_missing_request_part_is_invalid_input() {
    let app = TestApp::new();

    let request = MultipartBody::new()
        .text("categorys", "sports")
        .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "INVALID_INPUT");
}

/// 반복 파트로도 카테고리 전달 가능
#[tokio::test]
async fn test_categories_as_repeated_parts() {
    let app = TestApp::new();

    let request = login_request(json!({ "socialId": "u1", "socialType": "GOOGLE" }), None)
        .text("categorys", "musical")
        .text("categorys", "exhibition")
        .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["member"]["categorys"], json!(["musical", "exhibition"]));
}

/// 웹 클라이언트는 JSON 파트를 application/json Blob(filename="blob")으로 보냄
#[tokio::test]
async fn test_request_part_sent_as_json_blob() {
    let app = TestApp::new();
    let request_json = json!({ "socialId": "u1", "socialType": "GOOGLE", "nickname": "alice" }).to_string();

    let request = MultipartBody::new()
        .file("request", "blob", "application/json", request_json.as_bytes())
        .file("categorys", "blob", "application/json", br#"["sports"]"#)
        .file("profileImage", "me.png", "image/png", &png_bytes(40, 40))
        .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["member"]["nickname"], "alice");
    assert_eq!(body["member"]["categorys"], json!(["sports"]));
    assert_eq!(app.storage.keys().len(), 1);
}

/// refresh: 토큰 교체, 이전 토큰은 더 이상 사용 불가
#[tokio::test]
async fn test_refresh_rotates_token() {
    let app = TestApp::new();

    let login = login_request(json!({ "socialId": "u1", "socialType": "GOOGLE" }), None)
        .into_request("/api/auth/login");
    let (_, body) = app.send(login).await;
    let old_refresh = body["token"]["refreshToken"].as_str().unwrap().to_string();

    let (status, tokens) = app
        .send(json_request(Method::POST, "/api/auth/refresh", json!({ "refreshToken": old_refresh })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(tokens["refreshToken"], old_refresh.as_str());
    assert!(tokens["accessToken"].as_str().is_some());

    let (status, body) = app
        .send(json_request(Method::POST, "/api/auth/refresh", json!({ "refreshToken": old_refresh })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], "INVALID_TOKEN");
}

/// logout 후 refresh 불가, 다음 로그인에서 새 토큰 발급
#[tokio::test]
async fn test_logout_clears_refresh_token() {
    let app = TestApp::new();

    let login = || {
        login_request(json!({ "socialId": "u1", "socialType": "GOOGLE" }), None).into_request("/api/auth/login")
    };
    let (_, body) = app.send(login()).await;
    let refresh = body["token"]["refreshToken"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(json_request(Method::POST, "/api/auth/logout", json!({ "refreshToken": refresh })))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(json_request(Method::POST, "/api/auth/refresh", json!({ "refreshToken": refresh })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.send(login()).await;
    assert_ne!(body["token"]["refreshToken"], refresh.as_str());
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/members/me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], "MISSING_TOKEN");

    let (status, body) = app.send(get_with_token("/api/members/me", "not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], "INVALID_TOKEN");

    let login = login_request(json!({ "socialId": "u1", "socialType": "GOOGLE", "nickname": "alice" }), Some(&["movie"]))
        .into_request("/api/auth/login");
    let (_, body) = app.send(login).await;
    let access_token = body["token"]["accessToken"].as_str().unwrap();

    let (status, me) = app.send(get_with_token("/api/members/me", access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["nickname"], "alice");
    assert_eq!(me["categorys"], json!(["movie"]));
}
