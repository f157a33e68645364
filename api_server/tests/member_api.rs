// =====================================================
// 회원 관리 API 통합 테스트
// =====================================================

mod common;
use common::*;
use axum::http::{Method, StatusCode};
use serde_json::json;

async fn login(app: &TestApp, social_id: &str, nickname: &str) -> u64 {
    let request = login_request(
        json!({ "socialId": social_id, "socialType": "GOOGLE", "nickname": nickname }),
        Some(&["sports"]),
    )
    .into_request("/api/auth/login");
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::CREATED);
    body["member"]["id"].as_u64().unwrap()
}

#[tokio::test]
async fn test_list_get_patch_delete() {
    let app = TestApp::new();
    let alice = login(&app, "u1", "alice").await;
    let bob = login(&app, "u2", "bob").await;

    let (status, body) = app.send(get("/api/members")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app
        .send(json_request(
            Method::PATCH,
            &format!("/api/members/{alice}"),
            json!({ "marketingAgree": "AGREE" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nickname"], "alice");
    assert_eq!(body["marketingAgree"], "AGREE");
    assert_eq!(body["categorys"], json!(["sports"]));

    let (status, body) = app
        .send(json_request(
            Method::PATCH,
            &format!("/api/members/{bob}"),
            json!({ "nickname": "alice" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "NICKNAME_DUPLICATE");

    let (status, _) = app.send(delete(&format!("/api/members/{bob}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(get(&format!("/api/members/{bob}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "MEMBER_NOT_FOUND");

    let (status, _) = app.send(delete(&format!("/api/members/{bob}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_categories_endpoint() {
    let app = TestApp::new();
    let alice = login(&app, "u1", "alice").await;

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            &format!("/api/members/{alice}/categorys"),
            json!({ "categorys": ["music", "movie"] }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categorys"], json!(["music", "movie"]));

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            &format!("/api/members/{alice}/categorys"),
            json!({ "categorys": ["opera"] }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "CATEGORY_NOT_FOUND");

    let (_, body) = app.send(get(&format!("/api/members/{alice}"))).await;
    assert_eq!(body["categorys"], json!(["music", "movie"]));

    let (status, _) = app
        .send(json_request(Method::PUT, "/api/members/999/categorys", json!({ "categorys": [] })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
