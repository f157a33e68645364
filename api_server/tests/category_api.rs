// =====================================================
// 카테고리 API 통합 테스트
// =====================================================

mod common;
use common::*;
use axum::http::StatusCode;

#[tokio::test]
async fn test_list_and_get_by_name() {
    let app = TestApp::new();

    let (status, body) = app.send(get("/api/categorys")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["sports", "music", "movie", "musical", "exhibition"]);

    let (status, body) = app.send(get("/api/categorys/music")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["engName"], "Music");

    let (status, body) = app.send(get("/api/categorys/Music")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "CATEGORY_NOT_FOUND");
}

/// 아이콘 업로드: 높이 122px로 축소 후 원본 포맷으로 저장
#[tokio::test]
async fn test_upload_icon_is_resized() {
    let app = TestApp::new();

    let request = MultipartBody::new()
        .file("image", "icon.png", "image/png", &png_bytes(200, 400))
        .into_request("/api/categorys/sports/image?kind=basic");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    let keys = app.storage.keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with("Category/basicImage/"));
    assert_eq!(body["basicImage"], format!("{CDN_BASE}{}", keys[0]));
    assert!(body["clickImage"].is_null());

    let stored = app.storage.get(&keys[0]).unwrap();
    let decoded = image::load_from_memory(&stored.body).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (61, 122));
    assert_eq!(image::guess_format(&stored.body).unwrap(), image::ImageFormat::Png);
}

/// 작은 이미지는 크기 그대로 (업스케일 없음), JPEG도 JPEG으로 저장
#[tokio::test]
async fn test_small_icon_is_not_upscaled() {
    let app = TestApp::new();

    let request = MultipartBody::new()
        .file("image", "icon.jpg", "image/jpeg", &jpeg_bytes(80, 60))
        .into_request("/api/categorys/movie/image?kind=click");
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    let key = app.storage.keys().remove(0);
    assert!(key.starts_with("Category/clickImage/") && key.ends_with(".jpg"));
    assert!(body["clickImage"].as_str().unwrap().ends_with(&key));

    let stored = app.storage.get(&key).unwrap();
    assert_eq!(stored.content_type, "image/jpeg");
    let decoded = image::load_from_memory(&stored.body).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (80, 60));
}

#[tokio::test]
async fn test_upload_failures() {
    let app = TestApp::new();

    // 이미지가 아닌 데이터
    let request = MultipartBody::new()
        .file("image", "icon.png", "image/png", b"definitely not a png")
        .into_request("/api/categorys/sports/image?kind=basic");
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["errorCode"], "IMAGE_UPLOAD_FAIL");

    // 파일 없음
    let request = MultipartBody::new()
        .text("note", "no file")
        .into_request("/api/categorys/sports/image?kind=basic");
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["errorCode"], "IMAGE_UPLOAD_FAIL");

    // 없는 카테고리
    let request = MultipartBody::new()
        .file("image", "icon.png", "image/png", &png_bytes(10, 10))
        .into_request("/api/categorys/cooking/image?kind=basic");
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(app.storage.keys().is_empty());
}

/// 로컬 개발: 메모리 저장소 객체를 /uploads/<key>로 제공
#[tokio::test]
async fn test_local_uploads_are_served() {
    use axum::body::to_bytes;
    use axum::http::header;
    use tower::ServiceExt;
    use ticket_api::routes::create_uploads_router;

    let app = TestApp::new();
    let request = MultipartBody::new()
        .file("image", "icon.png", "image/png", &png_bytes(20, 20))
        .into_request("/api/categorys/music/image?kind=click");
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let key = app.storage.keys().remove(0);
    let uploads = create_uploads_router(app.storage.clone());

    let response = uploads
        .clone()
        .oneshot(get(&format!("/uploads/{key}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.to_vec(), app.storage.get(&key).unwrap().body);

    let response = uploads.oneshot(get("/uploads/Category/clickImage/missing.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
