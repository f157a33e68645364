use std::sync::Arc;
use anyhow::{anyhow, Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ticket_api::create_router;
use ticket_api::routes::{create_uploads_router, UPLOADS_PATH};
use ticket_api::domains::auth::models::*;
use ticket_api::domains::auth::services::JwtService;
use ticket_api::domains::category::models::*;
use ticket_api::domains::member::models::*;
use ticket_api::domains::ticket::models::*;
use ticket_api::shared::clients::{InMemoryObjectStorage, ObjectStorage, S3ObjectStorage};
use ticket_api::shared::database::{Database, Repositories};
use ticket_api::{AppState, Config};

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        ticket_api::domains::auth::handlers::auth_handler::login,
        ticket_api::domains::auth::handlers::auth_handler::refresh,
        ticket_api::domains::auth::handlers::auth_handler::logout,
        ticket_api::domains::member::handlers::member_handler::list_members,
        ticket_api::domains::member::handlers::member_handler::get_member,
        ticket_api::domains::member::handlers::member_handler::get_me,
        ticket_api::domains::member::handlers::member_handler::patch_member,
        ticket_api::domains::member::handlers::member_handler::delete_member,
        ticket_api::domains::member::handlers::member_handler::replace_categories,
        ticket_api::domains::category::handlers::category_handler::list_categories,
        ticket_api::domains::category::handlers::category_handler::get_category,
        ticket_api::domains::category::handlers::category_handler::upload_image,
        ticket_api::domains::ticket::handlers::ticket_handler::list_tickets,
        ticket_api::domains::ticket::handlers::ticket_handler::monthly_statistics,
        ticket_api::domains::ticket::handlers::ticket_handler::yearly_statistics
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        TokenResponse,
        RefreshTokenRequest,
        LogoutRequest,
        SocialType,
        Agree,
        MemberPatch,
        MemberResponse,
        OnboardingRequest,
        Category,
        CategoryImageKind,
        Ticket,
        TicketsResponse,
        MonthlyStatistic,
        YearlyStatistic
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Social login and token endpoints"),
        (name = "Members", description = "Member directory and onboarding categories"),
        (name = "Categories", description = "Category directory and icons"),
        (name = "Tickets", description = "Ticket listings and statistics")
    ),
    info(
        title = "Ticket API Server",
        description = "Social login onboarding, categories and ticket queries",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 로드
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticket_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting ticket_api (env: {})", config.environment);

    // DB 연결 + 마이그레이션
    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let (storage, local_uploads) = build_object_storage(&config).await?;
    let jwt_service = JwtService::new(&config.jwt_secret, config.access_token_ttl_hours);
    let app_state = AppState::new(Repositories::postgres(&db), jwt_service, storage);

    // CORS 설정
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .context("CORS_ORIGIN is not a valid header value")?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true);

    let mut app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);
    if let Some(uploads) = local_uploads {
        app = app.merge(create_uploads_router(uploads));
    }
    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server listening on http://{addr}");
    tracing::info!("Swagger UI available at http://{addr}/api");

    axum::serve(listener, app).await.context("HTTP server error")?;
    Ok(())
}

/// S3_BUCKET이 없으면 (development) 메모리 저장소 사용, /uploads로 제공
async fn build_object_storage(
    config: &Config,
) -> Result<(Arc<dyn ObjectStorage>, Option<Arc<InMemoryObjectStorage>>)> {
    match &config.s3_bucket {
        Some(bucket) => {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_s3::Client::new(&aws_config);
            let storage = S3ObjectStorage::new(client, bucket.clone(), config.s3_public_base_url.as_deref())?;
            tracing::info!(bucket = %bucket, "Using S3 object storage");
            Ok((Arc::new(storage), None))
        }
        None if config.is_development() => {
            let base = format!("http://localhost:{}{UPLOADS_PATH}/", config.http_port);
            tracing::warn!(base = %base, "S3_BUCKET not set, uploads are kept in memory");
            let storage = Arc::new(InMemoryObjectStorage::new(&base)?);
            Ok((storage.clone(), Some(storage)))
        }
        None => Err(anyhow!("S3_BUCKET must be set in {} environment", config.environment)),
    }
}
