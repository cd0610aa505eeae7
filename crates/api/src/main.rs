// Corkboard API server
// Decision: A missing or weak signing secret stops startup before any socket is bound
// Decision: Without DATABASE_URL the server runs on the in-memory store (dev mode)

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use corkboard_api::app::build_router;
use corkboard_api::auth::{AuthConfig, TokenService};
use corkboard_api::config::ServerConfig;
use corkboard_api::openapi::ApiDoc;
use corkboard_api::storage::StorageBackend;
use corkboard_core::telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Configure via environment variables:
    // - RUST_LOG / LOG_LEVEL: Log filter (default: "corkboard_api=debug,tower_http=debug")
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "corkboard" {
        telemetry_config.service_name = "corkboard-api".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("corkboard_api=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("corkboard-api starting...");

    let server_config = ServerConfig::from_env();
    let auth_config = AuthConfig::from_env();

    let tokens = Arc::new(
        TokenService::new(&auth_config.jwt).context("Invalid authentication configuration")?,
    );
    tracing::info!(
        access_token_lifetime_secs = tokens.access_token_expiration_seconds(),
        "Authentication configured"
    );

    let storage = match &server_config.database_url {
        Some(url) => {
            let backend = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            backend
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            StorageBackend::in_memory()
        }
    };

    if !server_config.api_prefix.is_empty() {
        tracing::info!(prefix = %server_config.api_prefix, "API prefix configured");
    }

    let app = build_router(Arc::new(storage), tokens, &server_config.api_prefix);

    // Add Swagger UI
    let app =
        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let app = with_cors(app, &server_config.cors_allowed_origins);

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&server_config.http_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", server_config.http_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Add a CORS layer only if origins are configured
fn with_cors(app: Router, origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    if origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        return app;
    }
    tracing::info!(origins = ?origins, "CORS origins configured");

    app.layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
                header::ORIGIN,
            ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/v1/test", get(|| async { "ok" }))
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let app = with_cors(test_routes(), &["https://app.example.com".to_string()]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/test")
                    .header(header::ORIGIN, "https://app.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://app.example.com"))
        );
    }

    #[tokio::test]
    async fn test_no_cors_headers_without_origins() {
        let app = with_cors(test_routes(), &[]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/test")
                    .header(header::ORIGIN, "https://app.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
