use axum::{extract::DefaultBodyLimit, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use formcraft_api::database::DatabaseManager;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, STORAGE_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = formcraft_api::config::config();
    tracing::info!("Starting Formcraft API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("FORMCRAFT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Formcraft API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    // Drain pooled connections before exit
    DatabaseManager::close_all().await;
}

fn app() -> Router {
    let config = formcraft_api::config::config();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(question_routes())
        .merge(response_routes())
        .merge(image_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.api.max_upload_size_bytes))
}

fn question_routes() -> Router {
    use axum::routing::post;
    use formcraft_api::handlers::questions;

    Router::new()
        .route(
            "/api/questions",
            get(questions::list)
                .post(questions::create)
                .put(questions::edit),
        )
        .route(
            "/api/questions/translations",
            post(questions::add_translation),
        )
}

fn response_routes() -> Router {
    use formcraft_api::handlers::responses;

    Router::new().route(
        "/api/responses",
        get(responses::get).post(responses::create),
    )
}

fn image_routes() -> Router {
    use axum::routing::post;
    use formcraft_api::handlers::images;

    Router::new().route("/api/images", post(images::upload))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Formcraft API",
            "version": version,
            "description": "Multilingual form-builder backend API",
            "endpoints": {
                "questions": "GET/POST/PUT /api/questions",
                "question_translations": "POST /api/questions/translations",
                "responses": "GET/POST /api/responses",
                "images": "POST /api/images",
                "health": "GET /health",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
