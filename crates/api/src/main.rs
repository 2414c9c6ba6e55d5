use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::{Router, ServiceExt};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tareas_api::config::ServerConfig;
use tareas_api::routes;
use tareas_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Configuration loaded");

    let pool = connect_database().await;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        // Liveness endpoint stays outside the /api prefix.
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        // Layers run top-down per request, so the later .layer() calls here
        // are the outer ones: the request id is stamped before tracing opens
        // its span, and the panic catcher sits closest to the handlers.
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(&config))
        .with_state(state);

    // Trailing-slash normalization must wrap the router itself: routing
    // happens before inner layers run, so `/api/tareas/` and `/api/tareas`
    // only unify when the path is rewritten outside the Router.
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST is not a valid IP address"),
        config.port,
    );
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind listener");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server exited with an error");

    tracing::info!("Shutdown complete");
}

/// `RUST_LOG` wins when set; the default keeps our own crates and tower-http
/// chatty while everything else stays at its own level.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tareas_api=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the pool and bring the schema up to date.
///
/// Startup is the one place that runs migrations; request handling never
/// touches the migrator. Any failure here aborts the process before the
/// listener binds.
async fn connect_database() -> tareas_db::DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL is not set");

    let pool = tareas_db::create_pool(&database_url)
        .await
        .expect("Could not open the database pool");
    tracing::info!("Database pool ready");

    tareas_db::health_check(&pool)
        .await
        .expect("Database did not answer the health probe");

    tareas_db::run_migrations(&pool)
        .await
        .expect("Migration run failed");
    tracing::info!("Schema is up to date");

    pool
}

/// Resolve when the process is asked to stop.
///
/// Listens for SIGINT and, on Unix, SIGTERM, so both an interactive Ctrl-C
/// and a process manager's stop request drain in-flight requests instead of
/// cutting connections.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl-C handler could not be installed");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler could not be installed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("SIGINT received, draining in-flight requests");
        }
        () = terminate => {
            tracing::info!("SIGTERM received, draining in-flight requests");
        }
    }
}

/// CORS layer allowing the configured browser origins.
///
/// An origin that fails to parse aborts startup; a server silently running
/// with a dropped origin would be harder to notice.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
