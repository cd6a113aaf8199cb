//! Web front-end for the game hiscores leaderboard.
//!
//! The binary loads a JSON config, connects and authenticates a client for
//! the hiscore data service, then serves two surfaces from one router: a
//! JSON API under `/api` and server-rendered pages everywhere else.

use std::time::Duration;

use axum::{
    http::{header, header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{signal, SignalKind},
    },
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
};
use tracing::info;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod pages;
pub mod query;
pub mod state;

use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/health", get(api::health_handler))
        .route("/hiscores/rank/{skill}", get(api::rank_handler))
        .route("/hiscores/player/{name}", get(api::player_handler))
        .route("/hiscores/compare", get(api::compare_handler))
        .layer(cors);

    let router = Router::new()
        .route("/", get(pages::hiscores_page))
        .route("/hiscores", get(pages::hiscores_page))
        .route("/hiscores/compare", get(pages::compare_page))
        .route("/hiscores/{skill}", get(pages::skill_page))
        .route("/hiscores/skill/{skill}", get(pages::rank_page))
        .nest("/api", api)
        .fallback(pages::not_found_page);

    // Dev mode keeps static assets uncached so template/script edits show
    // up on reload.
    let router = if state.dev {
        router.nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache"),
                ))
                .service(ServeDir::new("static")),
        )
    } else {
        router.nest_service("/static", ServeDir::new("static"))
    };

    router.with_state(state)
}

pub async fn start_server(state: AppState) -> Result<(), std::io::Error> {
    let port = state.config.port;
    let app = build_router(state);

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;

    info!("listening for HTTP connections on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
