use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use shared::{
    domain::ContactSubmission,
    protocol::{
        about_route, api_data_route, contact_route, healthz_route, home_route, static_route,
        ApiData,
    },
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};

mod api;
mod app_state;
mod config;
mod pages;

use app_state::AppState;
use config::{check_static_dir, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    check_static_dir(&settings.static_dir);

    let addr: SocketAddr = settings.server_bind.parse()?;
    let app = build_router(Arc::new(AppState { settings }));

    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.settings.static_dir);
    Router::new()
        .route(home_route(), get(home))
        .route(about_route(), get(about))
        .route(contact_route(), get(contact).post(submit_contact))
        .route(api_data_route(), get(http_api_data))
        .route(healthz_route(), get(healthz))
        .nest_service(static_route(), assets)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::home_page(&state.settings.site_name))
}

async fn about(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::about_page(&state.settings.site_name))
}

async fn contact(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::contact_page(&state.settings.site_name, false))
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<ContactSubmission>,
) -> Html<String> {
    api::accept_contact(&submission);
    Html(pages::contact_page(&state.settings.site_name, true))
}

async fn http_api_data() -> Json<ApiData> {
    Json(api::api_data())
}

async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    debug!(path = uri.path(), "no route");
    if uri.path().starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(api::unknown_api_route(uri.path())),
        )
            .into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found_page(&state.settings.site_name)),
    )
        .into_response()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
