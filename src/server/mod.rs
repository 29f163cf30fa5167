//! HTTP surface wiring the public pages and the admin console.

mod admin;
mod public;
mod state;

pub use state::AppState;

use anyhow::Context;
use axum::Router;
use axum::routing::{delete, get, post};
use tracing::{info, warn};

use crate::config::Config;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public site
        .route("/api/pages/home", get(public::home))
        .route("/api/pages/about", get(public::about))
        .route("/api/pages/work", get(public::work))
        .route("/api/pages/gallery", get(public::gallery))
        .route("/api/pages/blog", get(public::blog_list))
        .route("/api/pages/blog/:id", get(public::blog_detail))
        .route("/api/pages/team", get(public::team))
        .route("/api/pages/contact", get(public::contact))
        .route("/api/contact", post(public::submit_contact))
        .route("/api/lang", get(public::get_lang).put(public::set_lang))
        .route("/api/refresh", post(public::refresh))
        // Admin console
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/session", get(admin::session))
        .route(
            "/api/admin/section",
            get(admin::get_section).put(admin::switch_section),
        )
        .route("/api/admin/overview", get(admin::overview))
        .route(
            "/api/admin/settings",
            get(admin::get_settings).put(admin::put_settings),
        )
        .route("/api/admin/upload/:folder", post(admin::upload))
        .route("/api/admin/messages/:id/status", post(admin::message_status))
        .route(
            "/api/admin/:kind/items",
            get(admin::list_items).post(admin::save_item),
        )
        .route(
            "/api/admin/:kind/draft",
            get(admin::current_draft).post(admin::new_draft),
        )
        .route("/api/admin/:kind/cancel", post(admin::cancel_edits))
        .route("/api/admin/:kind/items/:id", delete(admin::delete_item))
        .with_state(state)
}

/// Serve until ctrl-c.
pub async fn run(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {err}");
    }
}
