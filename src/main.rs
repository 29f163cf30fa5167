//! Nayi Subah Foundation content service.
//!
//! Serves the bilingual (English/Hindi) informational site and a hidden
//! admin console, backed by a hosted database/auth/storage provider.
//! When the provider is not configured the site still renders, with
//! placeholder content and all writes disabled.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `i18n` - Embedded English/Hindi phrase tables and language state
//! - `database` - Typed gateway over the hosted backend
//! - `store` - Public content snapshot cache
//! - `auth` - Admin session guard
//! - `admin` - Generic CRUD panels for the content types
//! - `pages` - Public page view models
//! - `server` - HTTP surface (axum)

mod admin;
mod auth;
mod config;
mod database;
mod i18n;
mod pages;
mod server;
mod store;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use admin::AdminConsole;
use config::Config;
use database::Gateway;
use i18n::LanguageStore;
use server::AppState;
use store::SiteStore;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nayisubah=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Nayi Subah content service...");

    let config = Config::from_env();

    // Language state must exist before the first page renders.
    let lang = Arc::new(LanguageStore::load(&config.lang_pref_path));
    info!("Active language: {}", lang.html_lang());

    let gateway = Arc::new(Gateway::from_config(&config));

    // The public snapshot fills in asynchronously once the server is up.
    let store = SiteStore::new(Arc::clone(&gateway));
    store.spawn_initial_fetch();

    let console = Arc::new(AdminConsole::new(Arc::clone(&gateway)));
    console.guard.init();

    let state = AppState {
        gateway,
        store,
        lang,
        console,
    };
    server::run(&config, state).await
}
