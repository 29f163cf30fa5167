//! Configuration module for the Nayi Subah content service.
//!
//! Loads configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;
use url::Url;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosted backend endpoint. `None` puts the gateway in disabled mode:
    /// writes become no-ops and reads return placeholder defaults.
    pub supabase_url: Option<Url>,

    /// Public API key for the hosted backend. Required together with the
    /// endpoint URL for the gateway to be active.
    pub supabase_anon_key: Option<String>,

    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// File holding the persisted language preference.
    pub lang_pref_path: PathBuf,

    /// Opt-in offline mode: back the gateway with an in-memory store
    /// instead of degrading to empty reads. Never implied; a missing
    /// backend without this flag still means disabled.
    pub dev_store: bool,

    /// Credential pair accepted by the in-memory store's sign-in.
    pub dev_admin: Option<(String, String)>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The backend values are optional by design: a missing or unparseable
    /// `SUPABASE_URL` / `SUPABASE_ANON_KEY` pair downgrades the service to
    /// placeholder content instead of refusing to start.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let supabase_url = env::var("SUPABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!("Ignoring unparseable SUPABASE_URL: {err}");
                    None
                }
            });

        let supabase_anon_key = env::var("SUPABASE_ANON_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|s| match s.parse() {
                Ok(addr) => Some(addr),
                Err(err) => {
                    warn!("Ignoring unparseable BIND_ADDR: {err}");
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let lang_pref_path = env::var("LANG_PREF_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".nayi_subah_lang"));

        let dev_store = env::var("DEV_STORE")
            .map(|s| matches!(s.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let dev_admin = match (env::var("DEV_ADMIN_EMAIL"), env::var("DEV_ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() => Some((email, password)),
            _ => None,
        };

        Self {
            supabase_url,
            supabase_anon_key,
            bind_addr,
            lang_pref_path,
            dev_store,
            dev_admin,
        }
    }

    /// Backend connection parameters, if both are configured.
    pub fn backend(&self) -> Option<(Url, String)> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => Some((url.clone(), key.clone())),
            _ => None,
        }
    }
}
