//! Admin session guard.
//!
//! Gates the admin console: checks for an existing session once on
//! startup, then listens to backend-pushed auth-state changes for its
//! whole lifetime. Logging out always forces the unauthenticated state,
//! whatever the backend call returned.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::database::{AuthError, Gateway};

/// Guard states. `Checking` grants no access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardState {
    Checking,
    Authenticated,
    Unauthenticated,
}

pub struct Guard {
    gateway: Arc<Gateway>,
    state_tx: watch::Sender<GuardState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl Guard {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        let (state_tx, _) = watch::channel(GuardState::Checking);
        Self {
            gateway,
            state_tx,
            listener: Mutex::new(None),
        }
    }

    /// Query the current session once and start listening for pushed
    /// auth-state changes. The subscription lives until the guard drops.
    pub fn init(&self) {
        let state = match self.gateway.session() {
            Some(session) => {
                info!("Existing admin session found for {}", session.user_email);
                GuardState::Authenticated
            }
            None => GuardState::Unauthenticated,
        };
        self.state_tx.send_replace(state);

        let mut auth_rx = self.gateway.subscribe_auth();
        let state_tx = self.state_tx.clone();
        let handle = tokio::spawn(async move {
            while auth_rx.changed().await.is_ok() {
                let authed = auth_rx.borrow_and_update().is_some();
                state_tx.send_replace(if authed {
                    GuardState::Authenticated
                } else {
                    GuardState::Unauthenticated
                });
            }
        });
        *self.listener.lock() = Some(handle);
    }

    pub fn state(&self) -> GuardState {
        *self.state_tx.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == GuardState::Authenticated
    }

    /// Watch guard-state transitions.
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state_tx.subscribe()
    }

    /// Sign in with email and password. The error distinguishes bad
    /// credentials from a missing backend without revealing which
    /// accounts exist.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let session = self.gateway.sign_in(email, password).await?;
        info!("Admin signed in: {}", session.user_email);
        self.state_tx.send_replace(GuardState::Authenticated);
        Ok(())
    }

    /// Sign out with the backend, then force the unauthenticated state
    /// regardless of the call's outcome.
    pub async fn logout(&self) {
        if let Err(err) = self.gateway.sign_out().await {
            warn!("Backend sign-out failed: {err}");
        }
        self.state_tx.send_replace(GuardState::Unauthenticated);
    }
}

impl Drop for Guard {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, timeout};

    fn guarded_memory_gateway() -> (Arc<Gateway>, Guard) {
        let gateway = Arc::new(Gateway::in_memory());
        gateway.memory().unwrap().set_admin("admin@example.com", "secret");
        let guard = Guard::new(Arc::clone(&gateway));
        (gateway, guard)
    }

    #[tokio::test]
    async fn starts_checking_then_resolves_to_unauthenticated() {
        let (_gateway, guard) = guarded_memory_gateway();
        assert_eq!(guard.state(), GuardState::Checking);

        guard.init();
        assert_eq!(guard.state(), GuardState::Unauthenticated);
    }

    #[tokio::test]
    async fn bad_credentials_leave_the_guard_unauthenticated() {
        let (_gateway, guard) = guarded_memory_gateway();
        guard.init();

        let err = guard.sign_in("admin@example.com", "nope").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!guard.is_authenticated());
    }

    #[tokio::test]
    async fn sign_in_and_logout_round_trip() {
        let (_gateway, guard) = guarded_memory_gateway();
        guard.init();

        guard.sign_in("admin@example.com", "secret").await.unwrap();
        assert!(guard.is_authenticated());

        guard.logout().await;
        assert_eq!(guard.state(), GuardState::Unauthenticated);
    }

    #[tokio::test]
    async fn backend_session_destruction_is_pushed_to_the_guard() {
        let (gateway, guard) = guarded_memory_gateway();
        guard.init();
        guard.sign_in("admin@example.com", "secret").await.unwrap();

        let mut states = guard.subscribe();

        // Session destroyed elsewhere (another tab, token revocation).
        gateway.sign_out().await.unwrap();

        timeout(Duration::from_secs(1), async {
            loop {
                states.changed().await.unwrap();
                if *states.borrow_and_update() == GuardState::Unauthenticated {
                    break;
                }
            }
        })
        .await
        .expect("guard never observed the pushed sign-out");
        assert!(!guard.is_authenticated());
    }

    #[tokio::test]
    async fn sign_in_without_a_backend_reports_not_configured() {
        let guard = Guard::new(Arc::new(Gateway::disabled()));
        guard.init();
        let err = guard.sign_in("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err, AuthError::NotConfigured);
    }
}
