//! Transient status banners with a cancellable auto-clear timer.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::AbortHandle;

/// How long a saved/error banner stays up before clearing itself.
pub const BANNER_CLEAR: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

impl PanelStatus {
    /// Translation key of the banner text, if this status shows one.
    pub fn banner_key(self) -> Option<&'static str> {
        match self {
            PanelStatus::Idle => None,
            PanelStatus::Saving => Some("admin.status.saving"),
            PanelStatus::Saved => Some("admin.status.saved"),
            PanelStatus::Error => Some("admin.status.error"),
        }
    }
}

/// A status slot whose terminal states clear themselves after a delay.
///
/// The clear is a real cancellable task: setting a newer status aborts
/// it, and dropping the banner aborts it, so a stale timer can never
/// touch a panel that has gone away.
pub struct StatusBanner {
    status: Arc<Mutex<PanelStatus>>,
    timer: Mutex<Option<AbortHandle>>,
}

impl StatusBanner {
    pub fn new() -> Self {
        Self {
            status: Arc::new(Mutex::new(PanelStatus::Idle)),
            timer: Mutex::new(None),
        }
    }

    pub fn get(&self) -> PanelStatus {
        *self.status.lock()
    }

    /// Set the status. Saved/error schedule their own clear; any newer
    /// status cancels a pending one.
    pub fn set(&self, status: PanelStatus) {
        *self.status.lock() = status;
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
        }

        if matches!(status, PanelStatus::Saved | PanelStatus::Error) {
            let slot = Arc::clone(&self.status);
            let task = tokio::spawn(async move {
                tokio::time::sleep(BANNER_CLEAR).await;
                *slot.lock() = PanelStatus::Idle;
            });
            *self.timer.lock() = Some(task.abort_handle());
        }
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StatusBanner {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    async fn settle() {
        // Let the spawned clear task observe the advanced clock.
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn saved_banner_clears_itself() {
        let banner = StatusBanner::new();
        banner.set(PanelStatus::Saved);
        assert_eq!(banner.get(), PanelStatus::Saved);

        // Let the spawned clear task register its timer before the clock moves.
        settle().await;
        advance(BANNER_CLEAR + Duration::from_millis(10)).await;
        settle().await;
        assert_eq!(banner.get(), PanelStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn a_newer_status_cancels_the_pending_clear() {
        let banner = StatusBanner::new();
        banner.set(PanelStatus::Saved);
        advance(Duration::from_millis(500)).await;

        banner.set(PanelStatus::Saving);
        advance(BANNER_CLEAR * 2).await;
        settle().await;

        // The old timer was aborted; Saving has no auto-clear.
        assert_eq!(banner.get(), PanelStatus::Saving);
    }

    #[tokio::test(start_paused = true)]
    async fn error_banner_also_clears_itself() {
        let banner = StatusBanner::new();
        banner.set(PanelStatus::Error);
        // Let the spawned clear task register its timer before the clock moves.
        settle().await;
        advance(BANNER_CLEAR + Duration::from_millis(10)).await;
        settle().await;
        assert_eq!(banner.get(), PanelStatus::Idle);
    }
}
