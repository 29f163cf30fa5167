//! Generic admin panel: one CRUD flow instantiated per content type.
//!
//! Local state only changes after the backend confirms a write, via a
//! full reload of the entity's list; there is no optimistic mutation.
//! Rapid operations are not serialized against each other: each fires
//! its own request and the last response applied wins, which is fine
//! for a low-traffic administrative tool.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::database::{Draftable, Entity, Gateway};

use super::status::{PanelStatus, StatusBanner};

struct PanelState<E> {
    items: Vec<E>,
    draft: Option<E>,
    pending_delete: Option<String>,
}

impl<E> Default for PanelState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            draft: None,
            pending_delete: None,
        }
    }
}

pub struct Panel<E: Entity> {
    gateway: Arc<Gateway>,
    state: Mutex<PanelState<E>>,
    banner: StatusBanner,
}

impl<E: Entity> Panel<E> {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(PanelState::default()),
            banner: StatusBanner::new(),
        }
    }

    /// Refresh the local working copy of the full list. A failed fetch
    /// logs and keeps the previous list.
    pub async fn load(&self) -> bool {
        match self.gateway.fetch_all::<E>().await {
            Ok(items) => {
                self.state.lock().items = items;
                true
            }
            Err(err) => {
                warn!("Failed to load {}: {err}", E::TABLE);
                false
            }
        }
    }

    pub fn items(&self) -> Vec<E> {
        self.state.lock().items.clone()
    }

    pub fn draft(&self) -> Option<E> {
        self.state.lock().draft.clone()
    }

    pub fn status(&self) -> PanelStatus {
        self.banner.get()
    }

    /// Load an existing record into an editable draft.
    pub fn begin_edit(&self, record: E) {
        self.state.lock().draft = Some(record);
    }

    pub fn close_draft(&self) {
        self.state.lock().draft = None;
    }

    /// Upsert the draft, reload the list, and flash a transient status.
    /// The form closes on success and stays open (draft retained) on
    /// failure so the admin can retry.
    pub async fn save(&self, draft: E) -> bool {
        self.banner.set(PanelStatus::Saving);

        let result = async {
            self.gateway.upsert(&draft).await?;
            self.gateway.fetch_all::<E>().await
        }
        .await;

        match result {
            Ok(items) => {
                debug!("Saved {} record {}", E::TABLE, draft.id());
                let mut state = self.state.lock();
                state.items = items;
                state.draft = None;
                drop(state);
                self.banner.set(PanelStatus::Saved);
                true
            }
            Err(err) => {
                warn!("Failed to save into {}: {err}", E::TABLE);
                self.state.lock().draft = Some(draft);
                self.banner.set(PanelStatus::Error);
                false
            }
        }
    }

    /// First half of the delete handshake: remember what the admin asked
    /// to delete and wait for explicit confirmation.
    pub fn request_delete(&self, id: &str) {
        self.state.lock().pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&self) {
        self.state.lock().pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<String> {
        self.state.lock().pending_delete.clone()
    }

    /// Execute a confirmed delete, cascading per the entity descriptor,
    /// then reload. Does nothing without a prior request.
    pub async fn confirm_delete(&self) -> bool {
        let Some(id) = self.state.lock().pending_delete.take() else {
            return false;
        };
        self.banner.set(PanelStatus::Saving);

        let result = async {
            self.gateway.delete::<E>(&id).await?;
            self.gateway.fetch_all::<E>().await
        }
        .await;

        match result {
            Ok(items) => {
                self.state.lock().items = items;
                self.banner.set(PanelStatus::Saved);
                true
            }
            Err(err) => {
                warn!("Failed to delete from {}: {err}", E::TABLE);
                self.banner.set(PanelStatus::Error);
                false
            }
        }
    }
}

impl<E: Draftable> Panel<E> {
    /// Seed a blank draft with a fresh identifier, default field values
    /// and the next sequential sort position.
    pub fn begin_create(&self) -> E {
        let mut state = self.state.lock();
        let next_sort = state.items.len() as i32 + 1;
        let draft = E::blank(next_sort);
        state.draft = Some(draft.clone());
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{GalleryCategory, GalleryImage, StatItem};
    use std::time::Duration;
    use tokio::time::advance;

    async fn stat_panel_with(count: usize) -> (Arc<Gateway>, Panel<StatItem>) {
        let gateway = Arc::new(Gateway::in_memory());
        for i in 0..count {
            let mut stat = StatItem::blank((i + 1) as i32);
            stat.id = format!("stat-{i}");
            stat.value = format!("{i}0+");
            gateway.upsert(&stat).await.unwrap();
        }
        let panel = Panel::new(Arc::clone(&gateway));
        panel.load().await;
        (gateway, panel)
    }

    #[tokio::test]
    async fn begin_create_seeds_fresh_id_and_next_sort_position() {
        let (_gateway, panel) = stat_panel_with(2).await;

        let draft = panel.begin_create();
        assert!(!draft.id.is_empty());
        assert_eq!(draft.sort_order, 3);
        assert_eq!(panel.draft(), Some(draft.clone()));

        let second = panel.begin_create();
        assert_ne!(second.id, draft.id);
    }

    #[tokio::test]
    async fn save_reloads_the_list_closes_the_draft_and_flashes_saved() {
        let (_gateway, panel) = stat_panel_with(1).await;

        let mut draft = panel.begin_create();
        draft.value = "500+".to_string();
        draft.label_en = "Meals served".to_string();

        assert!(panel.save(draft.clone()).await);
        assert_eq!(panel.status(), PanelStatus::Saved);
        assert!(panel.draft().is_none());
        assert!(panel.items().contains(&draft));
    }

    #[tokio::test]
    async fn failed_save_keeps_the_draft_open_for_retry() {
        let (gateway, panel) = stat_panel_with(1).await;

        let mut draft = panel.begin_create();
        draft.value = "750+".to_string();

        gateway.memory().unwrap().fail_next();
        assert!(!panel.save(draft.clone()).await);

        assert_eq!(panel.status(), PanelStatus::Error);
        assert_eq!(panel.draft(), Some(draft));
        assert_eq!(panel.items().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn saved_status_auto_clears_after_the_banner_delay() {
        let (_gateway, panel) = stat_panel_with(0).await;
        let draft = panel.begin_create();
        panel.save(draft).await;
        assert_eq!(panel.status(), PanelStatus::Saved);

        // Let the spawned clear task register its timer before the clock moves.
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        advance(super::super::status::BANNER_CLEAR + Duration::from_millis(10)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert_eq!(panel.status(), PanelStatus::Idle);
    }

    #[tokio::test]
    async fn delete_requires_an_explicit_confirmation_step() {
        let (_gateway, panel) = stat_panel_with(2).await;

        // Nothing pending: confirming is a no-op.
        assert!(!panel.confirm_delete().await);
        assert_eq!(panel.items().len(), 2);

        panel.request_delete("stat-0");
        assert_eq!(panel.pending_delete().as_deref(), Some("stat-0"));
        assert_eq!(panel.items().len(), 2);

        assert!(panel.confirm_delete().await);
        assert_eq!(panel.items().len(), 1);
        assert!(panel.pending_delete().is_none());
    }

    #[tokio::test]
    async fn cancelling_a_delete_leaves_the_record_alone() {
        let (_gateway, panel) = stat_panel_with(1).await;
        panel.request_delete("stat-0");
        panel.cancel_delete();

        assert!(!panel.confirm_delete().await);
        assert_eq!(panel.items().len(), 1);
    }

    #[tokio::test]
    async fn category_delete_cascades_to_images_through_the_panel() {
        let gateway = Arc::new(Gateway::in_memory());
        gateway.upsert(&GalleryCategory::sample("cat-1")).await.unwrap();
        for i in 0..4 {
            gateway
                .upsert(&GalleryImage::sample(&format!("img-{i}"), "cat-1"))
                .await
                .unwrap();
        }

        let panel: Panel<GalleryCategory> = Panel::new(Arc::clone(&gateway));
        panel.load().await;
        panel.request_delete("cat-1");
        assert!(panel.confirm_delete().await);

        assert!(panel.items().is_empty());
        let images: Vec<GalleryImage> = gateway.fetch_all().await.unwrap();
        assert!(images.is_empty());
    }
}
