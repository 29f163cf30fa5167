//! Persistence gateway: a typed façade over the hosted backend.
//!
//! Every operation is defined to behave correctly when the backend is
//! absent: writes become no-ops, reads return empty/default values and
//! uploads return `None`. A misconfigured deployment therefore renders a
//! usable, if empty, site instead of crashing.

use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;

use super::entity::{self, Entity};
use super::error::{AuthError, GatewayError};
use super::memory::MemoryStore;
use super::models::{
    AppEvent, BlogPost, ContactMessage, GalleryCategory, GalleryImage, JourneyItem, Program,
    SettingRow, SiteData, SiteSettings, StatItem, TeamMember,
};
use super::supabase::{Session, SupabaseClient};

/// Which rows a snapshot fetch may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Admin console: everything, including drafts and contact messages.
    Admin,
    /// Public site: published posts only, and never contact messages.
    Public,
}

enum Backend {
    /// No backend configured: degrade to empty reads and no-op writes.
    Disabled,
    Supabase(SupabaseClient),
    /// Offline store backing the test suite and local development.
    Memory(MemoryStore),
}

pub struct Gateway {
    backend: Backend,
    session: Arc<RwLock<Option<Session>>>,
    auth_tx: watch::Sender<Option<Session>>,
    expiry_watch: Mutex<Option<AbortHandle>>,
}

impl Gateway {
    pub fn from_config(config: &Config) -> Self {
        match config.backend() {
            Some((url, key)) => {
                info!("Backend configured at {url}");
                Self::with_backend(Backend::Supabase(SupabaseClient::new(url, key)))
            }
            None if config.dev_store => {
                info!("DEV_STORE set; using the in-memory store");
                let gateway = Self::in_memory();
                if let (Some((email, password)), Some(store)) =
                    (&config.dev_admin, gateway.memory())
                {
                    store.set_admin(email, password);
                }
                gateway
            }
            None => {
                warn!(
                    "SUPABASE_URL / SUPABASE_ANON_KEY not set; serving placeholder content, writes disabled"
                );
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self::with_backend(Backend::Disabled)
    }

    /// Gateway over the in-memory store.
    pub fn in_memory() -> Self {
        Self::with_backend(Backend::Memory(MemoryStore::new()))
    }

    fn with_backend(backend: Backend) -> Self {
        let (auth_tx, _) = watch::channel(None);
        Self {
            backend,
            session: Arc::new(RwLock::new(None)),
            auth_tx,
            expiry_watch: Mutex::new(None),
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self.backend, Backend::Disabled)
    }

    /// Direct access to the in-memory store, if this gateway wraps one.
    pub fn memory(&self) -> Option<&MemoryStore> {
        match &self.backend {
            Backend::Memory(store) => Some(store),
            _ => None,
        }
    }

    // ── Reads & writes ──────────────────────────────────────────────

    /// All rows of one entity type, in its designated order.
    pub async fn fetch_all<E: Entity>(&self) -> Result<Vec<E>, GatewayError> {
        self.fetch_where::<E>(&[]).await
    }

    async fn fetch_where<E: Entity>(
        &self,
        filters: &[(&str, String)],
    ) -> Result<Vec<E>, GatewayError> {
        let rows = match &self.backend {
            Backend::Disabled => return Ok(Vec::new()),
            Backend::Supabase(client) => {
                client
                    .select(self.token().as_deref(), E::TABLE, Some(E::SORT), filters)
                    .await?
            }
            Backend::Memory(store) => store.select(E::TABLE, Some(E::SORT), filters)?,
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(serde_json::from_value(row)?);
        }
        // Backend ordering is not trusted blindly; re-sort locally.
        entity::sort_rows::<E>(&mut records);
        Ok(records)
    }

    /// Insert or replace one full record by id. No partial patches.
    pub async fn upsert<E: Entity>(&self, record: &E) -> Result<(), GatewayError> {
        match &self.backend {
            Backend::Disabled => Ok(()),
            Backend::Supabase(client) => {
                client
                    .upsert(self.token().as_deref(), E::TABLE, &serde_json::to_value(record)?)
                    .await
            }
            Backend::Memory(store) => {
                store.upsert(E::TABLE, "id", vec![serde_json::to_value(record)?])
            }
        }
    }

    /// Delete one record by id, applying the entity's cascade rule first.
    pub async fn delete<E: Entity>(&self, id: &str) -> Result<(), GatewayError> {
        if let Some(cascade) = E::CASCADE {
            self.delete_matching(cascade.table, cascade.column, id).await?;
        }
        self.delete_matching(E::TABLE, "id", id).await
    }

    async fn delete_matching(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<(), GatewayError> {
        match &self.backend {
            Backend::Disabled => Ok(()),
            Backend::Supabase(client) => {
                client
                    .delete_eq(self.token().as_deref(), table, column, value)
                    .await
            }
            Backend::Memory(store) => store.delete_matching(table, column, value),
        }
    }

    /// The settings snapshot, materialized from key/value rows with
    /// defaults for any missing key.
    pub async fn fetch_settings(&self) -> Result<SiteSettings, GatewayError> {
        let rows = match &self.backend {
            Backend::Disabled => return Ok(SiteSettings::default()),
            Backend::Supabase(client) => {
                client
                    .select(self.token().as_deref(), "site_settings", None, &[])
                    .await?
            }
            Backend::Memory(store) => store.select("site_settings", None, &[])?,
        };

        let mut parsed = Vec::with_capacity(rows.len());
        for row in rows {
            parsed.push(serde_json::from_value::<SettingRow>(row)?);
        }
        Ok(SiteSettings::from_rows(&parsed))
    }

    /// Fan the whole settings snapshot out into key/value rows.
    /// One backend call; it succeeds or fails as a whole.
    pub async fn save_settings(&self, settings: &SiteSettings) -> Result<(), GatewayError> {
        let mut rows = Vec::new();
        for row in settings.to_rows() {
            rows.push(serde_json::to_value(row)?);
        }
        match &self.backend {
            Backend::Disabled => Ok(()),
            Backend::Supabase(client) => {
                client
                    .upsert(self.token().as_deref(), "site_settings", &Value::Array(rows))
                    .await
            }
            Backend::Memory(store) => store.upsert("site_settings", "key", rows),
        }
    }

    /// Store one incoming contact-form message. The only write the
    /// public site performs.
    pub async fn insert_message(&self, message: &ContactMessage) -> Result<(), GatewayError> {
        self.upsert(message).await
    }

    /// Fetch the complete content snapshot.
    ///
    /// The public mode filters unpublished posts at the request level and
    /// never requests contact messages at all; the same filters are then
    /// applied locally rather than trusting backend policy alone.
    pub async fn fetch_site_data(&self, mode: AccessMode) -> Result<SiteData, GatewayError> {
        if !self.is_configured() {
            return Ok(SiteData::empty());
        }

        let posts = async {
            match mode {
                AccessMode::Admin => self.fetch_all::<BlogPost>().await,
                AccessMode::Public => {
                    self.fetch_where::<BlogPost>(&[("published", "eq.true".to_string())])
                        .await
                }
            }
        };

        let (
            gallery_categories,
            gallery_images,
            mut blog_posts,
            team_members,
            events,
            journey_items,
            stats,
            programs,
            site_settings,
        ) = futures::try_join!(
            self.fetch_all::<GalleryCategory>(),
            self.fetch_all::<GalleryImage>(),
            posts,
            self.fetch_all::<TeamMember>(),
            self.fetch_all::<AppEvent>(),
            self.fetch_all::<JourneyItem>(),
            self.fetch_all::<StatItem>(),
            self.fetch_all::<Program>(),
            self.fetch_settings(),
        )?;

        let contact_messages = match mode {
            AccessMode::Admin => self.fetch_all::<ContactMessage>().await?,
            // The public site never even requests message contents.
            AccessMode::Public => Vec::new(),
        };

        if mode == AccessMode::Public {
            blog_posts.retain(|post| post.published);
        }

        Ok(SiteData {
            gallery_categories,
            gallery_images,
            blog_posts,
            team_members,
            events,
            contact_messages,
            site_settings,
            journey_items,
            stats,
            programs,
        })
    }

    /// Upload an image and return its public URL, or `None` when the
    /// backend is unconfigured or the upload fails.
    pub async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Option<String> {
        let stamp = Utc::now().timestamp_millis();
        let path = format!("{folder}/{stamp}_{file_name}");
        match &self.backend {
            Backend::Disabled => None,
            Backend::Supabase(client) => {
                match client
                    .upload(self.token().as_deref(), "media", &path, content_type, bytes)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(err) => {
                        error!("Image upload failed: {err}");
                        None
                    }
                }
            }
            Backend::Memory(store) => Some(store.store_object(&path)),
        }
    }

    // ── Auth ────────────────────────────────────────────────────────

    /// Current session, if present and unexpired. Discovering an expired
    /// session clears it and pushes a session-destroyed notification.
    pub fn session(&self) -> Option<Session> {
        let session = self.session.read().clone();
        match session {
            Some(s) if s.is_expired() => {
                self.clear_session();
                None
            }
            other => other,
        }
    }

    /// Subscribe to push notifications of session creation/destruction.
    pub fn subscribe_auth(&self) -> watch::Receiver<Option<Session>> {
        self.auth_tx.subscribe()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = match &self.backend {
            Backend::Disabled => return Err(AuthError::NotConfigured),
            Backend::Supabase(client) => client.sign_in(email, password).await?,
            Backend::Memory(store) => {
                if !store.check_credentials(email, password) {
                    return Err(AuthError::InvalidCredentials);
                }
                Session {
                    access_token: format!("mem-{}", Uuid::new_v4()),
                    refresh_token: String::new(),
                    expires_at: Utc::now() + Duration::hours(1),
                    user_email: email.to_string(),
                }
            }
        };

        self.install_session(session.clone());
        Ok(session)
    }

    /// Revoke the session with the backend and clear it locally. The
    /// local clear happens regardless of the call's outcome.
    pub async fn sign_out(&self) -> Result<(), GatewayError> {
        let token = self.token();
        let result = match (&self.backend, token) {
            (Backend::Supabase(client), Some(token)) => client.sign_out(&token).await,
            _ => Ok(()),
        };
        self.clear_session();
        result
    }

    fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.access_token.clone())
    }

    fn install_session(&self, session: Session) {
        *self.session.write() = Some(session.clone());
        self.auth_tx.send_replace(Some(session.clone()));
        self.watch_expiry(session);
    }

    fn clear_session(&self) {
        if let Some(handle) = self.expiry_watch.lock().take() {
            handle.abort();
        }
        *self.session.write() = None;
        self.auth_tx.send_replace(None);
    }

    /// Push a session-destroyed notification when the token expires, so
    /// the guard reacts without polling.
    fn watch_expiry(&self, session: Session) {
        if let Some(handle) = self.expiry_watch.lock().take() {
            handle.abort();
        }

        let remaining = (session.expires_at - Utc::now()).to_std().unwrap_or_default();
        let slot = Arc::clone(&self.session);
        let tx = self.auth_tx.clone();
        let token = session.access_token;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(remaining).await;
            let mut guard = slot.write();
            let still_current = matches!(&*guard, Some(s) if s.access_token == token);
            if still_current {
                *guard = None;
                drop(guard);
                tx.send_replace(None);
            }
        });
        *self.expiry_watch.lock() = Some(handle.abort_handle());
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        if let Some(handle) = self.expiry_watch.lock().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::MessageStatus;

    #[tokio::test]
    async fn disabled_gateway_degrades_to_defaults_without_erroring() {
        let gateway = Gateway::disabled();

        assert!(!gateway.is_configured());
        assert!(gateway.upsert(&StatItem::sample_row()).await.is_ok());
        assert!(gateway.delete::<StatItem>("anything").await.is_ok());
        assert!(gateway.save_settings(&SiteSettings::default()).await.is_ok());

        let stats: Vec<StatItem> = gateway.fetch_all().await.unwrap();
        assert!(stats.is_empty());
        assert_eq!(gateway.fetch_settings().await.unwrap(), SiteSettings::default());
        assert_eq!(
            gateway.fetch_site_data(AccessMode::Public).await.unwrap(),
            SiteData::empty()
        );
        assert!(gateway.upload("gallery", "a.jpg", "image/jpeg", vec![1]).await.is_none());
        assert_eq!(
            gateway.sign_in("a@b.c", "pw").await.unwrap_err(),
            AuthError::NotConfigured
        );
    }

    impl StatItem {
        fn sample_row() -> Self {
            use crate::database::entity::Draftable;
            let mut stat = StatItem::blank(1);
            stat.value = "250+".to_string();
            stat.label_en = "Families supported".to_string();
            stat.label_hi = "परिवारों की सहायता".to_string();
            stat
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips_every_entity_type() {
        let gateway = Gateway::in_memory();

        let category = GalleryCategory::sample("cat-1");
        let image = GalleryImage::sample("img-1", "cat-1");
        let post = BlogPost::sample("post-1");
        let member = TeamMember::sample("member-1");
        let event = AppEvent::sample("event-1");
        let journey = {
            use crate::database::entity::Draftable;
            let mut j = JourneyItem::blank(1);
            j.id = "jrn-1".to_string();
            j.event_en = "Founded".to_string();
            j.event_hi = "स्थापना".to_string();
            j
        };
        let stat = StatItem::sample_row();
        let program = Program::sample("prog-1", 1);
        let message = ContactMessage::incoming("Asha", "asha@example.com", "98", "Hi", "Namaste");

        gateway.upsert(&category).await.unwrap();
        gateway.upsert(&image).await.unwrap();
        gateway.upsert(&post).await.unwrap();
        gateway.upsert(&member).await.unwrap();
        gateway.upsert(&event).await.unwrap();
        gateway.upsert(&journey).await.unwrap();
        gateway.upsert(&stat).await.unwrap();
        gateway.upsert(&program).await.unwrap();
        gateway.insert_message(&message).await.unwrap();

        assert_eq!(gateway.fetch_all::<GalleryCategory>().await.unwrap(), vec![category]);
        assert_eq!(gateway.fetch_all::<GalleryImage>().await.unwrap(), vec![image]);
        assert_eq!(gateway.fetch_all::<BlogPost>().await.unwrap(), vec![post]);
        assert_eq!(gateway.fetch_all::<TeamMember>().await.unwrap(), vec![member]);
        assert_eq!(gateway.fetch_all::<AppEvent>().await.unwrap(), vec![event]);
        assert_eq!(gateway.fetch_all::<JourneyItem>().await.unwrap(), vec![journey]);
        assert_eq!(gateway.fetch_all::<StatItem>().await.unwrap(), vec![stat]);
        assert_eq!(gateway.fetch_all::<Program>().await.unwrap(), vec![program]);
        assert_eq!(gateway.fetch_all::<ContactMessage>().await.unwrap(), vec![message]);
    }

    #[tokio::test]
    async fn upsert_replaces_by_id_instead_of_duplicating() {
        let gateway = Gateway::in_memory();
        let mut program = Program::sample("prog-1", 1);
        gateway.upsert(&program).await.unwrap();

        program.title_en = "Healthcare outreach".to_string();
        gateway.upsert(&program).await.unwrap();

        let programs: Vec<Program> = gateway.fetch_all().await.unwrap();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].title_en, "Healthcare outreach");
    }

    #[tokio::test]
    async fn deleting_a_category_cascades_to_its_images() {
        let gateway = Gateway::in_memory();
        gateway.upsert(&GalleryCategory::sample("cat-1")).await.unwrap();
        gateway.upsert(&GalleryCategory::sample("cat-2")).await.unwrap();
        for i in 0..3 {
            gateway
                .upsert(&GalleryImage::sample(&format!("img-{i}"), "cat-1"))
                .await
                .unwrap();
        }
        gateway.upsert(&GalleryImage::sample("img-other", "cat-2")).await.unwrap();

        gateway.delete::<GalleryCategory>("cat-1").await.unwrap();

        let images: Vec<GalleryImage> = gateway.fetch_all().await.unwrap();
        assert!(images.iter().all(|img| img.category_id != "cat-1"));
        assert_eq!(images.len(), 1);
        let categories: Vec<GalleryCategory> = gateway.fetch_all().await.unwrap();
        assert_eq!(categories.len(), 1);
    }

    #[tokio::test]
    async fn public_fetch_hides_messages_and_unpublished_posts() {
        let gateway = Gateway::in_memory();
        let published = BlogPost::sample("pub");
        let mut draft = BlogPost::sample("draft");
        draft.published = false;
        gateway.upsert(&published).await.unwrap();
        gateway.upsert(&draft).await.unwrap();
        gateway
            .insert_message(&ContactMessage::incoming("A", "a@b.c", "123", "S", "M"))
            .await
            .unwrap();

        let public = gateway.fetch_site_data(AccessMode::Public).await.unwrap();
        assert!(public.contact_messages.is_empty());
        assert_eq!(public.blog_posts.len(), 1);
        assert_eq!(public.blog_posts[0].id, "pub");

        let admin = gateway.fetch_site_data(AccessMode::Admin).await.unwrap();
        assert_eq!(admin.blog_posts.len(), 2);
        assert_eq!(admin.contact_messages.len(), 1);
        assert_eq!(admin.contact_messages[0].status, MessageStatus::New);
    }

    #[tokio::test]
    async fn settings_save_preserves_untouched_fields() {
        let gateway = Gateway::in_memory();
        let mut settings = gateway.fetch_settings().await.unwrap();
        settings.phone = "+911234567890".to_string();
        gateway.save_settings(&settings).await.unwrap();

        let reloaded = gateway.fetch_settings().await.unwrap();
        assert_eq!(reloaded.phone, "+911234567890");
        assert_eq!(reloaded.org_name_en, SiteSettings::default().org_name_en);
        assert_eq!(reloaded.address_hi, SiteSettings::default().address_hi);
    }

    #[tokio::test]
    async fn memory_sign_in_follows_the_auth_contract() {
        let gateway = Gateway::in_memory();
        gateway.memory().unwrap().set_admin("admin@example.com", "secret");

        assert_eq!(
            gateway.sign_in("admin@example.com", "wrong").await.unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(gateway.session().is_none());

        gateway.sign_in("admin@example.com", "secret").await.unwrap();
        assert!(gateway.session().is_some());

        gateway.sign_out().await.unwrap();
        assert!(gateway.session().is_none());
    }

    #[tokio::test]
    async fn upload_returns_a_public_url_under_the_chosen_folder() {
        let gateway = Gateway::in_memory();
        let url = gateway
            .upload("team", "photo.jpg", "image/jpeg", vec![0xFF, 0xD8])
            .await
            .unwrap();
        assert!(url.starts_with("memory://media/team/"));
        assert!(url.ends_with("_photo.jpg"));
    }
}
