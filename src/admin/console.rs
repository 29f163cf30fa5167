//! The admin console: session guard, section switch, the ten entity
//! panels, the settings editor and the dashboard overview.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::Guard;
use crate::database::models::{
    AppEvent, BlogPost, ContactMessage, GalleryCategory, GalleryImage, JourneyItem, MessageStatus,
    Program, SiteSettings, StatItem, TeamMember,
};
use crate::database::{AccessMode, Gateway, GatewayError};

use super::panel::Panel;
use super::status::{PanelStatus, StatusBanner};

/// Sections of the console's internal view switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Overview,
    Gallery,
    Blog,
    Team,
    Events,
    Journey,
    Stats,
    Programs,
    Messages,
    Settings,
}

impl Section {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "overview" => Some(Section::Overview),
            "gallery" => Some(Section::Gallery),
            "blog" => Some(Section::Blog),
            "team" => Some(Section::Team),
            "events" => Some(Section::Events),
            "journey" => Some(Section::Journey),
            "stats" => Some(Section::Stats),
            "programs" => Some(Section::Programs),
            "messages" => Some(Section::Messages),
            "settings" => Some(Section::Settings),
            _ => None,
        }
    }

    pub fn as_slug(self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Gallery => "gallery",
            Section::Blog => "blog",
            Section::Team => "team",
            Section::Events => "events",
            Section::Journey => "journey",
            Section::Stats => "stats",
            Section::Programs => "programs",
            Section::Messages => "messages",
            Section::Settings => "settings",
        }
    }
}

/// Dashboard overview: counts plus the newest unread messages.
#[derive(Debug, Serialize)]
pub struct Overview {
    pub photos: usize,
    pub blog_posts: usize,
    pub team_members: usize,
    pub messages: usize,
    pub new_messages: Vec<ContactMessage>,
}

pub struct AdminConsole {
    gateway: Arc<Gateway>,
    pub guard: Guard,
    pub categories: Panel<GalleryCategory>,
    pub images: Panel<GalleryImage>,
    pub posts: Panel<BlogPost>,
    pub team: Panel<TeamMember>,
    pub events: Panel<AppEvent>,
    pub journey: Panel<JourneyItem>,
    pub stats: Panel<StatItem>,
    pub programs: Panel<Program>,
    pub messages: Panel<ContactMessage>,
    settings: Mutex<SiteSettings>,
    pub settings_banner: StatusBanner,
    section: Mutex<Section>,
}

impl AdminConsole {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            guard: Guard::new(Arc::clone(&gateway)),
            categories: Panel::new(Arc::clone(&gateway)),
            images: Panel::new(Arc::clone(&gateway)),
            posts: Panel::new(Arc::clone(&gateway)),
            team: Panel::new(Arc::clone(&gateway)),
            events: Panel::new(Arc::clone(&gateway)),
            journey: Panel::new(Arc::clone(&gateway)),
            stats: Panel::new(Arc::clone(&gateway)),
            programs: Panel::new(Arc::clone(&gateway)),
            messages: Panel::new(Arc::clone(&gateway)),
            settings: Mutex::new(SiteSettings::default()),
            settings_banner: StatusBanner::new(),
            section: Mutex::new(Section::Overview),
            gateway,
        }
    }

    pub fn section(&self) -> Section {
        *self.section.lock()
    }

    pub fn switch_section(&self, section: Section) {
        *self.section.lock() = section;
    }

    /// Counts and fresh messages for the overview dashboard.
    pub async fn overview(&self) -> Result<Overview, GatewayError> {
        let data = self.gateway.fetch_site_data(AccessMode::Admin).await?;
        let new_messages = data
            .contact_messages
            .iter()
            .filter(|m| m.status == MessageStatus::New)
            .take(5)
            .cloned()
            .collect();
        Ok(Overview {
            photos: data.gallery_images.len(),
            blog_posts: data.blog_posts.len(),
            team_members: data.team_members.len(),
            messages: data.contact_messages.len(),
            new_messages,
        })
    }

    /// Seed a new photo draft, defaulting to the first gallery category.
    pub async fn begin_image_draft(&self) -> GalleryImage {
        if self.categories.items().is_empty() {
            self.categories.load().await;
        }
        let mut draft = self.images.begin_create();
        if draft.category_id.is_empty() {
            if let Some(first) = self.categories.items().first() {
                draft.category_id = first.id.clone();
                self.images.begin_edit(draft.clone());
            }
        }
        draft
    }

    /// Change a message's status. Modeled as a full-record upsert, the
    /// only mutation the data model defines.
    pub async fn set_message_status(&self, id: &str, status: MessageStatus) -> bool {
        if self.messages.items().is_empty() {
            self.messages.load().await;
        }
        let Some(mut message) = self.messages.items().into_iter().find(|m| m.id == id) else {
            warn!("Unknown contact message: {id}");
            return false;
        };
        message.status = status;
        self.messages.save(message).await
    }

    /// The settings snapshot currently held by the editor.
    pub fn settings(&self) -> SiteSettings {
        self.settings.lock().clone()
    }

    /// Re-fetch settings from the backend into the editor.
    pub async fn load_settings(&self) -> bool {
        match self.gateway.fetch_settings().await {
            Ok(settings) => {
                *self.settings.lock() = settings;
                true
            }
            Err(err) => {
                warn!("Failed to load settings: {err}");
                false
            }
        }
    }

    /// Save the whole settings snapshot, then reload it.
    pub async fn save_settings(&self, snapshot: SiteSettings) -> bool {
        self.settings_banner.set(PanelStatus::Saving);

        let result = async {
            self.gateway.save_settings(&snapshot).await?;
            self.gateway.fetch_settings().await
        }
        .await;

        match result {
            Ok(reloaded) => {
                *self.settings.lock() = reloaded;
                self.settings_banner.set(PanelStatus::Saved);
                true
            }
            Err(err) => {
                warn!("Failed to save settings: {err}");
                self.settings_banner.set(PanelStatus::Error);
                false
            }
        }
    }

    /// Upload an image for one of the console's image fields. The folder
    /// keeps gallery photos, team portraits and blog covers apart.
    pub async fn upload_image(
        &self,
        folder: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Option<String> {
        self.gateway.upload(folder, file_name, content_type, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_console() -> AdminConsole {
        AdminConsole::new(Arc::new(Gateway::in_memory()))
    }

    #[test]
    fn section_slugs_round_trip() {
        for section in [
            Section::Overview,
            Section::Gallery,
            Section::Blog,
            Section::Team,
            Section::Events,
            Section::Journey,
            Section::Stats,
            Section::Programs,
            Section::Messages,
            Section::Settings,
        ] {
            assert_eq!(Section::from_slug(section.as_slug()), Some(section));
        }
        assert_eq!(Section::from_slug("unknown"), None);
    }

    #[tokio::test]
    async fn mark_read_rewrites_the_whole_message() {
        let console = memory_console();
        let message = ContactMessage::incoming("Asha", "asha@example.com", "98", "Hello", "Namaste");
        console.gateway.insert_message(&message).await.unwrap();

        assert!(console.set_message_status(&message.id, MessageStatus::Read).await);

        let stored = console.messages.items();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, MessageStatus::Read);
        assert_eq!(stored[0].message, "Namaste");
    }

    #[tokio::test]
    async fn editing_one_settings_field_preserves_the_rest() {
        let console = memory_console();
        console.load_settings().await;

        let mut snapshot = console.settings();
        snapshot.phone = "+910000000000".to_string();
        assert!(console.save_settings(snapshot).await);

        console.load_settings().await;
        let reloaded = console.settings();
        assert_eq!(reloaded.phone, "+910000000000");
        assert_eq!(reloaded.org_name_hi, SiteSettings::default().org_name_hi);
        assert_eq!(console.settings_banner.get(), PanelStatus::Saved);
    }

    #[tokio::test]
    async fn new_image_drafts_land_in_the_first_category() {
        let console = memory_console();
        console
            .gateway
            .upsert(&GalleryCategory::sample("cat-1"))
            .await
            .unwrap();

        let draft = console.begin_image_draft().await;
        assert_eq!(draft.category_id, "cat-1");
        assert_eq!(console.images.draft(), Some(draft));
    }

    #[tokio::test]
    async fn overview_counts_come_from_the_admin_snapshot() {
        let console = memory_console();
        console
            .gateway
            .insert_message(&ContactMessage::incoming("A", "a@b.c", "1", "s", "m"))
            .await
            .unwrap();
        console
            .gateway
            .upsert(&GalleryImage::sample("img-1", "cat-1"))
            .await
            .unwrap();

        let overview = console.overview().await.unwrap();
        assert_eq!(overview.photos, 1);
        assert_eq!(overview.messages, 1);
        assert_eq!(overview.new_messages.len(), 1);
    }
}
