//! The complete content snapshot consumed by the public site.

use serde::{Deserialize, Serialize};

use super::{
    AppEvent, BlogPost, ContactMessage, GalleryCategory, GalleryImage, JourneyItem, Program,
    SiteSettings, StatItem, TeamMember,
};

/// Everything the site renders, fetched in one pass and replaced
/// wholesale on refresh. Public fetches leave `contact_messages` empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteData {
    pub gallery_categories: Vec<GalleryCategory>,
    pub gallery_images: Vec<GalleryImage>,
    pub blog_posts: Vec<BlogPost>,
    pub team_members: Vec<TeamMember>,
    pub events: Vec<AppEvent>,
    pub contact_messages: Vec<ContactMessage>,
    pub site_settings: SiteSettings,
    pub journey_items: Vec<JourneyItem>,
    pub stats: Vec<StatItem>,
    pub programs: Vec<Program>,
}

impl SiteData {
    /// Placeholder snapshot used before the first fetch and whenever the
    /// backend is unconfigured.
    pub fn empty() -> Self {
        Self::default()
    }
}
