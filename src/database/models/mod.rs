//! Content record types.

pub mod blog;
pub mod event;
pub mod gallery;
pub mod journey;
pub mod message;
pub mod program;
pub mod settings;
pub mod site_data;
pub mod stat;
pub mod team;

pub use blog::BlogPost;
pub use event::AppEvent;
pub use gallery::{GalleryCategory, GalleryImage};
pub use journey::JourneyItem;
pub use message::{ContactMessage, MessageStatus};
pub use program::Program;
pub use settings::{SettingRow, SiteSettings};
pub use site_data::SiteData;
pub use stat::StatItem;
pub use team::{SocialLinks, TeamMember};
