//! Team members shown on the public team page.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Draftable, Entity, SortKey};

/// Social profile links. Every platform is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name_en: String,
    pub name_hi: String,
    pub role_en: String,
    pub role_hi: String,
    pub bio_en: String,
    pub bio_hi: String,
    pub phone: String,
    pub email: String,
    pub image_url: String,
    /// Expertise lists always default to empty, never absent.
    #[serde(default)]
    pub expertise_en: Vec<String>,
    #[serde(default)]
    pub expertise_hi: Vec<String>,
    #[serde(default)]
    pub social: SocialLinks,
    pub sort_order: i32,
}

impl Entity for TeamMember {
    const TABLE: &'static str = "team_members";
    const SORT: SortKey = SortKey::asc("sort_order");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for TeamMember {
    fn blank(next_sort: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name_en: String::new(),
            name_hi: String::new(),
            role_en: String::new(),
            role_hi: String::new(),
            bio_en: String::new(),
            bio_hi: String::new(),
            phone: String::new(),
            email: String::new(),
            image_url: String::new(),
            expertise_en: Vec::new(),
            expertise_hi: Vec::new(),
            social: SocialLinks::default(),
            sort_order: next_sort,
        }
    }
}

#[cfg(test)]
impl TeamMember {
    pub(crate) fn sample(id: &str) -> Self {
        let mut member = Self::blank(1);
        member.id = id.to_string();
        member.name_en = "Ravi Sharma".to_string();
        member.name_hi = "रवि शर्मा".to_string();
        member.role_en = "Coordinator".to_string();
        member.role_hi = "समन्वयक".to_string();
        member.expertise_en = vec!["Education".to_string(), "Outreach".to_string()];
        member.expertise_hi = vec!["शिक्षा".to_string(), "आउटरीच".to_string()];
        member
    }
}
