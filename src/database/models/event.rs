//! Events. No published flag: every event is public.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Draftable, Entity, SortKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEvent {
    pub id: String,
    pub title_en: String,
    pub title_hi: String,
    pub description_en: String,
    pub description_hi: String,
    pub date: NaiveDate,
    /// Free text, e.g. "10:00 AM onwards".
    pub time: String,
    pub location_en: String,
    pub location_hi: String,
}

impl Entity for AppEvent {
    const TABLE: &'static str = "events";
    const SORT: SortKey = SortKey::asc("date");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for AppEvent {
    fn blank(_next_sort: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title_en: String::new(),
            title_hi: String::new(),
            description_en: String::new(),
            description_hi: String::new(),
            date: Utc::now().date_naive(),
            time: String::new(),
            location_en: String::new(),
            location_hi: String::new(),
        }
    }
}

#[cfg(test)]
impl AppEvent {
    pub(crate) fn sample(id: &str) -> Self {
        let mut event = Self::blank(1);
        event.id = id.to_string();
        event.title_en = "Health camp".to_string();
        event.title_hi = "स्वास्थ्य शिविर".to_string();
        event.time = "10:00 AM".to_string();
        event.location_en = "Rampur".to_string();
        event.location_hi = "रामपुर".to_string();
        event
    }
}
