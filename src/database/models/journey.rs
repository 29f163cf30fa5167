//! Journey timeline milestones shown on the about page.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Draftable, Entity, SortKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyItem {
    pub id: String,
    /// Free text, e.g. "2019" or "Early 2020".
    pub year: String,
    pub event_en: String,
    pub event_hi: String,
    pub sort_order: i32,
}

impl Entity for JourneyItem {
    const TABLE: &'static str = "journey_items";
    const SORT: SortKey = SortKey::asc("sort_order");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for JourneyItem {
    fn blank(next_sort: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            year: Utc::now().year().to_string(),
            event_en: String::new(),
            event_hi: String::new(),
            sort_order: next_sort,
        }
    }
}
