//! Homepage statistics ("100+ children educated" and the like).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Draftable, Entity, SortKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub id: String,
    /// Free text, e.g. "100+".
    pub value: String,
    pub label_en: String,
    pub label_hi: String,
    pub sort_order: i32,
}

impl Entity for StatItem {
    const TABLE: &'static str = "stats";
    const SORT: SortKey = SortKey::asc("sort_order");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for StatItem {
    fn blank(next_sort: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            value: String::new(),
            label_en: String::new(),
            label_hi: String::new(),
            sort_order: next_sort,
        }
    }
}
