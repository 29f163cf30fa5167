//! Programs / initiatives listed on the home and our-work pages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Draftable, Entity, SortKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub title_en: String,
    pub title_hi: String,
    pub description_en: String,
    pub description_hi: String,
    /// Icon name understood by the front end.
    pub icon: String,
    /// Accent color label understood by the front end.
    pub color: String,
    pub sort_order: i32,
}

impl Entity for Program {
    const TABLE: &'static str = "programs";
    const SORT: SortKey = SortKey::asc("sort_order");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for Program {
    fn blank(next_sort: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title_en: String::new(),
            title_hi: String::new(),
            description_en: String::new(),
            description_hi: String::new(),
            icon: "Heart".to_string(),
            color: "blue".to_string(),
            sort_order: next_sort,
        }
    }
}

#[cfg(test)]
impl Program {
    pub(crate) fn sample(id: &str, sort_order: i32) -> Self {
        let mut program = Self::blank(sort_order);
        program.id = id.to_string();
        program.title_en = "Education support".to_string();
        program.title_hi = "शिक्षा सहायता".to_string();
        program.description_en = "School kits and tuition help.".to_string();
        program.description_hi = "स्कूल किट और ट्यूशन सहायता।".to_string();
        program
    }
}
