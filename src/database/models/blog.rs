//! Blog posts. Only published posts are visible publicly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Draftable, Entity, SortKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title_en: String,
    pub title_hi: String,
    pub excerpt_en: String,
    pub excerpt_hi: String,
    pub content_en: String,
    pub content_hi: String,
    pub featured_image: String,
    /// Free-text category label.
    pub category: String,
    pub published: bool,
    pub published_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Entity for BlogPost {
    const TABLE: &'static str = "blog_posts";
    const SORT: SortKey = SortKey::desc("published_at");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for BlogPost {
    fn blank(_next_sort: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title_en: String::new(),
            title_hi: String::new(),
            excerpt_en: String::new(),
            excerpt_hi: String::new(),
            content_en: String::new(),
            content_hi: String::new(),
            featured_image: String::new(),
            category: "General".to_string(),
            published: false,
            published_at: now.date_naive(),
            created_at: now,
        }
    }
}

#[cfg(test)]
impl BlogPost {
    pub(crate) fn sample(id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            title_en: "Winter relief drive".to_string(),
            title_hi: "शीतकालीन राहत अभियान".to_string(),
            excerpt_en: "Blankets distributed across Rampur.".to_string(),
            excerpt_hi: "रामपुर में कंबल वितरित किए गए।".to_string(),
            content_en: "<p>Full report.</p>".to_string(),
            content_hi: "<p>पूरी रिपोर्ट।</p>".to_string(),
            featured_image: String::new(),
            category: "General".to_string(),
            published: true,
            published_at: now.date_naive(),
            created_at: now,
        }
    }
}
