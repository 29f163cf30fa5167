//! Gallery content: categories and the photos inside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Cascade, Draftable, Entity, SortKey};

/// A gallery category. Deleting one cascades to its photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryCategory {
    pub id: String,
    pub name_en: String,
    pub name_hi: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Entity for GalleryCategory {
    const TABLE: &'static str = "gallery_categories";
    const SORT: SortKey = SortKey::asc("sort_order");
    const CASCADE: Option<Cascade> = Some(Cascade {
        table: "gallery_images",
        column: "category_id",
    });

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for GalleryCategory {
    fn blank(next_sort: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name_en: String::new(),
            name_hi: String::new(),
            sort_order: next_sort,
            created_at: Utc::now(),
        }
    }
}

/// A photo. `category_id` is a weak reference to its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub category_id: String,
    pub url: String,
    pub title_en: String,
    pub title_hi: String,
    pub description_en: String,
    pub description_hi: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Entity for GalleryImage {
    const TABLE: &'static str = "gallery_images";
    const SORT: SortKey = SortKey::asc("sort_order");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draftable for GalleryImage {
    fn blank(next_sort: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category_id: String::new(),
            url: String::new(),
            title_en: String::new(),
            title_hi: String::new(),
            description_en: String::new(),
            description_hi: String::new(),
            sort_order: next_sort,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
impl GalleryCategory {
    pub(crate) fn sample(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name_en: "Education".to_string(),
            name_hi: "शिक्षा".to_string(),
            sort_order: 1,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
impl GalleryImage {
    pub(crate) fn sample(id: &str, category_id: &str) -> Self {
        Self {
            id: id.to_string(),
            category_id: category_id.to_string(),
            url: format!("https://cdn.example.com/{id}.jpg"),
            title_en: "School visit".to_string(),
            title_hi: "स्कूल यात्रा".to_string(),
            description_en: String::new(),
            description_hi: String::new(),
            sort_order: 1,
            created_at: Utc::now(),
        }
    }
}
