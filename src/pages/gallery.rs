//! Gallery page: category filter chips and the photo grid.

use serde::Serialize;

use crate::database::models::SiteData;
use crate::i18n::LanguageStore;

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ImageView {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub title: String,
    pub all_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageView>,
}

/// Gallery view, optionally narrowed to one category. `None` is the
/// "all photos" pseudo-category.
pub fn view(data: &SiteData, loc: &LanguageStore, active_category: Option<&str>) -> GalleryView {
    let images = data
        .gallery_images
        .iter()
        .filter(|img| active_category.is_none_or(|cat| img.category_id == cat))
        .map(|img| ImageView {
            id: img.id.clone(),
            url: img.url.clone(),
            title: loc.pick(&img.title_en, &img.title_hi).clone(),
            description: loc.pick(&img.description_en, &img.description_hi).clone(),
        })
        .collect();

    GalleryView {
        title: loc.translate("gallery.title"),
        all_label: loc.translate("gallery.all"),
        active_category: active_category.map(str::to_string),
        categories: data
            .gallery_categories
            .iter()
            .map(|cat| CategoryView {
                id: cat.id.clone(),
                name: loc.pick(&cat.name_en, &cat.name_hi).clone(),
            })
            .collect(),
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{GalleryCategory, GalleryImage};
    use crate::i18n::{Lang, LanguageStore};

    fn loc() -> LanguageStore {
        let store = LanguageStore::load(
            &std::env::temp_dir().join(format!("nayisubah_gallery_test_{}", std::process::id())),
        );
        store.set_lang(Lang::Hi);
        store
    }

    #[test]
    fn category_filter_narrows_the_grid() {
        let mut data = SiteData::empty();
        data.gallery_categories.push(GalleryCategory::sample("cat-1"));
        data.gallery_images.push(GalleryImage::sample("img-1", "cat-1"));
        data.gallery_images.push(GalleryImage::sample("img-2", "cat-2"));

        let all = view(&data, &loc(), None);
        assert_eq!(all.images.len(), 2);
        assert!(all.active_category.is_none());

        let narrowed = view(&data, &loc(), Some("cat-1"));
        assert_eq!(narrowed.images.len(), 1);
        assert_eq!(narrowed.images[0].id, "img-1");
        assert_eq!(narrowed.categories[0].name, "शिक्षा");
    }
}
