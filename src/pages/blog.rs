//! Blog list and detail views. Published posts only.

use chrono::NaiveDate;
use serde::Serialize;

use crate::database::models::{BlogPost, SiteData};
use crate::i18n::LanguageStore;

#[derive(Debug, Serialize)]
pub struct BlogCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub published_at: NaiveDate,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub featured_image: String,
}

impl BlogCard {
    pub(crate) fn of(post: &BlogPost, loc: &LanguageStore) -> Self {
        Self {
            id: post.id.clone(),
            title: loc.pick(&post.title_en, &post.title_hi).clone(),
            excerpt: loc.pick(&post.excerpt_en, &post.excerpt_hi).clone(),
            category: post.category.clone(),
            published_at: post.published_at,
            featured_image: post.featured_image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlogListView {
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<BlogCard>,
}

pub fn list(data: &SiteData, loc: &LanguageStore) -> BlogListView {
    // The public snapshot is already filtered, but never rely on that alone.
    let mut posts: Vec<&BlogPost> = data.blog_posts.iter().filter(|p| p.published).collect();
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    BlogListView {
        title: loc.translate("blog.title"),
        posts: posts.into_iter().map(|p| BlogCard::of(p, loc)).collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub published_at: NaiveDate,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub featured_image: String,
    /// Label for the way back to the list.
    pub back_label: String,
}

/// Detail view by id. `None` is the explicit not-found state; the
/// caller renders it with a way back instead of crashing.
pub fn detail(data: &SiteData, loc: &LanguageStore, id: &str) -> Option<PostView> {
    let post = data.blog_posts.iter().find(|p| p.id == id && p.published)?;
    Some(PostView {
        id: post.id.clone(),
        title: loc.pick(&post.title_en, &post.title_hi).clone(),
        content: loc.pick(&post.content_en, &post.content_hi).clone(),
        category: post.category.clone(),
        published_at: post.published_at,
        featured_image: post.featured_image.clone(),
        back_label: loc.translate("blog.back"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Lang, LanguageStore};

    fn loc(lang: Lang) -> LanguageStore {
        let store = LanguageStore::load(&std::env::temp_dir().join(format!(
            "nayisubah_blog_test_{}_{}",
            lang.code(),
            std::process::id()
        )));
        store.set_lang(lang);
        store
    }

    fn snapshot() -> SiteData {
        let mut data = SiteData::empty();
        data.blog_posts.push(BlogPost::sample("pub-1"));
        let mut draft = BlogPost::sample("draft-1");
        draft.published = false;
        data.blog_posts.push(draft);
        data
    }

    #[test]
    fn list_hides_unpublished_posts() {
        let data = snapshot();
        let view = list(&data, &loc(Lang::En));
        assert_eq!(view.posts.len(), 1);
        assert_eq!(view.posts[0].id, "pub-1");
        assert_eq!(view.posts[0].title, "Winter relief drive");
    }

    #[test]
    fn detail_resolves_content_for_the_active_language() {
        let data = snapshot();
        let view = detail(&data, &loc(Lang::Hi), "pub-1").unwrap();
        assert_eq!(view.title, "शीतकालीन राहत अभियान");
        assert_eq!(view.content, "<p>पूरी रिपोर्ट।</p>");
        assert_eq!(view.back_label, "ब्लॉग पर वापस जाएं");
    }

    #[test]
    fn missing_or_unpublished_ids_are_an_explicit_not_found() {
        let data = snapshot();
        assert!(detail(&data, &loc(Lang::En), "nope").is_none());
        assert!(detail(&data, &loc(Lang::En), "draft-1").is_none());
    }
}
