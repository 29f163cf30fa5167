//! Home page: hero, stats band, programs, upcoming events, latest posts.

use chrono::NaiveDate;
use serde::Serialize;

use crate::database::models::{BlogPost, SiteData};
use crate::i18n::LanguageStore;

use super::blog::BlogCard;
use super::work::ProgramView;

#[derive(Debug, Serialize)]
pub struct StatView {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct EventCard {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub org_name: String,
    pub tagline: String,
    pub mission: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub programs: Vec<ProgramView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<BlogCard>,
}

pub fn view(data: &SiteData, loc: &LanguageStore) -> HomeView {
    // Three latest published posts for the news strip.
    let mut posts: Vec<&BlogPost> = data.blog_posts.iter().filter(|p| p.published).collect();
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    let posts = posts.into_iter().take(3).map(|p| BlogCard::of(p, loc)).collect();

    let settings = &data.site_settings;

    HomeView {
        org_name: loc.pick(&settings.org_name_en, &settings.org_name_hi).clone(),
        tagline: loc.translate("hero.tagline"),
        mission: loc.translate("hero.mission"),
        stats: data
            .stats
            .iter()
            .map(|s| StatView {
                value: s.value.clone(),
                label: loc.pick(&s.label_en, &s.label_hi).clone(),
            })
            .collect(),
        programs: data
            .programs
            .iter()
            .map(|p| ProgramView::of(p, loc))
            .collect(),
        events: data
            .events
            .iter()
            .take(2)
            .map(|e| EventCard {
                title: loc.pick(&e.title_en, &e.title_hi).clone(),
                description: loc.pick(&e.description_en, &e.description_hi).clone(),
                date: e.date,
                time: e.time.clone(),
                location: loc.pick(&e.location_en, &e.location_hi).clone(),
            })
            .collect(),
        posts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{AppEvent, BlogPost};
    use crate::i18n::{Lang, LanguageStore};
    use chrono::Datelike;

    fn loc() -> LanguageStore {
        let store = LanguageStore::load(
            &std::env::temp_dir().join(format!("nayisubah_home_test_{}", std::process::id())),
        );
        store.set_lang(Lang::En);
        store
    }

    #[test]
    fn home_caps_posts_at_three_and_events_at_two() {
        let mut data = SiteData::empty();
        for i in 0..5 {
            let mut post = BlogPost::sample(&format!("post-{i}"));
            post.published_at = post.published_at.with_year(2020 + i).unwrap();
            data.blog_posts.push(post);
        }
        for i in 0..4 {
            data.events.push(AppEvent::sample(&format!("event-{i}")));
        }

        let view = view(&data, &loc());
        assert_eq!(view.posts.len(), 3);
        assert_eq!(view.events.len(), 2);
        // Latest first.
        assert_eq!(view.posts[0].id, "post-4");
    }

    #[test]
    fn unpublished_posts_never_reach_the_home_page() {
        let mut data = SiteData::empty();
        let mut draft = BlogPost::sample("draft");
        draft.published = false;
        data.blog_posts.push(draft);

        let view = view(&data, &loc());
        assert!(view.posts.is_empty());
        assert_eq!(view.org_name, "Nayi Subah Foundation");
        assert_eq!(view.tagline, "A New Dawn of Hope & Service");
    }
}
