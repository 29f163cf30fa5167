//! About page: vision, mission and the journey timeline.

use serde::Serialize;

use crate::database::models::SiteData;
use crate::i18n::LanguageStore;

#[derive(Debug, Serialize)]
pub struct JourneyView {
    pub year: String,
    pub event: String,
}

#[derive(Debug, Serialize)]
pub struct AboutView {
    pub title: String,
    pub description: String,
    pub vision_title: String,
    pub vision: String,
    pub mission_title: String,
    pub mission: String,
    pub journey_title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub journey: Vec<JourneyView>,
}

pub fn view(data: &SiteData, loc: &LanguageStore) -> AboutView {
    AboutView {
        title: loc.translate("about.title"),
        description: loc.translate("about.desc"),
        vision_title: loc.translate("about.vision.title"),
        vision: loc.translate("about.vision.text"),
        mission_title: loc.translate("about.mission.title"),
        mission: loc.translate("about.mission.text"),
        journey_title: loc.translate("about.journey"),
        journey: data
            .journey_items
            .iter()
            .map(|item| JourneyView {
                year: item.year.clone(),
                event: loc.pick(&item.event_en, &item.event_hi).clone(),
            })
            .collect(),
    }
}
