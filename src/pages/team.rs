//! Team page: member cards with expertise and contact details.

use serde::Serialize;

use crate::database::models::{SiteData, SocialLinks};
use crate::i18n::LanguageStore;

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub name: String,
    pub role: String,
    pub bio: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expertise: Vec<String>,
    pub social: SocialLinks,
}

#[derive(Debug, Serialize)]
pub struct TeamView {
    pub title: String,
    pub expertise_title: String,
    pub contact_title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberView>,
}

pub fn view(data: &SiteData, loc: &LanguageStore) -> TeamView {
    TeamView {
        title: loc.translate("team.title"),
        expertise_title: loc.translate("team.expertise"),
        contact_title: loc.translate("team.contact"),
        members: data
            .team_members
            .iter()
            .map(|member| MemberView {
                name: loc.pick(&member.name_en, &member.name_hi).clone(),
                role: loc.pick(&member.role_en, &member.role_hi).clone(),
                bio: loc.pick(&member.bio_en, &member.bio_hi).clone(),
                phone: member.phone.clone(),
                email: member.email.clone(),
                image_url: member.image_url.clone(),
                expertise: loc
                    .pick(&member.expertise_en, &member.expertise_hi)
                    .clone(),
                social: member.social.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::TeamMember;
    use crate::i18n::{Lang, LanguageStore};

    #[test]
    fn expertise_follows_the_active_language_as_a_whole_list() {
        let mut data = SiteData::empty();
        data.team_members.push(TeamMember::sample("m-1"));

        let store = LanguageStore::load(
            &std::env::temp_dir().join(format!("nayisubah_team_test_{}", std::process::id())),
        );
        store.set_lang(Lang::En);
        let en = view(&data, &store);
        assert_eq!(en.members[0].expertise, vec!["Education", "Outreach"]);

        store.set_lang(Lang::Hi);
        let hi = view(&data, &store);
        assert_eq!(hi.members[0].expertise, vec!["शिक्षा", "आउटरीच"]);
        assert_eq!(hi.members[0].name, "रवि शर्मा");
    }
}
