//! Our-work page: the full program list.

use serde::Serialize;

use crate::database::models::{Program, SiteData};
use crate::i18n::LanguageStore;

#[derive(Debug, Serialize)]
pub struct ProgramView {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

impl ProgramView {
    pub(crate) fn of(program: &Program, loc: &LanguageStore) -> Self {
        Self {
            title: loc.pick(&program.title_en, &program.title_hi).clone(),
            description: loc
                .pick(&program.description_en, &program.description_hi)
                .clone(),
            icon: program.icon.clone(),
            color: program.color.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkView {
    pub title: String,
    pub intro: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub programs: Vec<ProgramView>,
}

pub fn view(data: &SiteData, loc: &LanguageStore) -> WorkView {
    WorkView {
        title: loc.translate("work.title"),
        intro: loc.translate("work.intro"),
        programs: data
            .programs
            .iter()
            .map(|p| ProgramView::of(p, loc))
            .collect(),
    }
}
