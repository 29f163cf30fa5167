//! Shared application state handed to every route handler.

use std::sync::Arc;

use crate::admin::AdminConsole;
use crate::database::Gateway;
use crate::i18n::LanguageStore;
use crate::store::SiteStore;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub store: Arc<SiteStore>,
    pub lang: Arc<LanguageStore>,
    pub console: Arc<AdminConsole>,
}
