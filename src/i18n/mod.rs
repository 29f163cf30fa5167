//! Internationalization (i18n) module.
//!
//! Embeds the English and Hindi phrase tables and resolves translation
//! keys for the active language. The active language is process-wide
//! state, initialized from a persisted preference.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// The two supported languages.
///
/// Fixed at build time: adding a language means widening the phrase
/// tables and every `_en`/`_hi` field pair, not flipping a config value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Hi,
}

/// Language used when no valid preference is stored.
pub const DEFAULT_LANG: Lang = Lang::Hi;

impl Lang {
    /// Two-letter language code, also used as the document-level
    /// `lang` attribute value.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Hi => "hi",
        }
    }

    /// Parse a stored language code. Anything other than the two
    /// supported codes is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Lang::En),
            "hi" => Some(Lang::Hi),
            _ => None,
        }
    }
}

/// Embedded phrase tables, parsed once on first use (no file I/O at runtime).
static TRANSLATIONS: Lazy<HashMap<Lang, Value>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (lang, raw) in [
        (Lang::En, include_str!("en.json")),
        (Lang::Hi, include_str!("hi.json")),
    ] {
        match serde_json::from_str(raw) {
            Ok(val) => {
                map.insert(lang, val);
            }
            Err(err) => warn!("Failed to parse embedded {} phrase table: {err}", lang.code()),
        }
    }
    map
});

/// Get text for a key in a specific language.
///
/// Supports nested keys via dot notation, e.g. "hero.cta.learn".
/// Falls back to English if the key is absent for the requested
/// language, and to the key itself if no table has it. Never fails.
pub fn get_text(lang: Lang, key: &str) -> String {
    if let Some(val) = TRANSLATIONS.get(&lang) {
        if let Some(text) = resolve_key(val, key) {
            return text;
        }
    }

    if lang != Lang::En {
        if let Some(val) = TRANSLATIONS.get(&Lang::En) {
            if let Some(text) = resolve_key(val, key) {
                return text;
            }
        }
    }

    key.to_string()
}

fn resolve_key(val: &Value, key: &str) -> Option<String> {
    let mut current = val;
    for part in key.split('.') {
        match current.get(part) {
            Some(v) => current = v,
            None => return None,
        }
    }
    current.as_str().map(|s| s.to_string())
}

/// Process-wide active-language state.
///
/// Holds the active language, persists preference changes to a small
/// state file, and exposes the document-level language attribute for
/// page envelopes. Constructed once in `main` and shared.
pub struct LanguageStore {
    active: RwLock<Lang>,
    pref_path: PathBuf,
}

impl LanguageStore {
    /// Initialize from the persisted preference file.
    ///
    /// A missing file or an unrecognized stored code falls back to
    /// Hindi, the site's default.
    pub fn load(pref_path: &Path) -> Self {
        let stored = fs::read_to_string(pref_path)
            .ok()
            .and_then(|s| Lang::from_code(&s));
        let active = stored.unwrap_or(DEFAULT_LANG);
        debug!("Active language: {}", active.code());

        Self {
            active: RwLock::new(active),
            pref_path: pref_path.to_path_buf(),
        }
    }

    /// Currently active language.
    pub fn lang(&self) -> Lang {
        *self.active.read()
    }

    pub fn is_hi(&self) -> bool {
        self.lang() == Lang::Hi
    }

    /// Document-level language attribute, carried by every page view.
    pub fn html_lang(&self) -> &'static str {
        self.lang().code()
    }

    /// Switch the active language and persist the preference.
    pub fn set_lang(&self, lang: Lang) {
        *self.active.write() = lang;
        if let Err(err) = fs::write(&self.pref_path, lang.code()) {
            warn!("Failed to persist language preference: {err}");
        }
    }

    /// Resolve a translation key for the active language.
    pub fn translate(&self, key: &str) -> String {
        get_text(self.lang(), key)
    }

    /// Pick the variant of a bilingual field pair matching the active
    /// language. Generic over the value type.
    pub fn pick<T>(&self, en: T, hi: T) -> T {
        match self.lang() {
            Lang::En => en,
            Lang::Hi => hi,
        }
    }
}
