//! Site-wide settings.
//!
//! Stored as key/value rows in the backend and materialized into one
//! snapshot object, with defaults for any missing key. Saved back as a
//! whole snapshot re-expanded into rows; there is no per-field update.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub org_name_en: String,
    pub org_name_hi: String,
    pub email: String,
    pub phone: String,
    pub phone2: String,
    pub address_en: String,
    pub address_hi: String,
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub youtube: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            org_name_en: "Nayi Subah Foundation".to_string(),
            org_name_hi: "नयी सुबह फाउंडेशन".to_string(),
            email: "nayisubahfoundation@gmail.com".to_string(),
            phone: "+917310748827".to_string(),
            phone2: "+918218129845".to_string(),
            address_en: "Rampur, Uttar Pradesh, India - 244901".to_string(),
            address_hi: "रामपुर, उत्तर प्रदेश, भारत - 244901".to_string(),
            facebook: String::new(),
            twitter: String::new(),
            instagram: String::new(),
            youtube: String::new(),
        }
    }
}

/// One row of the key/value settings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
}

impl SiteSettings {
    /// Materialize a snapshot from key/value rows. Missing keys keep
    /// their defaults; unknown keys are ignored.
    pub fn from_rows(rows: &[SettingRow]) -> Self {
        let mut settings = Self::default();
        for row in rows {
            if let Some(slot) = settings.slot_mut(&row.key) {
                *slot = row.value.clone();
            }
        }
        settings
    }

    /// Expand the snapshot back into key/value rows for a
    /// whole-snapshot save.
    pub fn to_rows(&self) -> Vec<SettingRow> {
        let pairs = [
            ("org_name_en", &self.org_name_en),
            ("org_name_hi", &self.org_name_hi),
            ("email", &self.email),
            ("phone", &self.phone),
            ("phone2", &self.phone2),
            ("address_en", &self.address_en),
            ("address_hi", &self.address_hi),
            ("facebook", &self.facebook),
            ("twitter", &self.twitter),
            ("instagram", &self.instagram),
            ("youtube", &self.youtube),
        ];
        pairs
            .into_iter()
            .map(|(key, value)| SettingRow {
                key: key.to_string(),
                value: value.clone(),
            })
            .collect()
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "org_name_en" => Some(&mut self.org_name_en),
            "org_name_hi" => Some(&mut self.org_name_hi),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "phone2" => Some(&mut self.phone2),
            "address_en" => Some(&mut self.address_en),
            "address_hi" => Some(&mut self.address_hi),
            "facebook" => Some(&mut self.facebook),
            "twitter" => Some(&mut self.twitter),
            "instagram" => Some(&mut self.instagram),
            "youtube" => Some(&mut self.youtube),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults_and_unknown_keys_are_ignored() {
        let rows = vec![
            SettingRow {
                key: "phone".to_string(),
                value: "+911111111111".to_string(),
            },
            SettingRow {
                key: "mystery".to_string(),
                value: "ignored".to_string(),
            },
        ];
        let settings = SiteSettings::from_rows(&rows);
        assert_eq!(settings.phone, "+911111111111");
        assert_eq!(settings.org_name_en, "Nayi Subah Foundation");
        assert_eq!(settings.email, SiteSettings::default().email);
    }

    #[test]
    fn rows_round_trip_the_whole_snapshot() {
        let mut settings = SiteSettings::default();
        settings.facebook = "https://facebook.com/nayisubah".to_string();
        let rows = settings.to_rows();
        assert_eq!(rows.len(), 11);
        assert_eq!(SiteSettings::from_rows(&rows), settings);
    }
}
