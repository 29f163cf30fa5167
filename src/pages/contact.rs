//! Contact page: info cards and the validated contact form, the only
//! write the public site performs.

use serde::{Deserialize, Serialize};

use crate::database::models::{ContactMessage, SiteData};
use crate::database::{Gateway, GatewayError};
use crate::i18n::LanguageStore;

/// Office coordinates used for the directions link.
const OFFICE_LAT: f64 = 28.811472;
const OFFICE_LNG: f64 = 79.029861;

#[derive(Debug, Serialize)]
pub struct InfoCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct ContactView {
    pub title: String,
    pub subtitle: String,
    pub directions_label: String,
    pub cards: Vec<InfoCard>,
}

pub fn view(data: &SiteData, loc: &LanguageStore) -> ContactView {
    let settings = &data.site_settings;
    let directions = format!(
        "https://www.google.com/maps/search/?api=1&query={OFFICE_LAT},{OFFICE_LNG}"
    );

    ContactView {
        title: loc.translate("contact.title"),
        subtitle: loc.translate("contact.subtitle"),
        directions_label: loc.translate("contact.directions"),
        cards: vec![
            InfoCard {
                label: loc.translate("contact.address"),
                value: loc.pick(&settings.address_en, &settings.address_hi).clone(),
                link: directions,
            },
            InfoCard {
                label: loc.translate("contact.phone"),
                value: settings.phone.clone(),
                link: format!("tel:{}", settings.phone),
            },
            InfoCard {
                label: loc.translate("contact.email"),
                value: settings.email.clone(),
                link: format!("mailto:{}", settings.email),
            },
            InfoCard {
                label: loc.translate("contact.hours.title"),
                value: loc.translate("contact.hours.value"),
                link: String::new(),
            },
        ],
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Per-field validation problems, reported before any network call.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.subject.is_none()
            && self.message.is_none()
    }
}

pub fn validate(form: &ContactForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if form.name.trim().chars().count() < 2 {
        errors.name = Some("enter at least 2 characters");
    }
    if !looks_like_email(form.email.trim()) {
        errors.email = Some("enter a valid email address");
    }
    if form.phone.trim().chars().count() < 10 {
        errors.phone = Some("enter at least 10 digits");
    }
    if form.subject.trim().chars().count() < 3 {
        errors.subject = Some("enter at least 3 characters");
    }
    if form.message.trim().chars().count() < 10 {
        errors.message = Some("enter at least 10 characters");
    }
    errors
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[derive(Debug)]
pub enum SubmitError {
    /// Validation stopped the submission before any network call.
    Invalid(FieldErrors),
    /// The backend call failed; the message was not stored.
    Send(GatewayError),
}

/// Validate and store one message with status `new`. On success the
/// caller flips to its confirmation state; the page content underneath
/// is untouched.
pub async fn submit(gateway: &Gateway, form: &ContactForm) -> Result<(), SubmitError> {
    let errors = validate(form);
    if !errors.is_empty() {
        return Err(SubmitError::Invalid(errors));
    }

    let message = ContactMessage::incoming(
        form.name.trim(),
        form.email.trim(),
        form.phone.trim(),
        form.subject.trim(),
        form.message.trim(),
    );
    gateway.insert_message(&message).await.map_err(SubmitError::Send)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::MessageStatus;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Asha Devi".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            subject: "Volunteering".to_string(),
            message: "I would like to volunteer".to_string(),
        }
    }

    #[test]
    fn validation_reports_each_bad_field_inline() {
        let form = ContactForm {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            phone: "12345".to_string(),
            subject: "ok".to_string(),
            message: "short".to_string(),
        };
        let errors = validate(&form);
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.phone.is_some());
        assert!(errors.subject.is_some());
        assert!(errors.message.is_some());

        assert!(validate(&valid_form()).is_empty());
    }

    #[tokio::test]
    async fn a_valid_submission_stores_exactly_one_new_message() {
        let gateway = Gateway::in_memory();
        submit(&gateway, &valid_form()).await.unwrap();

        let stored: Vec<ContactMessage> = gateway.fetch_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Asha Devi");
        assert_eq!(stored[0].subject, "Volunteering");
        assert_eq!(stored[0].status, MessageStatus::New);
    }

    #[tokio::test]
    async fn an_invalid_submission_never_reaches_the_backend() {
        let gateway = Gateway::in_memory();
        let mut form = valid_form();
        form.email = "broken".to_string();

        let err = submit(&gateway, &form).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(e) if e.email.is_some()));

        let stored: Vec<ContactMessage> = gateway.fetch_all().await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn submission_without_a_backend_degrades_to_a_quiet_no_op() {
        let gateway = Gateway::disabled();
        assert!(submit(&gateway, &valid_form()).await.is_ok());
    }
}
