//! Contact messages submitted from the public contact form.
//!
//! Write-only from the public side; reading, status changes and deletion
//! are admin-console operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::entity::{Entity, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    New,
    Read,
    Replied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

impl Entity for ContactMessage {
    const TABLE: &'static str = "contact_messages";
    const SORT: SortKey = SortKey::desc("created_at");

    fn id(&self) -> &str {
        &self.id
    }
}

impl ContactMessage {
    /// Build a fresh incoming message from the public contact form.
    pub fn incoming(name: &str, email: &str, phone: &str, subject: &str, message: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            status: MessageStatus::New,
            created_at: Utc::now(),
        }
    }
}
