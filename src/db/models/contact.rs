//! Contact form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service_interest: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service_interest: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    pub fn into_message(self, id: Id, created_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            service_interest: self.service_interest,
            message: self.message,
            created_at,
        }
    }
}

/// Body returned after a contact message is stored
#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub success: bool,
    pub message: String,
    pub id: Id,
}
