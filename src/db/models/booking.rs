//! Booking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub service_category: String,
    pub specific_service: Option<String>,
    pub description: Option<String>,
    /// Calendar date as entered, e.g. "2024-01-01"
    pub date: String,
    /// Time slot label, e.g. "9:00 AM"
    pub time: String,
    /// Provider profile the booking is addressed to, if any
    pub provider_id: Option<Id>,
    /// Client account that placed the booking, taken from the session
    pub client_user_id: Option<Id>,
    pub created_at: DateTime<Utc>,
}

/// Fields a visitor may supply when booking
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub service_category: String,
    pub specific_service: Option<String>,
    pub description: Option<String>,
    pub date: String,
    pub time: String,
    pub provider_id: Option<Id>,
}

impl NewBooking {
    pub fn into_booking(
        self,
        id: Id,
        client_user_id: Option<Id>,
        created_at: DateTime<Utc>,
    ) -> Booking {
        Booking {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            service_category: self.service_category,
            specific_service: self.specific_service,
            description: self.description,
            date: self.date,
            time: self.time,
            provider_id: self.provider_id,
            client_user_id,
            created_at,
        }
    }
}
