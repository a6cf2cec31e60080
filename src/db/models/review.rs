//! Customer review models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id,
    pub name: String,
    /// Loose reference to a service; not checked against the catalogue
    pub service_id: Id,
    pub rating: u8,
    pub comment: String,
    pub avatar_url: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub name: String,
    pub service_id: Id,
    pub rating: u8,
    pub comment: String,
    pub avatar_url: Option<String>,
}

impl NewReview {
    pub fn into_review(self, id: Id, date: DateTime<Utc>) -> Review {
        Review {
            id,
            name: self.name,
            service_id: self.service_id,
            rating: self.rating,
            comment: self.comment,
            avatar_url: self.avatar_url,
            date,
        }
    }
}
