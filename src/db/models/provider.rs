//! Service provider profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    pub id: Id,
    /// Owning user; at most one profile per user
    pub user_id: Id,
    pub bio: String,
    pub experience_years: i32,
    pub hourly_rate: String,
    pub skills: Vec<String>,
    pub service_categories: Vec<String>,
    /// Opaque schedule descriptor, stored as sent
    pub availability: String,
    pub certifications: Vec<String>,
    pub portfolio_images: Vec<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub is_verified: bool,
    pub rating: String,
    pub total_jobs: i32,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewServiceProvider {
    pub bio: String,
    pub experience_years: i32,
    pub hourly_rate: String,
    pub skills: Vec<String>,
    pub service_categories: Vec<String>,
    pub availability: String,
    pub certifications: Vec<String>,
    pub portfolio_images: Vec<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
}

impl NewServiceProvider {
    pub fn into_provider(self, id: Id, user_id: Id, now: DateTime<Utc>) -> ServiceProvider {
        ServiceProvider {
            id,
            user_id,
            bio: self.bio,
            experience_years: self.experience_years,
            hourly_rate: self.hourly_rate,
            skills: self.skills,
            service_categories: self.service_categories,
            availability: self.availability,
            certifications: self.certifications,
            portfolio_images: self.portfolio_images,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            is_verified: false,
            rating: "0.0".to_string(),
            total_jobs: 0,
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update. `None` leaves a field untouched; for the optional
/// text fields `Some(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceProviderUpdate {
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub hourly_rate: Option<String>,
    pub skills: Option<Vec<String>>,
    pub service_categories: Option<Vec<String>>,
    pub availability: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub portfolio_images: Option<Vec<String>>,
    pub address: Option<Option<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<Option<String>>,
}

impl ServiceProviderUpdate {
    pub fn apply(self, provider: &mut ServiceProvider, now: DateTime<Utc>) {
        if let Some(bio) = self.bio {
            provider.bio = bio;
        }
        if let Some(years) = self.experience_years {
            provider.experience_years = years;
        }
        if let Some(rate) = self.hourly_rate {
            provider.hourly_rate = rate;
        }
        if let Some(skills) = self.skills {
            provider.skills = skills;
        }
        if let Some(categories) = self.service_categories {
            provider.service_categories = categories;
        }
        if let Some(availability) = self.availability {
            provider.availability = availability;
        }
        if let Some(certifications) = self.certifications {
            provider.certifications = certifications;
        }
        if let Some(images) = self.portfolio_images {
            provider.portfolio_images = images;
        }
        if let Some(address) = self.address {
            provider.address = address;
        }
        if let Some(city) = self.city {
            provider.city = city;
        }
        if let Some(state) = self.state {
            provider.state = state;
        }
        if let Some(zip_code) = self.zip_code {
            provider.zip_code = zip_code;
        }
        provider.updated_at = now;
    }
}
