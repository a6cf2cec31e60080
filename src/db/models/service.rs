//! Service catalogue models.

use serde::{Deserialize, Serialize};

use super::Id;

/// Service category. The named variants are the ones the business offers
/// today; any other label is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceCategory {
    Plumbing,
    Electrical,
    Carpentry,
    Painting,
    Flooring,
    Maintenance,
    Other(String),
}

impl ServiceCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Electrical => "electrical",
            ServiceCategory::Carpentry => "carpentry",
            ServiceCategory::Painting => "painting",
            ServiceCategory::Flooring => "flooring",
            ServiceCategory::Maintenance => "maintenance",
            ServiceCategory::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ServiceCategory {
    fn from(s: &str) -> Self {
        match s {
            "plumbing" => ServiceCategory::Plumbing,
            "electrical" => ServiceCategory::Electrical,
            "carpentry" => ServiceCategory::Carpentry,
            "painting" => ServiceCategory::Painting,
            "flooring" => ServiceCategory::Flooring,
            "maintenance" => ServiceCategory::Maintenance,
            other => ServiceCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for ServiceCategory {
    fn from(s: String) -> Self {
        ServiceCategory::from(s.as_str())
    }
}

impl From<ServiceCategory> for String {
    fn from(category: ServiceCategory) -> Self {
        category.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub category: ServiceCategory,
    /// Display price, e.g. "Starting at $85"
    pub price: String,
    pub image_url: Option<String>,
    pub is_popular: bool,
    pub is_new: bool,
    pub icon_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub category: ServiceCategory,
    pub price: String,
    pub image_url: Option<String>,
    pub is_popular: bool,
    pub is_new: bool,
    pub icon_name: String,
}

impl NewService {
    pub fn into_service(self, id: Id) -> Service {
        Service {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            image_url: self.image_url,
            is_popular: self.is_popular,
            is_new: self.is_new,
            icon_name: self.icon_name,
        }
    }
}
