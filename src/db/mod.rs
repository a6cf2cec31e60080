mod collection;
mod models;
mod seeders;

pub use collection::Collection;
pub use models::*;
pub use seeders::seed_sample_data;

use chrono::Utc;
use thiserror::Error;

/// Failures a repository write can report. Lookups never fail: absence is
/// returned as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Email already in use")]
    EmailTaken,
    #[error("Provider profile already exists")]
    ProviderExists,
}

/// Data access for every entity the site serves.
///
/// Each entity type exposes the same capability set: create, lookup by id,
/// list in insertion order, plus a few relationship filters. All reads return
/// snapshots that stay valid while the store keeps changing.
pub trait Storage: Send + Sync {
    // Users
    fn get_user(&self, id: Id) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn get_user_by_email(&self, email: &str) -> Option<User>;
    fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    // Services
    fn list_services(&self) -> Vec<Service>;
    fn get_service(&self, id: Id) -> Option<Service>;
    fn services_by_category(&self, category: &str) -> Vec<Service>;
    fn popular_services(&self) -> Vec<Service>;
    fn new_services(&self) -> Vec<Service>;
    fn create_service(&self, service: NewService) -> Service;

    // Bookings
    fn list_bookings(&self) -> Vec<Booking>;
    fn get_booking(&self, id: Id) -> Option<Booking>;
    fn bookings_by_provider_id(&self, provider_id: Id) -> Vec<Booking>;
    fn bookings_by_client_id(&self, user_id: Id) -> Vec<Booking>;
    fn create_booking(&self, booking: NewBooking, client_user_id: Option<Id>) -> Booking;

    // Reviews
    fn list_reviews(&self) -> Vec<Review>;
    fn get_review(&self, id: Id) -> Option<Review>;
    fn reviews_by_service_id(&self, service_id: Id) -> Vec<Review>;
    fn create_review(&self, review: NewReview) -> Review;

    // Team members
    fn list_team_members(&self) -> Vec<TeamMember>;
    fn get_team_member(&self, id: Id) -> Option<TeamMember>;
    fn create_team_member(&self, member: NewTeamMember) -> TeamMember;

    // Service providers
    fn get_service_provider(&self, id: Id) -> Option<ServiceProvider>;
    fn get_service_provider_by_user_id(&self, user_id: Id) -> Option<ServiceProvider>;
    fn create_service_provider(
        &self,
        provider: NewServiceProvider,
        user_id: Id,
    ) -> Result<ServiceProvider, StorageError>;
    fn update_service_provider(
        &self,
        id: Id,
        update: ServiceProviderUpdate,
    ) -> Option<ServiceProvider>;

    // Contact messages
    fn list_contact_messages(&self) -> Vec<ContactMessage>;
    fn create_contact_message(&self, message: NewContactMessage) -> ContactMessage;
}

/// Process-lifetime store. Nothing is persisted; a restart starts empty
/// (plus whatever seed data the caller loads).
#[derive(Default)]
pub struct MemStorage {
    users: Collection<User>,
    services: Collection<Service>,
    bookings: Collection<Booking>,
    reviews: Collection<Review>,
    team_members: Collection<TeamMember>,
    providers: Collection<ServiceProvider>,
    contact_messages: Collection<ContactMessage>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the sample catalogue, reviews and team
    pub fn with_sample_data() -> Self {
        let storage = Self::new();
        seed_sample_data(&storage);
        storage
    }
}

impl Storage for MemStorage {
    fn get_user(&self, id: Id) -> Option<User> {
        self.users.get(id)
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.find(|u| u.username == username)
    }

    fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users.find(|u| u.email == email)
    }

    fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let created_at = Utc::now();
        self.users.try_insert_with(
            |existing| {
                if existing.username == user.username {
                    Err(StorageError::UsernameTaken)
                } else if existing.email == user.email {
                    Err(StorageError::EmailTaken)
                } else {
                    Ok(())
                }
            },
            |id| user.clone().into_user(id, created_at),
        )
    }

    fn list_services(&self) -> Vec<Service> {
        self.services.list()
    }

    fn get_service(&self, id: Id) -> Option<Service> {
        self.services.get(id)
    }

    fn services_by_category(&self, category: &str) -> Vec<Service> {
        self.services.filter(|s| s.category.as_str() == category)
    }

    fn popular_services(&self) -> Vec<Service> {
        self.services.filter(|s| s.is_popular)
    }

    fn new_services(&self) -> Vec<Service> {
        self.services.filter(|s| s.is_new)
    }

    fn create_service(&self, service: NewService) -> Service {
        self.services.insert_with(|id| service.into_service(id))
    }

    fn list_bookings(&self) -> Vec<Booking> {
        self.bookings.list()
    }

    fn get_booking(&self, id: Id) -> Option<Booking> {
        self.bookings.get(id)
    }

    fn bookings_by_provider_id(&self, provider_id: Id) -> Vec<Booking> {
        self.bookings.filter(|b| b.provider_id == Some(provider_id))
    }

    fn bookings_by_client_id(&self, user_id: Id) -> Vec<Booking> {
        self.bookings.filter(|b| b.client_user_id == Some(user_id))
    }

    fn create_booking(&self, booking: NewBooking, client_user_id: Option<Id>) -> Booking {
        let created_at = Utc::now();
        self.bookings
            .insert_with(|id| booking.into_booking(id, client_user_id, created_at))
    }

    fn list_reviews(&self) -> Vec<Review> {
        self.reviews.list()
    }

    fn get_review(&self, id: Id) -> Option<Review> {
        self.reviews.get(id)
    }

    fn reviews_by_service_id(&self, service_id: Id) -> Vec<Review> {
        self.reviews.filter(|r| r.service_id == service_id)
    }

    fn create_review(&self, review: NewReview) -> Review {
        let date = Utc::now();
        self.reviews.insert_with(|id| review.into_review(id, date))
    }

    fn list_team_members(&self) -> Vec<TeamMember> {
        self.team_members.list()
    }

    fn get_team_member(&self, id: Id) -> Option<TeamMember> {
        self.team_members.get(id)
    }

    fn create_team_member(&self, member: NewTeamMember) -> TeamMember {
        self.team_members.insert_with(|id| member.into_team_member(id))
    }

    fn get_service_provider(&self, id: Id) -> Option<ServiceProvider> {
        self.providers.get(id)
    }

    fn get_service_provider_by_user_id(&self, user_id: Id) -> Option<ServiceProvider> {
        self.providers.find(|p| p.user_id == user_id)
    }

    fn create_service_provider(
        &self,
        provider: NewServiceProvider,
        user_id: Id,
    ) -> Result<ServiceProvider, StorageError> {
        let now = Utc::now();
        self.providers.try_insert_with(
            |existing| {
                if existing.user_id == user_id {
                    Err(StorageError::ProviderExists)
                } else {
                    Ok(())
                }
            },
            |id| provider.into_provider(id, user_id, now),
        )
    }

    fn update_service_provider(
        &self,
        id: Id,
        update: ServiceProviderUpdate,
    ) -> Option<ServiceProvider> {
        let now = Utc::now();
        self.providers.update(id, |p| update.apply(p, now))
    }

    fn list_contact_messages(&self) -> Vec<ContactMessage> {
        self.contact_messages.list()
    }

    fn create_contact_message(&self, message: NewContactMessage) -> ContactMessage {
        let created_at = Utc::now();
        self.contact_messages
            .insert_with(|id| message.into_message(id, created_at))
    }
}
