//! Sample catalogue, reviews and team loaded at startup.

use tracing::info;

use super::models::{NewReview, NewService, NewTeamMember, ServiceCategory};
use super::Storage;

/// Seed the built-in services, reviews and team members
pub fn seed_sample_data(storage: &dyn Storage) {
    let services = sample_services();
    let reviews = sample_reviews();
    let team = sample_team_members();
    let counts = (services.len(), reviews.len(), team.len());

    for service in services {
        storage.create_service(service);
    }
    for review in reviews {
        storage.create_review(review);
    }
    for member in team {
        storage.create_team_member(member);
    }

    info!(
        services = counts.0,
        reviews = counts.1,
        team_members = counts.2,
        "Seeded sample data"
    );
}

#[allow(clippy::too_many_arguments)]
fn service(
    name: &str,
    description: &str,
    category: ServiceCategory,
    price: &str,
    image_url: &str,
    is_popular: bool,
    is_new: bool,
    icon_name: &str,
) -> NewService {
    NewService {
        name: name.to_string(),
        description: description.to_string(),
        category,
        price: price.to_string(),
        image_url: Some(image_url.to_string()),
        is_popular,
        is_new,
        icon_name: icon_name.to_string(),
    }
}

fn sample_services() -> Vec<NewService> {
    vec![
        service(
            "Plumbing Services",
            "Professional solutions for leaks, installations, repairs, and all your plumbing needs.",
            ServiceCategory::Plumbing,
            "Starting at $85",
            "https://images.unsplash.com/photo-1621905251189-08b45d6a269e?q=80&w=600&auto=format&fit=crop",
            true,
            false,
            "Droplet",
        ),
        service(
            "Electrical Services",
            "Safe and reliable electrical installations, repairs, and upgrades for your home.",
            ServiceCategory::Electrical,
            "Starting at $95",
            "https://images.unsplash.com/photo-1558618666-c3cdc56be44a?q=80&w=600&auto=format&fit=crop",
            false,
            false,
            "ZapIcon",
        ),
        service(
            "Carpentry Services",
            "Custom woodworking, furniture repairs, and structural carpentry for your home.",
            ServiceCategory::Carpentry,
            "Starting at $90",
            "https://images.unsplash.com/photo-1598300042247-d088f8ab3a91?q=80&w=600&auto=format&fit=crop",
            false,
            true,
            "Hammer",
        ),
        service(
            "Painting Services",
            "Interior and exterior painting services with premium paints and professional finish.",
            ServiceCategory::Painting,
            "Starting at $75/room",
            "https://images.unsplash.com/photo-1599619351208-3e6c839d6828?q=80&w=600&auto=format&fit=crop",
            false,
            false,
            "Paintbrush",
        ),
        service(
            "Flooring Services",
            "Installation and repair of hardwood, laminate, tile, and vinyl flooring with expert precision.",
            ServiceCategory::Flooring,
            "Starting at $8/sq ft",
            "https://images.unsplash.com/photo-1584622650111-993a426fbf0a?q=80&w=600&auto=format&fit=crop",
            false,
            false,
            "LayoutBottom",
        ),
        service(
            "Home Maintenance",
            "General maintenance, repairs, and seasonal home check-ups to keep everything running smoothly.",
            ServiceCategory::Maintenance,
            "Starting at $120",
            "https://images.unsplash.com/photo-1581578731548-c64695cc6952?q=80&w=600&auto=format&fit=crop",
            true,
            false,
            "Settings",
        ),
    ]
}

fn sample_reviews() -> Vec<NewReview> {
    // (name, service_id, rating, comment, avatar)
    let reviews = [
        (
            "Rebecca Stevens",
            1,
            5,
            "Mike did an outstanding job fixing our leaky bathroom faucet. He was punctual, professional, and explained everything clearly. Highly recommend!",
            "https://randomuser.me/api/portraits/women/42.jpg",
        ),
        (
            "James Wilson",
            2,
            4,
            "Great job on our electrical panel upgrade. The team was knowledgeable and completed the work faster than expected. Will use again!",
            "https://randomuser.me/api/portraits/men/32.jpg",
        ),
        (
            "Sarah Johnson",
            4,
            5,
            "The team did an excellent job painting our living room. They were careful with our furniture and the finish is perfect. So happy with the results!",
            "https://randomuser.me/api/portraits/women/68.jpg",
        ),
    ];

    reviews
        .into_iter()
        .map(|(name, service_id, rating, comment, avatar)| NewReview {
            name: name.to_string(),
            service_id,
            rating,
            comment: comment.to_string(),
            avatar_url: Some(avatar.to_string()),
        })
        .collect()
}

fn sample_team_members() -> Vec<NewTeamMember> {
    // (name, title, description, image, rating, skills)
    let members = [
        (
            "Mike Anderson",
            "Master Plumber",
            "15+ years of experience specializing in residential plumbing repairs and installations.",
            "https://randomuser.me/api/portraits/men/41.jpg",
            "4.8",
            ["Fixture Installation", "Leak Repair"],
        ),
        (
            "Jennifer Martinez",
            "Electrical Specialist",
            "10+ years of experience with electrical systems, wiring, and smart home installations.",
            "https://randomuser.me/api/portraits/women/39.jpg",
            "5.0",
            ["Panel Upgrades", "Lighting"],
        ),
        (
            "Robert Davis",
            "Carpentry Expert",
            "20+ years crafting custom woodwork, cabinetry, and structural carpentry solutions.",
            "https://randomuser.me/api/portraits/men/75.jpg",
            "4.6",
            ["Custom Woodwork", "Framing"],
        ),
        (
            "Sarah Wilson",
            "Painting Specialist",
            "12+ years delivering flawless interior and exterior painting with attention to detail.",
            "https://randomuser.me/api/portraits/women/65.jpg",
            "4.7",
            ["Interior Design", "Color Matching"],
        ),
    ];

    members
        .into_iter()
        .map(|(name, title, description, image, rating, skills)| NewTeamMember {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            image_url: Some(image.to_string()),
            rating: rating.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
