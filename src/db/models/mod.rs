//! Entity records and their insert shapes.

pub mod booking;
pub mod contact;
pub mod provider;
pub mod review;
pub mod service;
pub mod team_member;
pub mod user;

pub use booking::*;
pub use contact::*;
pub use provider::*;
pub use review::*;
pub use service::*;
pub use team_member::*;
pub use user::*;

/// Identifier type shared by every collection
pub type Id = i32;
