//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod application;
pub mod attendee;
pub mod event;
pub mod newsletter;
pub mod partner;
pub mod speaker;
pub mod team_member;
pub mod user;

pub use application::{ApplicationEntity, ApplicationKindDb, ApplicationStatusDb};
pub use attendee::{
    AttendeeEntity, CheckInEntity, EventAttendeeEntity, RegistrationStatusDb,
    UpsertedAttendeeEntity,
};
pub use event::EventEntity;
pub use newsletter::{NewsletterSubscriptionEntity, SubscriptionStatusDb};
pub use partner::{PartnerEntity, PartnerTierDb};
pub use speaker::SpeakerEntity;
pub use team_member::TeamMemberEntity;
pub use user::{UserEntity, UserRoleDb};
