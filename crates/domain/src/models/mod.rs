//! Domain models for the TEDx platform.

pub mod application;
pub mod attendee;
pub mod event;
pub mod form;
pub mod newsletter;
pub mod partner;
pub mod speaker;
pub mod team_member;
pub mod user;

pub use application::{Application, ApplicationKind, ApplicationStatus};
pub use attendee::{Attendee, CheckInOutcome, QrPayload, RegistrationStatus};
pub use event::Event;
pub use form::{schema_for, FormSchema};
pub use newsletter::{NewsletterSubscription, SubscriptionStatus};
pub use partner::{Partner, PartnerTier};
pub use speaker::Speaker;
pub use team_member::TeamMember;
pub use user::{User, UserRole};
