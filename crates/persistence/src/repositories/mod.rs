//! Repository implementations for database operations.

pub mod application;
pub mod attendee;
pub mod event;
pub mod newsletter;
pub mod partner;
pub mod speaker;
pub mod team_member;
pub mod user;

pub use application::ApplicationRepository;
pub use attendee::{AttendeeRepository, RegisteredAttendee};
pub use event::EventRepository;
pub use newsletter::NewsletterRepository;
pub use partner::PartnerRepository;
pub use speaker::SpeakerRepository;
pub use team_member::TeamMemberRepository;
pub use user::UserRepository;
