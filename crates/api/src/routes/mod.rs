//! HTTP route handlers.

pub mod attendees;
pub mod auth;
pub mod events;
pub mod forms;
pub mod health;
pub mod newsletter;
pub mod partners;
pub mod speakers;
pub mod team;
