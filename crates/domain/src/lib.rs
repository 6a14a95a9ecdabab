//! Domain layer for the TEDx platform backend.
//!
//! This crate contains:
//! - Domain models (Event, Attendee, TeamMember, Application, ...)
//! - Roster parsing and QR payload handling for check-in
//! - Application form schemas and their validator

pub mod models;
