//! Services behind the route handlers.

pub mod admin_bootstrap;
pub mod auth;
pub mod image_store;
pub mod qr;
pub mod spreadsheet;

pub use admin_bootstrap::bootstrap_admin;
pub use auth::AuthService;
pub use image_store::ImageStore;
