// Sub-modules organized by functional domain
pub mod api;
pub mod pull_request;
pub mod team;
pub mod user;

// Re-export all models so `use crate::db::models::User` works

// API response structures
pub use api::*;

// Pull request and reviewer assignment models
pub use pull_request::*;

// Team models
pub use team::*;

// User models
pub use user::*;
