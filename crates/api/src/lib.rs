//! HTTP surface for the Sitework backend.
//!
//! Thin axum handlers over [`sitework_db::StageService`], plus the shared
//! middleware stack, configuration, and error-to-response mapping.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
