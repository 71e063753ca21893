//! Token-based authentication core for a two-service deployment.
//!
//! The authorization service issues and verifies EdDSA-signed access and
//! refresh tokens; the resource service never verifies tokens itself and
//! instead delegates every trust decision to the authorization service
//! over HTTP.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod keys;
pub mod remote;
pub mod resource;
pub mod state;
pub mod token;
