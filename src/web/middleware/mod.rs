//! # Web API Middleware
//!
//! Request-level concerns applied around the handlers.

pub mod auth;
pub mod cors;
