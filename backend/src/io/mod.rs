//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! Translates requests into domain commands, domain results into DTOs from
//! the `shared` crate, and domain errors into HTTP status codes.

pub mod rest;

pub use rest::*;
