//! # Storage Module
//!
//! Handles all data persistence for the statement service.
//!
//! Domain services only see the traits in [`traits`]; the SQLite
//! implementation lives in [`connection`] and [`repositories`] and can be
//! swapped for another backend (or a test double) without touching the domain.
//!
//! ## Tables
//!
//! - `users`, `sessions`: identity
//! - `denomination_master`: read-only reference catalog
//! - `statements`: statement headers
//! - `statement_denominations`: breakdown lines, cascade-deleted with their header

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{DenominationRepository, StatementRepository, UserRepository};
pub use traits::{Connection, DenominationStorage, StatementStorage, UserStorage};
