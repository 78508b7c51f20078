//! # Domain Module
//!
//! Business rules for cash-denomination statements.
//!
//! ## Module Organization
//!
//! - **statement_service**: create/read/update/delete of statements and their breakdowns
//! - **denomination_service**: access to the reference catalog
//! - **auth_service**: registration, login and bearer-token resolution
//! - **commands**: internal command/result types the IO layer maps into
//! - **models**: domain entities
//! - **errors**: the error taxonomy every service returns
//!
//! ## Business Rules
//!
//! - A breakdown line's total is `quantity × denomination value`, computed here
//! - Denominations must exist in the catalog when a line is written
//! - A statement's lines are always replaced as a whole, never merged
//! - Only a statement's owner may read, update or delete it

pub mod auth_service;
pub mod commands;
pub mod denomination_service;
pub mod errors;
pub mod models;
pub mod statement_service;

pub use auth_service::AuthService;
pub use denomination_service::DenominationService;
pub use errors::{DomainError, DomainResult};
pub use statement_service::StatementService;
