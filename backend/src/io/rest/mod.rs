//! # REST API Interface Layer
//!
//! HTTP endpoints for the statement service:
//! - **auth_apis**: register, login, logout
//! - **denomination_apis**: the reference catalog
//! - **statement_apis**: statement create/list/get/update/delete
//!
//! Handlers stay free of business rules; they map DTOs through `mappers`,
//! resolve the caller via the `identity` extractor and let `error` turn
//! domain failures into status codes.

pub mod auth_apis;
pub mod denomination_apis;
pub mod error;
pub mod extract;
pub mod identity;
pub mod mappers;
pub mod statement_apis;

pub use auth_apis::*;
pub use denomination_apis::*;
pub use identity::AuthenticatedUser;
pub use statement_apis::*;
