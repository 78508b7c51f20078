//! Request extractors whose rejections use the API's JSON error shape.
use axum::extract::{FromRequest, FromRequestParts};

use crate::domain::DomainError;

/// `axum::Json` that rejects malformed bodies with a `VALIDATION` error
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(DomainError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` that rejects unparseable segments with a `VALIDATION` error
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(DomainError))]
pub struct AppPath<T>(pub T);
