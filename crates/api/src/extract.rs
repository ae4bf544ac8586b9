//! Request extractors with JSON error envelopes.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] whose rejection (malformed JSON,
/// missing fields, wrong content type, oversized body) is an [`AppError`],
/// so clients get the same `{ "error", "code" }` body as every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Drop-in replacement for [`axum::extract::Path`]; an unparsable segment
/// (`/productos/abc`) becomes a 400 in the standard error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
