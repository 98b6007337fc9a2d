// src/extract.rs

//! Extractors whose rejections are reported through `AppError`,
//! so malformed bodies and ids get the same JSON error shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json`, rejecting with a 400 JSON error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path`, rejecting with a 404 JSON error.
/// An id that does not parse cannot name an existing resource.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
