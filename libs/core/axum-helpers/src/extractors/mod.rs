//! Custom extractors for Axum handlers.
//!
//! These reduce boilerplate and route rejections through [`crate::AppError`].

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
