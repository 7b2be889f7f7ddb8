//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//!
//! ```ignore
//! use axum_helpers::http::{cors_for, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_for(&config.cors_allowed_origins, true)?);
//! ```

pub mod cors;
pub mod security;

pub use cors::{cors_for, create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
