//! Products Domain
//!
//! CRUD over products (name, price, availability) persisted with SeaORM.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, field validators, validation gate
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← DTO validation, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, response envelopes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let repository = InMemoryProductRepository::new();
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, MessageResponse, Product, ProductListResponse, ProductResponse, UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
