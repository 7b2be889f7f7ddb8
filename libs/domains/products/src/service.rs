//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validates input against the DTO rules before touching the repository, so
/// callers that bypass the HTTP validators are held to the same rules.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: i32) -> ProductResult<Product> {
        self.repository.toggle_availability(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}
