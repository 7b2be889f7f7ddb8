use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List every product, ordered by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Replace name, price and availability
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Flip availability, leaving other fields untouched
    async fn toggle_availability(&self, id: i32) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i32, Product>>>,
    last_id: Arc<AtomicI32>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product::new(id, input);
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn toggle_availability(&self, id: i32) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.toggle_availability();

        tracing::info!(
            product_id = id,
            availability = product.availability,
            "Toggled product availability"
        );
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
