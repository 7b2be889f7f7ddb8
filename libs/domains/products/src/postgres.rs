use async_trait::async_trait;
use database::postgres::DatabaseHandle;
use sea_orm::ActiveValue::Set;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// SeaORM-backed repository
///
/// Holds the shared [`DatabaseHandle`] rather than a pool, so every call
/// fails with [`ProductError::Unavailable`] until the startup connection
/// has succeeded.
#[derive(Clone)]
pub struct PgProductRepository {
    handle: DatabaseHandle,
}

impl PgProductRepository {
    pub fn new(handle: DatabaseHandle) -> Self {
        Self { handle }
    }

    async fn db(&self) -> ProductResult<DatabaseConnection> {
        Ok(self.handle.connection().await?)
    }

    async fn find(&self, db: &DatabaseConnection, id: i32) -> ProductResult<entity::Model> {
        entity::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let db = self.db().await?;
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let db = self.db().await?;
        let model = entity::Entity::find_by_id(id).one(&db).await?;

        Ok(model.map(Product::from))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let db = self.db().await?;
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let db = self.db().await?;
        let mut active_model = self.find(&db, id).await?.into_active_model();

        active_model.name = Set(input.name);
        active_model.price = Set(input.price);
        active_model.availability = Set(input.availability);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let model = active_model.update(&db).await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn toggle_availability(&self, id: i32) -> ProductResult<Product> {
        let db = self.db().await?;

        // Single statement: concurrent toggles must not lose updates
        let model = entity::Entity::update_many()
            .col_expr(
                entity::Column::Availability,
                Expr::col(entity::Column::Availability).not(),
            )
            .col_expr(
                entity::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(chrono::Utc::now())),
            )
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&db)
            .await?
            .into_iter()
            .next()
            .ok_or(ProductError::NotFound(id))?;

        tracing::info!(
            product_id = id,
            availability = model.availability,
            "Toggled product availability"
        );
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let db = self.db().await?;
        let result = entity::Entity::delete_by_id(id).exec(&db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
