//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products REST API",
        version = "1.0.0",
        description = "CRUD API for products with name, price and availability"
    ),
    paths(crate::api::index),
    components(schemas(crate::api::IndexResponse)),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;
