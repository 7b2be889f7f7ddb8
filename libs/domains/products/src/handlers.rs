use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse,
    },
    validation::{Check, FieldRule, validated},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, MessageResponse, Product, ProductListResponse, ProductResponse, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI tag shared by every product operation
pub const TAG: &str = "Products";

const INVALID_ID: &str = "Invalid ID";
const NAME_REQUIRED: &str = "Product name is required";
const PRICE_NUMERIC: &str = "Price must be a number";
const PRICE_POSITIVE: &str = "Price must be greater than zero";
const AVAILABILITY_BOOLEAN: &str = "Availability must be a boolean";

static ID_RULES: &[FieldRule] = &[FieldRule::path("id", Check::Integer, INVALID_ID)];

static CREATE_RULES: &[FieldRule] = &[
    FieldRule::body("name", Check::NotEmpty, NAME_REQUIRED),
    FieldRule::body("price", Check::Numeric, PRICE_NUMERIC),
    FieldRule::body("price", Check::Positive, PRICE_POSITIVE),
    FieldRule::body("availability", Check::Boolean, AVAILABILITY_BOOLEAN).optional(),
];

static UPDATE_RULES: &[FieldRule] = &[
    FieldRule::path("id", Check::Integer, INVALID_ID),
    FieldRule::body("name", Check::NotEmpty, NAME_REQUIRED),
    FieldRule::body("price", Check::Numeric, PRICE_NUMERIC),
    FieldRule::body("price", Check::Positive, PRICE_POSITIVE),
    FieldRule::body("availability", Check::Boolean, AVAILABILITY_BOOLEAN),
];

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        patch_availability,
        delete_product,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            ProductResponse,
            ProductListResponse,
            MessageResponse
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestIdResponse,
            NotFoundResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "API operations related to products")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
///
/// Validated routes run their field rules, then the validation gate, then
/// the handler.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/", validated(post(create_product), CREATE_RULES))
        .route("/{id}", validated(get(get_product), ID_RULES))
        .route("/{id}", validated(put(update_product), UPDATE_RULES))
        .route("/{id}", validated(patch(patch_availability), ID_RULES))
        .route("/{id}", validated(delete(delete_product), ID_RULES))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Products ordered by id", body = ProductListResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductListResponse>> {
    let products = service.list_products().await?;
    Ok(Json(ProductListResponse { data: products }))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse { data: product }))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { data: product })))
}

/// Replace a product's name, price and availability
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(ProductResponse { data: product }))
}

/// Toggle a product's availability
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Availability toggled", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_availability<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.toggle_availability(id).await?;
    Ok(Json(ProductResponse { data: product }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse {
        data: "Product deleted".to_string(),
    }))
}
