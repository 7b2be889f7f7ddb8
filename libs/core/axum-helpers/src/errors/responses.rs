//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
use crate::validation::ValidationErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - field validation failed",
    content_type = "application/json",
    example = json!({
        "errors": [
            {
                "field": "price",
                "location": "body",
                "message": "Price must be a number",
                "value": "abc"
            },
            {
                "field": "price",
                "location": "body",
                "message": "Price must be greater than zero",
                "value": "abc"
            }
        ]
    })
)]
pub struct BadRequestValidationResponse(pub ValidationErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - id is not an integer",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "field": "id",
            "location": "path",
            "message": "Invalid ID",
            "value": "abc"
        }]
    })
)]
pub struct BadRequestIdResponse(pub ValidationErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Product 7 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable - database not connected",
    content_type = "application/json",
    example = json!({
        "code": 1011,
        "error": "SERVICE_UNAVAILABLE",
        "message": "Database is not connected (status: connection failed: ...)"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
