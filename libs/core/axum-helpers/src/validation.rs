//! Per-route field validation.
//!
//! A route declares an ordered list of [`FieldRule`]s. The [`check_fields`]
//! middleware runs every rule and appends failures to a [`ValidationReport`]
//! stored in the request extensions. [`validation_gate`] then either rejects
//! the request with `400 {"errors": [...]}` or lets it through untouched.
//!
//! ```ignore
//! use axum::routing::post;
//! use axum_helpers::validation::{Check, FieldRule, validated};
//!
//! static CREATE_RULES: &[FieldRule] = &[
//!     FieldRule::body("name", Check::NotEmpty, "Name is required"),
//!     FieldRule::body("price", Check::Positive, "Price must be greater than zero"),
//! ];
//!
//! let router = Router::new().route("/", validated(post(create), CREATE_RULES));
//! ```

use axum::{
    Json,
    body::{Body, to_bytes},
    extract::{FromRequestParts, RawPathParams, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use http_body_util::LengthLimitError;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::errors::{ErrorCode, ErrorResponse};

/// Largest body the validators will buffer (matches axum's default limit)
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

const MALFORMED_BODY: &str = "Request body must be valid JSON";

/// Where a field is read from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Body,
}

/// A single predicate over a field value
///
/// Path values arrive as strings and are parsed before checking. Body values
/// are checked by JSON type, except that numeric checks also accept a string
/// holding a number (`"300"`). `"true"` is still not a boolean in a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// Non-empty string (whitespace only counts as empty)
    NotEmpty,
    /// Any finite number, or a string that parses to one
    Numeric,
    /// Whole number that fits in an `i32`
    Integer,
    Boolean,
    /// Number strictly greater than zero
    Positive,
}

impl Check {
    /// Missing and `null` values fail every check.
    pub fn passes(self, location: Location, value: &Value) -> bool {
        match location {
            Location::Body => self.passes_json(value),
            Location::Path => match value {
                Value::String(raw) => self.passes_str(raw),
                _ => false,
            },
        }
    }

    fn passes_json(self, value: &Value) -> bool {
        match self {
            Check::NotEmpty => value.as_str().is_some_and(|s| !s.trim().is_empty()),
            Check::Numeric => numeric_value(value).is_some_and(f64::is_finite),
            Check::Integer => value.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
            Check::Boolean => value.is_boolean(),
            Check::Positive => numeric_value(value).is_some_and(|n| n.is_finite() && n > 0.0),
        }
    }

    fn passes_str(self, raw: &str) -> bool {
        match self {
            Check::NotEmpty => !raw.trim().is_empty(),
            Check::Numeric => raw.trim().parse::<f64>().is_ok_and(f64::is_finite),
            Check::Integer => raw.parse::<i32>().is_ok(),
            Check::Boolean => matches!(raw, "true" | "false"),
            Check::Positive => raw
                .trim()
                .parse::<f64>()
                .is_ok_and(|n| n.is_finite() && n > 0.0),
        }
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

/// One declared check on one field
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub location: Location,
    pub check: Check,
    pub message: &'static str,
    /// Skip the check when the field is absent or `null`
    pub optional: bool,
}

impl FieldRule {
    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            location: Location::Body,
            check,
            message,
            optional: false,
        }
    }

    pub const fn path(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            location: Location::Path,
            check,
            message,
            optional: false,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Run the rule against the extracted value, `Value::Null` when absent.
    pub fn evaluate(&self, value: &Value) -> Option<FieldError> {
        if self.optional && value.is_null() {
            return None;
        }
        if self.check.passes(self.location, value) {
            return None;
        }
        Some(FieldError {
            field: self.field.to_string(),
            location: self.location,
            message: self.message.to_string(),
            value: value.clone(),
        })
    }
}

/// A failed check, as reported to the client
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub location: Location,
    pub message: String,
    /// The offending value, `null` when missing
    #[schema(value_type = Object)]
    pub value: Value,
}

/// Accumulated field errors for the current request
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

/// Body of a `400` produced by [`validation_gate`]
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Middleware running `rules` and appending failures to the request's report.
///
/// The body is buffered and handed on unchanged. A body that is not valid
/// JSON yields one `body` error, and body rules then see every field as missing.
pub async fn check_fields(
    State(rules): State<&'static [FieldRule]>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let mut found = Vec::new();

    let path_params: Vec<(String, String)> = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .map(|params| {
            params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let needs_body = rules.iter().any(|rule| rule.location == Location::Body);
    let (body, json) = if needs_body {
        match to_bytes(body, BODY_LIMIT).await {
            Ok(bytes) => {
                let json = if bytes.is_empty() {
                    Value::Null
                } else {
                    serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|e| {
                        debug!(error = %e, "Request body is not valid JSON");
                        found.push(malformed_body());
                        Value::Null
                    })
                };
                (Body::from(bytes), json)
            }
            Err(e) if exceeds_limit(&e) => {
                debug!(limit = BODY_LIMIT, "Request body exceeds buffering limit");
                return (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(ErrorResponse::new(
                        ErrorCode::PayloadTooLarge,
                        ErrorCode::PayloadTooLarge.default_message(),
                    )),
                )
                    .into_response();
            }
            Err(e) => {
                debug!(error = %e, "Failed to buffer request body");
                found.push(malformed_body());
                (Body::empty(), Value::Null)
            }
        }
    } else {
        (body, Value::Null)
    };

    for rule in rules {
        let value = match rule.location {
            Location::Path => path_params
                .iter()
                .find(|(key, _)| key == rule.field)
                .map(|(_, raw)| Value::String(raw.clone()))
                .unwrap_or(Value::Null),
            Location::Body => json.get(rule.field).cloned().unwrap_or(Value::Null),
        };
        found.extend(rule.evaluate(&value));
    }

    if !found.is_empty() {
        let mut report = parts
            .extensions
            .remove::<ValidationReport>()
            .unwrap_or_default();
        report.errors.extend(found);
        parts.extensions.insert(report);
    }

    next.run(Request::from_parts(parts, body)).await
}

fn exceeds_limit(error: &axum::Error) -> bool {
    std::error::Error::source(error).is_some_and(|inner| inner.is::<LengthLimitError>())
}

fn malformed_body() -> FieldError {
    FieldError {
        field: "body".to_string(),
        location: Location::Body,
        message: MALFORMED_BODY.to_string(),
        value: Value::Null,
    }
}

/// Middleware rejecting requests whose [`ValidationReport`] has errors.
pub async fn validation_gate(request: Request, next: Next) -> Response {
    match request.extensions().get::<ValidationReport>() {
        Some(report) if !report.is_empty() => {
            debug!(
                errors = report.errors().len(),
                uri = %request.uri(),
                "Request rejected by field validation"
            );
            let body = ValidationErrorResponse {
                errors: report.errors().to_vec(),
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        _ => next.run(request).await,
    }
}

/// Wrap a method router so `rules` run, then the gate, then the handler.
pub fn validated<S>(route: MethodRouter<S>, rules: &'static [FieldRule]) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    // The last layer added runs first.
    route
        .route_layer(middleware::from_fn(validation_gate))
        .route_layer(middleware::from_fn_with_state(rules, check_fields))
}
