use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;
use validator::Validate;

/// Rejects names made only of whitespace
fn validate_not_blank(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Accepts a JSON number or a string holding one (`"300"`)
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    let price = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(value) => value,
        RawPrice::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid price: {raw:?}")))?,
    };
    if !price.is_finite() {
        return Err(de::Error::custom("price must be a finite number"));
    }
    Ok(price)
}

fn default_availability() -> bool {
    true
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Serial identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Monitor curvo de 49 pulgadas")]
    pub name: String,
    #[schema(example = 300.0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    #[schema(example = "Monitor curvo de 49 pulgadas")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(deserialize_with = "deserialize_price")]
    #[schema(example = 399.0)]
    pub price: f64,
    /// Defaults to `true`
    #[serde(default = "default_availability")]
    pub availability: bool,
}

/// DTO replacing every mutable field of a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    #[schema(example = "Monitor curvo de 49 pulgadas")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(deserialize_with = "deserialize_price")]
    #[schema(example = 399.0)]
    pub price: f64,
    #[schema(example = false)]
    pub availability: bool,
}

/// `{"data": Product}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

/// `{"data": [Product]}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

/// `{"data": "Product deleted"}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted")]
    pub data: String,
}

impl Product {
    /// Build a product for non-database repositories
    pub fn new(id: i32, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            price: input.price,
            availability: input.availability,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
        self.availability = update.availability;
        self.updated_at = Utc::now();
    }

    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
        self.updated_at = Utc::now();
    }
}
