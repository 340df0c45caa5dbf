//! Category and product models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saree_core::{CategoryId, ProductId};

use crate::error::FieldError;

/// A product category (e.g. "Banarasi Silk", "Wedding Collection").
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Payload for creating or replacing a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewCategory {
    /// Validate the payload, collecting one error per offending field.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors when any check fails.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if self.slug.trim().is_empty() {
            errors.push(FieldError::new("slug", "Slug is required"));
        } else if !self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            errors.push(FieldError::new(
                "slug",
                "Slug may only contain lowercase letters, digits and '-'",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub image_url: String,
    pub images: Vec<String>,
    pub category_id: CategoryId,
    pub stock: u32,
    pub rating: f32,
    pub review_count: u32,
    pub featured: bool,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The unit price charged at checkout: the discount price when one is
    /// set, the list price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    pub image_url: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: CategoryId,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    #[serde(default)]
    pub is_best_seller: bool,
}

impl NewProduct {
    /// Validate the payload, collecting one error per offending field.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors when any check fails.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        }
        if self.price <= Decimal::ZERO {
            errors.push(FieldError::new("price", "Price must be positive"));
        }
        if let Some(discount) = self.discount_price {
            if discount <= Decimal::ZERO {
                errors.push(FieldError::new(
                    "discountPrice",
                    "Discount price must be positive",
                ));
            } else if discount >= self.price {
                errors.push(FieldError::new(
                    "discountPrice",
                    "Discount price must be below the list price",
                ));
            }
        }
        if self.image_url.trim().is_empty() {
            errors.push(FieldError::new("imageUrl", "Image URL is required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Filters for the product listing endpoint.
///
/// Flags are conjunctive: a product must match every filter that is set.
/// The search term matches name or description, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub featured: bool,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    pub search: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_payload() -> NewProduct {
        NewProduct {
            name: "Kanjivaram Silk Saree".to_owned(),
            description: "Handwoven pure silk".to_owned(),
            price: Decimal::new(1299900, 2),
            discount_price: None,
            image_url: "/images/kanjivaram.jpg".to_owned(),
            images: Vec::new(),
            category_id: CategoryId::new(1),
            stock: 10,
            featured: false,
            is_new_arrival: false,
            is_best_seller: false,
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(product_payload().validate().is_ok());
    }

    #[test]
    fn test_discount_must_be_below_price() {
        let mut payload = product_payload();
        payload.discount_price = Some(payload.price);
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().path, "discountPrice");
    }

    #[test]
    fn test_empty_fields_collected_together() {
        let mut payload = product_payload();
        payload.name = "  ".to_owned();
        payload.image_url = String::new();
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_category_slug_charset() {
        let category = NewCategory {
            name: "Silk".to_owned(),
            slug: "Silk Sarees".to_owned(),
            description: None,
            image_url: None,
        };
        assert!(category.validate().is_err());
    }

    #[test]
    fn test_effective_price_prefers_discount() {
        let mut product = Product {
            id: ProductId::new(1),
            name: String::new(),
            description: String::new(),
            price: Decimal::new(10000, 2),
            discount_price: None,
            image_url: String::new(),
            images: Vec::new(),
            category_id: CategoryId::new(1),
            stock: 0,
            rating: 0.0,
            review_count: 0,
            featured: false,
            is_new_arrival: false,
            is_best_seller: false,
            created_at: Utc::now(),
        };
        assert_eq!(product.effective_price(), Decimal::new(10000, 2));
        product.discount_price = Some(Decimal::new(7500, 2));
        assert_eq!(product.effective_price(), Decimal::new(7500, 2));
    }
}
