//! Seed catalogs.
//!
//! The store starts empty on every boot, so a catalog is loaded at startup:
//! either the built-in demo catalog or a YAML file pointed to by
//! `SAREE_SEED_FILE`. Products reference categories by slug, which keeps
//! seed files stable under reordering.
//!
//! The same [`SeedData::validate`] pass runs at server startup and in
//! `saree-cli seed validate`, so a bad file fails fast in both places.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Store, StoreError};
use crate::models::{NewCategory, NewProduct, NewTestimonial};

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedFileError {
    /// The file could not be read.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for the seed schema.
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The file parsed but failed validation.
    #[error("seed file is invalid: {}", format_issues(.0))]
    Invalid(Vec<SeedIssue>),
}

/// A single validation finding in a seed catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedIssue {
    #[error("category {index}: {field} must not be empty")]
    EmptyCategoryField { index: usize, field: &'static str },

    #[error("duplicate category slug: {slug}")]
    DuplicateSlug { slug: String },

    #[error("product {name:?}: {field} must not be empty")]
    EmptyProductField { name: String, field: &'static str },

    #[error("product {name:?} references unknown category slug {slug:?}")]
    UnknownCategory { name: String, slug: String },

    #[error("product {name:?}: price must be positive")]
    NonPositivePrice { name: String },

    #[error("product {name:?}: discount price must be positive and below the list price")]
    BadDiscount { name: String },

    #[error("product {name:?}: rating must be between 0 and 5")]
    BadRating { name: String },

    #[error("testimonial {name:?}: rating must be between 1 and 5")]
    BadTestimonialRating { name: String },
}

fn format_issues(issues: &[SeedIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A category entry in a seed catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A product entry in a seed catalog.
///
/// `rating` and `review_count` are display seeds for the storefront until
/// real reviews arrive; posting a review recomputes both from actual rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub category_slug: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    #[serde(default)]
    pub is_best_seller: bool,
}

/// A testimonial entry in a seed catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTestimonial {
    pub name: String,
    pub location: String,
    pub rating: u8,
    pub comment: String,
    pub avatar_initials: String,
    pub avatar_color: String,
}

/// A complete seed catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
    #[serde(default)]
    pub testimonials: Vec<SeedTestimonial>,
}

impl SeedData {
    /// Load and validate a seed catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `SeedFileError` when the file cannot be read, parsed, or
    /// fails validation.
    pub fn from_path(path: &Path) -> Result<Self, SeedFileError> {
        let content = std::fs::read_to_string(path)?;
        let data: Self = serde_yaml::from_str(&content)?;
        let issues = data.validate();
        if issues.is_empty() {
            Ok(data)
        } else {
            Err(SeedFileError::Invalid(issues))
        }
    }

    /// Check the catalog for internal consistency.
    ///
    /// Returns every finding rather than stopping at the first, so a CLI
    /// run reports the whole file at once.
    #[must_use]
    pub fn validate(&self) -> Vec<SeedIssue> {
        let mut issues = Vec::new();
        let mut slugs = std::collections::BTreeSet::new();

        for (index, category) in self.categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                issues.push(SeedIssue::EmptyCategoryField {
                    index,
                    field: "name",
                });
            }
            if category.slug.trim().is_empty() {
                issues.push(SeedIssue::EmptyCategoryField {
                    index,
                    field: "slug",
                });
            } else if !slugs.insert(category.slug.as_str()) {
                issues.push(SeedIssue::DuplicateSlug {
                    slug: category.slug.clone(),
                });
            }
        }

        for product in &self.products {
            if product.name.trim().is_empty() {
                issues.push(SeedIssue::EmptyProductField {
                    name: product.name.clone(),
                    field: "name",
                });
            }
            if product.image_url.trim().is_empty() {
                issues.push(SeedIssue::EmptyProductField {
                    name: product.name.clone(),
                    field: "image_url",
                });
            }
            if !slugs.contains(product.category_slug.as_str()) {
                issues.push(SeedIssue::UnknownCategory {
                    name: product.name.clone(),
                    slug: product.category_slug.clone(),
                });
            }
            if product.price <= Decimal::ZERO {
                issues.push(SeedIssue::NonPositivePrice {
                    name: product.name.clone(),
                });
            }
            if let Some(discount) = product.discount_price {
                if discount <= Decimal::ZERO || discount >= product.price {
                    issues.push(SeedIssue::BadDiscount {
                        name: product.name.clone(),
                    });
                }
            }
            if !(0.0..=5.0).contains(&product.rating) {
                issues.push(SeedIssue::BadRating {
                    name: product.name.clone(),
                });
            }
        }

        for testimonial in &self.testimonials {
            if !(1..=5).contains(&testimonial.rating) {
                issues.push(SeedIssue::BadTestimonialRating {
                    name: testimonial.name.clone(),
                });
            }
        }

        issues
    }

    /// The built-in demo catalog used when no seed file is configured.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn demo() -> Self {
        let categories = vec![
            SeedCategory {
                name: "Banarasi Silk".to_owned(),
                slug: "banarasi-silk".to_owned(),
                description: Some("Opulent brocade sarees woven in Varanasi".to_owned()),
                image_url: Some("/images/categories/banarasi.jpg".to_owned()),
            },
            SeedCategory {
                name: "Kanjivaram".to_owned(),
                slug: "kanjivaram".to_owned(),
                description: Some("Temple-border silk sarees from Kanchipuram".to_owned()),
                image_url: Some("/images/categories/kanjivaram.jpg".to_owned()),
            },
            SeedCategory {
                name: "Chanderi Cotton".to_owned(),
                slug: "chanderi-cotton".to_owned(),
                description: Some("Featherweight cotton-silk for everyday wear".to_owned()),
                image_url: Some("/images/categories/chanderi.jpg".to_owned()),
            },
            SeedCategory {
                name: "Bandhani".to_owned(),
                slug: "bandhani".to_owned(),
                description: Some("Hand-tied dot-dyed sarees from Gujarat".to_owned()),
                image_url: Some("/images/categories/bandhani.jpg".to_owned()),
            },
            SeedCategory {
                name: "Wedding Collection".to_owned(),
                slug: "wedding-collection".to_owned(),
                description: Some("Heirloom pieces for the big day".to_owned()),
                image_url: Some("/images/categories/wedding.jpg".to_owned()),
            },
        ];

        let products = vec![
            SeedProduct {
                name: "Royal Crimson Banarasi".to_owned(),
                description: "Deep crimson katan silk with gold zari paisleys and a \
                              handwoven kadwa border."
                    .to_owned(),
                price: Decimal::new(1_849_900, 2),
                discount_price: Some(Decimal::new(1_499_900, 2)),
                image_url: "/images/products/royal-crimson-banarasi.jpg".to_owned(),
                images: vec![
                    "/images/products/royal-crimson-banarasi-drape.jpg".to_owned(),
                    "/images/products/royal-crimson-banarasi-border.jpg".to_owned(),
                ],
                category_slug: "banarasi-silk".to_owned(),
                stock: 8,
                rating: 4.8,
                review_count: 32,
                featured: true,
                is_new_arrival: false,
                is_best_seller: true,
            },
            SeedProduct {
                name: "Peacock Teal Kanjivaram".to_owned(),
                description: "Pure mulberry silk in peacock teal with a contrast maroon \
                              temple border and rich pallu."
                    .to_owned(),
                price: Decimal::new(2_249_900, 2),
                discount_price: None,
                image_url: "/images/products/peacock-teal-kanjivaram.jpg".to_owned(),
                images: vec!["/images/products/peacock-teal-kanjivaram-pallu.jpg".to_owned()],
                category_slug: "kanjivaram".to_owned(),
                stock: 5,
                rating: 4.9,
                review_count: 41,
                featured: true,
                is_new_arrival: false,
                is_best_seller: true,
            },
            SeedProduct {
                name: "Ivory Chanderi Daily Drape".to_owned(),
                description: "Sheer ivory chanderi with slim silver zari stripes, light \
                              enough for office wear."
                    .to_owned(),
                price: Decimal::new(349_900, 2),
                discount_price: Some(Decimal::new(279_900, 2)),
                image_url: "/images/products/ivory-chanderi.jpg".to_owned(),
                images: Vec::new(),
                category_slug: "chanderi-cotton".to_owned(),
                stock: 24,
                rating: 4.4,
                review_count: 57,
                featured: false,
                is_new_arrival: false,
                is_best_seller: true,
            },
            SeedProduct {
                name: "Sunset Bandhani Georgette".to_owned(),
                description: "Marigold-to-rust ombre georgette with traditional bandhej \
                              dots and a gota patti edge."
                    .to_owned(),
                price: Decimal::new(549_900, 2),
                discount_price: None,
                image_url: "/images/products/sunset-bandhani.jpg".to_owned(),
                images: Vec::new(),
                category_slug: "bandhani".to_owned(),
                stock: 14,
                rating: 4.2,
                review_count: 18,
                featured: false,
                is_new_arrival: true,
                is_best_seller: false,
            },
            SeedProduct {
                name: "Bridal Rani Pink Kanjivaram".to_owned(),
                description: "Rani pink bridal kanjivaram with elephant-and-annam motifs \
                              in triple gold zari."
                    .to_owned(),
                price: Decimal::new(3_899_900, 2),
                discount_price: Some(Decimal::new(3_499_900, 2)),
                image_url: "/images/products/bridal-rani-pink.jpg".to_owned(),
                images: vec!["/images/products/bridal-rani-pink-detail.jpg".to_owned()],
                category_slug: "wedding-collection".to_owned(),
                stock: 3,
                rating: 5.0,
                review_count: 12,
                featured: true,
                is_new_arrival: true,
                is_best_seller: false,
            },
            SeedProduct {
                name: "Midnight Blue Banarasi Georgette".to_owned(),
                description: "Midnight blue georgette banarasi with silver buttis and a \
                              scalloped border, new this season."
                    .to_owned(),
                price: Decimal::new(899_900, 2),
                discount_price: None,
                image_url: "/images/products/midnight-blue-banarasi.jpg".to_owned(),
                images: Vec::new(),
                category_slug: "banarasi-silk".to_owned(),
                stock: 11,
                rating: 0.0,
                review_count: 0,
                featured: false,
                is_new_arrival: true,
                is_best_seller: false,
            },
        ];

        let testimonials = vec![
            SeedTestimonial {
                name: "Ananya Iyer".to_owned(),
                location: "Chennai".to_owned(),
                rating: 5,
                comment: "The kanjivaram I ordered for my sister's wedding was even \
                          richer in person. Delivery was quick and the fall was perfect."
                    .to_owned(),
                avatar_initials: "AI".to_owned(),
                avatar_color: "#0e7490".to_owned(),
            },
            SeedTestimonial {
                name: "Meera Patel".to_owned(),
                location: "Ahmedabad".to_owned(),
                rating: 5,
                comment: "Beautiful bandhani work and honest colours. My third order \
                          and the quality has never dipped."
                    .to_owned(),
                avatar_initials: "MP".to_owned(),
                avatar_color: "#7c3aed".to_owned(),
            },
            SeedTestimonial {
                name: "Lakshmi Rao".to_owned(),
                location: "Hyderabad".to_owned(),
                rating: 4,
                comment: "The chanderi is so light I forget I'm wearing it. Wish there \
                          were more blouse options, but the saree itself is lovely."
                    .to_owned(),
                avatar_initials: "LR".to_owned(),
                avatar_color: "#be185d".to_owned(),
            },
        ];

        Self {
            categories,
            products,
            testimonials,
        }
    }
}

impl Store {
    /// Load a seed catalog into the store.
    ///
    /// Categories are inserted first and products resolve their
    /// `category_slug` against them; entries referencing a slug missing
    /// from the freshly inserted set are skipped with a warning (validation
    /// normally catches this earlier). Returns the number of categories,
    /// products and testimonials inserted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` when a seed slug collides with an
    /// existing category, `StoreError::Poisoned` if the lock is poisoned.
    pub fn seed(&self, data: &SeedData) -> Result<(usize, usize, usize), StoreError> {
        let mut slug_to_id = std::collections::BTreeMap::new();

        for category in &data.categories {
            let created = self.create_category(NewCategory {
                name: category.name.clone(),
                slug: category.slug.clone(),
                description: category.description.clone(),
                image_url: category.image_url.clone(),
            })?;
            slug_to_id.insert(category.slug.clone(), created.id);
        }

        let mut product_count = 0;
        for product in &data.products {
            let Some(&category_id) = slug_to_id.get(&product.category_slug) else {
                tracing::warn!(
                    product = %product.name,
                    slug = %product.category_slug,
                    "skipping seed product with unknown category slug"
                );
                continue;
            };

            let created = self.create_product(NewProduct {
                name: product.name.clone(),
                description: product.description.clone(),
                price: product.price,
                discount_price: product.discount_price,
                image_url: product.image_url.clone(),
                images: product.images.clone(),
                category_id,
                stock: product.stock,
                featured: product.featured,
                is_new_arrival: product.is_new_arrival,
                is_best_seller: product.is_best_seller,
            })?;

            // Carry the display seeds for rating until real reviews arrive.
            if product.rating > 0.0 || product.review_count > 0 {
                self.set_review_seed(created.id, product.rating, product.review_count)?;
            }
            product_count += 1;
        }

        for testimonial in &data.testimonials {
            self.create_testimonial(NewTestimonial {
                name: testimonial.name.clone(),
                location: testimonial.location.clone(),
                rating: testimonial.rating,
                comment: testimonial.comment.clone(),
                avatar_initials: testimonial.avatar_initials.clone(),
                avatar_color: testimonial.avatar_color.clone(),
            })?;
        }

        Ok((
            data.categories.len(),
            product_count,
            data.testimonials.len(),
        ))
    }

    /// Set a product's display rating aggregate directly (seed only).
    fn set_review_seed(
        &self,
        id: saree_core::ProductId,
        rating: f32,
        review_count: u32,
    ) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if let Some(product) = tables.products.get_mut(&id.as_i32()) {
            product.rating = rating;
            product.review_count = review_count;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::ProductFilter;

    #[test]
    fn test_demo_catalog_is_valid() {
        assert!(SeedData::demo().validate().is_empty());
    }

    #[test]
    fn test_demo_catalog_seeds() {
        let store = Store::new();
        let (categories, products, testimonials) = store.seed(&SeedData::demo()).unwrap();

        assert_eq!(categories, store.categories().unwrap().len());
        assert_eq!(
            products,
            store.products(&ProductFilter::default()).unwrap().len()
        );
        assert_eq!(testimonials, store.testimonials().unwrap().len());

        // Products resolved their category slugs.
        let products = store.products(&ProductFilter::default()).unwrap();
        let categories = store.categories().unwrap();
        for product in &products {
            assert!(categories.iter().any(|c| c.id == product.category_id));
        }
    }

    #[test]
    fn test_seed_carries_display_ratings() {
        let store = Store::new();
        store.seed(&SeedData::demo()).unwrap();

        let products = store.products(&ProductFilter::default()).unwrap();
        let rated = products.iter().find(|p| p.review_count > 0).unwrap();
        assert!(rated.rating > 0.0);
    }

    #[test]
    fn test_validate_flags_unknown_category() {
        let mut data = SeedData::demo();
        data.products.first_mut().unwrap().category_slug = "no-such-slug".to_owned();
        let issues = data.validate();
        assert!(
            issues
                .iter()
                .any(|i| matches!(i, SeedIssue::UnknownCategory { .. }))
        );
    }

    #[test]
    fn test_validate_flags_duplicate_slug() {
        let mut data = SeedData::demo();
        let first = data.categories.first().unwrap().clone();
        data.categories.push(first);
        let issues = data.validate();
        assert!(
            issues
                .iter()
                .any(|i| matches!(i, SeedIssue::DuplicateSlug { .. }))
        );
    }

    #[test]
    fn test_validate_flags_bad_discount() {
        let mut data = SeedData::demo();
        let product = data.products.first_mut().unwrap();
        product.discount_price = Some(product.price);
        let issues = data.validate();
        assert!(issues.iter().any(|i| matches!(i, SeedIssue::BadDiscount { .. })));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = serde_yaml::to_string(&SeedData::demo()).unwrap();
        let parsed: SeedData = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.categories.len(), SeedData::demo().categories.len());
        assert!(parsed.validate().is_empty());
    }
}
