//! Category and product table operations.

use chrono::Utc;

use saree_core::{CategoryId, ProductId};

use super::{Store, StoreError, take_id};
use crate::models::{Category, NewCategory, NewProduct, Product, ProductFilter};

impl Store {
    // =========================================================================
    // Categories
    // =========================================================================

    /// All categories, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.get(&id.as_i32()).cloned())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` when the slug is already in use.
    pub fn create_category(&self, new: NewCategory) -> Result<Category, StoreError> {
        let mut tables = self.write()?;

        if tables.categories.values().any(|c| c.slug == new.slug) {
            return Err(StoreError::Conflict(format!(
                "category slug {} is already in use",
                new.slug
            )));
        }

        let id = take_id(&mut tables.next_category_id);
        let category = Category {
            id: CategoryId::new(id),
            name: new.name,
            slug: new.slug,
            description: new.description,
            image_url: new.image_url,
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    /// Replace a category. Returns `None` when the ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` when the new slug belongs to another
    /// category.
    pub fn update_category(
        &self,
        id: CategoryId,
        new: NewCategory,
    ) -> Result<Option<Category>, StoreError> {
        let mut tables = self.write()?;

        if !tables.categories.contains_key(&id.as_i32()) {
            return Ok(None);
        }
        if tables
            .categories
            .values()
            .any(|c| c.slug == new.slug && c.id != id)
        {
            return Err(StoreError::Conflict(format!(
                "category slug {} is already in use",
                new.slug
            )));
        }

        let category = Category {
            id,
            name: new.name,
            slug: new.slug,
            description: new.description,
            image_url: new.image_url,
        };
        tables.categories.insert(id.as_i32(), category.clone());
        Ok(Some(category))
    }

    /// Delete a category. Returns `false` when the ID is unknown.
    ///
    /// Products keep their `category_id` even when it dangles; there is no
    /// referential integrity in this store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn delete_category(&self, id: CategoryId) -> Result<bool, StoreError> {
        Ok(self.write()?.categories.remove(&id.as_i32()).is_some())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Products matching the filter, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let tables = self.read()?;
        let needle = filter.search.as_deref().map(str::to_lowercase);

        Ok(tables
            .products
            .values()
            .filter(|p| filter.category_id.is_none_or(|id| p.category_id == id))
            .filter(|p| !filter.featured || p.featured)
            .filter(|p| !filter.is_new_arrival || p.is_new_arrival)
            .filter(|p| !filter.is_best_seller || p.is_best_seller)
            .filter(|p| {
                needle.as_deref().is_none_or(|needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.description.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.get(&id.as_i32()).cloned())
    }

    /// Create a product. Rating starts at zero until reviews arrive.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn create_product(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.write()?;
        let id = take_id(&mut tables.next_product_id);
        let product = Product {
            id: ProductId::new(id),
            name: new.name,
            description: new.description,
            price: new.price,
            discount_price: new.discount_price,
            image_url: new.image_url,
            images: new.images,
            category_id: new.category_id,
            stock: new.stock,
            rating: 0.0,
            review_count: 0,
            featured: new.featured,
            is_new_arrival: new.is_new_arrival,
            is_best_seller: new.is_best_seller,
            created_at: Utc::now(),
        };
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    /// Replace a product. Returns `None` when the ID is unknown.
    ///
    /// The review aggregate (`rating`, `review_count`) and creation time are
    /// preserved; only the cataloguing fields are replaced.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn update_product(
        &self,
        id: ProductId,
        new: NewProduct,
    ) -> Result<Option<Product>, StoreError> {
        let mut tables = self.write()?;

        let Some(existing) = tables.products.get(&id.as_i32()) else {
            return Ok(None);
        };

        let product = Product {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            discount_price: new.discount_price,
            image_url: new.image_url,
            images: new.images,
            category_id: new.category_id,
            stock: new.stock,
            rating: existing.rating,
            review_count: existing.review_count,
            featured: new.featured,
            is_new_arrival: new.is_new_arrival,
            is_best_seller: new.is_best_seller,
            created_at: existing.created_at,
        };
        tables.products.insert(id.as_i32(), product.clone());
        Ok(Some(product))
    }

    /// Delete a product. Returns `false` when the ID is unknown.
    ///
    /// Cart rows referencing the product are left in place and skipped at
    /// order time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn delete_product(&self, id: ProductId) -> Result<bool, StoreError> {
        Ok(self.write()?.products.remove(&id.as_i32()).is_some())
    }
}
