//! Review and testimonial table operations.

use chrono::Utc;

use saree_core::{ProductId, ReviewId, TestimonialId, UserId};

use super::{Store, StoreError, take_id};
use crate::models::{NewReview, NewTestimonial, Review, Testimonial};

impl Store {
    /// Reviews of one product, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn product_reviews(&self, product_id: ProductId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .read()?
            .reviews
            .values()
            .filter(|review| review.product_id == product_id)
            .cloned()
            .collect())
    }

    /// Post a review and refresh the product's rating aggregate.
    ///
    /// Returns `None` when the product does not exist. The product's
    /// `rating` becomes the mean of its reviews rounded to one decimal, and
    /// `review_count` the number of rows.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn create_review(
        &self,
        user_id: UserId,
        product_id: ProductId,
        new: NewReview,
    ) -> Result<Option<Review>, StoreError> {
        let mut tables = self.write()?;

        if !tables.products.contains_key(&product_id.as_i32()) {
            return Ok(None);
        }

        let id = take_id(&mut tables.next_review_id);
        let review = Review {
            id: ReviewId::new(id),
            product_id,
            user_id,
            rating: new.rating,
            comment: new.comment,
            created_at: Utc::now(),
        };
        tables.reviews.insert(id, review.clone());

        // Refresh the aggregate from the review rows.
        let (count, sum) = tables
            .reviews
            .values()
            .filter(|r| r.product_id == product_id)
            .fold((0u32, 0u32), |(count, sum), r| {
                (count + 1, sum + u32::from(r.rating))
            });
        if let Some(product) = tables.products.get_mut(&product_id.as_i32()) {
            #[allow(clippy::cast_precision_loss)] // Review counts stay tiny
            let mean = sum as f32 / count as f32;
            product.rating = (mean * 10.0).round() / 10.0;
            product.review_count = count;
        }

        Ok(Some(review))
    }

    /// All testimonials, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn testimonials(&self) -> Result<Vec<Testimonial>, StoreError> {
        Ok(self.read()?.testimonials.values().cloned().collect())
    }

    /// Create a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial, StoreError> {
        let mut tables = self.write()?;
        let id = take_id(&mut tables.next_testimonial_id);
        let testimonial = Testimonial {
            id: TestimonialId::new(id),
            name: new.name,
            location: new.location,
            rating: new.rating,
            comment: new.comment,
            avatar_initials: new.avatar_initials,
            avatar_color: new.avatar_color,
        };
        tables.testimonials.insert(id, testimonial.clone());
        Ok(testimonial)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{NewCategory, NewProduct};

    fn seed_product(store: &Store) -> ProductId {
        let category_id = store
            .create_category(NewCategory {
                name: "Silk".to_owned(),
                slug: "silk".to_owned(),
                description: None,
                image_url: None,
            })
            .unwrap()
            .id;

        store
            .create_product(NewProduct {
                name: "Banarasi".to_owned(),
                description: "test".to_owned(),
                price: Decimal::new(999900, 2),
                discount_price: None,
                image_url: "/img.jpg".to_owned(),
                images: Vec::new(),
                category_id,
                stock: 10,
                featured: false,
                is_new_arrival: false,
                is_best_seller: false,
            })
            .unwrap()
            .id
    }

    fn review(rating: u8) -> NewReview {
        NewReview {
            rating,
            comment: "Gorgeous weave".to_owned(),
        }
    }

    #[test]
    fn test_review_updates_product_aggregate() {
        let store = Store::new();
        let product_id = seed_product(&store);

        store
            .create_review(UserId::new(1), product_id, review(5))
            .unwrap()
            .unwrap();
        store
            .create_review(UserId::new(2), product_id, review(4))
            .unwrap()
            .unwrap();

        let product = store.product(product_id).unwrap().unwrap();
        assert_eq!(product.review_count, 2);
        assert!((product.rating - 4.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rating_rounds_to_one_decimal() {
        let store = Store::new();
        let product_id = seed_product(&store);

        for (user, rating) in [(1, 5), (2, 4), (3, 4)] {
            store
                .create_review(UserId::new(user), product_id, review(rating))
                .unwrap()
                .unwrap();
        }

        let product = store.product(product_id).unwrap().unwrap();
        // 13 / 3 = 4.333... rounds to 4.3
        assert!((product.rating - 4.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_review_of_unknown_product_is_none() {
        let store = Store::new();
        assert!(
            store
                .create_review(UserId::new(1), ProductId::new(99), review(5))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_testimonials() {
        let store = Store::new();
        let created = store
            .create_testimonial(NewTestimonial {
                name: "Meera Patel".to_owned(),
                location: "Ahmedabad".to_owned(),
                rating: 5,
                comment: "The blouse stitching service was perfect.".to_owned(),
                avatar_initials: "MP".to_owned(),
                avatar_color: "#7c3aed".to_owned(),
            })
            .unwrap();
        assert_eq!(created.id, TestimonialId::new(1));
        assert_eq!(store.testimonials().unwrap().len(), 1);
    }
}
