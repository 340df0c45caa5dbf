//! Product review and testimonial models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use saree_core::{ProductId, ReviewId, TestimonialId, UserId};

use crate::error::FieldError;

/// A customer review of a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for posting a review.
///
/// The product comes from the URL and the user from the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    /// Validate the payload, collecting one error per offending field.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors when any check fails.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if !(1..=5).contains(&self.rating) {
            errors.push(FieldError::new("rating", "Rating must be between 1 and 5"));
        }
        if self.comment.trim().is_empty() {
            errors.push(FieldError::new("comment", "Comment is required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A curated homepage testimonial.
///
/// Testimonials are editorial content managed by admins, not tied to a user
/// account or product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub location: String,
    pub rating: u8,
    pub comment: String,
    pub avatar_initials: String,
    pub avatar_color: String,
}

/// Payload for creating a testimonial.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub name: String,
    pub location: String,
    pub rating: u8,
    pub comment: String,
    pub avatar_initials: String,
    pub avatar_color: String,
}

impl NewTestimonial {
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
        if !(1..=5).contains(&self.rating) {
            errors.push(FieldError::new("rating", "Rating must be between 1 and 5"));
        }
        if self.comment.trim().is_empty() {
            errors.push(FieldError::new("comment", "Comment is required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let review = NewReview {
            rating: 0,
            comment: "Lovely drape".to_owned(),
        };
        assert!(review.validate().is_err());

        let review = NewReview {
            rating: 6,
            comment: "Lovely drape".to_owned(),
        };
        assert!(review.validate().is_err());

        let review = NewReview {
            rating: 5,
            comment: "Lovely drape".to_owned(),
        };
        assert!(review.validate().is_ok());
    }

    #[test]
    fn test_empty_comment_rejected() {
        let review = NewReview {
            rating: 4,
            comment: String::new(),
        };
        let errors = review.validate().unwrap_err();
        assert_eq!(errors.first().unwrap().path, "comment");
    }
}
