//! Testimonial route handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{NewTestimonial, Testimonial};
use crate::state::AppState;

/// `GET /api/testimonials` - list homepage testimonials.
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>> {
    Ok(Json(state.store().testimonials()?))
}

/// `POST /api/testimonials` - create a testimonial (admin).
///
/// # Errors
///
/// 400 on validation failure.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<NewTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>)> {
    payload.validate().map_err(AppError::Validation)?;
    let testimonial = state.store().create_testimonial(payload)?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}
