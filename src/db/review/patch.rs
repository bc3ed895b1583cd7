use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{Review, ReviewUpdate},
};

/// Columns left as `None` in `update` keep their stored value.
pub async fn update_review(update: ReviewUpdate, postgres: &PgPool) -> Result<Review, AppError> {
    let updated = sqlx::query_as::<_, Review>(
        "UPDATE reviews
        SET rating = COALESCE($3, rating),
            comment = COALESCE($4, comment),
            updated_at = NOW()
        WHERE user_id = $1 AND product_id = $2
        RETURNING user_id, product_id, rating, comment, created_at, updated_at",
    )
    .bind(&update.user_id)
    .bind(&update.product_id)
    .bind(update.rating)
    .bind(update.comment.as_deref())
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update review: {}", e)))?;

    updated.ok_or_else(|| {
        AppError::NotFound(format!(
            "No review by {} for product {}",
            update.user_id, update.product_id
        ))
    })
}
