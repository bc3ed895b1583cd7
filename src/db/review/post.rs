use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{NewReview, Review},
};

pub async fn insert_review(review: NewReview, postgres: &PgPool) -> Result<Review, AppError> {
    let created = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (user_id, product_id, rating, comment)
        VALUES ($1, $2, $3, $4)
        RETURNING user_id, product_id, rating, comment, created_at, updated_at",
    )
    .bind(&review.user_id)
    .bind(&review.product_id)
    .bind(review.rating)
    .bind(&review.comment)
    .fetch_one(postgres)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
            "User {} already reviewed product {}",
            review.user_id, review.product_id
        )),
        other => AppError::DatabaseError(format!("Failed to create review: {}", other)),
    })?;

    tracing::debug!(
        "Inserted review for product {} by {}",
        created.product_id,
        created.user_id
    );

    Ok(created)
}
