use sqlx::PgPool;

use crate::{errors::AppError, models::Review};

pub async fn get_reviews_by_product(
    product_id: &str,
    postgres: &PgPool,
) -> Result<Vec<Review>, AppError> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT user_id, product_id, rating, comment, created_at, updated_at
			FROM reviews
			WHERE product_id = $1
			ORDER BY created_at ASC",
    )
    .bind(product_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch reviews: {}", e)))?;

    Ok(reviews)
}
