use sqlx::PgPool;

use crate::{errors::AppError, models::ReviewKey};

pub async fn delete_review(key: ReviewKey, postgres: &PgPool) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE user_id = $1 AND product_id = $2")
        .bind(&key.user_id)
        .bind(&key.product_id)
        .execute(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete review: {}", e)))?;

    tracing::debug!(
        "Deleted {} review(s) for product {} by {}",
        result.rows_affected(),
        key.product_id,
        key.user_id
    );

    Ok(())
}
