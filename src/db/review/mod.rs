pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::ReviewStore,
    errors::AppError,
    models::{NewReview, Review, ReviewKey, ReviewUpdate},
};

#[derive(Clone)]
pub struct PgReviewStore {
    postgres: PgPool,
}

impl PgReviewStore {
    pub fn new(postgres: PgPool) -> Self {
        Self { postgres }
    }

    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS reviews (
                user_id TEXT NOT NULL,
                product_id TEXT NOT NULL,
                rating INTEGER NOT NULL,
                comment TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (user_id, product_id)
            )",
        )
        .execute(&self.postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create reviews table: {}", e)))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS reviews_product_id_idx ON reviews (product_id)")
            .execute(&self.postgres)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create reviews index: {}", e)))?;

        tracing::info!("Reviews schema ready");
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn add_review(&self, review: NewReview) -> Result<Review, AppError> {
        post::insert_review(review, &self.postgres).await
    }

    async fn update_review(&self, update: ReviewUpdate) -> Result<Review, AppError> {
        patch::update_review(update, &self.postgres).await
    }

    async fn delete_reviews(&self, key: ReviewKey) -> Result<(), AppError> {
        delete::delete_review(key, &self.postgres).await
    }

    async fn get_reviews(&self, product_id: &str) -> Result<Vec<Review>, AppError> {
        get::get_reviews_by_product(product_id, &self.postgres).await
    }
}
