pub mod memory;
pub mod review;

use async_trait::async_trait;

use crate::{
    errors::AppError,
    models::{NewReview, Review, ReviewKey, ReviewUpdate},
};

pub use memory::MemoryReviewStore;
pub use review::PgReviewStore;

/// Persistence for product reviews.
///
/// Handlers call exactly one of these per request. Uniqueness of
/// (user, product) and ordering between concurrent writers are up to the
/// implementation.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn add_review(&self, review: NewReview) -> Result<Review, AppError>;

    async fn update_review(&self, update: ReviewUpdate) -> Result<Review, AppError>;

    async fn delete_reviews(&self, key: ReviewKey) -> Result<(), AppError>;

    async fn get_reviews(&self, product_id: &str) -> Result<Vec<Review>, AppError>;
}
