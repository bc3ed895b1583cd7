use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    db::ReviewStore,
    errors::AppError,
    models::{NewReview, Review, ReviewKey, ReviewUpdate},
};

/// Process-local review store, used when no database is configured.
#[derive(Default)]
pub struct MemoryReviewStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    reviews: HashMap<ReviewKey, Review>,
    // insertion order, so listing is stable
    order: Vec<ReviewKey>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn add_review(&self, review: NewReview) -> Result<Review, AppError> {
        let mut inner = self.inner.lock().await;
        let key = ReviewKey {
            user_id: review.user_id.clone(),
            product_id: review.product_id.clone(),
        };

        if inner.reviews.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "User {} already reviewed product {}",
                key.user_id, key.product_id
            )));
        }

        let now = Utc::now();
        let created = Review {
            user_id: review.user_id,
            product_id: review.product_id,
            rating: review.rating,
            comment: review.comment,
            created_at: now,
            updated_at: now,
        };

        inner.order.push(key.clone());
        inner.reviews.insert(key, created.clone());
        Ok(created)
    }

    async fn update_review(&self, update: ReviewUpdate) -> Result<Review, AppError> {
        let mut inner = self.inner.lock().await;
        let key = ReviewKey {
            user_id: update.user_id,
            product_id: update.product_id,
        };

        let review = inner.reviews.get_mut(&key).ok_or_else(|| {
            AppError::NotFound(format!(
                "No review by {} for product {}",
                key.user_id, key.product_id
            ))
        })?;

        if let Some(rating) = update.rating {
            review.rating = rating;
        }
        if let Some(comment) = update.comment {
            review.comment = comment;
        }
        review.updated_at = Utc::now();

        Ok(review.clone())
    }

    async fn delete_reviews(&self, key: ReviewKey) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;
        if inner.reviews.remove(&key).is_some() {
            inner.order.retain(|k| k != &key);
        }
        Ok(())
    }

    async fn get_reviews(&self, product_id: &str) -> Result<Vec<Review>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .order
            .iter()
            .filter(|k| k.product_id == product_id)
            .filter_map(|k| inner.reviews.get(k).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_review(user: &str, product: &str, rating: i32) -> NewReview {
        NewReview {
            user_id: user.into(),
            product_id: product.into(),
            rating,
            comment: format!("{} on {}", user, product),
        }
    }

    #[tokio::test]
    async fn lists_only_reviews_for_requested_product_in_insertion_order() {
        let store = MemoryReviewStore::new();
        store.add_review(new_review("bob", "p1", 3)).await.unwrap();
        store.add_review(new_review("amy", "p2", 5)).await.unwrap();
        store.add_review(new_review("cal", "p1", 4)).await.unwrap();

        let users: Vec<String> = store
            .get_reviews("p1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(users, vec!["bob", "cal"]);
        assert!(store.get_reviews("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_review_by_same_user_for_same_product_conflicts() {
        let store = MemoryReviewStore::new();
        store.add_review(new_review("bob", "p1", 3)).await.unwrap();
        let err = store.add_review(new_review("bob", "p1", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_touches_only_provided_fields() {
        let store = MemoryReviewStore::new();
        store.add_review(new_review("bob", "p1", 3)).await.unwrap();

        let updated = store
            .update_review(ReviewUpdate {
                user_id: "bob".into(),
                product_id: "p1".into(),
                rating: Some(1),
                comment: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.rating, 1);
        assert_eq!(updated.comment, "bob on p1");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn updating_missing_review_is_not_found() {
        let store = MemoryReviewStore::new();
        let err = store
            .update_review(ReviewUpdate {
                user_id: "bob".into(),
                product_id: "p1".into(),
                rating: None,
                comment: Some("hi".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_only_callers_review_and_tolerates_missing() {
        let store = MemoryReviewStore::new();
        store.add_review(new_review("bob", "p1", 3)).await.unwrap();
        store.add_review(new_review("amy", "p1", 5)).await.unwrap();

        let key = ReviewKey {
            user_id: "bob".into(),
            product_id: "p1".into(),
        };
        store.delete_reviews(key.clone()).await.unwrap();
        store.delete_reviews(key).await.unwrap();

        let remaining = store.get_reviews("p1").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_id, "amy");
    }
}
