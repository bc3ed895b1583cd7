use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_id: String,
    pub product_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review as handed to the store on create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user_id: String,
    pub product_id: String,
    pub rating: i32,
    pub comment: String,
}

/// Partial update. Fields left as `None` are not touched by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub user_id: String,
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewKey {
    pub user_id: String,
    pub product_id: String,
}
