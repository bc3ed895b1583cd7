use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::Caller,
    db::ReviewStore,
    errors::AppError,
    models::{CallerId, NewReview, Review, ReviewKey, ReviewUpdate},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    pub product_id: String,
    pub rating: i32,
    pub comment: String,
}

/// Outer `Option` is key presence, inner is the JSON value (`null` = `Some(None)`).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReviewPayload {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub rating: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub comment: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

fn require_caller(caller: Option<CallerId>) -> Result<CallerId, AppError> {
    caller.ok_or(AppError::Unauthorized)
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// An empty PATCH body is an update with no fields, not a malformed request.
fn parse_update_body(body: &Bytes) -> Result<UpdateReviewPayload, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdateReviewPayload::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

fn non_null<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, AppError> {
    match value {
        Some(None) => Err(AppError::BadRequest(format!("{} cannot be null", field))),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

pub async fn create_review(
    store: &dyn ReviewStore,
    caller: &CallerId,
    payload: CreateReviewPayload,
) -> Result<Review, AppError> {
    let review = NewReview {
        user_id: caller.as_str().to_string(),
        product_id: payload.product_id,
        rating: payload.rating,
        comment: payload.comment,
    };

    tracing::info!(
        user_id = %review.user_id,
        product_id = %review.product_id,
        "Adding review"
    );

    store.add_review(review).await
}

pub async fn update_review(
    store: &dyn ReviewStore,
    caller: &CallerId,
    product_id: String,
    payload: UpdateReviewPayload,
) -> Result<Review, AppError> {
    if payload.rating.is_none() && payload.comment.is_none() {
        return Err(AppError::BadRequest(
            "Nothing to update. Provide rating or comment.".into(),
        ));
    }

    let update = ReviewUpdate {
        user_id: caller.as_str().to_string(),
        product_id,
        rating: non_null("rating", payload.rating)?,
        comment: non_null("comment", payload.comment)?,
    };

    tracing::info!(
        user_id = %update.user_id,
        product_id = %update.product_id,
        "Updating review"
    );

    store.update_review(update).await
}

pub async fn delete_review(
    store: &dyn ReviewStore,
    caller: &CallerId,
    product_id: Option<String>,
) -> Result<(), AppError> {
    let product_id = product_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing product ID".into()))?;

    let key = ReviewKey {
        user_id: caller.as_str().to_string(),
        product_id,
    };

    tracing::info!(
        user_id = %key.user_id,
        product_id = %key.product_id,
        "Deleting review"
    );

    store.delete_reviews(key).await
}

pub async fn list_reviews(store: &dyn ReviewStore, product_id: &str) -> Result<Vec<Review>, AppError> {
    let reviews = store.get_reviews(product_id).await?;
    tracing::info!("Retrieved {} review(s) for product {}", reviews.len(), product_id);
    Ok(reviews)
}

pub async fn create_review_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    payload: Result<Json<CreateReviewPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Review>>), AppError> {
    let caller = require_caller(caller)?;
    let payload = parse_body(payload)?;

    let review = create_review(state.reviews.as_ref(), &caller, payload).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

pub async fn update_review_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(product_id): Path<String>,
    body: Bytes,
) -> Result<Json<DataResponse<Review>>, AppError> {
    let caller = require_caller(caller)?;
    let payload = parse_update_body(&body)?;

    let review = update_review(state.reviews.as_ref(), &caller, product_id, payload).await?;

    Ok(Json(DataResponse { data: review }))
}

pub async fn delete_review_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let caller = require_caller(caller)?;

    delete_review(state.reviews.as_ref(), &caller, Some(product_id)).await?;

    Ok(Json(MessageResponse {
        msg: "Deleted successfully",
    }))
}

/// `DELETE /reviews` with no product segment.
pub async fn delete_review_without_product_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<MessageResponse>, AppError> {
    let caller = require_caller(caller)?;

    delete_review(state.reviews.as_ref(), &caller, None).await?;

    Ok(Json(MessageResponse {
        msg: "Deleted successfully",
    }))
}

pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<DataResponse<Vec<Review>>>, AppError> {
    let reviews = list_reviews(state.reviews.as_ref(), &product_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}
