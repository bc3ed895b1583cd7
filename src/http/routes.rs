use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    http::handlers::{
        create_review_handler, delete_review_handler, delete_review_without_product_handler,
        health_handler, list_reviews_handler, update_review_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/reviews",
            post(create_review_handler).delete(delete_review_without_product_handler),
        )
        .route("/reviews/", delete(delete_review_without_product_handler))
        .route(
            "/reviews/{product_id}",
            get(list_reviews_handler)
                .patch(update_review_handler)
                .delete(delete_review_handler),
        )
        .with_state(state)
}
