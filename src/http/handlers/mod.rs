pub mod health;
pub mod review;

pub use health::health_handler;

pub use review::{
    create_review_handler, delete_review_handler, delete_review_without_product_handler,
    list_reviews_handler, update_review_handler,
};
