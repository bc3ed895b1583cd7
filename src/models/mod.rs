pub mod review;
pub mod user;

pub use review::{NewReview, Review, ReviewKey, ReviewUpdate};
pub use user::{CallerId, Claims};
