use std::sync::Arc;

use crate::db::ReviewStore;

#[derive(Clone)]
pub struct AppState {
    pub reviews: ReviewStoreHandle,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(reviews: ReviewStoreHandle, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            reviews,
            jwt_secret: jwt_secret.into(),
        }
    }
}

pub type ReviewStoreHandle = Arc<dyn ReviewStore>;
