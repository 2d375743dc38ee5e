use std::sync::Arc;

use crate::api::ApiClient;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        Self { api: Arc::new(api) }
    }
}
