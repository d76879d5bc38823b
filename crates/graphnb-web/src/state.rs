//! Application state.

use graphnb_query::Database;
use std::sync::Arc;

use crate::render::RenderConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub render: Arc<RenderConfig>,
}

impl AppState {
    pub fn new(db: Arc<dyn Database>, render: RenderConfig) -> Self {
        Self {
            db,
            render: Arc::new(render),
        }
    }
}
