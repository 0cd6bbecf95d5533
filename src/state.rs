use std::sync::Arc;

use sqlx::SqlitePool;

use crate::store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub store: Arc<dyn DocumentStore>,
}
