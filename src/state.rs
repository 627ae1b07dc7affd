use crate::db::Store;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }
}
