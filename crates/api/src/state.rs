use infra::DynStore;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: DynStore, config: AppConfig) -> Self {
        Self { store, config }
    }
}
