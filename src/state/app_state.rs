//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::scoring::NormalizerRegistry;
use crate::services::ConnectionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub connection_store: Arc<ConnectionStore>,
    pub normalizers: Arc<NormalizerRegistry>,
}

impl AppState {
    pub fn new(connection_store: Arc<ConnectionStore>, normalizers: Arc<NormalizerRegistry>) -> Self {
        Self {
            connection_store,
            normalizers,
        }
    }
}

impl FromRef<AppState> for Arc<ConnectionStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.connection_store.clone()
    }
}

impl FromRef<AppState> for Arc<NormalizerRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.normalizers.clone()
    }
}
