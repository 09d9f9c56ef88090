//! Application state for the compliance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::compliance::ComplianceService;
use crate::config::ConfigLoader;
use crate::store::{DayRecordStore, InMemoryDayStore};

/// Shared application state.
///
/// Holds the loaded configuration and the compliance service built on top
/// of it. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    service: Arc<ComplianceService>,
}

impl AppState {
    /// Creates application state over the given day record store.
    ///
    /// The configuration's holiday calendar becomes the service's holiday
    /// registry.
    pub fn new(config: ConfigLoader, store: Arc<dyn DayRecordStore>) -> Self {
        let holidays = Arc::new(config.holidays().clone());
        Self {
            config: Arc::new(config),
            service: Arc::new(ComplianceService::new(store, holidays)),
        }
    }

    /// Creates application state backed by an empty in-memory store.
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(config, Arc::new(InMemoryDayStore::new()))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the compliance service.
    pub fn service(&self) -> &ComplianceService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_in_memory_state_uses_config_holidays() {
        let config = ConfigLoader::load("./config/es").unwrap();
        let state = AppState::in_memory(config);
        assert!(!state.config().holidays().is_empty());
    }
}
