//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, ParameterProvider};

/// Shared application state.
///
/// Holds the parameter provider consulted for every calculation.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn ParameterProvider + Send + Sync>,
}

impl AppState {
    /// Creates a new application state backed by a configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            provider: Arc::new(config),
        }
    }

    /// Creates a new application state backed by any parameter provider.
    pub fn with_provider(provider: Arc<dyn ParameterProvider + Send + Sync>) -> Self {
        Self { provider }
    }

    /// Returns a reference to the parameter provider.
    pub fn provider(&self) -> &(dyn ParameterProvider + Send + Sync) {
        self.provider.as_ref()
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
}
