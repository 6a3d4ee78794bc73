// Copyright 2025 Cowboy AI, LLC.

//! Strategy lookup by name and by webspace

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::strategy::{
    ResourceLocatorStrategy, StrategyCore, TreeFullEditStrategy, TreeLeafEditStrategy,
};
use crate::errors::{EngineError, EngineResult};
use crate::webspace::WebspaceManager;

/// Registered strategies, selected through the webspace configuration
pub struct ResourceLocatorStrategyPool {
    strategies: BTreeMap<String, Arc<dyn ResourceLocatorStrategy>>,
    webspaces: Arc<dyn WebspaceManager>,
}

impl ResourceLocatorStrategyPool {
    /// Empty pool
    pub fn new(webspaces: Arc<dyn WebspaceManager>) -> Self {
        Self {
            strategies: BTreeMap::new(),
            webspaces,
        }
    }

    /// Pool with both tree strategies sharing one set of collaborators
    pub fn with_tree_strategies(webspaces: Arc<dyn WebspaceManager>, core: StrategyCore) -> Self {
        Self::new(webspaces)
            .with_strategy(Arc::new(TreeFullEditStrategy::new(core.clone())))
            .with_strategy(Arc::new(TreeLeafEditStrategy::new(core)))
    }

    /// Register a strategy under its name
    pub fn with_strategy(mut self, strategy: Arc<dyn ResourceLocatorStrategy>) -> Self {
        self.strategies.insert(strategy.name().to_string(), strategy);
        self
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }

    /// Strategy by name
    pub fn get_strategy(&self, name: &str) -> EngineResult<Arc<dyn ResourceLocatorStrategy>> {
        self.strategies
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::ResourceLocatorStrategyNotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Strategy declared by a webspace
    pub fn get_strategy_by_webspace_key(
        &self,
        webspace_key: &str,
    ) -> EngineResult<Arc<dyn ResourceLocatorStrategy>> {
        let webspace = self
            .webspaces
            .find_webspace_by_key(webspace_key)
            .ok_or_else(|| EngineError::WebspaceNotFound(webspace_key.to_string()))?;
        debug!(
            "Webspace {} uses strategy {}",
            webspace_key, webspace.resource_locator_strategy
        );
        self.get_strategy(&webspace.resource_locator_strategy)
    }
}
