// Copyright 2025 Cowboy AI, LLC.

//! Persistence contract for the path to content mapping

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::identifiers::{ContentUuid, LocatorScope, RouteId};

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Path is active for the content
    Found(ContentUuid),
    /// Path is history; carries the path it was superseded by
    Moved(String),
    /// Path was never mapped
    NotFound,
}

/// One record of a content's locator history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceLocatorInformation {
    /// Route identity
    pub id: RouteId,
    /// The path
    pub resource_locator: String,
    /// Content the path belongs to
    pub content_uuid: ContentUuid,
    /// When the record was written
    pub created: DateTime<Utc>,
    /// True once superseded
    pub is_history: bool,
}

/// Store of locator trees, one per webspace, locale and segment
#[cfg_attr(test, mockall::automock)]
pub trait ResourceLocatorMapper: Send + Sync {
    /// True when no active route occupies `path`
    fn unique(&self, path: &str, scope: &LocatorScope) -> EngineResult<bool>;

    /// `path`, or `path` with `-2`, `-3`, ... appended to its last segment,
    /// whichever is unique first
    fn get_unique_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<String>;

    /// Bind `path` to `content`, superseding the content's previous path
    fn save(&self, content: ContentUuid, path: &str, scope: &LocatorScope) -> EngineResult<()>;

    /// Current path of a content
    fn load_by_content_uuid(
        &self,
        content: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<String>;

    /// Resolve a path without raising for history or missing routes
    fn resolve(&self, path: &str, scope: &LocatorScope) -> EngineResult<Resolution>;

    /// Content bound to `path`
    fn load_by_resource_locator(
        &self,
        path: &str,
        scope: &LocatorScope,
    ) -> EngineResult<ContentUuid> {
        match self.resolve(path, scope)? {
            Resolution::Found(content) => Ok(content),
            Resolution::Moved(new_path) => Err(EngineError::ResourceLocatorMoved {
                old_path: path.to_string(),
                new_path,
            }),
            Resolution::NotFound => Err(EngineError::not_found(path)),
        }
    }

    /// Superseded paths of a content, newest first
    fn load_history_by_content_uuid(
        &self,
        content: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<Vec<ResourceLocatorInformation>>;

    /// Move the subtree at `old_path` to `new_path`, leaving history behind
    fn move_path(&self, old_path: &str, new_path: &str, scope: &LocatorScope) -> EngineResult<()>;

    /// Make the history route at `path` current again
    fn restore_by_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<()>;

    /// Remove the subtree at `path`
    fn delete_by_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<()>;
}
