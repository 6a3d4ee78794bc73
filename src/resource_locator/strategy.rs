// Copyright 2025 Cowboy AI, LLC.

//! Tree strategies combining generator, mapper and content store

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::content::{ContentDocument, ContentStore};
use super::generator::ResourceLocatorGenerator;
use super::mapper::{Resolution, ResourceLocatorInformation, ResourceLocatorMapper};
use crate::errors::{EngineError, EngineResult};
use crate::identifiers::{ContentUuid, LocatorScope, UserId};
use crate::locator_path;

/// Name of the strategy that lets users edit the whole path
pub const TREE_FULL_EDIT: &str = "tree_full_edit";
/// Name of the strategy that lets users edit the last segment only
pub const TREE_LEAF_EDIT: &str = "tree_leaf_edit";

/// Portion of the locator exposed for editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Only the last segment is editable
    Leaf,
    /// The whole path is editable
    Full,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Leaf => f.write_str("leaf"),
            InputType::Full => f.write_str("full"),
        }
    }
}

/// Collaborators shared by all strategies
#[derive(Clone)]
pub struct StrategyCore {
    generator: Arc<dyn ResourceLocatorGenerator>,
    mapper: Arc<dyn ResourceLocatorMapper>,
    content: Arc<dyn ContentStore>,
}

impl fmt::Debug for StrategyCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyCore").finish_non_exhaustive()
    }
}

impl StrategyCore {
    /// Bundle the collaborators
    pub fn new(
        generator: Arc<dyn ResourceLocatorGenerator>,
        mapper: Arc<dyn ResourceLocatorMapper>,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            generator,
            mapper,
            content,
        }
    }

    /// The locator store
    pub fn mapper(&self) -> &Arc<dyn ResourceLocatorMapper> {
        &self.mapper
    }

    /// The content store
    pub fn content(&self) -> &Arc<dyn ContentStore> {
        &self.content
    }

    /// Locator of the closest ancestor that has one, walking up from `parent`
    pub fn closest_parent_locator(
        &self,
        parent: Option<ContentUuid>,
        scope: &LocatorScope,
    ) -> EngineResult<Option<String>> {
        let mut visited = HashSet::new();
        let mut next = parent;
        while let Some(uuid) = next {
            if !visited.insert(uuid) {
                break;
            }
            match self.mapper.load_by_content_uuid(uuid, scope) {
                Ok(path) => return Ok(Some(path)),
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
            next = self
                .content
                .find(uuid, scope)?
                .and_then(|document| document.parent);
        }
        Ok(None)
    }

    /// Current locator of a content, `None` while it has none
    fn current(&self, content: ContentUuid, scope: &LocatorScope) -> EngineResult<Option<String>> {
        match self.mapper.load_by_content_uuid(content, scope) {
            Ok(path) => Ok(Some(path)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Bind the document's resource segment in the mapper.
    ///
    /// Returns `false` when nothing had to be written.
    pub fn save(&self, document: &ContentDocument) -> EngineResult<bool> {
        let Some(path) = document.resource_segment.as_deref() else {
            return Ok(false);
        };
        let scope = document.scope();

        if self.current(document.uuid, &scope)?.as_deref() == Some(path) {
            return Ok(false);
        }
        if !is_valid(path) {
            return Err(EngineError::ResourceLocatorNotValid {
                path: path.to_string(),
            });
        }
        match self.mapper.resolve(path, &scope)? {
            Resolution::Found(owner) if owner == document.uuid => return Ok(false),
            Resolution::Found(owner) => {
                return Err(EngineError::ResourceLocatorAlreadyExists {
                    path: path.to_string(),
                    conflicting: owner,
                })
            }
            Resolution::Moved(_) | Resolution::NotFound => {}
        }

        self.mapper.save(document.uuid, path, &scope)?;
        Ok(true)
    }
}

/// Locators must be clean slug paths and never the bare root
pub fn is_valid(path: &str) -> bool {
    path != "/" && locator_path::is_clean(path)
}

/// Generates, validates and persists resource locators for one webspace
pub trait ResourceLocatorStrategy: Send + Sync {
    /// Registered name
    fn name(&self) -> &'static str;

    /// Editable portion exposed to editing interfaces
    fn input_type(&self) -> InputType;

    /// Part of a resource segment the user edits
    fn child_part(&self, resource_segment: &str) -> String;

    /// Shared collaborators
    fn core(&self) -> &StrategyCore;

    /// Unique locator for a new document titled `title` below `parent`
    fn generate(
        &self,
        title: &str,
        parent: Option<ContentUuid>,
        scope: &LocatorScope,
    ) -> EngineResult<String> {
        let core = self.core();
        let title = title.replace('/', "-");
        let parent_path = core.closest_parent_locator(parent, scope)?;
        let path = core
            .generator
            .generate(&title, parent_path.as_deref(), &scope.locale);
        if !self.is_valid(&path) {
            return Err(EngineError::ResourceLocatorNotValid { path });
        }
        core.mapper.get_unique_path(&path, scope)
    }

    /// Persist the document's resource segment; `false` when unchanged
    fn save(&self, document: &ContentDocument, _user: UserId) -> EngineResult<bool> {
        self.core().save(document)
    }

    /// Current locator of a document
    fn load_by_content(&self, document: &ContentDocument) -> EngineResult<String> {
        self.load_by_content_uuid(document.uuid, &document.scope())
    }

    /// Current locator of a content reference
    fn load_by_content_uuid(
        &self,
        content: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<String> {
        self.core().mapper.load_by_content_uuid(content, scope)
    }

    /// Superseded locators, newest first
    fn load_history_by_content_uuid(
        &self,
        content: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<Vec<ResourceLocatorInformation>> {
        self.core().mapper.load_history_by_content_uuid(content, scope)
    }

    /// Content of a path, raising for moved and unknown paths
    fn load_by_resource_locator(
        &self,
        path: &str,
        scope: &LocatorScope,
    ) -> EngineResult<ContentUuid> {
        self.core().mapper.load_by_resource_locator(path, scope)
    }

    /// Resolve a path to found, moved or not found
    fn resolve(&self, path: &str, scope: &LocatorScope) -> EngineResult<Resolution> {
        self.core().mapper.resolve(path, scope)
    }

    /// Structural check of a candidate path
    fn is_valid(&self, path: &str) -> bool {
        is_valid(path)
    }

    /// Remove a locator subtree
    fn delete_by_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<()> {
        self.core().mapper.delete_by_path(path, scope)
    }

    /// Make a history locator current again
    fn restore_by_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<()> {
        self.core().mapper.restore_by_path(path, scope)
    }
}

/// Users edit the complete path; children keep their paths on rename
#[derive(Debug, Clone)]
pub struct TreeFullEditStrategy {
    core: StrategyCore,
}

impl TreeFullEditStrategy {
    /// Create the strategy
    pub fn new(core: StrategyCore) -> Self {
        Self { core }
    }
}

impl ResourceLocatorStrategy for TreeFullEditStrategy {
    fn name(&self) -> &'static str {
        TREE_FULL_EDIT
    }

    fn input_type(&self) -> InputType {
        InputType::Full
    }

    fn child_part(&self, resource_segment: &str) -> String {
        resource_segment.trim_start_matches('/').to_string()
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }
}

/// Users edit the last segment; renaming a page rewrites its descendants
#[derive(Debug, Clone)]
pub struct TreeLeafEditStrategy {
    core: StrategyCore,
}

impl TreeLeafEditStrategy {
    /// Create the strategy
    pub fn new(core: StrategyCore) -> Self {
        Self { core }
    }

    /// Regenerate the locators below `parent` from their leaf parts
    fn adapt_children(&self, parent: &ContentDocument, user: UserId) -> EngineResult<()> {
        let scope = parent.scope();
        for mut child in self.core.content.children(parent.uuid, &scope)? {
            let segment = child
                .resource_segment
                .clone()
                .filter(|_| child.kind.has_resource_locator());
            let Some(segment) = segment else {
                // links and the homepage have no locator of their own
                self.adapt_children(&child, user)?;
                continue;
            };

            let path = self.child_locator(parent, &child, &segment, &scope)?;
            debug!("Adapting {} from {} to {}", child.uuid, segment, path);

            child.resource_segment = Some(path);
            self.core.content.persist(&child, user)?;
            if child.published {
                self.save(&child, user)?;
            }
        }
        Ok(())
    }

    /// Parent locator joined with the child's leaf part as the user left it.
    ///
    /// A path the child already owns is kept, any other taken path gets a
    /// numeric suffix.
    fn child_locator(
        &self,
        parent: &ContentDocument,
        child: &ContentDocument,
        segment: &str,
        scope: &LocatorScope,
    ) -> EngineResult<String> {
        let part = self.child_part(segment);
        let path = match self.core.closest_parent_locator(Some(parent.uuid), scope)? {
            Some(parent_path) => format!("{}/{}", parent_path.trim_end_matches('/'), part),
            None => format!("/{part}"),
        };
        if !self.is_valid(&path) {
            return Err(EngineError::ResourceLocatorNotValid { path });
        }
        if let Resolution::Found(owner) = self.core.mapper.resolve(&path, scope)? {
            if owner == child.uuid {
                return Ok(path);
            }
        }
        self.core.mapper.get_unique_path(&path, scope)
    }
}

impl ResourceLocatorStrategy for TreeLeafEditStrategy {
    fn name(&self) -> &'static str {
        TREE_LEAF_EDIT
    }

    fn input_type(&self) -> InputType {
        InputType::Leaf
    }

    fn child_part(&self, resource_segment: &str) -> String {
        match resource_segment.rfind('/') {
            Some(idx) => resource_segment[idx + 1..].to_string(),
            None => resource_segment.to_string(),
        }
    }

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn save(&self, document: &ContentDocument, user: UserId) -> EngineResult<bool> {
        if !self.core.save(document)? {
            return Ok(false);
        }
        self.adapt_children(document, user)?;
        info!(
            "Saved {} for {} with descendants",
            document.resource_segment.as_deref().unwrap_or_default(),
            document.uuid
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_locator::content::{DocumentKind, InMemoryContentStore, MockContentStore};
    use crate::resource_locator::generator::TreeGenerator;
    use crate::resource_locator::mapper::MockResourceLocatorMapper;
    use crate::resource_locator::tree_mapper::TreeResourceLocatorMapper;
    use test_case::test_case;

    fn core_with(
        mapper: Arc<dyn ResourceLocatorMapper>,
        content: Arc<dyn ContentStore>,
    ) -> StrategyCore {
        StrategyCore::new(Arc::new(TreeGenerator::new()), mapper, content)
    }

    fn in_memory() -> (StrategyCore, Arc<InMemoryContentStore>) {
        let content = Arc::new(InMemoryContentStore::new());
        let core = core_with(Arc::new(TreeResourceLocatorMapper::new()), content.clone());
        (core, content)
    }

    #[test_case("/news/item" => "item" ; "nested")]
    #[test_case("/news" => "news" ; "top level")]
    #[test_case("item" => "item" ; "bare")]
    fn test_leaf_child_part(segment: &str) -> String {
        let (core, _) = in_memory();
        TreeLeafEditStrategy::new(core).child_part(segment)
    }

    #[test_case("/news/item" => "news/item" ; "nested")]
    #[test_case("news" => "news" ; "bare")]
    fn test_full_child_part(segment: &str) -> String {
        let (core, _) = in_memory();
        TreeFullEditStrategy::new(core).child_part(segment)
    }

    #[test_case("/" => false ; "root")]
    #[test_case("/news/item-1" => true ; "clean")]
    #[test_case("/News" => false ; "uppercase")]
    #[test_case("/news/" => false ; "trailing slash")]
    #[test_case("news" => false ; "relative")]
    fn test_is_valid(path: &str) -> bool {
        is_valid(path)
    }

    #[test]
    fn test_generate_skips_ancestors_without_locator() {
        let (core, content) = in_memory();
        let strategy = TreeLeafEditStrategy::new(core);
        let scope = LocatorScope::new("sulu_io", "de");

        let mut news = ContentDocument::page("News", None, "sulu_io", "de");
        news.resource_segment = Some("/news".to_string());
        news.published = true;
        let link = ContentDocument {
            kind: DocumentKind::InternalLink,
            ..ContentDocument::page("Link", Some(news.uuid), "sulu_io", "de")
        };
        content.insert(news.clone());
        content.insert(link.clone());
        strategy.save(&news, UserId(1)).unwrap();

        assert_eq!(
            strategy.generate("Hello/World", Some(link.uuid), &scope).unwrap(),
            "/news/hello-world"
        );
        assert_eq!(strategy.generate("Top", None, &scope).unwrap(), "/top");
    }

    #[test]
    fn test_generate_makes_path_unique() {
        let (core, _) = in_memory();
        let strategy = TreeFullEditStrategy::new(core);
        let scope = LocatorScope::new("sulu_io", "de");
        strategy
            .core()
            .mapper()
            .save(ContentUuid::new(), "/news", &scope)
            .unwrap();

        assert_eq!(strategy.generate("News", None, &scope).unwrap(), "/news-2");
    }

    #[test]
    fn test_save_is_noop_when_unchanged() {
        let (core, content) = in_memory();
        let strategy = TreeFullEditStrategy::new(core);
        let mut page = ContentDocument::page("Page", None, "sulu_io", "de");
        page.resource_segment = Some("/page".to_string());
        content.insert(page.clone());

        assert!(strategy.save(&page, UserId(1)).unwrap());
        assert!(!strategy.save(&page, UserId(1)).unwrap());
    }

    #[test]
    fn test_save_rejects_invalid_and_conflicting_paths() {
        let (core, _) = in_memory();
        let strategy = TreeFullEditStrategy::new(core);

        let mut invalid = ContentDocument::page("Page", None, "sulu_io", "de");
        invalid.resource_segment = Some("/".to_string());
        let err = strategy.save(&invalid, UserId(1)).unwrap_err();
        assert!(matches!(err, EngineError::ResourceLocatorNotValid { .. }));

        let mut owner = ContentDocument::page("Owner", None, "sulu_io", "de");
        owner.resource_segment = Some("/taken".to_string());
        strategy.save(&owner, UserId(1)).unwrap();

        let mut other = ContentDocument::page("Other", None, "sulu_io", "de");
        other.resource_segment = Some("/taken".to_string());
        let err = strategy.save(&other, UserId(1)).unwrap_err();
        assert_eq!(
            err,
            EngineError::ResourceLocatorAlreadyExists {
                path: "/taken".to_string(),
                conflicting: owner.uuid
            }
        );
    }

    #[test]
    fn test_save_treats_same_owner_as_noop() {
        let page = ContentDocument {
            resource_segment: Some("/page".to_string()),
            ..ContentDocument::page("Page", None, "sulu_io", "de")
        };
        let owner = page.uuid;

        let mut mapper = MockResourceLocatorMapper::new();
        mapper
            .expect_load_by_content_uuid()
            .returning(|content, _| Err(EngineError::not_found(content.to_string())));
        mapper
            .expect_resolve()
            .returning(move |_, _| Ok(Resolution::Found(owner)));
        mapper.expect_save().never();

        let strategy = TreeFullEditStrategy::new(core_with(
            Arc::new(mapper),
            Arc::new(MockContentStore::new()),
        ));
        assert!(!strategy.save(&page, UserId(1)).unwrap());
    }

    #[test]
    fn test_parent_walk_propagates_store_failures() {
        let mut mapper = MockResourceLocatorMapper::new();
        mapper
            .expect_load_by_content_uuid()
            .returning(|content, _| Err(EngineError::not_found(content.to_string())));
        let mut content = MockContentStore::new();
        content
            .expect_find()
            .returning(|_, _| Err(EngineError::IoError("store offline".to_string())));

        let core = core_with(Arc::new(mapper), Arc::new(content));
        let err = core
            .closest_parent_locator(Some(ContentUuid::new()), &LocatorScope::new("sulu_io", "de"))
            .unwrap_err();
        assert_eq!(err, EngineError::IoError("store offline".to_string()));
    }

    #[test]
    fn test_full_strategy_does_not_cascade() {
        let (core, content) = in_memory();
        let strategy = TreeFullEditStrategy::new(core);
        let scope = LocatorScope::new("sulu_io", "de");

        let mut parent = ContentDocument::page("Parent", None, "sulu_io", "de");
        parent.resource_segment = Some("/parent".to_string());
        let mut child = ContentDocument::page("Child", Some(parent.uuid), "sulu_io", "de");
        child.resource_segment = Some("/parent/child".to_string());
        child.published = true;
        content.insert(parent.clone());
        content.insert(child.clone());
        strategy.save(&parent, UserId(1)).unwrap();
        strategy.save(&child, UserId(1)).unwrap();

        parent.resource_segment = Some("/renamed".to_string());
        strategy.save(&parent, UserId(1)).unwrap();
        assert_eq!(
            strategy.load_by_content_uuid(child.uuid, &scope).unwrap(),
            "/parent/child"
        );
        assert_eq!(strategy.input_type(), InputType::Full);
    }
}
