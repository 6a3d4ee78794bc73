// Copyright 2025 Cowboy AI, LLC.

//! Content documents as seen by the resource-locator strategies

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EngineError, EngineResult};
use crate::identifiers::{ContentUuid, LocatorScope, UserId};

/// Kind of a content document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Regular page with its own url
    Page,
    /// Webspace homepage, owns the root url
    Home,
    /// Link to another page of the webspace
    InternalLink,
    /// Link to an external url
    ExternalLink,
}

impl DocumentKind {
    /// True for documents that own a resource locator
    pub fn has_resource_locator(self) -> bool {
        matches!(self, DocumentKind::Page)
    }
}

/// A content node in one localization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Content reference
    pub uuid: ContentUuid,
    /// Parent content, `None` for top-level documents
    pub parent: Option<ContentUuid>,
    /// Title the locator is generated from
    pub title: String,
    /// Document kind
    pub kind: DocumentKind,
    /// Resource locator currently set on the document
    pub resource_segment: Option<String>,
    /// Webspace key
    pub webspace: String,
    /// Locale of this localization
    pub locale: String,
    /// Segment key, if the webspace uses segments
    pub segment: Option<String>,
    /// Whether the localization is published
    pub published: bool,
    /// Last user that changed the document
    pub changer: Option<UserId>,
}

impl ContentDocument {
    /// Create an unpublished page
    pub fn page(
        title: impl Into<String>,
        parent: Option<ContentUuid>,
        webspace: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            uuid: ContentUuid::new(),
            parent,
            title: title.into(),
            kind: DocumentKind::Page,
            resource_segment: None,
            webspace: webspace.into(),
            locale: locale.into(),
            segment: None,
            published: false,
            changer: None,
        }
    }

    /// Locator tree the document lives in
    pub fn scope(&self) -> LocatorScope {
        LocatorScope {
            webspace: self.webspace.clone(),
            locale: self.locale.clone(),
            segment: self.segment.clone(),
        }
    }
}

/// Access to the content tree
#[cfg_attr(test, mockall::automock)]
pub trait ContentStore: Send + Sync {
    /// Document by uuid in the scope's locale
    fn find(
        &self,
        uuid: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<Option<ContentDocument>>;

    /// Direct children of a document, in insertion order
    fn children(
        &self,
        uuid: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<Vec<ContentDocument>>;

    /// Write a document back, recording the changing user
    fn persist(&self, document: &ContentDocument, user: UserId) -> EngineResult<()>;
}

#[derive(Debug, Default)]
struct Documents {
    by_key: HashMap<(ContentUuid, LocatorScope), ContentDocument>,
    order: Vec<(ContentUuid, LocatorScope)>,
}

/// Content store holding documents in memory
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    documents: RwLock<Documents>,
}

impl InMemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document without recording a changer
    pub fn insert(&self, document: ContentDocument) {
        let key = (document.uuid, document.scope());
        let mut documents = self.documents.write();
        if !documents.by_key.contains_key(&key) {
            documents.order.push(key.clone());
        }
        documents.by_key.insert(key, document);
    }

    /// Document by uuid, `None` when absent
    pub fn get(&self, uuid: ContentUuid, scope: &LocatorScope) -> Option<ContentDocument> {
        self.documents
            .read()
            .by_key
            .get(&(uuid, scope.clone()))
            .cloned()
    }
}

impl ContentStore for InMemoryContentStore {
    fn find(
        &self,
        uuid: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<Option<ContentDocument>> {
        Ok(self.get(uuid, scope))
    }

    fn children(
        &self,
        uuid: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<Vec<ContentDocument>> {
        let documents = self.documents.read();
        Ok(documents
            .order
            .iter()
            .filter(|(_, key_scope)| key_scope == scope)
            .filter_map(|key| documents.by_key.get(key))
            .filter(|document| document.parent == Some(uuid))
            .cloned()
            .collect())
    }

    fn persist(&self, document: &ContentDocument, user: UserId) -> EngineResult<()> {
        let key = (document.uuid, document.scope());
        let mut documents = self.documents.write();
        let stored = documents
            .by_key
            .get_mut(&key)
            .ok_or(EngineError::ContentNotFound(document.uuid))?;
        *stored = ContentDocument {
            changer: Some(user),
            ..document.clone()
        };
        debug!("Persisted content {} by user {}", document.uuid, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_keep_insertion_order() {
        let store = InMemoryContentStore::new();
        let parent = ContentDocument::page("Parent", None, "sulu_io", "de");
        let first = ContentDocument::page("First", Some(parent.uuid), "sulu_io", "de");
        let second = ContentDocument::page("Second", Some(parent.uuid), "sulu_io", "de");
        let other_locale = ContentDocument::page("Other", Some(parent.uuid), "sulu_io", "en");
        let scope = parent.scope();
        for document in [parent.clone(), first.clone(), second.clone(), other_locale] {
            store.insert(document);
        }

        let children: Vec<String> = store
            .children(parent.uuid, &scope)
            .unwrap()
            .into_iter()
            .map(|child| child.title)
            .collect();
        assert_eq!(children, vec!["First".to_string(), "Second".to_string()]);
    }

    #[test]
    fn test_persist_records_changer() {
        let store = InMemoryContentStore::new();
        let mut page = ContentDocument::page("Page", None, "sulu_io", "de");
        store.insert(page.clone());

        page.resource_segment = Some("/page".to_string());
        store.persist(&page, UserId(7)).unwrap();

        let stored = store.get(page.uuid, &page.scope()).unwrap();
        assert_eq!(stored.resource_segment.as_deref(), Some("/page"));
        assert_eq!(stored.changer, Some(UserId(7)));
    }

    #[test]
    fn test_persist_unknown_document_fails() {
        let store = InMemoryContentStore::new();
        let page = ContentDocument::page("Page", None, "sulu_io", "de");
        let err = store.persist(&page, UserId(1)).unwrap_err();
        assert_eq!(err, EngineError::ContentNotFound(page.uuid));
    }
}
