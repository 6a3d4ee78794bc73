// Copyright 2025 Cowboy AI, LLC.

//! # Resource locators
//!
//! Human readable paths for content nodes. A generator turns titles into
//! slugs, the mapper keeps one history-aware tree per webspace, locale and
//! segment, and the tree strategies decide which part of a path users edit
//! and whether renames cascade to descendants.

mod content;
mod generator;
mod mapper;
mod pool;
mod strategy;
mod tree_mapper;

pub use content::{ContentDocument, ContentStore, DocumentKind, InMemoryContentStore};
pub use generator::{slugify, ResourceLocatorGenerator, TransliteratingGenerator, TreeGenerator};
pub use mapper::{Resolution, ResourceLocatorInformation, ResourceLocatorMapper};
pub use pool::ResourceLocatorStrategyPool;
pub use strategy::{
    is_valid, InputType, ResourceLocatorStrategy, StrategyCore, TreeFullEditStrategy,
    TreeLeafEditStrategy, TREE_FULL_EDIT, TREE_LEAF_EDIT,
};
pub use tree_mapper::TreeResourceLocatorMapper;
