// Copyright 2025 Cowboy AI, LLC.

//! # Webspace Engine
//!
//! Request resolution and resource-locator management for multi-site
//! content platforms.
//!
//! This crate provides the pieces a content site needs between the http
//! boundary and its content repository:
//! - **Configuration**: Webspaces with localizations, segments and portals, loaded from toml or json
//! - **Webspace Manager**: Portal url expansion and url matching per environment
//! - **Request Analyzer**: An ordered pipeline of processors producing request attributes
//! - **Redirects**: Partial and redirect portal matches, trailing slashes and `.html` suffixes
//! - **Resource Locators**: Slug generation and a history-aware locator tree per webspace, locale and segment
//! - **Strategies**: Full-edit and leaf-edit editing models with rename cascades
//!
//! ## Design Principles
//!
//! 1. **Explicit Results**: Every fallible operation returns `EngineResult`
//! 2. **History Preservation**: Superseded locators keep resolving as moved
//! 3. **Injectable Seams**: Managers, mappers, stores and processors sit behind traits
//! 4. **Synchronous Core**: Stores guard their state with locks, no runtime required

#![warn(missing_docs)]

mod errors;
mod identifiers;
pub mod config;
pub mod locator_path;
pub mod request;
pub mod resource_locator;
pub mod webspace;

#[cfg(test)]
mod test_support;

pub use config::{
    EngineSettings, ImporterRegistry, Localization, Portal, Segment, Webspace, WebspaceConfig,
};
pub use errors::{EngineError, EngineResult};
pub use identifiers::{ContentUuid, LocatorScope, RouteId, UserId};
pub use locator_path::LocatorPath;
pub use request::{
    resolve_redirect, RedirectResponse, Request, RequestAnalyzer, RequestAttributes,
};
pub use resource_locator::{
    ResourceLocatorMapper, ResourceLocatorStrategy, ResourceLocatorStrategyPool,
    TreeResourceLocatorMapper,
};
pub use webspace::{MatchType, PortalInformation, StaticWebspaceManager, WebspaceManager};
