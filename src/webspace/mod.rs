// Copyright 2025 Cowboy AI, LLC.

//! # Webspaces
//!
//! Portal informations built from the webspace configuration and the
//! manager that matches request urls against them.

mod collection;
mod manager;
mod portal_information;
pub mod url_pattern;

pub use manager::{StaticWebspaceManager, WebspaceManager};
pub use portal_information::{MatchType, PortalInformation};

#[cfg(test)]
pub use manager::MockWebspaceManager;
