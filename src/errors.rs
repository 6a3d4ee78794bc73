// Copyright 2025 Cowboy AI, LLC.

//! Error types for webspace resolution and resource-locator operations

use crate::identifiers::ContentUuid;
use thiserror::Error;

/// Errors that can occur while resolving requests or maintaining resource locators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No route exists for the requested path or content
    #[error("Resource locator not found: {path}")]
    ResourceLocatorNotFound {
        /// Path or content reference that was looked up
        path: String,
    },

    /// The requested path is a history entry that was superseded
    #[error("Resource locator moved: {old_path} -> {new_path}")]
    ResourceLocatorMoved {
        /// The superseded path
        old_path: String,
        /// Path the history entry points at
        new_path: String,
    },

    /// Candidate path is already bound to another content
    #[error("Resource locator {path} already exists for content {conflicting}")]
    ResourceLocatorAlreadyExists {
        /// The colliding path
        path: String,
        /// Content currently owning the path
        conflicting: ContentUuid,
    },

    /// Structurally invalid path
    #[error("Resource locator not valid: {path}")]
    ResourceLocatorNotValid {
        /// The rejected path
        path: String,
    },

    /// Strategy name is not registered
    #[error("Resource locator strategy \"{name}\" not found, available strategies: {}", .available.join(", "))]
    ResourceLocatorStrategyNotFound {
        /// Requested strategy name
        name: String,
        /// Names of all registered strategies
        available: Vec<String>,
    },

    /// No importer registered for a webspace configuration format
    #[error("Webspace format importer \"{format}\" not found, available formats: {}", .available.join(", "))]
    WebspaceFormatImporterNotFound {
        /// Requested format
        format: String,
        /// Registered formats
        available: Vec<String>,
    },

    /// No portal matches the requested url
    #[error("There exists no portal for the URL \"{url}\"")]
    UrlMatchNotFound {
        /// The request uri that could not be matched
        url: String,
    },

    /// Webspace key is not configured
    #[error("Webspace not found: {0}")]
    WebspaceNotFound(String),

    /// Content reference does not exist in the content store
    #[error("Content not found: {0}")]
    ContentNotFound(ContentUuid),

    /// Argument rejected before any work was done
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Webspace configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

impl EngineError {
    /// Create a not-found error for a path
    pub fn not_found(path: impl Into<String>) -> Self {
        EngineError::ResourceLocatorNotFound { path: path.into() }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::ResourceLocatorNotFound { .. }
                | EngineError::UrlMatchNotFound { .. }
                | EngineError::ContentNotFound(_)
        )
    }

    /// Check if this is a conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, EngineError::ResourceLocatorAlreadyExists { .. })
    }

    /// Check if the path was moved
    pub fn is_moved(&self) -> bool {
        matches!(self, EngineError::ResourceLocatorMoved { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            EngineError::ResourceLocatorNotValid { .. } | EngineError::InvalidArgument(_)
        )
    }

    /// Check if this is a configuration error
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::ResourceLocatorStrategyNotFound { .. }
                | EngineError::WebspaceFormatImporterNotFound { .. }
                | EngineError::WebspaceNotFound(_)
                | EngineError::InvalidConfiguration(_)
        )
    }

    /// HTTP status a kernel boundary should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::ResourceLocatorMoved { .. } => 301,
            EngineError::ResourceLocatorNotFound { .. }
            | EngineError::UrlMatchNotFound { .. }
            | EngineError::ContentNotFound(_) => 404,
            EngineError::ResourceLocatorAlreadyExists { .. } => 409,
            EngineError::ResourceLocatorNotValid { .. } | EngineError::InvalidArgument(_) => 400,
            _ => 500,
        }
    }
}
