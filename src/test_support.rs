// Copyright 2025 Cowboy AI, LLC.

//! Shared fixtures for unit tests

use std::sync::Arc;

use crate::config::{
    EngineSettings, Environment, Localization, Portal, SecurityConfig, Segment, UrlDefinition,
    Webspace, WebspaceConfig, DEFAULT_RESOURCE_LOCATOR_STRATEGY,
};
use crate::webspace::StaticWebspaceManager;

pub(crate) fn sulu_io() -> Webspace {
    Webspace {
        key: "sulu_io".to_string(),
        name: Some("Sulu".to_string()),
        localizations: vec![
            Localization {
                default: true,
                ..Localization::new("en", None)
            },
            Localization::new("de", Some("at")),
        ],
        segments: vec![
            Segment {
                key: "s".to_string(),
                name: Some("Summer".to_string()),
                default: false,
            },
            Segment {
                key: "w".to_string(),
                name: Some("Winter".to_string()),
                default: true,
            },
        ],
        portals: vec![Portal {
            key: "sulu_io".to_string(),
            name: None,
            localizations: vec![],
            environments: vec![
                Environment {
                    kind: "prod".to_string(),
                    urls: vec![
                        UrlDefinition {
                            analytics_key: Some("UA-1".to_string()),
                            ..UrlDefinition::new("sulu.lo/{localization}")
                        },
                        UrlDefinition {
                            redirect: Some("sulu.lo".to_string()),
                            ..UrlDefinition::new("www.sulu.lo")
                        },
                        UrlDefinition {
                            language: Some("en".to_string()),
                            main: true,
                            ..UrlDefinition::new("sulu.com")
                        },
                    ],
                },
                Environment {
                    kind: "dev".to_string(),
                    urls: vec![UrlDefinition::new("sulu.lo:8080/{localization}")],
                },
            ],
        }],
        resource_locator_strategy: DEFAULT_RESOURCE_LOCATOR_STRATEGY.to_string(),
        security: Some(SecurityConfig {
            system: "sulu_io".to_string(),
            permission_check: true,
        }),
    }
}

pub(crate) fn config() -> WebspaceConfig {
    WebspaceConfig {
        webspaces: vec![sulu_io()],
    }
}

pub(crate) fn manager() -> Arc<StaticWebspaceManager> {
    Arc::new(StaticWebspaceManager::new(&config(), &EngineSettings::default()))
}
