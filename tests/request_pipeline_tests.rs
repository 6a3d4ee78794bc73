// Copyright 2025 Cowboy AI, LLC.

use std::sync::Arc;

use test_case::test_case;
use webspace_engine::request::{keys, resolve_moved};
use webspace_engine::resource_locator::{
    InMemoryContentStore, Resolution, ResourceLocatorMapper, StrategyCore, TreeGenerator,
    TreeResourceLocatorMapper, TREE_FULL_EDIT,
};
use webspace_engine::{
    resolve_redirect, ContentUuid, EngineError, EngineSettings, ImporterRegistry, LocatorScope,
    MatchType, Request, RequestAnalyzer, RequestAttributes, ResourceLocatorStrategy,
    ResourceLocatorStrategyPool, StaticWebspaceManager, WebspaceManager,
};

const CONFIG: &str = r#"
    [[webspaces]]
    key = "example"
    name = "Example"
    resource_locator_strategy = "tree_full_edit"

    [webspaces.security]
    system = "example"

    [[webspaces.localizations]]
    language = "en"
    default = true

    [[webspaces.localizations]]
    language = "de"

    [[webspaces.portals]]
    key = "example"

    [[webspaces.portals.environments]]
    type = "prod"

    [[webspaces.portals.environments.urls]]
    url = "example.lo/{localization}"

    [[webspaces.portals.environments.urls]]
    url = "www.example.lo"
    redirect = "example.lo"

    [[webspaces.portals.environments]]
    type = "dev"

    [[webspaces.portals.environments.urls]]
    url = "example.dev:8000/{localization}"
"#;

fn manager(settings: &EngineSettings) -> Arc<StaticWebspaceManager> {
    let config = ImporterRegistry::default().import("toml", CONFIG).unwrap();
    Arc::new(StaticWebspaceManager::new(&config, settings))
}

fn analyze(url: &str) -> (Request, RequestAttributes) {
    let settings = EngineSettings::default();
    let analyzer = RequestAnalyzer::website(manager(&settings), &settings);
    let request = Request::get(url).unwrap();
    let attributes = analyzer.analyze(&request).unwrap();
    (request, attributes)
}

#[test]
fn full_match_yields_locator_locale_and_system() {
    let (_, attributes) = analyze("http://example.lo/de/blog/post.json?page=2");

    assert_eq!(attributes.match_type(), Some(MatchType::Full));
    assert_eq!(attributes.text(keys::WEBSPACE_KEY), Some("example"));
    assert_eq!(attributes.text(keys::LOCALE), Some("de"));
    assert_eq!(attributes.text(keys::RESOURCE_LOCATOR), Some("/blog/post"));
    assert_eq!(attributes.text(keys::RESOURCE_LOCATOR_PREFIX), Some("/de"));
    assert_eq!(attributes.text(keys::FORMAT), Some("json"));
    assert_eq!(attributes.system().map(|system| system.to_string()), Some("example".to_string()));
    assert!(attributes.date_time().is_some());
    assert!(attributes.segment().is_none());
}

#[test_case("http://example.lo/blog?foo=bar" => "http://example.lo/en/blog?foo=bar" ; "partial match")]
#[test_case("http://www.example.lo/de/blog" => "http://example.lo/de/blog" ; "redirect url")]
#[test_case("http://example.lo/de/blog/" => "http://example.lo/de/blog" ; "trailing slash")]
#[test_case("http://example.lo/de/blog.html" => "http://example.lo/de/blog" ; "html suffix")]
fn redirects(url: &str) -> String {
    let (request, attributes) = analyze(url);
    let response = resolve_redirect(&request, &attributes).unwrap();
    assert_eq!(response.status, 301);
    response.location
}

#[test]
fn unknown_host_fails_with_the_request_uri() {
    let settings = EngineSettings::default();
    let analyzer = RequestAnalyzer::website(manager(&settings), &settings);
    let request = Request::get("http://unknown.lo/path?x=1").unwrap();

    let err = analyzer.analyze(&request).unwrap_err();
    assert_eq!(
        err,
        EngineError::UrlMatchNotFound {
            url: "http://unknown.lo/path?x=1".to_string()
        }
    );
    assert_eq!(err.status_code(), 404);
}

#[test]
fn environment_selects_the_matched_urls() {
    let settings = EngineSettings::for_environment("dev");
    let analyzer = RequestAnalyzer::website(manager(&settings), &settings);

    let request = Request::get("http://example.dev:8000/en/about").unwrap();
    let attributes = analyzer.analyze(&request).unwrap();
    assert_eq!(attributes.text(keys::PORTAL_URL), Some("example.dev:8000/en"));

    let request = Request::get("http://example.lo/en/about").unwrap();
    assert!(analyzer.analyze(&request).is_err());
}

#[test]
fn portal_urls_for_a_locator() {
    let manager = manager(&EngineSettings::default());
    assert_eq!(
        manager.find_urls_by_resource_locator("/blog", "prod", "de", "example", "https"),
        vec!["https://example.lo/de/blog".to_string()]
    );
    assert!(manager
        .find_urls_by_resource_locator("/blog", "prod", "fr", "example", "https")
        .is_empty());
}

#[test]
fn analyzed_request_resolves_through_the_webspace_strategy() {
    let settings = EngineSettings::default();
    let manager = manager(&settings);
    let mapper = Arc::new(TreeResourceLocatorMapper::new());
    let core = StrategyCore::new(
        Arc::new(TreeGenerator::new()),
        mapper.clone(),
        Arc::new(InMemoryContentStore::new()),
    );
    let pool = ResourceLocatorStrategyPool::with_tree_strategies(manager.clone(), core);

    let content = ContentUuid::new();
    let scope = LocatorScope::new("example", "de");
    mapper.save(content, "/blog", &scope).unwrap();
    mapper.save(content, "/journal", &scope).unwrap();

    let analyzer = RequestAnalyzer::website(manager, &settings);
    let request = Request::get("http://example.lo/de/blog?page=2").unwrap();
    let attributes = analyzer.analyze(&request).unwrap();
    let webspace_key = attributes.text(keys::WEBSPACE_KEY).unwrap();
    let locale = attributes.text(keys::LOCALE).unwrap();
    let locator = attributes.text(keys::RESOURCE_LOCATOR).unwrap();

    let strategy = pool.get_strategy_by_webspace_key(webspace_key).unwrap();
    assert_eq!(strategy.name(), TREE_FULL_EDIT);

    let scope = LocatorScope::new(webspace_key, locale);
    let new_locator = match strategy.resolve(locator, &scope).unwrap() {
        Resolution::Moved(new_locator) => new_locator,
        other => panic!("expected a moved locator, got {other:?}"),
    };
    let response = resolve_moved(&request, &attributes, &new_locator);
    assert_eq!(response.location, "http://example.lo/de/journal?page=2");
}
