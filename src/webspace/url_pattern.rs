// Copyright 2025 Cowboy AI, LLC.

//! Url pattern placeholders and matching

use regex::Regex;

use crate::config::{Localization, Segment};

/// Placeholder for the full locale (`de-at`)
pub const LOCALIZATION: &str = "{localization}";
/// Placeholder for the language (`de`)
pub const LANGUAGE: &str = "{language}";
/// Placeholder for the country (`at`)
pub const COUNTRY: &str = "{country}";
/// Placeholder for the segment key
pub const SEGMENT: &str = "{segment}";

/// True when the pattern encodes the localization
pub fn has_localization(pattern: &str) -> bool {
    pattern.contains(LOCALIZATION) || pattern.contains(LANGUAGE) || pattern.contains(COUNTRY)
}

/// True when the pattern encodes the segment
pub fn has_segment(pattern: &str) -> bool {
    pattern.contains(SEGMENT)
}

/// True when the pattern contains a `*` host label
pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains('*')
}

/// Replace the placeholders of a pattern.
///
/// Missing values remove their placeholder, afterwards doubled and dangling
/// delimiters are cleaned up.
pub fn replace(
    pattern: &str,
    localization: Option<&Localization>,
    segment: Option<&Segment>,
) -> String {
    let locale = localization.map(|l| l.locale_with('-')).unwrap_or_default();
    let language = localization.map(|l| l.language.clone()).unwrap_or_default();
    let country = localization
        .and_then(|l| l.country.clone())
        .unwrap_or_default();
    let segment = segment.map(|s| s.key.clone()).unwrap_or_default();

    let replaced = pattern
        .replace(LOCALIZATION, &locale)
        .replace(LANGUAGE, &language)
        .replace(COUNTRY, &country)
        .replace(SEGMENT, &segment);
    cleanup(&replaced)
}

/// Remove every placeholder from a pattern
pub fn strip(pattern: &str) -> String {
    replace(pattern, None, None)
}

fn cleanup(url: &str) -> String {
    let mut cleaned = String::with_capacity(url.len());
    let mut previous: Option<char> = None;
    for ch in url.chars() {
        let doubled = matches!(
            (previous, ch),
            (Some('/'), '/') | (Some('.'), '.') | (Some('-'), '-')
        );
        // `{language}-{country}` without country leaves `de-` behind
        let dangling_dash = previous == Some('-') && ch == '/';
        if dangling_dash {
            cleaned.pop();
        }
        if !doubled {
            cleaned.push(ch);
        }
        previous = Some(ch);
    }
    cleaned
        .trim_start_matches(['.', '-'])
        .trim_end_matches(['/', '.', '-'])
        .to_string()
}

/// True when `url` starts with `portal_url` at a segment boundary
pub fn matches(url: &str, portal_url: &str) -> bool {
    if !url.starts_with(portal_url) {
        return false;
    }
    match url[portal_url.len()..].chars().next() {
        None => true,
        Some(next) => matches!(next, '/' | '.' | '?' | '#'),
    }
}

/// Matcher for urls containing `*` host labels
#[derive(Debug, Clone)]
pub struct WildcardMatcher {
    regex: Regex,
}

impl WildcardMatcher {
    /// Compile a matcher for a concrete (placeholder free) wildcard url
    pub fn new(url: &str) -> Result<Self, regex::Error> {
        let pattern = regex::escape(url).replace(r"\*", "([^./]+)");
        let regex = Regex::new(&format!("^(?:{pattern})(?:[/.?#]|$)"))?;
        Ok(Self { regex })
    }

    /// Labels captured for the `*` positions, `None` when the url does not match
    pub fn captures(&self, url: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(url)?;
        Some(
            captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect(),
        )
    }
}

/// Fill `*` positions with captured labels, in order
pub fn fill_wildcards(url: &str, labels: &[String]) -> String {
    let mut labels = labels.iter();
    let mut filled = String::with_capacity(url.len());
    for ch in url.chars() {
        if ch == '*' {
            if let Some(label) = labels.next() {
                filled.push_str(label);
                continue;
            }
        }
        filled.push(ch);
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("sulu.lo/{localization}", Some(("de", Some("at"))), None => "sulu.lo/de-at" ; "full locale")]
    #[test_case("sulu.lo/{language}", Some(("de", Some("at"))), None => "sulu.lo/de" ; "language only")]
    #[test_case("{country}.sulu.lo/{language}", Some(("de", Some("at"))), None => "at.sulu.lo/de" ; "country host")]
    #[test_case("sulu.lo/{localization}", None, None => "sulu.lo" ; "removed localization")]
    #[test_case("sulu.lo/{language}-{country}/blog", Some(("en", None)), None => "sulu.lo/en/blog" ; "missing country")]
    #[test_case("{country}.sulu.lo", None, None => "sulu.lo" ; "removed host label")]
    #[test_case("sulu.lo/{segment}/{localization}", Some(("en", None)), Some("w") => "sulu.lo/w/en" ; "segment")]
    fn test_replace(
        pattern: &str,
        localization: Option<(&str, Option<&str>)>,
        segment: Option<&str>,
    ) -> String {
        let localization =
            localization.map(|(language, country)| Localization::new(language, country));
        let segment = segment.map(|key| Segment {
            key: key.to_string(),
            name: None,
            default: false,
        });
        replace(pattern, localization.as_ref(), segment.as_ref())
    }

    #[test_case("sulu.lo/en/articles", "sulu.lo/en" => true ; "path below")]
    #[test_case("sulu.lo/en", "sulu.lo/en" => true ; "exact")]
    #[test_case("sulu.lo/en.json", "sulu.lo/en" => true ; "format")]
    #[test_case("sulu.lo/english", "sulu.lo/en" => false ; "partial segment")]
    #[test_case("sulu.local", "sulu.lo" => false ; "partial host")]
    fn test_matches(url: &str, portal_url: &str) -> bool {
        matches(url, portal_url)
    }

    #[test]
    fn test_wildcard_capture_and_fill() {
        let matcher = WildcardMatcher::new("*.sulu.lo/en").unwrap();
        let labels = matcher.captures("shop.sulu.lo/en/products").unwrap();
        assert_eq!(labels, vec!["shop".to_string()]);
        assert!(matcher.captures("sulu.lo/en").is_none());
        assert!(matcher.captures("a.b.sulu.lo/en").is_none());

        assert_eq!(fill_wildcards("*.sulu.lo/en", &labels), "shop.sulu.lo/en");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(has_localization("sulu.lo/{language}"));
        assert!(!has_localization("sulu.lo/{segment}"));
        assert!(has_segment("sulu.lo/{segment}"));
        assert!(has_wildcard("*.sulu.lo"));
        assert_eq!(strip("sulu.lo/{localization}/{segment}"), "sulu.lo");
    }
}
