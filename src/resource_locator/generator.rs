// Copyright 2025 Cowboy AI, LLC.

//! Slug generation for resource locators

use deunicode::deunicode;

/// Number of hex characters kept from the title hash fallback
const HASH_SEGMENT_LEN: usize = 32;

/// Turns a title into a locator below an optional parent path
pub trait ResourceLocatorGenerator: Send + Sync {
    /// Generate the locator for `title`; `None` parent creates a top-level path
    fn generate(&self, title: &str, parent_path: Option<&str>, locale: &str) -> String;
}

/// Transliterated lowercase ASCII slugs joined to the parent path
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeGenerator;

impl TreeGenerator {
    /// Create the generator
    pub fn new() -> Self {
        Self
    }
}

impl ResourceLocatorGenerator for TreeGenerator {
    fn generate(&self, title: &str, parent_path: Option<&str>, _locale: &str) -> String {
        let mut segment = slugify(&title.replace('/', "-"));
        if segment.is_empty() {
            segment = hash_segment(title);
        }

        match parent_path {
            Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), segment),
            None => format!("/{segment}"),
        }
    }
}

/// Transliterate to ASCII, lowercase and map every run of non `[a-z0-9]`
/// characters to one dash
pub fn slugify(input: &str) -> String {
    let ascii = deunicode(input);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for ch in ascii.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn hash_segment(title: &str) -> String {
    let digest = blake3::hash(title.as_bytes());
    let mut encoded = hex::encode(digest.as_bytes());
    encoded.truncate(HASH_SEGMENT_LEN);
    encoded
}

/// Replacements applied for a language before transliteration
fn replacers(locale: &str) -> &'static [(&'static str, &'static str)] {
    let language = locale.split(['_', '-']).next().unwrap_or_default();
    match language {
        "de" => &[
            ("&", " und "),
            ("ä", "ae"),
            ("ö", "oe"),
            ("ü", "ue"),
            ("Ä", "Ae"),
            ("Ö", "Oe"),
            ("Ü", "Ue"),
            ("ß", "ss"),
            ("€", " euro "),
        ],
        "fr" => &[("&", " et "), ("€", " euro ")],
        "es" => &[("&", " y "), ("€", " euro ")],
        "it" => &[("&", " e "), ("€", " euro ")],
        "nl" => &[("&", " en "), ("€", " euro ")],
        _ => &[("&", " and "), ("€", " euro "), ("@", " at ")],
    }
}

/// Decorator applying per-language replacements before the wrapped generator runs
#[derive(Debug, Clone, Default)]
pub struct TransliteratingGenerator<G> {
    inner: G,
}

impl<G: ResourceLocatorGenerator> TransliteratingGenerator<G> {
    /// Wrap a generator
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    /// Apply the language replacers and transliterate to ASCII
    pub fn transliterate(title: &str, locale: &str) -> String {
        let replaced = replacers(locale)
            .iter()
            .fold(title.to_string(), |acc, (from, to)| acc.replace(from, to));
        deunicode(&replaced)
    }
}

impl<G: ResourceLocatorGenerator> ResourceLocatorGenerator for TransliteratingGenerator<G> {
    fn generate(&self, title: &str, parent_path: Option<&str>, locale: &str) -> String {
        let normalized = Self::transliterate(title, locale);
        // keep the raw title so symbol-only titles hash to distinct segments
        if slugify(&normalized.replace('/', "-")).is_empty() {
            return self.inner.generate(title, parent_path, locale);
        }
        self.inner.generate(&normalized, parent_path, locale)
    }
}
