// Copyright 2025 Cowboy AI, LLC.

//! Incoming request as seen by the processors

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::errors::{EngineError, EngineResult};

/// Scheme, host, path, query, headers and cookies of an http request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Http method (`GET`, `POST`, ...)
    pub method: String,
    /// `http` or `https`
    pub scheme: String,
    /// Lowercase host name
    pub host: String,
    /// Port when it is not the scheme default
    pub port: Option<u16>,
    /// Raw (percent-encoded) path, always starting with `/`
    pub path: String,
    /// Raw query string without `?`
    pub query_string: Option<String>,
    /// Decoded query parameters
    pub query: IndexMap<String, String>,
    /// Headers by lowercase name
    pub headers: IndexMap<String, String>,
    /// Cookies by name
    pub cookies: IndexMap<String, String>,
}

impl Request {
    /// Parse an absolute url into a request
    pub fn from_url(method: &str, url: &str) -> EngineResult<Self> {
        let parsed = Url::parse(url)
            .map_err(|err| EngineError::InvalidArgument(format!("invalid url \"{url}\": {err}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| EngineError::InvalidArgument(format!("url \"{url}\" has no host")))?
            .to_lowercase();

        Ok(Self {
            method: method.to_uppercase(),
            scheme: parsed.scheme().to_string(),
            host,
            port: parsed.port(),
            path: parsed.path().to_string(),
            query_string: parsed.query().filter(|query| !query.is_empty()).map(str::to_string),
            query: parsed.query_pairs().into_owned().collect(),
            headers: IndexMap::new(),
            cookies: IndexMap::new(),
        })
    }

    /// `GET` request for an url
    pub fn get(url: &str) -> EngineResult<Self> {
        Self::from_url("GET", url)
    }

    /// Add a header; a `cookie` header also fills the cookie jar
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        let name = name.to_lowercase();
        if name == "cookie" {
            for pair in value.split(';') {
                if let Some((key, cookie)) = pair.trim().split_once('=') {
                    self.cookies
                        .insert(key.trim().to_string(), cookie.trim().to_string());
                }
            }
        }
        self.headers.insert(name, value.to_string());
        self
    }

    /// Add a cookie
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name.to_string(), value.to_string());
        self
    }

    /// Header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Cookie by name
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Query parameter by name
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Port unless it is the default of the scheme
    pub fn explicit_port(&self) -> Option<u16> {
        let default = match self.scheme.as_str() {
            "https" => Some(443),
            "http" => Some(80),
            _ => None,
        };
        self.port.filter(|port| Some(*port) != default)
    }

    /// Host with a non-default port appended (`sulu.lo:8080`)
    pub fn http_host(&self) -> String {
        match self.explicit_port() {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// Percent-decoded path
    pub fn decoded_path(&self) -> String {
        percent_decode_str(&self.path).decode_utf8_lossy().into_owned()
    }

    /// `?query` suffix, empty without query
    pub fn query_suffix(&self) -> String {
        self.query_string
            .as_ref()
            .map(|query| format!("?{query}"))
            .unwrap_or_default()
    }

    /// Scheme and http host (`https://sulu.lo:8080`)
    pub fn scheme_and_http_host(&self) -> String {
        format!("{}://{}", self.scheme, self.http_host())
    }

    /// Full request uri
    pub fn uri(&self) -> String {
        format!(
            "{}{}{}",
            self.scheme_and_http_host(),
            self.path,
            self.query_suffix()
        )
    }
}
