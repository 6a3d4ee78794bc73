// Copyright 2025 Cowboy AI, LLC.

//! # Request analysis
//!
//! A request runs through an ordered pipeline of processors. Each one reads
//! the request plus the attributes gathered so far and contributes new
//! attributes; validation happens once all of them have run.

mod analyzer;
mod attributes;
mod incoming;
pub mod processors;
mod redirect;

pub use analyzer::RequestAnalyzer;
pub use attributes::{keys, AttributeValue, RequestAttributes, SecuritySystem};
pub use incoming::Request;
pub use redirect::{resolve_moved, resolve_redirect, RedirectResponse, MOVED_PERMANENTLY};
