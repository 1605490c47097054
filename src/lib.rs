//! sheetsmith: build pipeline for code-snippet cheatsheets.
//!
//! Authored section JSON and per-example Markdown are kept in sync by the converters in
//! [`convert`], normalized by [`normalize`], and served as per-section payloads plus a manifest
//! by [`manifest`]. [`store`] reads the served data back lazily.
#![allow(clippy::multiple_crate_versions)]

pub mod comments;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod formats;
pub mod frontmatter;
pub mod header;
pub mod input;
pub mod manifest;
pub mod naming;
pub mod normalize;
pub mod report;
pub mod retry;
pub mod rewrite;
pub mod section;
pub mod store;

pub use error::{Error, Result};
