//! Split Word "save as web page" exports into heading-delimited sections.
//!
//! Pipeline: raw bytes are decoded permissively ([`decode`]), parsed into an html5ever tree
//! ([`dom`]), and segmented at every non-empty heading of the configured level ([`extract`]).
//! The resulting [`Section`]s can be printed ([`render`]) or written as JSON ([`export`]).

pub mod config;
pub mod decode;
pub mod dom;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod render;

use std::path::Path;

use encoding_rs::Encoding;

pub use crate::config::RunConfig;
pub use crate::dom::Document;
pub use crate::error::{Error, Result};
pub use crate::export::Layout;
pub use crate::extract::{extract_sections, ExtractOptions};
pub use crate::model::{ContentBlock, GuideSection, Section};

/// Decode `bytes` with `encoding`, dropping anything undecodable, and parse the result.
pub fn load_document(bytes: &[u8], encoding: &'static Encoding) -> Document {
    let decoded = decode::decode_lossy(bytes, encoding);
    Document::parse(&decoded.text)
}

pub fn extract_sections_from_bytes(
    bytes: &[u8],
    encoding: &'static Encoding,
    options: &ExtractOptions,
) -> Vec<Section> {
    let doc = load_document(bytes, encoding);
    extract_sections(&doc, options)
}

/// Only an unreadable `path` is an error; any readable file yields some (possibly empty) list.
pub fn extract_sections_from_path(
    path: &Path,
    encoding: &'static Encoding,
    options: &ExtractOptions,
) -> Result<Vec<Section>> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        op: "read",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded input");
    let sections = extract_sections_from_bytes(&bytes, encoding, options);
    tracing::info!(path = %path.display(), sections = sections.len(), "extracted sections");
    Ok(sections)
}
