//! Permissive byte-to-text decoding for legacy exports.
//!
//! Word's "save as web page" writes the document in the author's ANSI code page (GB2312 for
//! the guides this tool was written for). Those files routinely contain stray bytes that are not
//! valid in the declared encoding; they are dropped instead of failing the run.

use encoding_rs::{DecoderResult, Encoding};

use crate::error::{Error, Result};

pub const DEFAULT_ENCODING_LABEL: &str = "gb2312";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Number of malformed byte sequences skipped while decoding.
    pub dropped: usize,
}

/// Look up an encoding by its WHATWG label (`gb2312`, `windows-1252`, `utf-8`, ...).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

pub fn decode_lossy(bytes: &[u8], encoding: &'static Encoding) -> Decoded {
    let mut decoder = encoding.new_decoder_with_bom_removal();
    let mut text = String::new();
    let mut dropped = 0usize;
    let mut src = bytes;

    loop {
        let need = decoder
            .max_utf8_buffer_length_without_replacement(src.len())
            .unwrap_or(src.len().saturating_mul(3));
        text.reserve(need.max(4));

        let (result, read) = decoder.decode_to_string_without_replacement(src, &mut text, true);
        src = &src[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => {}
            DecoderResult::Malformed(_, _) => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(
            encoding = encoding.name(),
            dropped,
            "skipped undecodable byte sequences"
        );
    }

    Decoded { text, dropped }
}
