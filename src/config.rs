use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::decode::resolve_encoding;
use crate::error::{Error, Result};
use crate::extract::ExtractOptions;

pub const DEFAULT_OUTPUT_FILE: &str = "sections.json";

/// Where to read from, where to write to, and how to interpret the bytes.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub encoding: &'static Encoding,
    pub heading_level: u8,
}

impl RunConfig {
    /// Resolves `encoding_label` and checks `heading_level` before any file is touched.
    /// Without an explicit output path, `sections.json` is written beside the input.
    pub fn new(
        input_path: PathBuf,
        output_path: Option<PathBuf>,
        encoding_label: &str,
        heading_level: u8,
    ) -> Result<Self> {
        let encoding = resolve_encoding(encoding_label)?;
        if !(1..=6).contains(&heading_level) {
            return Err(Error::InvalidHeadingLevel(heading_level));
        }
        let output_path = output_path.unwrap_or_else(|| default_output_path(&input_path));
        Ok(Self {
            input_path,
            output_path,
            encoding,
            heading_level,
        })
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            heading_level: self.heading_level,
        }
    }
}

pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_file_name(DEFAULT_OUTPUT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_sibling_file() {
        let cfg = RunConfig::new(
            PathBuf::from("guide/chrome/source.html"),
            None,
            "gb2312",
            2,
        )
        .unwrap();
        assert_eq!(cfg.output_path, PathBuf::from("guide/chrome/sections.json"));
        assert_eq!(cfg.encoding.name(), "GBK");
    }

    #[test]
    fn explicit_output_wins() {
        let cfg = RunConfig::new(
            PathBuf::from("source.html"),
            Some(PathBuf::from("/tmp/out.json")),
            "utf-8",
            2,
        )
        .unwrap();
        assert_eq!(cfg.output_path, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn out_of_range_heading_level_is_rejected() {
        for level in [0, 7, 9] {
            let err = RunConfig::new(PathBuf::from("a.htm"), None, "utf-8", level).unwrap_err();
            assert!(matches!(err, Error::InvalidHeadingLevel(l) if l == level));
        }
        let cfg = RunConfig::new(PathBuf::from("a.htm"), None, "utf-8", 6).unwrap();
        assert_eq!(cfg.extract_options().heading_level, 6);
    }

    #[test]
    fn bad_encoding_label_is_rejected() {
        let err = RunConfig::new(PathBuf::from("a.htm"), None, "nope", 2).unwrap_err();
        assert!(matches!(err, Error::UnknownEncoding(_)));
    }
}
