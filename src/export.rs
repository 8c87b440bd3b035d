use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{GuideSection, Section};

/// Shape of the JSON written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// `index`, `title` and a typed `content` array.
    #[default]
    Sections,
    /// `index`, `title`, flat `text_blocks` and `images` arrays.
    Guide,
}

/// Pretty-printed JSON (two-space indent). Non-ASCII text is written as-is.
pub fn to_json_string(sections: &[Section], layout: Layout) -> Result<String> {
    let json = match layout {
        Layout::Sections => serde_json::to_string_pretty(sections)?,
        Layout::Guide => {
            let guide: Vec<GuideSection> = sections.iter().map(GuideSection::from).collect();
            serde_json::to_string_pretty(&guide)?
        }
    };
    Ok(json)
}

pub fn write_json(path: &Path, sections: &[Section], layout: Layout) -> Result<()> {
    let json = to_json_string(sections, layout)?;
    std::fs::write(path, json).map_err(|source| Error::Io {
        op: "write",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        sections = sections.len(),
        ?layout,
        "wrote sections"
    );
    Ok(())
}
