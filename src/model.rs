use serde::{Deserialize, Serialize};

/// One top-level heading and everything up to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 1-based, counted over non-empty headings only.
    pub index: usize,
    pub title: String,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph { text: String },
    List { items: Vec<String> },
    /// `src` is `None` when the `<img>` carried no source attribute.
    Image { src: Option<String> },
}

/// Flat per-section layout used by the guide viewer: text and images in separate arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    pub index: usize,
    pub title: String,
    pub text_blocks: Vec<String>,
    pub images: Vec<String>,
}

impl From<&Section> for GuideSection {
    fn from(section: &Section) -> Self {
        let mut text_blocks = Vec::new();
        let mut images = Vec::new();
        for block in &section.content {
            match block {
                ContentBlock::Paragraph { text } => text_blocks.push(text.clone()),
                ContentBlock::List { items } => text_blocks.push(items.join("\n")),
                ContentBlock::Image { src } => images.push(src.clone().unwrap_or_default()),
            }
        }
        Self {
            index: section.index,
            title: section.title.clone(),
            text_blocks,
            images,
        }
    }
}
