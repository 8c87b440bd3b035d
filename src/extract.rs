//! Heading-bounded segmentation of a parsed document into [`Section`]s.
//!
//! Works in two passes. The first walks the whole tree and records every boundary heading
//! (the configured level, with non-empty text) together with its parent and position. The
//! second takes, for each boundary, the parent's children that follow it up to the next
//! boundary and classifies each one into content blocks.
//!
//! A heading of the boundary level whose text is blank is not a boundary: it neither starts a
//! section nor ends the previous one, and it contributes no content.

use markup5ever_rcdom::Handle;

use crate::dom::{self, Document};
use crate::model::{ContentBlock, Section};
use crate::normalize::normalize_text;

pub const DEFAULT_HEADING_LEVEL: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// `2` means sections start at `<h2>`.
    pub heading_level: u8,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heading_level: DEFAULT_HEADING_LEVEL,
        }
    }
}

/// The element kinds the extractor distinguishes. Everything else is `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Heading(u8),
    Paragraph,
    List,
    ListItem,
    Image,
    Ignored,
}

impl TagKind {
    pub fn of(node: &Handle) -> Self {
        match dom::tag_name(node).as_deref() {
            Some("p") => Self::Paragraph,
            Some("ul" | "ol") => Self::List,
            Some("li") => Self::ListItem,
            Some("img") => Self::Image,
            Some(tag) => heading_level(tag).map_or(Self::Ignored, Self::Heading),
            None => Self::Ignored,
        }
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag.strip_prefix('h')?.parse::<u8>() {
        Ok(n @ 1..=6) => Some(n),
        _ => None,
    }
}

struct Boundary {
    parent: Handle,
    position: usize,
    title: String,
}

/// Normalized title if `node` is a boundary heading.
fn boundary_title(node: &Handle, level: u8) -> Option<String> {
    if TagKind::of(node) != TagKind::Heading(level) {
        return None;
    }
    let title = normalize_text(&dom::text_joined(node));
    (!title.is_empty()).then_some(title)
}

/// Iterative preorder walk over `(parent, position)` pairs; each boundary keeps a handle on
/// its siblings.
fn find_boundaries(root: &Handle, level: u8) -> Vec<Boundary> {
    fn push_children(stack: &mut Vec<(Handle, usize)>, parent: &Handle) {
        let count = parent.children.borrow().len();
        stack.extend((0..count).rev().map(|i| (parent.clone(), i)));
    }

    let mut out = Vec::new();
    let mut stack = Vec::new();
    push_children(&mut stack, root);
    while let Some((parent, position)) = stack.pop() {
        let child = parent.children.borrow()[position].clone();
        if let Some(title) = boundary_title(&child, level) {
            out.push(Boundary {
                parent,
                position,
                title,
            });
        }
        push_children(&mut stack, &child);
    }
    out
}

fn collect_content(boundary: &Boundary, level: u8) -> Vec<ContentBlock> {
    let siblings = boundary.parent.children.borrow();
    let mut content = Vec::new();
    for node in siblings[boundary.position + 1..]
        .iter()
        .take_while(|n| boundary_title(n, level).is_none())
    {
        classify(node, &mut content);
    }
    content
}

fn classify(node: &Handle, content: &mut Vec<ContentBlock>) {
    match TagKind::of(node) {
        TagKind::Paragraph => {
            let text = normalize_text(&dom::text_joined(node));
            if !text.is_empty() {
                content.push(ContentBlock::Paragraph { text });
            }
            content.extend(dom::find_all(node, "img").iter().map(image_block));
        }
        TagKind::List => {
            let items: Vec<String> = dom::children(node)
                .iter()
                .filter(|c| TagKind::of(c) == TagKind::ListItem)
                .map(|li| normalize_text(&dom::text_joined(li)))
                .filter(|t| !t.is_empty())
                .collect();
            if !items.is_empty() {
                content.push(ContentBlock::List { items });
            }
        }
        TagKind::Image => content.push(image_block(node)),
        TagKind::Heading(_) | TagKind::ListItem | TagKind::Ignored => {}
    }
}

fn image_block(node: &Handle) -> ContentBlock {
    ContentBlock::Image {
        src: dom::attr(node, "src"),
    }
}

pub fn extract_sections(doc: &Document, options: &ExtractOptions) -> Vec<Section> {
    let level = options.heading_level;
    find_boundaries(doc.root(), level)
        .into_iter()
        .enumerate()
        .map(|(i, boundary)| {
            let content = collect_content(&boundary, level);
            tracing::debug!(
                index = i + 1,
                title = %boundary.title,
                blocks = content.len(),
                "section"
            );
            Section {
                index: i + 1,
                title: boundary.title,
                content,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(html: &str) -> Vec<Section> {
        extract_sections(&Document::parse(html), &ExtractOptions::default())
    }

    fn para(text: &str) -> ContentBlock {
        ContentBlock::Paragraph {
            text: text.to_string(),
        }
    }

    fn image(src: &str) -> ContentBlock {
        ContentBlock::Image {
            src: Some(src.to_string()),
        }
    }

    #[test]
    fn single_heading_with_irregular_spacing() {
        let out = sections("<h2>Intro</h2><p>Hello   world</p>");
        assert_eq!(
            out,
            vec![Section {
                index: 1,
                title: "Intro".to_string(),
                content: vec![para("Hello world")],
            }]
        );
    }

    #[test]
    fn blank_list_items_are_dropped() {
        let out = sections("<h2>Steps</h2><ol><li>First</li><li> &nbsp; </li><li>Second</li></ol>");
        assert_eq!(
            out[0].content,
            vec![ContentBlock::List {
                items: vec!["First".to_string(), "Second".to_string()],
            }]
        );
    }

    #[test]
    fn list_with_only_blank_items_is_omitted() {
        let out = sections("<h2>Steps</h2><ol><li></li><li> </li></ol>");
        assert_eq!(out.len(), 1);
        assert!(out[0].content.is_empty());
    }

    #[test]
    fn paragraph_images_follow_the_paragraph() {
        let out = sections(
            "<h2>Shots</h2><p>See <img src=\"a.png\"> and <span><img src=\"b.png\"></span></p>",
        );
        assert_eq!(out[0].content, vec![para("See and"), image("a.png"), image("b.png")]);
    }

    #[test]
    fn image_only_paragraph_yields_images_without_paragraph() {
        let out = sections("<h2>Shots</h2><p>&nbsp;<img src=x.png></p>");
        assert_eq!(out[0].content, vec![image("x.png")]);
    }

    #[test]
    fn no_headings_means_no_sections() {
        assert!(sections("<p>Just text</p><ul><li>item</li></ul>").is_empty());
        assert!(sections("").is_empty());
    }

    #[test]
    fn image_without_src_is_kept() {
        let out = sections("<h2>Pic</h2><img alt=\"missing\">");
        assert_eq!(out[0].content, vec![ContentBlock::Image { src: None }]);
    }

    #[test]
    fn indices_count_only_non_empty_headings() {
        let out = sections(
            "<h2>One</h2><h2> </h2><h2>Two</h2><h2>&nbsp;</h2><h2><span></span></h2><h2>Three</h2>",
        );
        let got: Vec<_> = out.iter().map(|s| (s.index, s.title.as_str())).collect();
        assert_eq!(got, [(1, "One"), (2, "Two"), (3, "Three")]);
    }

    #[test]
    fn blank_heading_does_not_cut_the_section() {
        let out = sections("<h2>A</h2><p>one</p><h2>&nbsp;</h2><p>two</p><h2>B</h2><p>three</p>");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].content, vec![para("one"), para("two")]);
        assert_eq!(out[1].content, vec![para("three")]);
    }

    #[test]
    fn content_before_first_heading_is_not_attached() {
        let out = sections("<p>preface</p><h2>Body</h2><p>text</p>");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, vec![para("text")]);
    }

    #[test]
    fn other_tags_are_ignored() {
        let out = sections(
            "<h2>Mix</h2><h3>Sub</h3><div><p>nested</p></div><table><tr><td>t</td></tr></table><p>kept</p>",
        );
        assert_eq!(out[0].content, vec![para("kept")]);
    }

    #[test]
    fn sibling_image_and_unordered_list() {
        let out = sections("<h2>S</h2><img src=\"top.jpg\"><ul><li>a</li><li><b>b</b> c</li></ul>");
        assert_eq!(
            out[0].content,
            vec![
                image("top.jpg"),
                ContentBlock::List {
                    items: vec!["a".to_string(), "b c".to_string()],
                },
            ]
        );
    }

    #[test]
    fn nested_list_text_folds_into_its_item() {
        let out = sections("<h2>S</h2><ul><li>outer<ul><li>inner</li></ul></li><li>next</li></ul>");
        assert_eq!(
            out[0].content,
            vec![ContentBlock::List {
                items: vec!["outer inner".to_string(), "next".to_string()],
            }]
        );
    }

    #[test]
    fn titles_use_the_same_normalization_as_content() {
        let out = sections(
            "<h2><a name=\"_Toc1\"></a><span>1.</span><span>&nbsp;&nbsp;Install</span>\n</h2><p>x</p>",
        );
        assert_eq!(out[0].title, "1. Install");
    }

    #[test]
    fn headings_inside_word_section_div() {
        let html = "<html><body><div class=WordSection1>\
            <h2>First</h2><p>a</p>\
            <h2>Second</h2><p>b</p>\
            </div></body></html>";
        let out = sections(html);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].content, vec![para("a")]);
        assert_eq!(out[1].content, vec![para("b")]);
    }

    #[test]
    fn heading_level_is_configurable() {
        let doc = Document::parse("<h1>Top</h1><h2>Inner</h2><p>x</p><h1>Next</h1>");
        let out = extract_sections(&doc, &ExtractOptions { heading_level: 1 });
        let titles: Vec<_> = out.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Top", "Next"]);
        assert_eq!(out[0].content, vec![para("x")]);
    }

    #[test]
    fn deeply_nested_markup_does_not_exhaust_the_stack() {
        let depth = 20_000;
        let html = format!(
            "<h2>Top</h2><p>x</p>{}<h2>Deep</h2><p>y</p>{}",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        // Far too small for one frame per nesting level.
        let out = std::thread::Builder::new()
            .stack_size(512 * 1024)
            .spawn(move || sections(&html))
            .unwrap()
            .join()
            .unwrap();
        let got: Vec<_> = out
            .iter()
            .map(|s| (s.index, s.title.as_str(), s.content.clone()))
            .collect();
        assert_eq!(
            got,
            [(1, "Top", vec![para("x")]), (2, "Deep", vec![para("y")])]
        );
    }

    #[test]
    fn extraction_is_repeatable() {
        let html = "<h2>A</h2><p>x <img src=1></p><ol><li>y</li></ol><h2>B</h2><img>";
        assert_eq!(sections(html), sections(html));
    }

    #[test]
    fn tag_kinds() {
        let doc = Document::parse("<h4>h</h4><hr><ol></ol><li></li><p></p><img><span></span>");
        let kinds: Vec<_> = ["h4", "hr", "ol", "li", "p", "img", "span"]
            .iter()
            .map(|t| TagKind::of(&dom::find_all(doc.root(), t)[0]))
            .collect();
        assert_eq!(
            kinds,
            [
                TagKind::Heading(4),
                TagKind::Ignored,
                TagKind::List,
                TagKind::ListItem,
                TagKind::Paragraph,
                TagKind::Image,
                TagKind::Ignored,
            ]
        );
    }
}
