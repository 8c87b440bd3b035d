use std::io::{self, Write};

use crate::model::{ContentBlock, Section};

/// Human-readable dump, one tagged line per block and a blank line after each section.
pub fn lines(sections: &[Section]) -> impl Iterator<Item = String> + '_ {
    sections.iter().flat_map(section_lines)
}

fn section_lines(section: &Section) -> Vec<String> {
    let mut out = vec![format!("SECTION {}: {}", section.index, section.title)];
    for block in &section.content {
        match block {
            ContentBlock::Paragraph { text } => out.push(format!("  P: {text}")),
            ContentBlock::List { items } => {
                out.extend(items.iter().map(|item| format!("  - {item}")));
            }
            ContentBlock::Image { src } => {
                out.push(format!("  [IMAGE] {}", src.as_deref().unwrap_or("")));
            }
        }
    }
    out.push(String::new());
    out
}

pub fn write_sections<W: Write>(out: &mut W, sections: &[Section]) -> io::Result<()> {
    for line in lines(sections) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn render_sections(sections: &[Section]) -> String {
    lines(sections).map(|line| line + "\n").collect()
}
