/// Collapse every run of whitespace into one ASCII space and trim both ends.
///
/// "Whitespace" is the Unicode `White_Space` set, so the `&nbsp;` padding Word sprinkles
/// everywhere and full-width U+3000 spaces from CJK documents are folded too.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split(is_space) {
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn is_space(c: char) -> bool {
    // U+001C..U+001F are separators that legacy exporters occasionally leak.
    c.is_whitespace() || matches!(c, '\u{1C}'..='\u{1F}')
}
