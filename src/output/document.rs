//! Line-oriented YAML writer.
//!
//! Documents are assembled in memory and only handed out once complete, so a
//! failed render never leaves a partial document behind.

/// Characters that end a line: `\n`, `\r`, vertical tab, form feed, the
/// ASCII file/group/record separators, NEL and the Unicode line and
/// paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` at line boundaries. `\r\n` counts as one break and a final
/// break does not start an empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Accumulates indented lines of one document.
#[derive(Debug, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// Append `text` indented by `indent` spaces.
    pub fn line<T: AsRef<str>>(&mut self, indent: usize, text: T) {
        self.lines
            .push(format!("{:indent$}{}", "", text.as_ref(), indent = indent));
    }

    /// Append `key: |` followed by the value, every line indented by two
    /// more spaces than the key. An empty value yields one indented empty line.
    /// Lines break at every Unicode line boundary, see [`split_lines`].
    pub fn literal_block(&mut self, indent: usize, key: &str, text: &str) {
        self.line(indent, format!("{key}: |"));
        let mut any = false;
        for l in split_lines(text) {
            self.line(indent + 2, l);
            any = true;
        }
        if !any {
            self.line(indent + 2, "");
        }
    }

    /// The finished document, ending in a single newline.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
