// ==========================================
// BQC Generator - rich text to runs
// ==========================================
// Input: explanatory-note HTML with a small inline whitelist
//        (<br>, <b>/<strong>, <i>/<em>, <u>)
// Output: ordered styled runs
// Rule: malformed markup never fails, worst case the span
//       loses its formatting
// ==========================================

use crate::document::model::Run;

/// Bold / italic / underline flags of the text being emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RunStyle {
    fn apply(&self, text: String) -> Run {
        Run {
            text,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            ..Default::default()
        }
    }
}

// ==========================================
// FormatStack
// ==========================================
// Opening tag: save current style, then switch one flag on.
// Closing tag: restore the saved style; empty stack → default.
#[derive(Debug, Default)]
pub struct FormatStack {
    current: RunStyle,
    saved: Vec<RunStyle>,
}

impl FormatStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> RunStyle {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn push(&mut self, tag: InlineTag) {
        self.saved.push(self.current);
        match tag {
            InlineTag::Bold => self.current.bold = true,
            InlineTag::Italic => self.current.italic = true,
            InlineTag::Underline => self.current.underline = true,
        }
    }

    pub fn pop(&mut self) {
        self.current = self.saved.pop().unwrap_or_default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTag {
    Bold,
    Italic,
    Underline,
}

impl InlineTag {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "b" | "strong" => Some(InlineTag::Bold),
            "i" | "em" => Some(InlineTag::Italic),
            "u" => Some(InlineTag::Underline),
            _ => None,
        }
    }
}

// ==========================================
// Conversion
// ==========================================

/// Convert note HTML into runs; never returns an empty sequence
pub fn html_to_runs(html: &str) -> Vec<Run> {
    if html.trim().is_empty() {
        return vec![Run::text("")];
    }

    let lines = split_on_br(html);
    let mut runs = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            runs.push(Run::line_break());
        }
        convert_line(line, &mut runs);
    }

    if runs.is_empty() {
        runs.push(Run::text(""));
    }
    runs
}

/// Split on `<br>`, `<br/>`, `<br />` (any case)
fn split_on_br(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        current.push_str(&rest[..start]);
        let after = &rest[start..];
        if !opens_tag(after) {
            current.push('<');
            rest = &after[1..];
            continue;
        }
        match after.find('>') {
            Some(end) => {
                let tag = &after[..=end];
                if tag_name(tag).as_deref() == Some("br") {
                    lines.push(std::mem::take(&mut current));
                } else {
                    current.push_str(tag);
                }
                rest = &after[end + 1..];
            }
            None => {
                current.push_str(after);
                rest = "";
            }
        }
    }
    current.push_str(rest);
    lines.push(current);
    lines
}

fn convert_line(line: &str, runs: &mut Vec<Run>) {
    let mut stack = FormatStack::new();
    let mut text = String::new();
    let mut rest = line;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let after = &rest[start..];
        if !opens_tag(after) {
            // "a < b": a bare "<" is literal text
            text.push('<');
            rest = &after[1..];
            continue;
        }
        let Some(end) = after.find('>') else {
            // unterminated "<": keep it as literal text
            text.push_str(after);
            rest = "";
            break;
        };

        let tag = &after[..=end];
        rest = &after[end + 1..];

        let closing = tag.starts_with("</");
        let Some(inline) = tag_name(tag).and_then(|n| InlineTag::from_name(&n)) else {
            continue;
        };

        flush(&mut text, stack.current(), runs);
        if closing {
            stack.pop();
        } else if !tag.ends_with("/>") {
            stack.push(inline);
        }
    }
    text.push_str(rest);
    flush(&mut text, stack.current(), runs);
}

fn flush(text: &mut String, style: RunStyle, runs: &mut Vec<Run>) {
    if text.is_empty() {
        return;
    }
    runs.push(style.apply(decode_entities(&std::mem::take(text))));
}

/// `<` starts markup only when a letter follows it, or `/` and a letter
fn opens_tag(after: &str) -> bool {
    let body = after.strip_prefix('<').unwrap_or(after);
    let body = body.strip_prefix('/').unwrap_or(body);
    body.starts_with(|c: char| c.is_ascii_alphabetic())
}

/// Lower-cased element name of `<tag ...>` / `</tag>` / `<tag/>`
fn tag_name(tag: &str) -> Option<String> {
    let inner = tag.strip_prefix('<')?.strip_suffix('>')?;
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    if !inner.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
