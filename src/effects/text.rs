//! Character splitting for staggered heading reveals.

/// Stagger between consecutive characters of a reveal, in seconds.
pub const CHAR_STAGGER: f64 = 0.03;

/// One unit of split text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    /// A visible character, animated on its own.
    Char(char),
    /// A space, kept as plain text and never animated.
    Space,
}

/// Heading text split into lines of glyphs.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SplitText {
    /// Non-empty, trimmed lines in order.
    pub lines: Vec<Vec<Glyph>>,
}

impl SplitText {
    /// Number of animated glyphs (spaces excluded).
    pub fn char_count(&self) -> usize {
        self.lines
            .iter()
            .flatten()
            .filter(|g| matches!(g, Glyph::Char(_)))
            .count()
    }

    /// Markup with one `<span class="char">` per character and `<br>` between lines.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push_str("<br>");
            }
            for g in line {
                match g {
                    Glyph::Char(c) => {
                        out.push_str("<span class=\"char\">");
                        out.push(*c);
                        out.push_str("</span>");
                    }
                    Glyph::Space => out.push(' '),
                }
            }
        }
        out
    }
}

/// Split `html` on line breaks (`<br>`, `<br/>`, `<br />`, any case), trim each line and
/// drop the empty ones.
pub fn split_chars(html: &str) -> SplitText {
    let lines = split_on_breaks(html)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.chars()
                .map(|c| if c == ' ' { Glyph::Space } else { Glyph::Char(c) })
                .collect()
        })
        .collect();
    SplitText { lines }
}

fn split_on_breaks(html: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = html;
    loop {
        match find_break(rest) {
            Some((at, len)) => {
                parts.push(&rest[..at]);
                rest = &rest[at + len..];
            }
            None => {
                parts.push(rest);
                return parts;
            }
        }
    }
}

/// Byte offset and length of the first `<br\s*/?>` in `s`.
fn find_break(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut from = 0;
    while let Some(pos) = s[from..].find('<') {
        let start = from + pos;
        if let Some(len) = match_break(&bytes[start..]) {
            return Some((start, len));
        }
        from = start + 1;
    }
    None
}

fn match_break(b: &[u8]) -> Option<usize> {
    if b.len() < 4 || !b[1..3].eq_ignore_ascii_case(b"br") {
        return None;
    }
    let mut i = 3;
    while i < b.len() && b[i].is_ascii_whitespace() {
        i += 1;
    }
    if b.get(i) == Some(&b'/') {
        i += 1;
    }
    (b.get(i) == Some(&b'>')).then_some(i + 1)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/text.rs"]
mod tests;
