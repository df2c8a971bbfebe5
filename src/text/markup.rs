//! Inline highlight markup: `[[phrase]]` marks a highlighted span, `|` is a literal space.

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// A contiguous span of text sharing one highlight flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSegment {
    /// Segment text with `|` already replaced by spaces.
    pub content: String,
    /// Whether the span was written as `[[...]]`.
    pub is_highlighted: bool,
}

impl TextSegment {
    fn new(raw: &str, is_highlighted: bool) -> Option<Self> {
        let content = raw.replace('|', " ");
        if content.is_empty() {
            return None;
        }
        Some(Self {
            content,
            is_highlighted,
        })
    }
}

/// Split `text` into ordered plain/highlighted segments.
///
/// Empty segments are dropped. Unbalanced or nested brackets fail soft: the whole input comes
/// back as a single plain segment.
pub fn parse_markup(text: &str) -> Vec<TextSegment> {
    match try_parse(text) {
        Some(segments) => segments,
        None => {
            tracing::debug!(text, "unbalanced highlight markup, rendering as plain text");
            TextSegment::new(text, false).into_iter().collect()
        }
    }
}

fn try_parse(text: &str) -> Option<Vec<TextSegment>> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(OPEN) {
        let before = &rest[..open];
        if before.contains(CLOSE) {
            return None;
        }
        out.extend(TextSegment::new(before, false));

        let after = &rest[open + OPEN.len()..];
        let close = after.find(CLOSE)?;
        let inner = &after[..close];
        if inner.contains(OPEN) {
            return None;
        }
        out.extend(TextSegment::new(inner, true));
        rest = &after[close + CLOSE.len()..];
    }

    if rest.contains(CLOSE) {
        return None;
    }
    out.extend(TextSegment::new(rest, false));
    Some(out)
}

/// Text with markup removed (and `|` normalized), as used for word and character counts.
pub fn plain_text(text: &str) -> String {
    parse_markup(text)
        .into_iter()
        .map(|s| s.content)
        .collect::<String>()
}

#[cfg(test)]
#[path = "../../tests/unit/text/markup.rs"]
mod tests;
