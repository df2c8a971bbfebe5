use std::collections::HashSet;

use crate::text::markup::TextSegment;

/// Width measurement in pixels.
///
/// Implemented by the shaper that also draws the text, so line breaks are computed from the
/// exact metrics used at render time.
pub trait TextMeasure {
    /// Advance width of `text` in pixels, trailing whitespace included.
    fn measure(&mut self, text: &str) -> f64;
}

/// Atomic wrap unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    /// Word text (no whitespace).
    pub text: String,
    /// Whether the word came from a highlighted segment.
    pub is_highlighted: bool,
}

impl Word {
    /// Plain (non-highlighted) word.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_highlighted: false,
        }
    }

    /// Highlighted word.
    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_highlighted: true,
        }
    }
}

/// One wrapped line of words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    /// Words in reading order.
    pub words: Vec<Word>,
}

impl Line {
    /// Words joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Short words that should not be left alone at the end of a line.
///
/// Matching is case-insensitive and ignores surrounding punctuation.
#[derive(Clone, Debug, Default)]
pub struct OrphanWords {
    words: HashSet<String>,
}

impl OrphanWords {
    /// Build the set from configured words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Return `true` when `word` is an orphan word.
    pub fn contains(&self, word: &str) -> bool {
        const PUNCT: &[char] = &[
            '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'', '-',
        ];
        let key = word.to_lowercase();
        self.words.contains(key.trim_matches(PUNCT))
    }
}

/// Flatten segments into words, preserving highlight flags and order.
///
/// Highlighted phrases split into independent highlighted words.
pub fn flatten_words(segments: &[TextSegment]) -> Vec<Word> {
    segments
        .iter()
        .flat_map(|seg| {
            seg.content.split_whitespace().map(|w| Word {
                text: w.to_owned(),
                is_highlighted: seg.is_highlighted,
            })
        })
        .collect()
}

#[derive(Clone, Debug)]
struct Measured {
    word: Word,
    width: f64,
}

/// Greedy pixel-budget word wrapper with orphan reflow.
pub struct WordWrapper<'a> {
    max_width: f64,
    orphans: &'a OrphanWords,
}

impl<'a> WordWrapper<'a> {
    /// Create a wrapper for a usable width of `max_width` pixels.
    pub fn new(max_width: f64, orphans: &'a OrphanWords) -> Self {
        Self { max_width, orphans }
    }

    /// Wrap `segments` into lines measured with `measure`.
    pub fn wrap(&self, segments: &[TextSegment], measure: &mut dyn TextMeasure) -> Vec<Line> {
        let words: Vec<Measured> = flatten_words(segments)
            .into_iter()
            .map(|word| {
                let width = measure.measure(&format!("{} ", word.text));
                Measured { word, width }
            })
            .collect();

        let mut lines = self.greedy(words);
        self.reflow(&mut lines);

        lines
            .into_iter()
            .map(|l| Line {
                words: l.into_iter().map(|m| m.word).collect(),
            })
            .collect()
    }

    fn is_orphan(&self, m: &Measured) -> bool {
        self.orphans.contains(&m.word.text)
    }

    fn greedy(&self, words: Vec<Measured>) -> Vec<Vec<Measured>> {
        let mut lines = Vec::new();
        let mut current: Vec<Measured> = Vec::new();
        let mut acc = 0.0;

        let mut iter = words.into_iter().peekable();
        while let Some(next) = iter.peek() {
            if acc + next.width <= self.max_width {
                acc += next.width;
                if let Some(w) = iter.next() {
                    current.push(w);
                }
                continue;
            }

            if current.is_empty() {
                // Wider than the whole budget on its own.
                if let Some(w) = iter.next() {
                    lines.push(vec![w]);
                }
                continue;
            }

            let trailing_orphan =
                current.len() > 1 && current.last().is_some_and(|m| self.is_orphan(m));
            if trailing_orphan && let Some(orphan) = current.pop() {
                acc = orphan.width;
                lines.push(std::mem::replace(&mut current, vec![orphan]));
            } else {
                lines.push(std::mem::take(&mut current));
                acc = 0.0;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Move line-trailing orphans down, pushing overflow forward so no line exceeds the budget.
    fn reflow(&self, lines: &mut Vec<Vec<Measured>>) {
        let mut j = 0;
        while j < lines.len() {
            while lines[j].len() > 1 && line_width(&lines[j]) > self.max_width {
                if let Some(w) = lines[j].pop() {
                    push_front(lines, j + 1, w);
                }
            }

            if j + 1 < lines.len() {
                while lines[j].len() > 1 && lines[j].last().is_some_and(|m| self.is_orphan(m)) {
                    if let Some(w) = lines[j].pop() {
                        lines[j + 1].insert(0, w);
                    }
                }
            }
            j += 1;
        }
    }
}

fn line_width(line: &[Measured]) -> f64 {
    line.iter().map(|m| m.width).sum()
}

fn push_front(lines: &mut Vec<Vec<Measured>>, idx: usize, w: Measured) {
    if idx == lines.len() {
        lines.push(vec![w]);
    } else {
        lines[idx].insert(0, w);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
