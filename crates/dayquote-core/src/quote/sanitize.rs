//! Display preparation for raw quote text
//!
//! All lengths here are counted in chars, not bytes, so CJK quotes get the
//! same 60-character budget as ASCII ones.

use std::borrow::Cow;
use std::fmt;

/// Maximum length of a quote shown in the widget
pub const MAX_DISPLAY_CHARS: usize = 60;

/// How far back from the budget edge we look for a sentence end
const SENTENCE_WINDOW: usize = 10;

const ELLIPSIS: &str = "...";

const SENTENCE_ENDS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

/// Sanitized, length-bounded quote text ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayQuote(String);

impl DisplayQuote {
    /// Sanitize and truncate raw text. Returns `None` when nothing printable
    /// is left.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let clean = sanitize(raw);
        if clean.is_empty() {
            return None;
        }
        Some(Self(truncate_for_display(&clean).into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DisplayQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse all whitespace (including `\r`, `\n`, `\t`) to single spaces,
/// trim the ends, and fold smart quotes to ASCII.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().map(normalize_quote));
    }
    out
}

fn normalize_quote(c: char) -> char {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
        other => other,
    }
}

/// Fit sanitized text into [`MAX_DISPLAY_CHARS`].
///
/// Prefers cutting right after the first sentence end in the last
/// [`SENTENCE_WINDOW`] chars of the budget; otherwise hard-cuts and appends
/// an ellipsis. Returns `Cow::Borrowed` when the text already fits.
pub fn truncate_for_display(text: &str) -> Cow<'_, str> {
    if text.chars().count() <= MAX_DISPLAY_CHARS {
        return Cow::Borrowed(text);
    }

    let window_start = MAX_DISPLAY_CHARS - SENTENCE_WINDOW;
    let sentence_end = text
        .chars()
        .enumerate()
        .skip(window_start)
        .take(SENTENCE_WINDOW)
        .find(|(_, c)| SENTENCE_ENDS.contains(c))
        .map(|(i, _)| i);

    if let Some(i) = sentence_end {
        return Cow::Owned(text.chars().take(i + 1).collect());
    }

    let head: String = text
        .chars()
        .take(MAX_DISPLAY_CHARS - ELLIPSIS.len())
        .collect();
    Cow::Owned(format!("{}{}", head, ELLIPSIS))
}
