/// Inline markup applied to prose before wrapping
///
/// `**text**` on a single line is uppercased and the delimiters are dropped.
/// Runs do not nest and there is no escape syntax.
use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// Uppercase every `**...**` run in `line`
#[must_use]
pub fn apply_emphasis(line: &str) -> Cow<'_, str> {
    EMPHASIS_RE.replace_all(line, |caps: &Captures<'_>| caps[1].to_uppercase())
}
