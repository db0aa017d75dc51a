/// Greedy word wrapping of prose into a pending paragraph
///
/// Words are appended to the paragraph buffer with single spaces while the
/// result stays strictly shorter than the target width. A word that would
/// overflow closes the current line and starts the next one. A word that is
/// longer than the width on its own is never split and becomes an overlong line.
use super::inline::apply_emphasis;

/// Number of spaces opening an indented paragraph
pub const PARAGRAPH_INDENT: usize = 3;

/// In-progress paragraph line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    buffer: String,
    /// Length of `buffer` in chars
    len: usize,
    has_words: bool,
}

impl Paragraph {
    /// Start a paragraph, optionally with a first-line indent
    #[must_use]
    pub fn new(indent: bool) -> Self {
        if indent {
            Self {
                buffer: " ".repeat(PARAGRAPH_INDENT),
                len: PARAGRAPH_INDENT,
                has_words: false,
            }
        } else {
            Self::default()
        }
    }

    /// Whether any word has been added
    #[must_use]
    pub fn has_words(&self) -> bool {
        self.has_words
    }

    /// The pending text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn push_word(&mut self, word: &str, word_len: usize) {
        if self.has_words {
            self.buffer.push(' ');
            self.len += 1;
        }
        self.buffer.push_str(word);
        self.len += word_len;
        self.has_words = true;
    }

    fn take_line(&mut self) -> String {
        self.len = 0;
        self.has_words = false;
        std::mem::take(&mut self.buffer)
    }
}

/// Feed one prose line into `paragraph`, returning the lines it completed
///
/// Returned lines are unpadded; the caller aligns them.
pub fn wrap_words(line: &str, paragraph: &mut Paragraph, width: usize) -> Vec<String> {
    let line = apply_emphasis(line);
    let mut completed = Vec::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let separator = usize::from(paragraph.has_words);
        let candidate = paragraph.len + separator + word_len;

        if candidate >= width && paragraph.has_words {
            completed.push(paragraph.take_line());
        }
        paragraph.push_word(word, word_len);
    }

    completed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_all(text: &str, width: usize) -> Vec<String> {
        let mut paragraph = Paragraph::new(false);
        let mut lines = Vec::new();
        for line in text.lines() {
            lines.extend(wrap_words(line, &mut paragraph, width));
        }
        if paragraph.has_words() {
            lines.push(paragraph.as_str().to_string());
        }
        lines
    }

    #[test]
    fn test_short_line_stays_pending() {
        let mut paragraph = Paragraph::new(false);
        let done = wrap_words("Hello world", &mut paragraph, 80);
        assert!(done.is_empty());
        assert_eq!(paragraph.as_str(), "Hello world");
    }

    #[test]
    fn test_wraps_strictly_below_width() {
        // "aaa bbb" is 7 chars: fits in width 8, not in width 7
        assert_eq!(wrap_all("aaa bbb", 8), vec!["aaa bbb"]);
        assert_eq!(wrap_all("aaa bbb", 7), vec!["aaa", "bbb"]);
    }

    #[test]
    fn test_words_join_across_input_lines() {
        assert_eq!(
            wrap_all("one two\nthree four", 80),
            vec!["one two three four"]
        );
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(wrap_all("  a \t  b   ", 80), vec!["a b"]);
    }

    #[test]
    fn test_overlong_word_is_its_own_line() {
        assert_eq!(
            wrap_all("a supercalifragilistic b", 10),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn test_overlong_first_word_emits_no_empty_line() {
        assert_eq!(wrap_all("abcdefghijkl x", 5), vec!["abcdefghijkl", "x"]);
    }

    #[test]
    fn test_first_word_needs_no_separator() {
        // A first word of width - 1 chars stays on the line; the next word breaks
        assert_eq!(wrap_all("abcd ef", 5), vec!["abcd", "ef"]);
        // A first word of exactly the width is an overlong line of its own
        assert_eq!(wrap_all("abcde f", 5), vec!["abcde", "f"]);
    }

    #[test]
    fn test_indent_counts_toward_first_word() {
        // "   abcd" is 7 chars: the indent takes no separator either
        let mut paragraph = Paragraph::new(true);
        let done = wrap_words("abcd ef", &mut paragraph, 8);
        assert_eq!(done, vec!["   abcd"]);
        assert_eq!(paragraph.as_str(), "ef");
    }

    #[test]
    fn test_indent_prefixes_first_line_only() {
        let mut paragraph = Paragraph::new(true);
        let done = wrap_words("aa bb cc", &mut paragraph, 10);
        assert_eq!(done, vec!["   aa bb"]);
        assert_eq!(paragraph.as_str(), "cc");
    }

    #[test]
    fn test_emphasis_applied_before_splitting() {
        assert_eq!(wrap_all("say **hi there**", 80), vec!["say HI THERE"]);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // Each word is 3 chars but 6 bytes
        assert_eq!(wrap_all("äöü äöü", 8), vec!["äöü äöü"]);
    }
}
