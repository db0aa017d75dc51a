/// Line alignment by space padding
///
/// A finished line of length `L` is padded to exactly `width` columns:
/// `pad = width - L`, split into `pad / 2` on the left and the remainder on
/// the right. Left alignment puts all padding after the text, right alignment
/// puts it all before, center uses the split. Lines already at or past the
/// width are returned unchanged.
use crate::settings::Alignment;

/// Pre-allocated run of spaces for padding.
const SPACES: &str = "                                                                                                                                ";

/// A string of `count` spaces
#[must_use]
pub fn spaces(count: usize) -> String {
    if count <= SPACES.len() {
        SPACES[..count].to_string()
    } else {
        " ".repeat(count)
    }
}

/// Length of a line in columns (one per char)
#[must_use]
pub fn display_len(line: &str) -> usize {
    line.chars().count()
}

/// Pad `line` to `width` according to `alignment`
#[must_use]
pub fn align(line: &str, width: usize, alignment: Alignment) -> String {
    let pad = width.saturating_sub(display_len(line));
    let left = pad / 2;
    let right = pad - left;

    let mut out = String::with_capacity(line.len() + pad);
    match alignment {
        Alignment::Left => {
            out.push_str(line);
            out.push_str(&spaces(pad));
        }
        Alignment::Right => {
            out.push_str(&spaces(pad));
            out.push_str(line);
        }
        Alignment::Center => {
            out.push_str(&spaces(left));
            out.push_str(line);
            out.push_str(&spaces(right));
        }
    }
    out
}

/// Pad `line` on the right so it spans at least `width` columns
#[must_use]
pub fn pad_right(line: &str, width: usize) -> String {
    align(line, width, Alignment::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left() {
        let out = align("abc", 8, Alignment::Left);
        assert_eq!(out, "abc     ");
        assert!(out.starts_with("abc"));
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_right() {
        let out = align("abc", 8, Alignment::Right);
        assert_eq!(out, "     abc");
        assert!(out.ends_with("abc"));
    }

    #[test]
    fn test_center_remainder_goes_right() {
        // pad = 5 -> 2 left, 3 right
        assert_eq!(align("abc", 8, Alignment::Center), "  abc   ");
        // pad = 4 -> 2 left, 2 right
        assert_eq!(align("ab", 6, Alignment::Center), "  ab  ");
    }

    #[test]
    fn test_total_length_is_width() {
        for width in 0..20 {
            for alignment in [Alignment::Left, Alignment::Right, Alignment::Center] {
                let out = align("xyz", width, alignment);
                assert_eq!(display_len(&out), width.max(3));
            }
        }
    }

    #[test]
    fn test_overlong_line_unchanged() {
        assert_eq!(align("abcdef", 4, Alignment::Center), "abcdef");
    }

    #[test]
    fn test_empty_line_is_blank_row() {
        assert_eq!(align("", 3, Alignment::Right), "   ");
    }

    #[test]
    fn test_spaces_beyond_buffer() {
        assert_eq!(spaces(300).len(), 300);
        assert_eq!(spaces(0), "");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("a", 4), "a   ");
        assert_eq!(pad_right("abcde", 4), "abcde");
    }
}
