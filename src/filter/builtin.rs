/// Built-in filters: `underline`, `margin`, `twocols`, `li`
use super::Filter;
use crate::config::Config;
use crate::error::{LowtexError, Result};
use crate::format::{display_len, pad_right, spaces};
use crate::settings::{ScopedSettings, SettingValue, SettingsStack};

/// Width consumed by the `li` bullet
const BULLET_WIDTH: usize = 2;

/// Parse a numeric filter or command argument, capped at [`Config::MAX_WIDTH`]
pub(crate) fn parse_count(owner: &str, raw: &str, expected: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n <= Config::MAX_WIDTH => Ok(n),
        Ok(_) => Err(LowtexError::invalid_argument(
            owner,
            raw,
            format!("must be at most {}", Config::MAX_WIDTH),
        )),
        Err(_) => Err(LowtexError::invalid_argument(owner, raw, expected)),
    }
}

fn margin_size(args: &[String]) -> Result<usize> {
    let raw = args
        .first()
        .ok_or_else(|| LowtexError::invalid_argument("margin", "", "expected a column count"))?;
    parse_count("margin", raw, "expected a column count")
}

/// Replace every non-whitespace char with `-`
#[must_use]
pub fn ink_rule(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_whitespace() { c } else { '-' })
        .collect()
}

/// Follows each line with a dash rule under its non-whitespace chars
pub struct Underline;

impl Filter for Underline {
    fn close(
        &self,
        lines: Vec<String>,
        _args: &[String],
        _settings: &SettingsStack,
    ) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(lines.len() * 2);
        for line in lines {
            let rule = ink_rule(&line);
            out.push(line);
            out.push(rule);
        }
        Ok(out)
    }
}

/// `margin SIZE`: narrows the width by SIZE and indents the block by SIZE
pub struct Margin;

impl Filter for Margin {
    fn open(&self, args: &[String], settings: &mut ScopedSettings<'_>) -> Result<()> {
        let size = margin_size(args)?;
        let width = settings.width().saturating_sub(size);
        settings.set_width(width)
    }

    fn close(
        &self,
        lines: Vec<String>,
        args: &[String],
        _settings: &SettingsStack,
    ) -> Result<Vec<String>> {
        let margin = spaces(margin_size(args)?);
        Ok(lines.into_iter().map(|l| format!("{margin}{l}")).collect())
    }
}

/// `twocols`: lays the block out in two side-by-side columns
pub struct TwoColumns;

impl TwoColumns {
    /// Column width for a page of `width`: half, minus one for the gutter
    #[must_use]
    pub fn column_width(width: usize) -> usize {
        (width / 2).saturating_sub(1)
    }
}

impl Filter for TwoColumns {
    fn open(&self, _args: &[String], settings: &mut ScopedSettings<'_>) -> Result<()> {
        let column = Self::column_width(settings.width());
        settings.set_width(column)
    }

    fn close(
        &self,
        lines: Vec<String>,
        _args: &[String],
        settings: &SettingsStack,
    ) -> Result<Vec<String>> {
        let width = settings.width();
        let column = Self::column_width(width);
        let gutter = spaces(width.saturating_sub(2 * column));
        let rows = lines.len().div_ceil(2);

        let mut out = Vec::with_capacity(rows);
        for i in 0..rows {
            let left = pad_right(&lines[i], column);
            let right = match lines.get(i + rows) {
                Some(r) => r.clone(),
                None => spaces(display_len(&left)),
            };
            out.push(format!("{left}{gutter}{right}"));
        }
        Ok(out)
    }
}

/// `li`: a hanging-indent bullet item
pub struct ListItem;

impl Filter for ListItem {
    fn open(&self, _args: &[String], settings: &mut ScopedSettings<'_>) -> Result<()> {
        let width = settings.width().saturating_sub(BULLET_WIDTH);
        settings.set_width(width)?;
        settings.set_value("indent", SettingValue::Boolean(false))
    }

    fn close(
        &self,
        lines: Vec<String>,
        _args: &[String],
        _settings: &SettingsStack,
    ) -> Result<Vec<String>> {
        Ok(lines
            .into_iter()
            .enumerate()
            .map(|(i, l)| if i == 0 { format!("- {l}") } else { format!("  {l}") })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| (*s).to_string()).collect()
    }

    fn open_with(filter: &dyn Filter, args: &[&str], settings: &mut SettingsStack) {
        let args = strings(args);
        let mut scoped = ScopedSettings::new(settings);
        filter.open(&args, &mut scoped).unwrap();
    }

    #[test]
    fn test_underline_ink_only() {
        let out = Underline
            .close(strings(&["ab cd"]), &[], &SettingsStack::new())
            .unwrap();
        assert_eq!(out, vec!["ab cd", "-- --"]);
    }

    #[test]
    fn test_underline_keeps_padding_blank() {
        let out = Underline
            .close(strings(&[" x  "]), &[], &SettingsStack::new())
            .unwrap();
        assert_eq!(out, vec![" x  ", " -  "]);
    }

    #[test]
    fn test_margin_narrows_width() {
        let mut settings = SettingsStack::new();
        open_with(&Margin, &["3"], &mut settings);
        assert_eq!(settings.width(), 77);
    }

    #[test]
    fn test_margin_prefixes_lines() {
        let out = Margin
            .close(strings(&["x", "yz"]), &strings(&["3"]), &SettingsStack::new())
            .unwrap();
        assert_eq!(out, vec!["   x", "   yz"]);
    }

    #[test]
    fn test_margin_requires_numeric_size() {
        let mut settings = SettingsStack::new();
        let mut scoped = ScopedSettings::new(&mut settings);
        let err = Margin.open(&strings(&["wide"]), &mut scoped).unwrap_err();
        assert!(matches!(err, LowtexError::InvalidArgument { .. }));
        let err = Margin.open(&[], &mut scoped).unwrap_err();
        assert!(matches!(err, LowtexError::InvalidArgument { .. }));
    }

    #[test]
    fn test_margin_size_is_bounded() {
        let mut settings = SettingsStack::new();
        let mut scoped = ScopedSettings::new(&mut settings);
        let err = Margin
            .open(&strings(&["18446744073709551615"]), &mut scoped)
            .unwrap_err();
        assert!(matches!(err, LowtexError::InvalidArgument { .. }));
        let err = Margin
            .close(vec!["x".to_string()], &strings(&["1001"]), &SettingsStack::new())
            .unwrap_err();
        assert!(matches!(err, LowtexError::InvalidArgument { .. }));
        Margin.open(&strings(&["1000"]), &mut scoped).unwrap();
    }

    #[test]
    fn test_twocols_halves_width() {
        let mut settings = SettingsStack::new();
        open_with(&TwoColumns, &[], &mut settings);
        assert_eq!(settings.width(), 39);
    }

    #[test]
    fn test_twocols_pairs_halves() {
        let mut settings = SettingsStack::new();
        settings.set("width", "10").unwrap();
        let out = TwoColumns
            .close(strings(&["a", "b", "c", "d"]), &[], &settings)
            .unwrap();
        // column width 4, gutter 2
        assert_eq!(out, vec!["a     c", "b     d"]);
    }

    #[test]
    fn test_twocols_odd_count_fills_blank_right() {
        let mut settings = SettingsStack::new();
        settings.set("width", "10").unwrap();
        let out = TwoColumns
            .close(strings(&["a", "b", "c"]), &[], &settings)
            .unwrap();
        assert_eq!(out, vec!["a     c", "b         "]);
        assert_eq!(out[1].len(), 10);
    }

    #[test]
    fn test_twocols_empty_block() {
        let out = TwoColumns
            .close(Vec::new(), &[], &SettingsStack::new())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_li_opens_narrower_without_indent() {
        let mut settings = SettingsStack::new();
        settings.set("indent", "on").unwrap();
        open_with(&ListItem, &[], &mut settings);
        assert_eq!(settings.width(), 78);
        assert!(!settings.indent());
    }

    #[test]
    fn test_li_hanging_indent() {
        let out = ListItem
            .close(strings(&["first", "second", "third"]), &[], &SettingsStack::new())
            .unwrap();
        assert_eq!(out, vec!["- first", "  second", "  third"]);
    }

    #[test]
    fn test_ink_rule_tabs_stay() {
        assert_eq!(ink_rule("a\tb"), "-\t-");
    }
}
