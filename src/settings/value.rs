/// Typed setting values and their declared kinds
use std::fmt;

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a finished line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Parse an alignment token (`left`, `right`, `center`)
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "left" => Some(Alignment::Left),
            "right" => Some(Alignment::Right),
            "center" => Some(Alignment::Center),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
        };
        write!(f, "{name}")
    }
}

/// Declared type of a setting, used to parse raw directive text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Integer,
    /// `on` / `off`
    Boolean,
    Alignment,
    /// Integer, then `on`/`off`, otherwise the raw token
    Inferred,
}

impl SettingKind {
    /// Human readable description used in error messages
    #[must_use]
    pub fn expected(self) -> &'static str {
        match self {
            SettingKind::Integer => "an integer",
            SettingKind::Boolean => "`on` or `off`",
            SettingKind::Alignment => "`left`, `right` or `center`",
            SettingKind::Inferred => "any value",
        }
    }

    /// Parse raw directive text as this kind
    #[must_use]
    pub fn parse(self, raw: &str) -> Option<SettingValue> {
        match self {
            SettingKind::Integer => raw.parse().ok().map(SettingValue::Integer),
            SettingKind::Boolean => parse_switch(raw).map(SettingValue::Boolean),
            SettingKind::Alignment => Alignment::from_token(raw).map(SettingValue::Alignment),
            SettingKind::Inferred => Some(SettingValue::infer(raw)),
        }
    }

    /// Whether `value` may be stored under a setting of this kind
    #[must_use]
    pub fn accepts(self, value: &SettingValue) -> bool {
        matches!(
            (self, value),
            (SettingKind::Inferred, _)
                | (SettingKind::Integer, SettingValue::Integer(_))
                | (SettingKind::Boolean, SettingValue::Boolean(_))
                | (SettingKind::Alignment, SettingValue::Alignment(_))
        )
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

/// A single value on a setting's stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Integer(i64),
    Boolean(bool),
    Alignment(Alignment),
    Text(String),
}

impl SettingValue {
    /// Coerce untyped text: integer first, then `on`/`off`, otherwise the raw token
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            return SettingValue::Integer(n);
        }
        match parse_switch(raw) {
            Some(b) => SettingValue::Boolean(b),
            None => SettingValue::Text(raw.to_string()),
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_alignment(&self) -> Option<Alignment> {
        match self {
            SettingValue::Alignment(a) => Some(*a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Integer(n) => write!(f, "{n}"),
            SettingValue::Boolean(true) => write!(f, "on"),
            SettingValue::Boolean(false) => write!(f, "off"),
            SettingValue::Alignment(a) => write!(f, "{a}"),
            SettingValue::Text(s) => write!(f, "{s}"),
        }
    }
}
