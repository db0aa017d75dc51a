//! Error types and result aliases for lowtex.
//!
//! This module defines the error handling infrastructure:
//! - [`LowtexError`]: every failure the converter can report while processing a document
//! - [`Result<T>`]: Type alias defaulting the error type to [`LowtexError`]
//!
//! The stream driver and the binary wrap these in `anyhow` to attach line context.

/// Result alias used throughout the crate
pub type Result<T, E = LowtexError> = std::result::Result<T, E>;

/// Errors raised while interpreting a document
#[derive(Debug, thiserror::Error)]
pub enum LowtexError {
    /// `@begin` named a filter that is not registered
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// A directive named neither a built-in nor a registered command
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A setting was read or written without being declared first
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// `@end` with only the root scope on the stack
    #[error("@end without a matching @begin")]
    UnbalancedScope,

    /// `@end NAME` where NAME is not the innermost open filter
    #[error("@end {found} does not close the innermost scope ({expected})")]
    MismatchedEnd { expected: String, found: String },

    /// Input ended while a scope was still open
    #[error("scope `{0}` is still open at end of input")]
    UnclosedScope(String),

    /// `@unset` would leave a setting without any value
    #[error("cannot unset `{0}`: no value left to restore")]
    EmptySettingStack(String),

    /// A value that does not parse as the setting's declared kind
    #[error("invalid value {value:?} for setting `{name}`: expected {expected}")]
    InvalidSettingValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    /// A plugin tried to declare a setting that already exists
    #[error("setting `{0}` is already declared")]
    DuplicateSetting(String),

    /// A directive is missing a required token
    #[error("@{directive} expects {expected}")]
    MissingArgument {
        directive: &'static str,
        expected: &'static str,
    },

    /// A filter or command argument could not be used
    #[error("invalid argument {value:?} for `{name}`: {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    /// A filter's open or close behaviour failed during a scope transition
    #[error("filter `{filter}` failed on @{directive}")]
    FilterFailed {
        filter: String,
        directive: &'static str,
        #[source]
        source: Box<LowtexError>,
    },

    /// A registered command failed
    #[error("command `{command}` failed")]
    CommandFailed {
        command: String,
        #[source]
        source: Box<LowtexError>,
    },

    /// A plugin bundle was rejected at load time
    #[error("plugin `{plugin}` rejected: {reason}")]
    ExtensionConflict { plugin: String, reason: String },

    /// Free-form failure raised from plugin code
    #[error("{0}")]
    Plugin(String),
}

impl LowtexError {
    /// Innermost error, looking through `FilterFailed` and `CommandFailed` wrappers
    #[must_use]
    pub fn root_cause(&self) -> &LowtexError {
        match self {
            LowtexError::FilterFailed { source, .. } | LowtexError::CommandFailed { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    pub(crate) fn invalid_argument(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LowtexError::InvalidArgument {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
