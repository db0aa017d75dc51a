//! Document processing.
//!
//! Processing is a single streaming pass:
//!
//! - Each input line is classified as a directive (`@...`), a comment
//!   (`#...`), a blank line or prose
//! - Directives open and close filter scopes, push and pop settings, enable
//!   plugins or run commands
//! - Prose is reflowed into the pending paragraph; completed lines are
//!   aligned and appended to the innermost open scope
//! - At end of input the pending paragraph is flushed and the root scope's
//!   lines become the output
//!
//! [`Converter`] holds the state; [`convert`] drives it from any `BufRead`
//! and writes to any `Write` implementation.

pub mod converter;
pub mod pipeline;

pub use converter::Converter;
pub use pipeline::{convert, convert_str, convert_to_file};
