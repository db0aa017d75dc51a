//! Text layout.
//!
//! This module contains the layout primitives the converter builds on:
//! - [`inline`]: `**emphasis**` markup applied to prose before wrapping
//! - [`wrap`]: Greedy word wrapping into a pending [`Paragraph`]
//! - [`aligner`]: Left/right/center alignment by space padding

pub mod aligner;
pub mod inline;
pub mod wrap;

pub use aligner::{align, display_len, pad_right, spaces};
pub use inline::apply_emphasis;
pub use wrap::{wrap_words, Paragraph, PARAGRAPH_INDENT};
