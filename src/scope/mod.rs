//! Nested filter scopes.
//!
//! Each `@begin` pushes a [`Scope`] that collects the lines produced while it
//! is open. The matching `@end` pops it and hands the lines to the filter's
//! close behaviour; the result is appended to the enclosing scope. The root
//! scope at the bottom of the [`BlockStack`] holds the document output.

pub mod stack;
pub mod types;

pub use stack::BlockStack;
pub use types::{ClosedScope, Scope};
