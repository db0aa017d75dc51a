/// `BlockStack` - Stack of open scopes above a permanent root
use super::types::{ClosedScope, Scope};
use crate::error::{LowtexError, Result};

#[derive(Debug)]
pub struct BlockStack {
    scopes: Vec<Scope>,
}

impl Default for BlockStack {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStack {
    /// A stack holding only the root scope
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::root()],
        }
    }

    /// Number of open filter scopes (the root is not counted)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Pop the innermost filter scope
    pub fn pop(&mut self) -> Result<ClosedScope> {
        if self.scopes.len() <= 1 {
            return Err(LowtexError::UnbalancedScope);
        }
        self.scopes
            .pop()
            .map(Scope::into_parts)
            .ok_or(LowtexError::UnbalancedScope)
    }

    /// Innermost scope (the root when nothing is open)
    #[must_use]
    pub fn top(&self) -> &Scope {
        // The root is never popped
        &self.scopes[self.scopes.len() - 1]
    }

    /// Append lines to the innermost scope
    pub fn feed_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let last = self.scopes.len() - 1;
        self.scopes[last].lines.extend(lines);
    }

    /// Consume the stack, yielding the root lines
    ///
    /// Fails with [`LowtexError::UnclosedScope`] if a filter scope is still open.
    pub fn into_root_lines(mut self) -> Result<Vec<String>> {
        if let Some(open) = self.scopes.iter().find(|s| !s.is_root()) {
            return Err(LowtexError::UnclosedScope(open.name().to_string()));
        }
        Ok(std::mem::take(&mut self.scopes[0].lines))
    }
}
