/// One frame of the block stack
use std::fmt;
use std::rc::Rc;

use crate::filter::Filter;
use crate::settings::RestoreToken;

/// A nested block opened by `@begin` and closed by `@end`
pub struct Scope {
    /// Filter name as written in the directive, `None` for the root
    name: Option<String>,
    filter: Option<Rc<dyn Filter>>,
    args: Vec<String>,
    /// Raw output lines accumulated while open
    pub lines: Vec<String>,
    restore: RestoreToken,
}

impl Scope {
    /// The bottom-most scope; never popped
    #[must_use]
    pub fn root() -> Self {
        Self {
            name: None,
            filter: None,
            args: Vec::new(),
            lines: Vec::new(),
            restore: RestoreToken::default(),
        }
    }

    /// A filter scope
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        filter: Rc<dyn Filter>,
        args: Vec<String>,
        restore: RestoreToken,
    ) -> Self {
        Self {
            name: Some(name.into()),
            filter: Some(filter),
            args,
            lines: Vec::new(),
            restore,
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.filter.is_none()
    }

    /// Filter name, `"root"` for the root scope
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("root")
    }

    /// Split a closed scope into its parts
    #[must_use]
    pub fn into_parts(self) -> ClosedScope {
        ClosedScope {
            name: self.name.unwrap_or_else(|| "root".to_string()),
            filter: self.filter,
            args: self.args,
            lines: self.lines,
            restore: self.restore,
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name())
            .field("args", &self.args)
            .field("lines", &self.lines.len())
            .field("restore", &self.restore)
            .finish_non_exhaustive()
    }
}

/// A popped scope, ready for its filter's close behaviour
pub struct ClosedScope {
    pub name: String,
    pub filter: Option<Rc<dyn Filter>>,
    pub args: Vec<String>,
    pub lines: Vec<String>,
    pub restore: RestoreToken,
}
