/// Built-in commands
use super::{Command, CommandContext};
use crate::error::Result;
use crate::filter::builtin::parse_count;
use crate::format::spaces;

/// `vspace [N]`: N blank lines (default 1), each as wide as the current width
pub struct VerticalSpace;

impl Command for VerticalSpace {
    fn run(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<()> {
        let count = match args.first() {
            Some(raw) => parse_count("vspace", raw, "expected a line count")?,
            None => 1,
        };
        let blank = spaces(ctx.settings().width());
        ctx.feed_lines(std::iter::repeat(blank).take(count));
        Ok(())
    }
}
