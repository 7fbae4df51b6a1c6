//! Build a tag from a human-readable id.

use anyhow::Result;
use clap::Args;
use entity_tags::{check_kind, Kind, Tag};
use tracing::debug;

use crate::output::print_single;

use super::parse::TagView;
use super::CommandContext;

/// Build a tag from a kind and a human-readable id.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Tag kind (see `tagctl kinds`).
    #[arg(value_parser = parse_kind)]
    kind: Kind,

    /// Human-readable id, e.g. `mysql/0` for a unit.
    id: String,
}

fn parse_kind(value: &str) -> Result<Kind, String> {
    check_kind(value).map_err(|e| e.to_string())
}

impl NewCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let tag = Tag::new(self.kind, &self.id)?;
        debug!(kind = %self.kind, id = %self.id, tag = %tag, "Built tag");
        print_single(&TagView::from(&tag), ctx.format);
        Ok(())
    }
}
