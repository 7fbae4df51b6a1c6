//! Parse and classify commands.

use anyhow::Result;
use clap::Args;
use entity_tags::{parse_tag, readable_string, tag_kind, Tag};
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, warn};

use crate::output::print_output;

use super::CommandContext;

/// Parse tags and show their kind and id.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Tags in `<kind>-<id>` form.
    #[arg(required = true)]
    tags: Vec<String>,
}

/// Classify tags by kind without validating their ids.
#[derive(Debug, Args)]
pub struct KindCommand {
    /// Tags in `<kind>-<id>` form.
    #[arg(required = true)]
    tags: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
pub(crate) struct TagView {
    #[tabled(rename = "TAG")]
    tag: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "READABLE")]
    readable: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            tag: tag.to_string(),
            kind: tag.kind().to_string(),
            id: tag.id().to_string(),
            readable: readable_string(Some(tag)),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct KindView {
    #[tabled(rename = "TAG")]
    tag: String,
    #[tabled(rename = "KIND")]
    kind: String,
}

/// Parse every input, failing on the first rejected tag.
fn parse_all(inputs: &[String]) -> Result<Vec<TagView>> {
    inputs
        .iter()
        .map(|raw| {
            let tag = parse_tag(raw).inspect_err(|e| warn!(tag = %raw, error = %e, "Rejected tag"))?;
            debug!(tag = %raw, kind = %tag.kind(), id = tag.id(), "Parsed tag");
            Ok(TagView::from(&tag))
        })
        .collect()
}

fn classify_all(inputs: &[String]) -> Result<Vec<KindView>> {
    inputs
        .iter()
        .map(|raw| {
            let kind = tag_kind(raw).inspect_err(|e| warn!(tag = %raw, error = %e, "Rejected tag"))?;
            debug!(tag = %raw, kind = %kind, "Classified tag");
            Ok(KindView {
                tag: raw.clone(),
                kind: kind.to_string(),
            })
        })
        .collect()
}

impl ParseCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let views = parse_all(&self.tags)?;
        print_output(&views, ctx.format);
        Ok(())
    }
}

impl KindCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let views = classify_all(&self.tags)?;
        print_output(&views, ctx.format);
        Ok(())
    }
}
