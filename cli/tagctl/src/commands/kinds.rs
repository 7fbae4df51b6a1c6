//! List the supported kinds.

use anyhow::Result;
use entity_tags::Kind;
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Serialize, Tabled)]
struct KindRow {
    #[tabled(rename = "KIND")]
    kind: &'static str,
    #[tabled(rename = "EXAMPLE")]
    example: &'static str,
}

fn example(kind: Kind) -> &'static str {
    match kind {
        Kind::Unit => "unit-mysql-0",
        Kind::Machine => "machine-0-lxc-1",
        Kind::Service => "service-wordpress",
        Kind::User => "user-bob@local",
        Kind::Model => "model-6ba7b810-9dad-11d1-80b4-00c04fd430c8",
        Kind::Relation => "relation-wordpress.db#mysql.server",
        Kind::Network => "network-net1",
        Kind::Action => "action-6ba7b810-9dad-11d1-80b4-00c04fd430c8",
        Kind::Volume => "volume-0-1",
        Kind::Charm => "charm-cs:trusty/mysql-42",
        Kind::Storage => "storage-data-0",
        Kind::Filesystem => "filesystem-0-1",
        Kind::IpAddress => "ipaddress-6ba7b810-9dad-11d1-80b4-00c04fd430c8",
        Kind::Subnet => "subnet-10.0.0.0/24",
        Kind::Space => "space-db",
        Kind::Payload => "payload-6ba7b810-9dad-11d1-80b4-00c04fd430c8",
    }
}

fn rows() -> Vec<KindRow> {
    Kind::ALL
        .into_iter()
        .map(|kind| KindRow {
            kind: kind.as_str(),
            example: example(kind),
        })
        .collect()
}

pub fn run(ctx: &CommandContext) -> Result<()> {
    print_output(&rows(), ctx.format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use entity_tags::parse_tag;

    use super::*;

    #[test]
    fn every_example_parses_as_its_kind() {
        for row in rows() {
            let tag = parse_tag(row.example).unwrap();
            assert_eq!(tag.kind().as_str(), row.kind);
            assert_eq!(tag.to_string(), row.example);
        }
    }
}
