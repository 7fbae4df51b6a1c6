//! The `Tag` sum type and the string dispatcher.

use std::fmt;

use crate::types::*;
use crate::{Kind, TagError};

/// Anything that identifies a resource by tag.
///
/// This is the capability collaborators depend on: a kind, a human-readable
/// id, and the canonical string via `Display`.
pub trait Taggable: fmt::Display {
    /// Returns the kind of the tag.
    fn kind(&self) -> Kind;

    /// Returns the human-readable id. Its format depends on the kind.
    fn id(&self) -> &str;
}

macro_rules! tags {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        /// A tag of any kind.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Tag {
            $($variant($ty),)*
        }

        impl Tag {
            /// Builds a tag of `kind` from a human-readable id.
            pub fn new(kind: Kind, id: &str) -> Result<Tag, TagError> {
                match kind {
                    $(Kind::$variant => $ty::new(id).map(Tag::$variant),)*
                }
            }

            fn from_suffix(tag: &str, kind: Kind, suffix: &str) -> Result<Tag, TagError> {
                match kind {
                    $(Kind::$variant => $ty::from_suffix(tag, suffix).map(Tag::$variant),)*
                }
            }

            /// Returns the kind of the tag.
            #[must_use]
            pub fn kind(&self) -> Kind {
                match self {
                    $(Tag::$variant(_) => Kind::$variant,)*
                }
            }

            /// Returns the human-readable id.
            #[must_use]
            pub fn id(&self) -> &str {
                match self {
                    $(Tag::$variant(tag) => tag.id(),)*
                }
            }
        }

        impl fmt::Display for Tag {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Tag::$variant(tag) => fmt::Display::fmt(tag, f),)*
                }
            }
        }
    };
}

tags! {
    Unit(UnitTag),
    Machine(MachineTag),
    Service(ServiceTag),
    User(UserTag),
    Model(ModelTag),
    Relation(RelationTag),
    Network(NetworkTag),
    Action(ActionTag),
    Volume(VolumeTag),
    Charm(CharmTag),
    Storage(StorageTag),
    Filesystem(FilesystemTag),
    IpAddress(IpAddressTag),
    Subnet(SubnetTag),
    Space(SpaceTag),
    Payload(PayloadTag),
}

impl Taggable for Tag {
    fn kind(&self) -> Kind {
        Tag::kind(self)
    }

    fn id(&self) -> &str {
        Tag::id(self)
    }
}

impl std::str::FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag(s)
    }
}

impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_tag(&s).map_err(serde::de::Error::custom)
    }
}

/// Splits a tag into its kind and suffix at the first `-`.
///
/// The suffix may itself contain hyphens. Fails if there is no `-` or the
/// kind part is empty.
pub fn split_tag(tag: &str) -> Result<(&str, &str), TagError> {
    match tag.split_once('-') {
        Some((kind, suffix)) if !kind.is_empty() => Ok((kind, suffix)),
        _ => Err(TagError::Format {
            tag: tag.to_string(),
        }),
    }
}

fn lookup_kind(tag: &str, kind: &str) -> Result<Kind, TagError> {
    Kind::from_name(kind).ok_or_else(|| TagError::UnsupportedKind {
        tag: tag.to_string(),
        kind: kind.to_string(),
    })
}

/// Returns the kind of a tag without validating its id.
pub fn tag_kind(tag: &str) -> Result<Kind, TagError> {
    let (kind, _) = split_tag(tag)?;
    lookup_kind(tag, kind)
}

/// Parses a canonical tag string into a [`Tag`].
///
/// Errors are reported in order of precedence: a malformed shape, then an
/// unknown kind, then an id that fails the kind's grammar.
pub fn parse_tag(tag: &str) -> Result<Tag, TagError> {
    let (kind, suffix) = split_tag(tag)?;
    let kind = lookup_kind(tag, kind)?;
    Tag::from_suffix(tag, kind, suffix)
}

/// Returns `"{kind} {id}"` for display, or an empty string for no tag.
pub fn readable_string(tag: Option<&dyn Taggable>) -> String {
    match tag {
        Some(tag) => format!("{} {}", tag.kind(), tag.id()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::IdError;

    #[test]
    fn test_parse_machine() {
        let tag = parse_tag("machine-0").unwrap();
        assert_eq!(tag.kind(), Kind::Machine);
        assert_eq!(tag.id(), "0");
        assert_eq!(tag.to_string(), "machine-0");
        assert_eq!(tag, Tag::Machine(MachineTag::new("0").unwrap()));
    }

    #[test]
    fn test_parse_unit_rewrites_suffix() {
        let tag = parse_tag("unit-mysql-0").unwrap();
        assert_eq!(tag.kind(), Kind::Unit);
        assert_eq!(tag.id(), "mysql/0");
        assert_eq!(tag.to_string(), "unit-mysql-0");
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = parse_tag("bogus").unwrap_err();
        assert_eq!(
            err,
            TagError::Format {
                tag: "bogus".to_string()
            }
        );
        assert!(err.to_string().contains("<kind>-<id>"));
    }

    #[test]
    fn test_parse_empty_kind() {
        assert!(parse_tag("-0").unwrap_err().is_format());
        assert!(parse_tag("").unwrap_err().is_format());
    }

    #[test]
    fn test_parse_unsupported_kind() {
        let err = parse_tag("frobnicate-123").unwrap_err();
        assert_eq!(
            err,
            TagError::UnsupportedKind {
                tag: "frobnicate-123".to_string(),
                kind: "frobnicate".to_string(),
            }
        );
        assert!(err.to_string().contains("\"frobnicate\""));
    }

    #[test]
    fn test_parse_legacy_environment_kind_unsupported() {
        let err = parse_tag("environment-6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap_err();
        assert!(err.is_unsupported_kind());
    }

    #[test]
    fn test_parse_ip_address_wraps_uuid_error() {
        let err = parse_tag("ipaddress-not-a-uuid").unwrap_err();
        match &err {
            TagError::Invalid { tag, kind, source } => {
                assert_eq!(tag, "ipaddress-not-a-uuid");
                assert_eq!(*kind, Kind::IpAddress);
                assert!(matches!(source, IdError::Uuid(_)));
            }
            other => panic!("expected invalid tag error, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("ipaddress tag"));
    }

    #[test]
    fn test_parse_ip_address_normalizes_uuid() {
        let tag = parse_tag("ipaddress-6BA7B810-9DAD-11D1-80B4-00C04FD430C8").unwrap();
        assert_eq!(tag.id(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    }

    #[test]
    fn test_error_precedence() {
        // Shape is checked before kind, kind before id.
        assert!(parse_tag("frobnicate").unwrap_err().is_format());
        assert!(parse_tag("frobnicate-").unwrap_err().is_unsupported_kind());
        assert!(parse_tag("machine-x").unwrap_err().is_invalid());
    }

    #[test]
    fn test_invalid_error_names_kind_and_raw_tag() {
        let err = parse_tag("machine-").unwrap_err();
        assert_eq!(err.kind(), Some(Kind::Machine));
        assert_eq!(err.tag(), "machine-");
        assert!(err.to_string().contains("\"machine-\" is not a valid machine tag"));
    }

    #[test]
    fn test_machine_suffix_forms() {
        let tag = parse_tag("machine-0-lxc-1").unwrap();
        assert_eq!(tag.id(), "0/lxc/1");

        // The slash form is accepted but formats canonically.
        let tag = parse_tag("machine-0/lxc/1").unwrap();
        assert_eq!(tag.id(), "0/lxc/1");
        assert_eq!(tag.to_string(), "machine-0-lxc-1");
    }

    #[test]
    fn test_tag_kind_skips_id_validation() {
        assert_eq!(tag_kind("machine-"), Ok(Kind::Machine));
        assert_eq!(tag_kind("unit-not valid"), Ok(Kind::Unit));
        assert!(tag_kind("bogus").unwrap_err().is_format());
        assert!(tag_kind("frobnicate-1").unwrap_err().is_unsupported_kind());
    }

    #[test]
    fn test_split_tag_is_left_biased() {
        assert_eq!(
            split_tag("relation-a.b#c.d").unwrap(),
            ("relation", "a.b#c.d")
        );
        assert_eq!(split_tag("unit-my-sql-0").unwrap(), ("unit", "my-sql-0"));
        assert_eq!(split_tag("unit-").unwrap(), ("unit", ""));
    }

    #[test]
    fn test_readable_string() {
        assert_eq!(readable_string(None), "");
        let user = parse_tag("user-bob").unwrap();
        assert_eq!(readable_string(Some(&user)), "user bob");
        let unit = parse_tag("unit-mysql-0").unwrap();
        assert_eq!(readable_string(Some(&unit)), "unit mysql/0");
    }

    #[test]
    fn test_readable_string_accepts_typed_tags() {
        let unit = UnitTag::new("mysql/0").unwrap();
        assert_eq!(readable_string(Some(&unit)), "unit mysql/0");
        let machine = MachineTag::new("0/lxc/1").unwrap();
        assert_eq!(readable_string(Some(&machine)), "machine 0/lxc/1");
    }

    #[test]
    fn test_tag_new_dispatches_by_kind() {
        let tag = Tag::new(Kind::Storage, "data/0").unwrap();
        assert_eq!(tag.to_string(), "storage-data-0");
        let err = Tag::new(Kind::Storage, "data-0").unwrap_err();
        assert_eq!(err.kind(), Some(Kind::Storage));
    }

    #[test]
    fn test_typed_tag_into_tag() {
        let tag: Tag = UserTag::new("bob@local").unwrap().into();
        assert_eq!(tag.kind(), Kind::User);
        assert_eq!(tag.to_string(), "user-bob@local");
    }

    #[test]
    fn test_taggable_object() {
        let tags: Vec<Box<dyn Taggable>> = vec![
            Box::new(MachineTag::new("0/lxc/1").unwrap()),
            Box::new(parse_tag("space-db").unwrap()),
        ];
        let rendered: Vec<_> = tags
            .iter()
            .map(|t| format!("{}|{}|{}", t.kind(), t.id(), t))
            .collect();
        assert_eq!(
            rendered,
            vec!["machine|0/lxc/1|machine-0-lxc-1", "space|db|space-db"]
        );
    }

    #[test]
    fn test_tag_json_roundtrip() {
        let tag = parse_tag("relation-wordpress.db#mysql.server").unwrap();
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, "\"relation-wordpress.db#mysql.server\"");
        let parsed: Tag = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tag);
        assert!(serde_json::from_str::<Tag>("\"bogus\"").is_err());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    const NAME: &str = "[a-z][a-z0-9]{0,6}(-[a-z][a-z0-9]{0,3}){0,2}";

    fn machine_id() -> impl Strategy<Value = String> {
        (
            0u32..100,
            proptest::collection::vec(("[a-z]{1,4}", 0u32..100), 0..3),
        )
            .prop_map(|(root, containers)| {
                let mut id = root.to_string();
                for (container_type, n) in containers {
                    id.push_str(&format!("/{container_type}/{n}"));
                }
                id
            })
    }

    fn uuid_id() -> impl Strategy<Value = String> {
        any::<[u8; 16]>().prop_map(|bytes| uuid::Uuid::from_bytes(bytes).hyphenated().to_string())
    }

    fn subnet_id() -> impl Strategy<Value = String> {
        (any::<u32>(), 0u32..=32).prop_map(|(addr, len)| {
            let mask = u32::MAX.checked_shl(32 - len).unwrap_or(0);
            format!("{}/{len}", std::net::Ipv4Addr::from(addr & mask))
        })
    }

    fn scoped_number() -> impl Strategy<Value = String> {
        (proptest::option::of(machine_id()), 0u32..100).prop_map(|(machine, n)| match machine {
            Some(machine) => format!("{machine}/{n}"),
            None => n.to_string(),
        })
    }

    fn endpoint() -> impl Strategy<Value = String> {
        (NAME, "[a-z][a-z0-9]{0,5}([_-][a-z0-9]{1,3}){0,2}")
            .prop_map(|(service, relation)| format!("{service}:{relation}"))
    }

    fn valid_tag() -> impl Strategy<Value = (Kind, String)> {
        prop_oneof![
            (NAME, 0u32..1000).prop_map(|(s, n)| (Kind::Unit, format!("{s}/{n}"))),
            machine_id().prop_map(|id| (Kind::Machine, id)),
            NAME.prop_map(|id| (Kind::Service, id)),
            "[a-z][a-z0-9.+-]{0,6}[a-z0-9](@[a-z][a-z0-9.-]{0,6}[a-z0-9])?"
                .prop_map(|id| (Kind::User, id)),
            uuid_id().prop_map(|id| (Kind::Model, id)),
            (endpoint(), proptest::option::of(endpoint())).prop_map(|(a, b)| {
                let key = match b {
                    Some(b) => format!("{a} {b}"),
                    None => a,
                };
                (Kind::Relation, key)
            }),
            "[a-zA-Z0-9_-]{1,12}".prop_map(|id| (Kind::Network, id)),
            uuid_id().prop_map(|id| (Kind::Action, id)),
            scoped_number().prop_map(|id| (Kind::Volume, id)),
            "((local:)|(cs:(~[a-z][a-z0-9]{1,5}/)?))?([a-z]{3,8}/)?[a-z][a-z0-9]{0,8}(-[1-9][0-9]{0,2})?"
                .prop_map(|id| (Kind::Charm, id)),
            (NAME, 0u32..1000).prop_map(|(s, n)| (Kind::Storage, format!("{s}/{n}"))),
            scoped_number().prop_map(|id| (Kind::Filesystem, id)),
            uuid_id().prop_map(|id| (Kind::IpAddress, id)),
            subnet_id().prop_map(|id| (Kind::Subnet, id)),
            "[a-z0-9]{1,6}(-[a-z0-9]{1,4}){0,2}".prop_map(|id| (Kind::Space, id)),
            uuid_id().prop_map(|id| (Kind::Payload, id)),
        ]
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_roundtrips((kind, id) in valid_tag()) {
            let tag = Tag::new(kind, &id).unwrap();
            prop_assert_eq!(tag.kind(), kind);
            prop_assert_eq!(tag.id(), id.as_str());

            let canonical = tag.to_string();
            let parsed = parse_tag(&canonical).unwrap();
            prop_assert_eq!(&parsed, &tag);
            prop_assert_eq!(parsed.to_string(), canonical);
        }

        #[test]
        fn prop_unknown_kind_rejected(kind in "[a-z]{1,12}", rest in ".*") {
            prop_assume!(Kind::from_name(&kind).is_none());
            let raw = format!("{kind}-{rest}");
            prop_assert!(parse_tag(&raw).unwrap_err().is_unsupported_kind());
            prop_assert!(tag_kind(&raw).unwrap_err().is_unsupported_kind());
        }

        #[test]
        fn prop_missing_separator_rejected(raw in "[^-]*") {
            prop_assert!(parse_tag(&raw).unwrap_err().is_format());
            prop_assert!(tag_kind(&raw).unwrap_err().is_format());
        }

        #[test]
        fn prop_leading_separator_rejected(rest in ".*") {
            let raw = format!("-{rest}");
            prop_assert!(parse_tag(&raw).unwrap_err().is_format());
            prop_assert!(tag_kind(&raw).unwrap_err().is_format());
        }

        #[test]
        fn prop_parse_never_panics(raw in "\\PC*") {
            let _ = parse_tag(&raw);
        }
    }
}
