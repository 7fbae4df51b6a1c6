//! The closed registry of tag kinds.

use crate::TagError;

/// A tag kind.
///
/// The set is fixed at build time. Adding a kind means adding a variant here,
/// an entry in the grammar table, and a `define_tag!` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Unit,
    Machine,
    Service,
    User,
    Model,
    Relation,
    Network,
    Action,
    Volume,
    Charm,
    Storage,
    Filesystem,
    IpAddress,
    Subnet,
    Space,
    Payload,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 16] = [
        Kind::Unit,
        Kind::Machine,
        Kind::Service,
        Kind::User,
        Kind::Model,
        Kind::Relation,
        Kind::Network,
        Kind::Action,
        Kind::Volume,
        Kind::Charm,
        Kind::Storage,
        Kind::Filesystem,
        Kind::IpAddress,
        Kind::Subnet,
        Kind::Space,
        Kind::Payload,
    ];

    /// The wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Unit => "unit",
            Kind::Machine => "machine",
            Kind::Service => "service",
            Kind::User => "user",
            Kind::Model => "model",
            Kind::Relation => "relation",
            Kind::Network => "network",
            Kind::Action => "action",
            Kind::Volume => "volume",
            Kind::Charm => "charm",
            Kind::Storage => "storage",
            Kind::Filesystem => "filesystem",
            Kind::IpAddress => "ipaddress",
            Kind::Subnet => "subnet",
            Kind::Space => "space",
            Kind::Payload => "payload",
        }
    }

    /// Looks up a kind by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Checks that `kind` names a registered kind.
pub fn check_kind(kind: &str) -> Result<Kind, TagError> {
    Kind::from_name(kind).ok_or_else(|| TagError::UnsupportedKind {
        tag: kind.to_string(),
        kind: kind.to_string(),
    })
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Kind {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_kind(s)
    }
}

impl serde::Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        check_kind(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_resolves_by_name() {
        for kind in Kind::ALL {
            assert_eq!(check_kind(kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn test_kind_names_unique() {
        let names: std::collections::HashSet<_> = Kind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), Kind::ALL.len(), "Duplicate kind names found!");
    }

    #[test]
    fn test_kind_names_have_no_separator() {
        for kind in Kind::ALL {
            assert!(!kind.as_str().contains('-'), "{kind} contains '-'");
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = check_kind("frobnicate").unwrap_err();
        assert!(err.is_unsupported_kind());
        assert!(err.to_string().contains("\"frobnicate\""));
    }

    #[test]
    fn test_kind_lookup_is_case_sensitive() {
        assert!(check_kind("Machine").is_err());
        assert!(check_kind("").is_err());
    }

    #[test]
    fn test_kind_json_roundtrip() {
        let json = serde_json::to_string(&Kind::IpAddress).unwrap();
        assert_eq!(json, "\"ipaddress\"");
        let parsed: Kind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Kind::IpAddress);
        assert!(serde_json::from_str::<Kind>("\"environment\"").is_err());
    }
}
