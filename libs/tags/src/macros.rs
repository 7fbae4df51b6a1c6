//! Macro for defining per-kind tag types.

/// Defines a typed tag for one kind.
///
/// This generates a newtype over the validated, normalized id with:
/// - A `KIND` constant
/// - `new()` to build a tag from a human-readable id
/// - `parse()` to parse the canonical `{kind}-{suffix}` string
/// - `Display` (canonical form) and `FromStr` implementations
/// - `Serialize` and `Deserialize` implementations using the canonical form
/// - `Taggable` and `From<_> for Tag`
///
/// The id field is private, so the only ways to obtain a value run the
/// kind's grammar.
///
/// # Example
///
/// ```ignore
/// define_tag!(MachineTag, Machine);
///
/// let tag = MachineTag::new("0/lxc/1")?;
/// assert_eq!(tag.to_string(), "machine-0-lxc-1");
/// let parsed: MachineTag = "machine-0-lxc-1".parse()?;
/// ```
macro_rules! define_tag {
    ($(#[$meta:meta])* $name:ident, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            id: String,
        }

        impl $name {
            /// The kind of this tag type.
            pub const KIND: $crate::Kind = $crate::Kind::$variant;

            /// Creates a tag from a human-readable id.
            ///
            /// Fails with [`TagError::Invalid`](crate::TagError::Invalid) if the
            /// id does not satisfy this kind's grammar.
            pub fn new(id: &str) -> Result<Self, $crate::TagError> {
                Self::KIND
                    .grammar()
                    .check(id)
                    .map(|id| Self { id })
                    .map_err(|source| $crate::TagError::Invalid {
                        tag: id.to_string(),
                        kind: Self::KIND,
                        source,
                    })
            }

            /// Creates a tag from the suffix of the wire-form `tag`.
            pub(crate) fn from_suffix(tag: &str, suffix: &str) -> Result<Self, $crate::TagError> {
                Self::KIND
                    .grammar()
                    .check_suffix(suffix)
                    .map(|id| Self { id })
                    .map_err(|source| $crate::TagError::Invalid {
                        tag: tag.to_string(),
                        kind: Self::KIND,
                        source,
                    })
            }

            /// Parses a tag of this kind from its canonical string.
            ///
            /// A well-formed tag of another kind is rejected as invalid for
            /// this kind.
            pub fn parse(s: &str) -> Result<Self, $crate::TagError> {
                match $crate::parse_tag(s)? {
                    $crate::Tag::$variant(tag) => Ok(tag),
                    other => Err($crate::TagError::Invalid {
                        tag: s.to_string(),
                        kind: Self::KIND,
                        source: $crate::IdError::WrongKind {
                            expected: Self::KIND,
                            actual: other.kind(),
                        },
                    }),
                }
            }

            /// Returns the human-readable id.
            #[must_use]
            pub fn id(&self) -> &str {
                &self.id
            }

            /// Returns the kind of this tag.
            #[must_use]
            pub const fn kind(&self) -> $crate::Kind {
                Self::KIND
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}-{}", Self::KIND, Self::KIND.grammar().suffix(&self.id))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::TagError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl $crate::Taggable for $name {
            fn kind(&self) -> $crate::Kind {
                Self::KIND
            }

            fn id(&self) -> &str {
                &self.id
            }
        }

        impl From<$name> for $crate::Tag {
            fn from(tag: $name) -> Self {
                $crate::Tag::$variant(tag)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use define_tag;
