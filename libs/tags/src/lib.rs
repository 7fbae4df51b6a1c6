//! # entity-tags
//!
//! Canonical tags for named resources: parsing, validation, and formatting.
//!
//! ## Design Principles
//!
//! - The set of kinds is closed; an unknown kind is rejected, never accepted
//! - Every kind owns its id grammar and its wire-suffix rewrite
//! - No tag value with an invalid id can be constructed, by any path
//! - Tags roundtrip through their canonical string (format → parse → format)
//!
//! ## Tag Format
//!
//! Every tag has the wire form `{kind}-{suffix}`. The first `-` separates the
//! kind from the suffix; the suffix may contain further hyphens.
//!
//! Examples:
//! - `machine-0-lxc-1` (id `0/lxc/1`)
//! - `unit-mysql-0` (id `mysql/0`)
//! - `relation-wordpress.db#mysql.server` (id `wordpress:db mysql:server`)
//! - `user-bob@local` (id `bob@local`)
//!
//! Consumers should never split tag strings themselves; use [`parse_tag`] or
//! the per-kind `parse` constructors so the grammars stay in one place.

mod error;
mod grammar;
mod kind;
mod macros;
mod tag;
mod types;

pub use error::{IdError, TagError};
pub use grammar::*;
pub use kind::{check_kind, Kind};
pub use tag::{parse_tag, readable_string, split_tag, tag_kind, Tag, Taggable};
pub use types::*;
