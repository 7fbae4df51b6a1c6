//! Per-kind id grammars and wire-suffix rewrites.
//!
//! Each kind has a [`Grammar`]: a validity rule over human-readable ids and a
//! pair of pure rewrites between the wire suffix and the id. The table is
//! immutable; patterns are compiled once on first use.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::{IdError, Kind};

// =============================================================================
// Snippets
// =============================================================================

const NUMBER: &str = "(?:0|[1-9][0-9]*)";
const NAME: &str = "(?:[a-z][a-z0-9]*(?:-[a-z0-9]*[a-z][a-z0-9]*)*)";
const CONTAINER_TYPE: &str = "(?:[a-z]+)";
const USER_PART: &str = "(?:[a-zA-Z0-9][a-zA-Z0-9.+-]*[a-zA-Z0-9])";
const RELATION_NAME: &str = "(?:[a-z][a-z0-9]*(?:[_-][a-z0-9]+)*)";
const SERIES: &str = "(?:[a-z]+(?:[a-z0-9]+)?)";

fn machine_snippet() -> String {
    format!("{NUMBER}(?:/{CONTAINER_TYPE}/{NUMBER})*")
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("tag grammar patterns are valid")
}

static UNIT: LazyLock<Regex> = LazyLock::new(|| anchored(&format!("{NAME}/{NUMBER}")));
static MACHINE: LazyLock<Regex> = LazyLock::new(|| anchored(&machine_snippet()));
static SERVICE: LazyLock<Regex> = LazyLock::new(|| anchored(NAME));
static USER: LazyLock<Regex> =
    LazyLock::new(|| anchored(&format!("{USER_PART}(?:@{USER_PART})?")));
static RELATION: LazyLock<Regex> = LazyLock::new(|| {
    let endpoint = format!("{NAME}:{RELATION_NAME}");
    anchored(&format!("{endpoint}(?: {endpoint})?"))
});
static NETWORK: LazyLock<Regex> = LazyLock::new(|| anchored("[a-zA-Z0-9_-]+"));
static VOLUME: LazyLock<Regex> =
    LazyLock::new(|| anchored(&format!("(?:{}/)?{NUMBER}", machine_snippet())));
static CHARM: LazyLock<Regex> = LazyLock::new(|| {
    anchored(&format!(
        "(?:local:|cs:(?:~{USER_PART}/)?)?(?:{SERIES}/)?{NAME}(?:-{NUMBER})?"
    ))
});
static STORAGE: LazyLock<Regex> = LazyLock::new(|| anchored(&format!("{NAME}/{NUMBER}")));
static SPACE: LazyLock<Regex> = LazyLock::new(|| anchored("[a-z0-9]+(?:-[a-z0-9]+)*"));

// =============================================================================
// Grammar table
// =============================================================================

/// How a kind decides whether an id is valid.
enum Rule {
    Pattern(&'static LazyLock<Regex>),
    Uuid,
    Cidr,
}

/// The id grammar of one kind.
pub(crate) struct Grammar {
    kind: Kind,
    rule: Rule,
    suffix_to_id: fn(&str) -> String,
    id_to_suffix: fn(&str) -> String,
}

impl Grammar {
    /// Validates a human-readable id, returning its normalized form.
    pub(crate) fn check(&self, id: &str) -> Result<String, IdError> {
        if id.is_empty() {
            return Err(IdError::Empty);
        }
        match self.rule {
            Rule::Pattern(re) if re.is_match(id) => Ok(id.to_string()),
            Rule::Pattern(_) => Err(IdError::Grammar(self.kind)),
            Rule::Uuid => canonical_uuid(id),
            Rule::Cidr => canonical_cidr(id),
        }
    }

    /// Rewrites a wire suffix into the id form and validates it.
    pub(crate) fn check_suffix(&self, suffix: &str) -> Result<String, IdError> {
        self.check(&(self.suffix_to_id)(suffix))
    }

    /// Rewrites a validated id into its wire suffix.
    pub(crate) fn suffix(&self, id: &str) -> String {
        (self.id_to_suffix)(id)
    }
}

impl Kind {
    pub(crate) fn grammar(self) -> Grammar {
        let grammar = |rule: Rule, suffix_to_id: fn(&str) -> String, id_to_suffix: fn(&str) -> String| {
            Grammar {
                kind: self,
                rule,
                suffix_to_id,
                id_to_suffix,
            }
        };

        match self {
            Kind::Unit => grammar(Rule::Pattern(&UNIT), last_hyphen_to_slash, slashes_to_hyphens),
            Kind::Machine => grammar(Rule::Pattern(&MACHINE), hyphens_to_slashes, slashes_to_hyphens),
            Kind::Service => grammar(Rule::Pattern(&SERVICE), identity, identity),
            Kind::User => grammar(Rule::Pattern(&USER), identity, identity),
            Kind::Model => grammar(Rule::Uuid, identity, identity),
            Kind::Relation => grammar(
                Rule::Pattern(&RELATION),
                relation_suffix_to_key,
                relation_key_to_suffix,
            ),
            Kind::Network => grammar(Rule::Pattern(&NETWORK), identity, identity),
            Kind::Action => grammar(Rule::Uuid, identity, identity),
            Kind::Volume => grammar(Rule::Pattern(&VOLUME), hyphens_to_slashes, slashes_to_hyphens),
            Kind::Charm => grammar(Rule::Pattern(&CHARM), identity, identity),
            Kind::Storage => grammar(Rule::Pattern(&STORAGE), last_hyphen_to_slash, slashes_to_hyphens),
            Kind::Filesystem => {
                grammar(Rule::Pattern(&VOLUME), hyphens_to_slashes, slashes_to_hyphens)
            }
            Kind::IpAddress => grammar(Rule::Uuid, identity, identity),
            Kind::Subnet => grammar(Rule::Cidr, identity, identity),
            Kind::Space => grammar(Rule::Pattern(&SPACE), identity, identity),
            Kind::Payload => grammar(Rule::Uuid, identity, identity),
        }
    }
}

// =============================================================================
// Suffix rewrites
// =============================================================================

fn identity(s: &str) -> String {
    s.to_string()
}

fn hyphens_to_slashes(s: &str) -> String {
    s.replace('-', "/")
}

fn slashes_to_hyphens(s: &str) -> String {
    s.replace('/', "-")
}

fn last_hyphen_to_slash(s: &str) -> String {
    match s.rsplit_once('-') {
        Some((head, tail)) => format!("{head}/{tail}"),
        None => s.to_string(),
    }
}

fn relation_suffix_to_key(s: &str) -> String {
    s.replace('.', ":").replace('#', " ")
}

fn relation_key_to_suffix(s: &str) -> String {
    s.replace(':', ".").replace(' ', "#")
}

// =============================================================================
// Structured ids
// =============================================================================

fn canonical_uuid(id: &str) -> Result<String, IdError> {
    let uuid = Uuid::try_parse(id)?;
    let canonical = uuid.hyphenated().to_string();
    if !canonical.eq_ignore_ascii_case(id) {
        return Err(IdError::UuidForm);
    }
    Ok(canonical)
}

fn canonical_cidr(id: &str) -> Result<String, IdError> {
    let Some((addr_str, prefix_str)) = id.split_once('/') else {
        return Err(IdError::Cidr(format!("missing '/' in {id:?}")));
    };

    let addr: IpAddr = addr_str
        .parse()
        .map_err(|e: std::net::AddrParseError| IdError::Cidr(e.to_string()))?;
    let prefix_len: u8 = prefix_str
        .parse()
        .map_err(|_| IdError::Cidr(format!("invalid prefix length {prefix_str:?}")))?;

    let network = match addr {
        IpAddr::V4(v4) => {
            if prefix_len > 32 {
                return Err(IdError::Cidr(format!("prefix length {prefix_len} exceeds 32")));
            }
            let mask = u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0);
            IpAddr::V4(Ipv4Addr::from(u32::from(v4) & mask))
        }
        IpAddr::V6(v6) => {
            if prefix_len > 128 {
                return Err(IdError::Cidr(format!("prefix length {prefix_len} exceeds 128")));
            }
            let mask = u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0);
            IpAddr::V6(Ipv6Addr::from(u128::from(v6) & mask))
        }
    };

    let canonical = format!("{network}/{prefix_len}");
    if canonical != id {
        return Err(IdError::Cidr(format!(
            "{id:?} is not in canonical form (expected {canonical:?})"
        )));
    }
    Ok(canonical)
}

// =============================================================================
// Predicates
// =============================================================================

/// Returns true if `id` is a valid human-readable id for `kind`.
pub fn is_valid(kind: Kind, id: &str) -> bool {
    kind.grammar().check(id).is_ok()
}

macro_rules! predicates {
    ($($(#[$meta:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(id: &str) -> bool {
                is_valid(Kind::$kind, id)
            }
        )*
    };
}

predicates! {
    /// Unit names look like `mysql/0`.
    is_valid_unit => Unit;
    /// Machine ids look like `0` or `0/lxc/1`.
    is_valid_machine => Machine;
    is_valid_service => Service;
    /// User names look like `bob` or `bob@domain`.
    is_valid_user => User;
    is_valid_model => Model;
    /// Relation keys look like `wordpress:db mysql:server` or `riak:ring`.
    is_valid_relation => Relation;
    is_valid_network => Network;
    is_valid_action => Action;
    /// Volume ids look like `1` or `0/lxc/0/1` (machine scoped).
    is_valid_volume => Volume;
    /// Charm URLs look like `cs:~user/trusty/mysql-42` or `local:wordpress`.
    is_valid_charm => Charm;
    /// Storage ids look like `data/0`.
    is_valid_storage => Storage;
    is_valid_filesystem => Filesystem;
    is_valid_ip_address => IpAddress;
    /// Subnets are canonical CIDRs such as `10.0.0.0/24`.
    is_valid_subnet => Subnet;
    is_valid_space => Space;
    is_valid_payload => Payload;
}
