//! Typed tag definitions for every kind.
//!
//! Each type wraps an id that has already passed its kind's grammar, so the
//! accessors below can split the id without re-checking it.

use crate::macros::define_tag;

// =============================================================================
// Workloads
// =============================================================================

define_tag!(
    /// A service unit, e.g. `mysql/0` (`unit-mysql-0`).
    UnitTag,
    Unit
);
define_tag!(
    /// A deployed service, e.g. `wordpress`.
    ServiceTag,
    Service
);
define_tag!(
    /// A charm URL, e.g. `cs:trusty/mysql-42`.
    CharmTag,
    Charm
);
define_tag!(
    /// A relation key, e.g. `wordpress:db mysql:server`.
    RelationTag,
    Relation
);
define_tag!(
    /// An action, identified by UUID.
    ActionTag,
    Action
);
define_tag!(
    /// A payload, identified by UUID.
    PayloadTag,
    Payload
);

// =============================================================================
// Machines and Storage
// =============================================================================

define_tag!(
    /// A machine or container, e.g. `0/lxc/1` (`machine-0-lxc-1`).
    MachineTag,
    Machine
);
define_tag!(
    /// A storage instance, e.g. `data/0` (`storage-data-0`).
    StorageTag,
    Storage
);
define_tag!(
    /// A volume, optionally machine scoped, e.g. `0/lxc/0/1`.
    VolumeTag,
    Volume
);
define_tag!(
    /// A filesystem, optionally machine scoped, e.g. `0/2`.
    FilesystemTag,
    Filesystem
);

// =============================================================================
// Networking
// =============================================================================

define_tag!(NetworkTag, Network);
define_tag!(
    /// An IP address, identified by UUID.
    IpAddressTag,
    IpAddress
);
define_tag!(
    /// A subnet, identified by its canonical CIDR.
    SubnetTag,
    Subnet
);
define_tag!(SpaceTag, Space);

// =============================================================================
// Identity
// =============================================================================

define_tag!(
    /// A user, e.g. `bob` or `bob@example.com`.
    UserTag,
    User
);
define_tag!(
    /// A model, identified by UUID.
    ModelTag,
    Model
);

/// The domain of users local to the controller.
pub const LOCAL_USER_DOMAIN: &str = "local";

// =============================================================================
// Kind-specific accessors
// =============================================================================

fn parse_number(s: &str) -> Option<u64> {
    s.parse().ok()
}

impl UnitTag {
    /// Returns the name of the service this unit belongs to.
    #[must_use]
    pub fn service_name(&self) -> &str {
        self.id
            .rsplit_once('/')
            .map_or(self.id.as_str(), |(service, _)| service)
    }

    /// Returns the unit number, or `None` if it does not fit in a `u64`.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.id.rsplit_once('/').and_then(|(_, n)| parse_number(n))
    }

    /// Returns the tag of the service this unit belongs to.
    #[must_use]
    pub fn service(&self) -> ServiceTag {
        ServiceTag {
            id: self.service_name().to_string(),
        }
    }
}

impl MachineTag {
    fn split_container(&self) -> Option<(&str, &str, &str)> {
        let (rest, child) = self.id.rsplit_once('/')?;
        let (parent, container_type) = rest.rsplit_once('/')?;
        Some((parent, container_type, child))
    }

    /// Returns the host machine of a container, or `None` for a top-level
    /// machine.
    #[must_use]
    pub fn parent(&self) -> Option<MachineTag> {
        self.split_container().map(|(parent, _, _)| MachineTag {
            id: parent.to_string(),
        })
    }

    /// Returns the last number of the id (`1` for `0/lxc/1`).
    #[must_use]
    pub fn child_id(&self) -> &str {
        self.id
            .rsplit_once('/')
            .map_or(self.id.as_str(), |(_, child)| child)
    }

    /// Returns the container type (`lxc` for `0/lxc/1`).
    #[must_use]
    pub fn container_type(&self) -> Option<&str> {
        self.split_container().map(|(_, container_type, _)| container_type)
    }

    /// Returns true if this machine is a container.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.id.contains('/')
    }
}

impl UserTag {
    /// Returns the user name without the domain.
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.split_once('@').map_or(self.id.as_str(), |(name, _)| name)
    }

    /// Returns the domain, if one was given.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.id.split_once('@').map(|(_, domain)| domain)
    }

    /// Returns true for users without a domain or in the local domain.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.domain().is_none_or(|domain| domain == LOCAL_USER_DOMAIN)
    }
}

impl RelationTag {
    /// Returns the endpoints of the relation (`service:relation` pairs).
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.id.split(' ')
    }

    /// Returns true for a peer relation, which has a single endpoint.
    #[must_use]
    pub fn is_peer(&self) -> bool {
        !self.id.contains(' ')
    }
}

impl StorageTag {
    /// Returns the storage name (`data` for `data/0`).
    #[must_use]
    pub fn storage_name(&self) -> &str {
        self.id
            .rsplit_once('/')
            .map_or(self.id.as_str(), |(name, _)| name)
    }

    /// Returns the storage instance number, or `None` if it does not fit in a
    /// `u64`.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.id.rsplit_once('/').and_then(|(_, n)| parse_number(n))
    }
}

impl VolumeTag {
    /// Returns the machine this volume is scoped to, if any.
    #[must_use]
    pub fn machine(&self) -> Option<MachineTag> {
        self.id.rsplit_once('/').map(|(machine, _)| MachineTag {
            id: machine.to_string(),
        })
    }
}

impl FilesystemTag {
    /// Returns the machine this filesystem is scoped to, if any.
    #[must_use]
    pub fn machine(&self) -> Option<MachineTag> {
        self.id.rsplit_once('/').map(|(machine, _)| MachineTag {
            id: machine.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
