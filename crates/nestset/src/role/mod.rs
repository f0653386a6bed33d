//! Structural roles and the resolvers that discover them per property.
//!
//! The driver never reads declarations itself; it asks a
//! [`FieldRoleResolver`] which roles a property carries. Two resolvers ship
//! with the crate: [`MarkerReader`] (namespaced markers attached to the
//! reflected properties) and [`RoleTable`] (explicit registration).

pub mod marker;
pub mod table;

use crate::model::{Property, TypeDescriptor};
use derive_more::{Deref, Display, IntoIterator};
use std::collections::BTreeSet;

// re-exports
pub use marker::{DEFAULT_NAMESPACE, Marker, MarkerNamespace, MarkerReader};
pub use table::RoleTable;

///
/// TreeRole
///
/// Function a field serves in the nested-set representation.
/// Declaration order is the order in which the driver checks roles.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TreeRole {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("parent")]
    Parent,
    #[display("level")]
    Level,
}

impl TreeRole {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Parent, Self::Level];

    /// Roles required once any role is present, in reporting order.
    pub const MANDATORY: [Self; 3] = [Self::Parent, Self::Left, Self::Right];

    /// Internal configuration key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Parent => "parent",
            Self::Level => "level",
        }
    }

    /// User-facing label used in diagnostics.
    /// The parent role is reported as "ancestor".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Parent => "ancestor",
            other => other.key(),
        }
    }

    /// Marker name declaring this role, without namespace.
    #[must_use]
    pub const fn marker_name(self) -> &'static str {
        match self {
            Self::Left => "TreeLeft",
            Self::Right => "TreeRight",
            Self::Parent => "TreeParent",
            Self::Level => "TreeLevel",
        }
    }

    #[must_use]
    pub fn from_marker_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.marker_name() == name)
    }

    #[must_use]
    pub const fn is_mandatory(self) -> bool {
        !matches!(self, Self::Level)
    }
}

///
/// RoleSet
/// Roles carried by a single property, iterated in check order.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct RoleSet(BTreeSet<TreeRole>);

impl RoleSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, role: TreeRole) -> bool {
        self.0.insert(role)
    }
}

impl FromIterator<TreeRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = TreeRole>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[TreeRole; N]> for RoleSet {
    fn from(roles: [TreeRole; N]) -> Self {
        roles.into_iter().collect()
    }
}

///
/// FieldRoleResolver
///
/// Capability the driver depends on to discover role markers.
/// Implementations may be backed by reflected markers, registration tables,
/// metadata files or anything else that can answer per property.
///

pub trait FieldRoleResolver {
    fn roles(&self, descriptor: &dyn TypeDescriptor, property: &Property<'_>) -> RoleSet;
}

impl<R: FieldRoleResolver + ?Sized> FieldRoleResolver for &R {
    fn roles(&self, descriptor: &dyn TypeDescriptor, property: &Property<'_>) -> RoleSet {
        (**self).roles(descriptor, property)
    }
}

impl<R: FieldRoleResolver + ?Sized> FieldRoleResolver for Box<R> {
    fn roles(&self, descriptor: &dyn TypeDescriptor, property: &Property<'_>) -> RoleSet {
        (**self).roles(descriptor, property)
    }
}
