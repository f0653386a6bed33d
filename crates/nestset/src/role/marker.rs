use crate::{
    model::{Property, TypeDescriptor},
    role::{FieldRoleResolver, RoleSet, TreeRole},
};
use derive_more::Display;

/// Namespace alias used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "nestset";

///
/// Marker
///
/// One declarative marker attached to a reflected property, written
/// `alias:Name`. A marker without an alias has an empty namespace.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{namespace}:{name}")]
pub struct Marker {
    pub namespace: String,
    pub name: String,
}

impl Marker {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Marker declaring `role` in the default namespace.
    #[must_use]
    pub fn tree(role: TreeRole) -> Self {
        Self::new(DEFAULT_NAMESPACE, role.marker_name())
    }

    /// Split a raw `alias:Name` marker at its last separator.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.rsplit_once(':') {
            Some((namespace, name)) => Self::new(namespace.trim(), name.trim()),
            None => Self::new("", raw),
        }
    }
}

///
/// MarkerNamespace
/// Alias under which tree markers are recognised.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarkerNamespace {
    alias: String,
}

impl MarkerNamespace {
    #[must_use]
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub fn owns(&self, marker: &Marker) -> bool {
        marker.namespace == self.alias
    }
}

impl Default for MarkerNamespace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

///
/// MarkerReader
///
/// Resolves roles from the markers on each property. Only markers in the
/// namespace given at construction are read; everything else is ignored.
///

#[derive(Clone, Debug, Default)]
pub struct MarkerReader {
    namespace: MarkerNamespace,
}

impl MarkerReader {
    #[must_use]
    pub const fn new(namespace: MarkerNamespace) -> Self {
        Self { namespace }
    }

    #[must_use]
    pub const fn namespace(&self) -> &MarkerNamespace {
        &self.namespace
    }
}

impl FieldRoleResolver for MarkerReader {
    fn roles(&self, _descriptor: &dyn TypeDescriptor, property: &Property<'_>) -> RoleSet {
        property
            .markers
            .iter()
            .filter(|marker| self.namespace.owns(marker))
            .filter_map(|marker| TreeRole::from_marker_name(&marker.name))
            .collect()
    }
}
