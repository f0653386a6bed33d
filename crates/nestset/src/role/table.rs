use crate::{
    model::{Property, TypeDescriptor},
    role::{FieldRoleResolver, RoleSet, TreeRole},
};
use std::collections::BTreeMap;

///
/// RoleTable
///
/// Explicit role registration keyed by (type name, property name).
/// Ignores any markers carried by the reflected properties.
///

#[derive(Clone, Debug, Default)]
pub struct RoleTable {
    entries: BTreeMap<(String, String), RoleSet>,
}

impl RoleTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register `role` on `type_name.field`, builder style.
    #[must_use]
    pub fn with(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        role: TreeRole,
    ) -> Self {
        self.register(type_name, field, role);
        self
    }

    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        role: TreeRole,
    ) {
        self.entries
            .entry((type_name.into(), field.into()))
            .or_default()
            .insert(role);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FieldRoleResolver for RoleTable {
    fn roles(&self, descriptor: &dyn TypeDescriptor, property: &Property<'_>) -> RoleSet {
        self.entries
            .get(&(
                descriptor.type_name().to_string(),
                property.name.to_string(),
            ))
            .cloned()
            .unwrap_or_default()
    }
}
