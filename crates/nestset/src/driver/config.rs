use crate::role::TreeRole;
use serde::Serialize;

///
/// TreeConfig
///
/// Working role -> field mapping populated during extraction.
/// Roles are optional here; completeness is the verifying phase's job.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TreeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    left: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
}

impl TreeConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: None,
            right: None,
            parent: None,
            level: None,
        }
    }

    #[must_use]
    pub fn get(&self, role: TreeRole) -> Option<&str> {
        self.slot(role).as_deref()
    }

    /// Assign `role`, returning the field it previously pointed at.
    pub fn set(&mut self, role: TreeRole, field: impl Into<String>) -> Option<String> {
        self.slot_mut(role).replace(field.into())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.parent.is_none() && self.level.is_none()
    }

    /// Mandatory roles not yet assigned, in reporting order.
    #[must_use]
    pub fn missing_mandatory(&self) -> Vec<TreeRole> {
        TreeRole::MANDATORY
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    /// Assigned roles in check order.
    pub fn iter(&self) -> impl Iterator<Item = (TreeRole, &str)> {
        TreeRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|field| (role, field)))
    }

    /// Freeze into a [`TreeMapping`]; `None` unless every mandatory role is set.
    #[must_use]
    pub fn into_mapping(self) -> Option<TreeMapping> {
        Some(TreeMapping {
            left: self.left?,
            right: self.right?,
            parent: self.parent?,
            level: self.level,
        })
    }

    const fn slot(&self, role: TreeRole) -> &Option<String> {
        match role {
            TreeRole::Left => &self.left,
            TreeRole::Right => &self.right,
            TreeRole::Parent => &self.parent,
            TreeRole::Level => &self.level,
        }
    }

    const fn slot_mut(&mut self, role: TreeRole) -> &mut Option<String> {
        match role {
            TreeRole::Left => &mut self.left,
            TreeRole::Right => &mut self.right,
            TreeRole::Parent => &mut self.parent,
            TreeRole::Level => &mut self.level,
        }
    }
}

///
/// TreeMapping
///
/// Validated, immutable tree configuration for one record type.
/// Handed to the ORM metadata layer to cache alongside the type's mapping.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct TreeMapping {
    left: String,
    right: String,
    parent: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
}

impl TreeMapping {
    #[must_use]
    pub fn left(&self) -> &str {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &str {
        &self.right
    }

    #[must_use]
    pub fn parent(&self) -> &str {
        &self.parent
    }

    #[must_use]
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    #[must_use]
    pub fn get(&self, role: TreeRole) -> Option<&str> {
        match role {
            TreeRole::Left => Some(&self.left),
            TreeRole::Right => Some(&self.right),
            TreeRole::Parent => Some(&self.parent),
            TreeRole::Level => self.level(),
        }
    }
}

impl From<TreeMapping> for TreeConfig {
    fn from(mapping: TreeMapping) -> Self {
        Self {
            left: Some(mapping.left),
            right: Some(mapping.right),
            parent: Some(mapping.parent),
            level: mapping.level,
        }
    }
}
