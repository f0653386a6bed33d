use crate::{role::TreeRole, types::StorageKind};
use thiserror::Error as ThisError;

///
/// TreeMappingError
///
/// Configuration-time failure while mapping one record type as a tree.
/// Every variant is fatal for that type; there is no degraded mapping.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TreeMappingError {
    /// A boundary or level marker sits on a property that is not a mapped field.
    #[error("unable to find '{role}' - [{field}] as mapped property in type - {type_name}")]
    MissingField {
        role: TreeRole,
        field: String,
        type_name: String,
    },

    /// A boundary or level field is mapped with a non integer-like storage type.
    #[error(
        "tree {role} field - [{field}] type is not valid and must be '{expected}' in type - {type_name}"
    )]
    InvalidFieldType {
        role: TreeRole,
        field: String,
        type_name: String,
        expected: StorageKind,
        found: Option<StorageKind>,
    },

    /// The parent marker sits on something other than a single-valued association.
    #[error(
        "unable to find ancestor/parent child relation through ancestor field - [{field}] in type - {type_name}"
    )]
    InvalidAssociation { field: String, type_name: String },

    /// At least one role was declared but mandatory roles are absent.
    #[error("missing properties: {} in type - {type_name}", join_labels(.roles))]
    MissingRoles {
        type_name: String,
        roles: Vec<TreeRole>,
    },
}

impl TreeMappingError {
    pub(crate) fn missing_field(role: TreeRole, field: &str, type_name: &str) -> Self {
        Self::MissingField {
            role,
            field: field.to_string(),
            type_name: type_name.to_string(),
        }
    }

    pub(crate) fn invalid_field_type(
        role: TreeRole,
        field: &str,
        type_name: &str,
        found: Option<&StorageKind>,
    ) -> Self {
        Self::InvalidFieldType {
            role,
            field: field.to_string(),
            type_name: type_name.to_string(),
            expected: StorageKind::Integer,
            found: found.cloned(),
        }
    }

    pub(crate) fn invalid_association(field: &str, type_name: &str) -> Self {
        Self::InvalidAssociation {
            field: field.to_string(),
            type_name: type_name.to_string(),
        }
    }

    pub(crate) fn missing_roles(type_name: &str, roles: Vec<TreeRole>) -> Self {
        Self::MissingRoles {
            type_name: type_name.to_string(),
            roles,
        }
    }

    /// Name of the record type the error was raised for.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::MissingField { type_name, .. }
            | Self::InvalidFieldType { type_name, .. }
            | Self::InvalidAssociation { type_name, .. }
            | Self::MissingRoles { type_name, .. } => type_name,
        }
    }
}

// Render roles with their diagnostic labels, comma separated.
fn join_labels(roles: &[TreeRole]) -> String {
    roles
        .iter()
        .map(|role| role.label())
        .collect::<Vec<_>>()
        .join(", ")
}
