//! Tree metadata driver.
//!
//! One pass per record type, in two phases:
//! - Collecting: scan declared properties, check each role marker and fill a
//!   [`TreeConfig`]; the first violation aborts the pass.
//! - Verifying: once every property is seen, require `parent`, `left` and
//!   `right` if any role was declared at all.
//!
//! There is no retry and no partial result. A type without any tree role is
//! not a tree type and is not an error.

mod config;

#[cfg(test)]
mod tests;

use crate::{
    error::TreeMappingError,
    model::{Property, TypeDescriptor},
    obs::sink::{self, DriverEvent, PassOutcome},
    role::{FieldRoleResolver, MarkerReader, TreeRole},
};
use derive_more::Display;

// re-exports
pub use config::{TreeConfig, TreeMapping};

///
/// MetadataDriver
///
/// Extension metadata driver contract: read the extension's metadata from a
/// type descriptor into a config, then validate the completed config.
///

pub trait MetadataDriver {
    type Config: Default;
    type Error: std::error::Error;

    fn read_extended_metadata(
        &self,
        descriptor: &dyn TypeDescriptor,
        config: &mut Self::Config,
    ) -> Result<(), Self::Error>;

    fn validate_full_metadata(
        &self,
        descriptor: &dyn TypeDescriptor,
        config: &Self::Config,
    ) -> Result<(), Self::Error>;
}

///
/// SkipReason
/// Why a property was left out of the pass.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum SkipReason {
    /// Non-private member of a mapped superclass; owned by subclasses.
    #[display("mapped superclass member")]
    MappedSuperclassMember,
    #[display("inherited field")]
    InheritedField,
    #[display("inherited association")]
    InheritedAssociation,
}

/// Ownership exclusion for one property, if any.
#[must_use]
pub fn skip_reason(descriptor: &dyn TypeDescriptor, property: &Property<'_>) -> Option<SkipReason> {
    if descriptor.is_mapped_superclass() && !property.visibility.is_private() {
        Some(SkipReason::MappedSuperclassMember)
    } else if descriptor.is_inherited_field(property.name) {
        Some(SkipReason::InheritedField)
    } else if descriptor.is_inherited_association(property.name) {
        Some(SkipReason::InheritedAssociation)
    } else {
        None
    }
}

///
/// TreeDriver
///
/// Nested-set metadata driver. Role discovery is delegated to `R`.
///

#[derive(Clone, Debug)]
pub struct TreeDriver<R = MarkerReader> {
    resolver: R,
}

impl Default for TreeDriver {
    fn default() -> Self {
        Self::new(MarkerReader::default())
    }
}

impl<R: FieldRoleResolver> TreeDriver<R> {
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Collecting phase into a fresh config.
    pub fn extract(&self, descriptor: &dyn TypeDescriptor) -> Result<TreeConfig, TreeMappingError> {
        let mut config = TreeConfig::new();
        self.read_extended_metadata(descriptor, &mut config)?;

        Ok(config)
    }

    /// Verifying phase.
    pub fn validate_complete(
        &self,
        descriptor: &dyn TypeDescriptor,
        config: &TreeConfig,
    ) -> Result<(), TreeMappingError> {
        self.validate_full_metadata(descriptor, config)
    }

    /// Run both phases. `Ok(None)` means the type declares no tree roles.
    pub fn load(
        &self,
        descriptor: &dyn TypeDescriptor,
    ) -> Result<Option<TreeMapping>, TreeMappingError> {
        let type_name = descriptor.type_name();
        sink::record(&DriverEvent::PassStart { type_name });

        let result = self.extract(descriptor).and_then(|config| {
            self.validate_complete(descriptor, &config)?;
            // validated and non-empty means every mandatory role is present
            Ok(config.into_mapping())
        });

        let outcome = match &result {
            Ok(Some(_)) => PassOutcome::Tree,
            Ok(None) => PassOutcome::Plain,
            Err(_) => PassOutcome::Failed,
        };
        sink::record(&DriverEvent::PassFinish { type_name, outcome });

        result
    }

    // Apply one role carried by a property after checking its constraint.
    fn apply_role(
        descriptor: &dyn TypeDescriptor,
        config: &mut TreeConfig,
        role: TreeRole,
        field: &str,
    ) -> Result<(), TreeMappingError> {
        let type_name = descriptor.type_name();

        match role {
            TreeRole::Parent => {
                if !descriptor.is_single_valued_association(field) {
                    return Err(TreeMappingError::invalid_association(field, type_name));
                }
            }
            TreeRole::Left | TreeRole::Right | TreeRole::Level => {
                if !descriptor.has_field(field) {
                    return Err(TreeMappingError::missing_field(role, field, type_name));
                }
                let kind = descriptor.field_kind(field);
                if !kind.is_some_and(|kind| kind.is_integer_like()) {
                    return Err(TreeMappingError::invalid_field_type(
                        role, field, type_name, kind,
                    ));
                }
            }
        }

        // last declared wins
        match config.set(role, field) {
            Some(previous) => sink::record(&DriverEvent::RoleOverwritten {
                type_name,
                role,
                previous: &previous,
                field,
            }),
            None => sink::record(&DriverEvent::RoleAssigned {
                type_name,
                role,
                field,
            }),
        }

        Ok(())
    }
}

impl<R: FieldRoleResolver> MetadataDriver for TreeDriver<R> {
    type Config = TreeConfig;
    type Error = TreeMappingError;

    fn read_extended_metadata(
        &self,
        descriptor: &dyn TypeDescriptor,
        config: &mut TreeConfig,
    ) -> Result<(), TreeMappingError> {
        let type_name = descriptor.type_name();

        for property in descriptor.properties() {
            if let Some(reason) = skip_reason(descriptor, &property) {
                sink::record(&DriverEvent::FieldSkipped {
                    type_name,
                    field: property.name,
                    reason,
                });
                continue;
            }

            for role in self.resolver.roles(descriptor, &property) {
                Self::apply_role(descriptor, config, role, property.name)?;
            }
        }

        Ok(())
    }

    fn validate_full_metadata(
        &self,
        descriptor: &dyn TypeDescriptor,
        config: &TreeConfig,
    ) -> Result<(), TreeMappingError> {
        if config.is_empty() {
            return Ok(());
        }

        let missing = config.missing_mandatory();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TreeMappingError::missing_roles(
                descriptor.type_name(),
                missing,
            ))
        }
    }
}
