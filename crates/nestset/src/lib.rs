//! Nested-set tree metadata for ORM type mappings.
//!
//! A record type stored as a nested set marks four of its properties with
//! structural roles: a left and a right boundary, a parent reference and an
//! optional level counter. This crate reads those roles from a reflected
//! [`TypeDescriptor`](model::TypeDescriptor), checks each against the
//! property's mapping and hands back a validated [`TreeMapping`].
//!
//! Maintaining the boundaries at runtime is somebody else's job; this crate
//! only tells that engine which fields to use.

pub mod driver;
pub mod error;
pub mod model;
pub mod obs;
pub mod registry;
pub mod role;
pub mod types;

// re-exports
pub use driver::{MetadataDriver, TreeConfig, TreeDriver, TreeMapping};
pub use error::TreeMappingError;
pub use nestset_derive::TreeEntity;
pub use registry::TreeRegistry;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        TreeEntity,
        driver::{MetadataDriver, TreeConfig, TreeDriver, TreeMapping},
        error::TreeMappingError,
        model::{AssociationMapping, FieldMapping, PropertyModel, TypeDescriptor, TypeModel},
        registry::TreeRegistry,
        role::{FieldRoleResolver, Marker, MarkerNamespace, MarkerReader, RoleTable, TreeRole},
        types::{AssociationKind, StorageKind, Visibility},
    };
}

///
/// TreeEntity
///
/// A Rust type that can describe itself as a reflected record type.
/// Usually implemented with `#[derive(TreeEntity)]`.
///

pub trait TreeEntity {
    fn type_model() -> model::TypeModel;
}
