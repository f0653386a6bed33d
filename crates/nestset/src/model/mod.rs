//! Reflected type model.
//!
//! The driver only sees record types through [`TypeDescriptor`]; how the
//! descriptor is produced (derive macro, mapping file, ORM reflection) is up
//! to the caller. [`TypeModel`] is the in-memory descriptor this crate ships.
//!
//! In general:
//! - `model` describes *what was declared*
//! - `driver` decides *what it means* for the tree
pub mod descriptor;
pub mod entity;
pub mod field;

// re-exports
pub use descriptor::{Property, TypeDescriptor};
pub use entity::TypeModel;
pub use field::{AssociationMapping, FieldMapping, PropertyModel};
