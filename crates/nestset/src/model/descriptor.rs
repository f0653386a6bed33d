use crate::{role::Marker, types::{StorageKind, Visibility}};

///
/// Property
/// Borrowed view of one declared property, in declaration order.
///

#[derive(Clone, Copy, Debug)]
pub struct Property<'a> {
    pub name: &'a str,
    pub visibility: Visibility,
    /// Raw markers as declared; interpretation belongs to a role resolver.
    pub markers: &'a [Marker],
}

///
/// TypeDescriptor
///
/// Read-only handle to the record type under inspection.
///
/// "Field" means a mapped scalar column; associations are tracked
/// separately, so `has_field` is false for an association property.
///

pub trait TypeDescriptor {
    fn type_name(&self) -> &str;

    /// Mapped superclasses inline their fields into subclasses' mappings.
    fn is_mapped_superclass(&self) -> bool;

    /// Every declared property, mapped or not, in declaration order.
    fn properties(&self) -> Vec<Property<'_>>;

    fn has_field(&self, name: &str) -> bool;

    fn field_kind(&self, name: &str) -> Option<&StorageKind>;

    fn is_single_valued_association(&self, name: &str) -> bool;

    /// Field inherited from an ancestor that owns its own mapping.
    fn is_inherited_field(&self, name: &str) -> bool;

    /// Association inherited from (and owned by) an ancestor.
    fn is_inherited_association(&self, name: &str) -> bool;
}
