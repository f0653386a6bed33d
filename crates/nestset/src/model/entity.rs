use crate::{
    model::{AssociationMapping, FieldMapping, Property, PropertyModel, TypeDescriptor},
    types::StorageKind,
};
use std::collections::BTreeMap;

///
/// TypeModel
///
/// In-memory reflected record type. Built once by a derive, a mapping file
/// or by hand, then handed to the driver as a [`TypeDescriptor`].
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypeModel {
    name: String,
    mapped_superclass: bool,
    properties: Vec<PropertyModel>,
    fields: BTreeMap<String, FieldMapping>,
    associations: BTreeMap<String, AssociationMapping>,
}

impl TypeModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn mapped_superclass(mut self, mapped_superclass: bool) -> Self {
        self.mapped_superclass = mapped_superclass;
        self
    }

    /// Declare a property that is not mapped at all.
    #[must_use]
    pub fn property(mut self, property: PropertyModel) -> Self {
        self.push_property(property);
        self
    }

    /// Declare a property mapped as a scalar column.
    #[must_use]
    pub fn field(mut self, property: PropertyModel, mapping: FieldMapping) -> Self {
        self.fields.insert(property.name.clone(), mapping);
        self.push_property(property);
        self
    }

    /// Declare a property mapped as an association.
    #[must_use]
    pub fn association(mut self, property: PropertyModel, mapping: AssociationMapping) -> Self {
        self.associations.insert(property.name.clone(), mapping);
        self.push_property(property);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn get_association(&self, name: &str) -> Option<&AssociationMapping> {
        self.associations.get(name)
    }

    // A redeclared property replaces the earlier one in place so declaration
    // order stays stable.
    fn push_property(&mut self, property: PropertyModel) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }
}

impl TypeDescriptor for TypeModel {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn is_mapped_superclass(&self) -> bool {
        self.mapped_superclass
    }

    fn properties(&self) -> Vec<Property<'_>> {
        self.properties
            .iter()
            .map(|p| Property {
                name: &p.name,
                visibility: p.visibility,
                markers: &p.markers,
            })
            .collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn field_kind(&self, name: &str) -> Option<&StorageKind> {
        self.fields.get(name).map(|f| &f.kind)
    }

    fn is_single_valued_association(&self, name: &str) -> bool {
        self.associations
            .get(name)
            .is_some_and(|a| a.kind.is_single_valued())
    }

    fn is_inherited_field(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|f| f.inherited)
    }

    fn is_inherited_association(&self, name: &str) -> bool {
        self.associations.get(name).is_some_and(|a| a.inherited)
    }
}
