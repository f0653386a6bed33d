use crate::{
    role::Marker,
    types::{AssociationKind, StorageKind, Visibility},
};

///
/// PropertyModel
/// One declared property with its raw markers.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyModel {
    pub name: String,
    pub visibility: Visibility,

    pub markers: Vec<Marker>,
}

impl PropertyModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::default(),
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn markers(mut self, markers: impl IntoIterator<Item = Marker>) -> Self {
        self.markers.extend(markers);
        self
    }
}

///
/// FieldMapping
/// Scalar column mapping for a property.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMapping {
    pub kind: StorageKind,

    pub inherited: bool,
}

impl FieldMapping {
    #[must_use]
    pub const fn new(kind: StorageKind) -> Self {
        Self {
            kind,
            inherited: false,
        }
    }

    #[must_use]
    pub const fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }
}

///
/// AssociationMapping
/// Reference from a property to another record type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssociationMapping {
    pub kind: AssociationKind,
    pub target: String,

    pub inherited: bool,
}

impl AssociationMapping {
    #[must_use]
    pub fn new(kind: AssociationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            inherited: false,
        }
    }

    #[must_use]
    pub const fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }
}
