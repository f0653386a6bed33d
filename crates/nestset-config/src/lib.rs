//! TOML mapping files for nestset.
//!
//! A mapping file declares record types, their properties and raw tree
//! markers, plus the driver options (the marker namespace alias). Loading a
//! file yields [`TypeModel`]s and a ready [`TreeRegistry`].

mod error;

pub use error::ConfigError;

use nestset::{
    TreeDriver, TreeRegistry,
    model::{AssociationMapping, FieldMapping, PropertyModel, TypeModel},
    role::{DEFAULT_NAMESPACE, Marker, MarkerNamespace, MarkerReader},
    types::{AssociationKind, StorageKind, Visibility},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs, path::Path};

///
/// MappingFile
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MappingFile {
    #[serde(default)]
    pub driver: DriverOptions,

    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl MappingFile {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Marker reader scoped to the configured namespace alias.
    #[must_use]
    pub fn marker_reader(&self) -> MarkerReader {
        MarkerReader::new(MarkerNamespace::new(self.driver.namespace.clone()))
    }

    #[must_use]
    pub fn driver(&self) -> TreeDriver {
        TreeDriver::new(self.marker_reader())
    }

    /// Build the declared types, in file order.
    pub fn type_models(&self) -> Result<Vec<TypeModel>, ConfigError> {
        let mut seen = BTreeSet::new();

        self.types
            .iter()
            .map(|decl| {
                if !seen.insert(decl.name.as_str()) {
                    return Err(ConfigError::DuplicateType {
                        type_name: decl.name.clone(),
                    });
                }
                decl.to_model()
            })
            .collect()
    }

    /// Run the driver over every declared type.
    pub fn build_registry(&self) -> Result<TreeRegistry, ConfigError> {
        let mut registry = TreeRegistry::new(self.driver());
        for model in self.type_models()? {
            registry.get_or_load(&model)?;
        }

        Ok(registry)
    }
}

///
/// DriverOptions
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DriverOptions {
    /// Alias tree markers are declared under, e.g. `acme` for `acme:TreeLeft`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

///
/// TypeDecl
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,

    #[serde(default)]
    pub mapped_superclass: bool,

    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
}

impl TypeDecl {
    pub fn to_model(&self) -> Result<TypeModel, ConfigError> {
        self.properties.iter().try_fold(
            TypeModel::new(&self.name).mapped_superclass(self.mapped_superclass),
            |model, property| property.declare(&self.name, model),
        )
    }
}

///
/// PropertyDecl
///
/// One property; at most one of `column` / `association`. A property with
/// neither is reflected but not mapped.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PropertyDecl {
    pub name: String,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub markers: Vec<String>,

    #[serde(default)]
    pub column: Option<StorageKind>,

    #[serde(default)]
    pub association: Option<AssociationDecl>,

    #[serde(default)]
    pub inherited: bool,
}

impl PropertyDecl {
    fn declare(&self, type_name: &str, model: TypeModel) -> Result<TypeModel, ConfigError> {
        let property = PropertyModel::new(&self.name)
            .visibility(self.visibility)
            .markers(self.markers.iter().map(|raw| Marker::parse(raw)));

        match (&self.column, &self.association) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingMapping {
                type_name: type_name.to_string(),
                property: self.name.clone(),
            }),
            (Some(kind), None) => {
                let mut mapping = FieldMapping::new(kind.clone());
                mapping.inherited = self.inherited;

                Ok(model.field(property, mapping))
            }
            (None, Some(association)) => {
                let mut mapping = AssociationMapping::new(association.kind, &association.target);
                mapping.inherited = self.inherited || association.inherited;

                Ok(model.association(property, mapping))
            }
            (None, None) => Ok(model.property(property)),
        }
    }
}

///
/// AssociationDecl
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssociationDecl {
    pub kind: AssociationKind,
    pub target: String,

    #[serde(default)]
    pub inherited: bool,
}
