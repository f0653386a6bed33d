use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// StorageKind
/// Scalar storage type of one mapped field, named the way the ORM names it.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
#[remain::sorted]
pub enum StorageKind {
    #[display("bigint")]
    BigInt,
    #[display("binary")]
    Binary,
    #[display("boolean")]
    Boolean,
    #[display("date")]
    Date,
    #[display("datetime")]
    DateTime,
    #[display("decimal")]
    Decimal,
    #[display("float")]
    Float,
    #[display("guid")]
    Guid,
    #[display("integer")]
    Integer,
    #[display("json")]
    Json,
    /// Any storage type name not listed above, kept verbatim.
    /// Never holds a listed name; build kinds through `from_name`.
    #[display("{_0}")]
    Other(String),
    #[display("smallint")]
    SmallInt,
    #[display("string")]
    String,
    #[display("text")]
    Text,
    #[display("time")]
    Time,
}

impl StorageKind {
    /// Resolve a storage type name. Names match exactly as the ORM spells
    /// them; anything else is kept verbatim as `Other`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "bigint" => Self::BigInt,
            "binary" => Self::Binary,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "guid" => Self::Guid,
            "integer" => Self::Integer,
            "json" => Self::Json,
            "smallint" => Self::SmallInt,
            "string" => Self::String,
            "text" => Self::Text,
            "time" => Self::Time,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Integer-like kinds are the only ones accepted for tree boundaries and
    /// the level counter.
    #[must_use]
    pub const fn is_integer_like(&self) -> bool {
        matches!(self, Self::Integer | Self::SmallInt | Self::BigInt)
    }
}

impl From<&str> for StorageKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for StorageKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<StorageKind> for String {
    fn from(kind: StorageKind) -> Self {
        kind.to_string()
    }
}

///
/// AssociationKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum AssociationKind {
    #[display("many_to_many")]
    ManyToMany,
    #[display("many_to_one")]
    ManyToOne,
    #[display("one_to_many")]
    OneToMany,
    #[display("one_to_one")]
    OneToOne,
}

impl AssociationKind {
    /// True for references to exactly one other record.
    #[must_use]
    pub const fn is_single_valued(self) -> bool {
        matches!(self, Self::ManyToOne | Self::OneToOne)
    }
}

///
/// Visibility
/// Declared visibility of a reflected property.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    #[display("private")]
    Private,
    #[display("protected")]
    Protected,
    #[display("public")]
    Public,
}

impl Visibility {
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }
}
