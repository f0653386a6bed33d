use nestset::TreeMappingError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read mapping file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("type '{type_name}' is declared more than once")]
    DuplicateType { type_name: String },

    #[error("property '{property}' in type '{type_name}' declares both a column and an association")]
    ConflictingMapping { type_name: String, property: String },

    #[error(transparent)]
    Mapping(#[from] TreeMappingError),
}
