use thiserror::Error;

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;

/// Failures raised while discovering or converting a remote schema.
///
/// Every variant aborts the whole conversion; no partial schema is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema metadata unavailable: {0}")]
    MetadataUnavailable(String),
    #[error("Unsupported type '{type_tag}'{}", column_suffix(.column))]
    UnsupportedType {
        column: Option<String>,
        type_tag: String,
    },
    #[error("Unrecognized type '{type_tag}'{}", column_suffix(.column))]
    UnrecognizedType {
        column: Option<String>,
        type_tag: String,
    },
    #[error("Invalid read options: {0}")]
    InvalidOptions(String),
    #[error("Malformed scan column payload: {0}")]
    MalformedWire(String),
}

impl SchemaError {
    /// Attach the column being converted to a type error.
    pub fn for_column(self, name: &str) -> Self {
        match self {
            SchemaError::UnsupportedType { type_tag, .. } => SchemaError::UnsupportedType {
                column: Some(name.to_string()),
                type_tag,
            },
            SchemaError::UnrecognizedType { type_tag, .. } => SchemaError::UnrecognizedType {
                column: Some(name.to_string()),
                type_tag,
            },
            other => other,
        }
    }
}

fn column_suffix(column: &Option<String>) -> String {
    match column {
        Some(name) => format!(" for column '{name}'"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_column_names_the_offending_column() {
        let err = SchemaError::UnsupportedType {
            column: None,
            type_tag: "HLL".to_string(),
        }
        .for_column("visitors");
        assert_eq!(
            err.to_string(),
            "Unsupported type 'HLL' for column 'visitors'"
        );
    }

    #[test]
    fn for_column_leaves_other_variants_untouched() {
        let err = SchemaError::MetadataUnavailable("timeout".to_string()).for_column("id");
        assert_eq!(err, SchemaError::MetadataUnavailable("timeout".to_string()));
    }
}
