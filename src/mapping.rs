//! Remote type tags to engine types, plus allow-list projection.
//!
//! Several remote types (dates, large integers, arrays, JSON) have no native
//! engine representation and are widened to [`ColumnType::String`]; the
//! producer supplies those values pre-stringified.

use std::collections::HashSet;

use log::debug;

use crate::{
    error::{Result, SchemaError},
    schema::{ColumnType, DecimalSpec, Field, Schema},
    source::{RawSchema, SourceType},
};

/// Columns requested by a read. `All` is the wildcard used when no list is
/// configured or the configured list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldSelection {
    #[default]
    All,
    Only(HashSet<String>),
}

impl FieldSelection {
    /// Parse a comma-separated allow-list. `None` and `""` both select every
    /// column.
    pub fn parse(list: Option<&str>) -> Self {
        match list {
            None | Some("") => FieldSelection::All,
            Some(list) => {
                FieldSelection::Only(list.split(',').map(|name| name.to_string()).collect())
            }
        }
    }

    pub fn includes(&self, name: &str) -> bool {
        match self {
            FieldSelection::All => true,
            FieldSelection::Only(names) => names.contains(name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FieldSelection::All)
    }
}

/// Engine type for a source tag.
pub fn map_source_type(ty: SourceType, precision: u32, scale: u32) -> Result<ColumnType> {
    let mapped = match ty {
        SourceType::Null => ColumnType::Null,
        SourceType::Boolean => ColumnType::Boolean,
        SourceType::TinyInt => ColumnType::Byte,
        SourceType::SmallInt => ColumnType::Short,
        SourceType::Int => ColumnType::Integer,
        SourceType::BigInt => ColumnType::Long,
        SourceType::Float => ColumnType::Float,
        SourceType::Double | SourceType::Time => ColumnType::Double,
        SourceType::Date
        | SourceType::DateV2
        | SourceType::DateTime
        | SourceType::DateTimeV2
        | SourceType::Char
        | SourceType::LargeInt
        | SourceType::Varchar
        | SourceType::Jsonb
        | SourceType::String
        | SourceType::Array => ColumnType::String,
        SourceType::Binary => ColumnType::Binary,
        SourceType::Decimal
        | SourceType::DecimalV2
        | SourceType::Decimal32
        | SourceType::Decimal64
        | SourceType::Decimal128I => ColumnType::Decimal(DecimalSpec::new(precision, scale)),
        SourceType::Hll => {
            return Err(SchemaError::UnsupportedType {
                column: None,
                type_tag: ty.as_str().to_string(),
            });
        }
    };
    Ok(mapped)
}

pub fn map_type(type_tag: &str, precision: u32, scale: u32) -> Result<ColumnType> {
    let ty = SourceType::parse(type_tag).ok_or_else(|| SchemaError::UnrecognizedType {
        column: None,
        type_tag: type_tag.to_string(),
    })?;
    map_source_type(ty, precision, scale)
}

/// Convert the selected columns of `raw`, in source order.
pub fn project_selection(raw: &RawSchema, selection: &FieldSelection) -> Result<Schema> {
    let fields = raw
        .columns()
        .iter()
        .filter(|column| selection.includes(column.name()))
        .map(|column| {
            map_type(column.type_tag(), column.precision(), column.scale())
                .map(|datatype| Field::nullable(column.name(), datatype))
                .map_err(|err| err.for_column(column.name()))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "Projected {} of {} column(s) into target schema",
        fields.len(),
        raw.len()
    );
    Ok(Schema::new(fields))
}

pub fn project(raw: &RawSchema, allow_list: Option<&str>) -> Result<Schema> {
    project_selection(raw, &FieldSelection::parse(allow_list))
}
