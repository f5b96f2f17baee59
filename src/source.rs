//! Remote-side schema model.
//!
//! A [`RawSchema`] is the column list exactly as the remote store reports it,
//! before any translation. [`SourceType`] is the closed set of type tags the
//! remote store is known to emit.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const TYPE_NULL: &str = "NULL_TYPE";
pub const TYPE_BOOLEAN: &str = "BOOLEAN";
pub const TYPE_TINYINT: &str = "TINYINT";
pub const TYPE_SMALLINT: &str = "SMALLINT";
pub const TYPE_INT: &str = "INT";
pub const TYPE_BIGINT: &str = "BIGINT";
pub const TYPE_FLOAT: &str = "FLOAT";
pub const TYPE_DOUBLE: &str = "DOUBLE";
pub const TYPE_DATE: &str = "DATE";
pub const TYPE_DATEV2: &str = "DATEV2";
pub const TYPE_DATETIME: &str = "DATETIME";
pub const TYPE_DATETIMEV2: &str = "DATETIMEV2";
pub const TYPE_BINARY: &str = "BINARY";
pub const TYPE_DECIMAL: &str = "DECIMAL";
pub const TYPE_DECIMALV2: &str = "DECIMALV2";
pub const TYPE_DECIMAL32: &str = "DECIMAL32";
pub const TYPE_DECIMAL64: &str = "DECIMAL64";
pub const TYPE_DECIMAL128I: &str = "DECIMAL128I";
pub const TYPE_TIME: &str = "TIME";
pub const TYPE_CHAR: &str = "CHAR";
pub const TYPE_LARGEINT: &str = "LARGEINT";
pub const TYPE_VARCHAR: &str = "VARCHAR";
pub const TYPE_JSONB: &str = "JSONB";
pub const TYPE_STRING: &str = "STRING";
pub const TYPE_ARRAY: &str = "ARRAY";
pub const TYPE_HLL: &str = "HLL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Null,
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Date,
    DateV2,
    DateTime,
    DateTimeV2,
    Binary,
    Decimal,
    DecimalV2,
    Decimal32,
    Decimal64,
    Decimal128I,
    Time,
    Char,
    LargeInt,
    Varchar,
    Jsonb,
    String,
    Array,
    Hll,
}

impl SourceType {
    pub const ALL: [SourceType; 26] = [
        SourceType::Null,
        SourceType::Boolean,
        SourceType::TinyInt,
        SourceType::SmallInt,
        SourceType::Int,
        SourceType::BigInt,
        SourceType::Float,
        SourceType::Double,
        SourceType::Date,
        SourceType::DateV2,
        SourceType::DateTime,
        SourceType::DateTimeV2,
        SourceType::Binary,
        SourceType::Decimal,
        SourceType::DecimalV2,
        SourceType::Decimal32,
        SourceType::Decimal64,
        SourceType::Decimal128I,
        SourceType::Time,
        SourceType::Char,
        SourceType::LargeInt,
        SourceType::Varchar,
        SourceType::Jsonb,
        SourceType::String,
        SourceType::Array,
        SourceType::Hll,
    ];

    /// Exact, case-sensitive match on the canonical uppercase tag.
    pub fn parse(tag: &str) -> Option<Self> {
        let parsed = match tag {
            TYPE_NULL => SourceType::Null,
            TYPE_BOOLEAN => SourceType::Boolean,
            TYPE_TINYINT => SourceType::TinyInt,
            TYPE_SMALLINT => SourceType::SmallInt,
            TYPE_INT => SourceType::Int,
            TYPE_BIGINT => SourceType::BigInt,
            TYPE_FLOAT => SourceType::Float,
            TYPE_DOUBLE => SourceType::Double,
            TYPE_DATE => SourceType::Date,
            TYPE_DATEV2 => SourceType::DateV2,
            TYPE_DATETIME => SourceType::DateTime,
            TYPE_DATETIMEV2 => SourceType::DateTimeV2,
            TYPE_BINARY => SourceType::Binary,
            TYPE_DECIMAL => SourceType::Decimal,
            TYPE_DECIMALV2 => SourceType::DecimalV2,
            TYPE_DECIMAL32 => SourceType::Decimal32,
            TYPE_DECIMAL64 => SourceType::Decimal64,
            TYPE_DECIMAL128I => SourceType::Decimal128I,
            TYPE_TIME => SourceType::Time,
            TYPE_CHAR => SourceType::Char,
            TYPE_LARGEINT => SourceType::LargeInt,
            TYPE_VARCHAR => SourceType::Varchar,
            TYPE_JSONB => SourceType::Jsonb,
            TYPE_STRING => SourceType::String,
            TYPE_ARRAY => SourceType::Array,
            TYPE_HLL => SourceType::Hll,
            _ => return None,
        };
        Some(parsed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Null => TYPE_NULL,
            SourceType::Boolean => TYPE_BOOLEAN,
            SourceType::TinyInt => TYPE_TINYINT,
            SourceType::SmallInt => TYPE_SMALLINT,
            SourceType::Int => TYPE_INT,
            SourceType::BigInt => TYPE_BIGINT,
            SourceType::Float => TYPE_FLOAT,
            SourceType::Double => TYPE_DOUBLE,
            SourceType::Date => TYPE_DATE,
            SourceType::DateV2 => TYPE_DATEV2,
            SourceType::DateTime => TYPE_DATETIME,
            SourceType::DateTimeV2 => TYPE_DATETIMEV2,
            SourceType::Binary => TYPE_BINARY,
            SourceType::Decimal => TYPE_DECIMAL,
            SourceType::DecimalV2 => TYPE_DECIMALV2,
            SourceType::Decimal32 => TYPE_DECIMAL32,
            SourceType::Decimal64 => TYPE_DECIMAL64,
            SourceType::Decimal128I => TYPE_DECIMAL128I,
            SourceType::Time => TYPE_TIME,
            SourceType::Char => TYPE_CHAR,
            SourceType::LargeInt => TYPE_LARGEINT,
            SourceType::Varchar => TYPE_VARCHAR,
            SourceType::Jsonb => TYPE_JSONB,
            SourceType::String => TYPE_STRING,
            SourceType::Array => TYPE_ARRAY,
            SourceType::Hll => TYPE_HLL,
        }
    }

    pub fn is_decimal(self) -> bool {
        matches!(
            self,
            SourceType::Decimal
                | SourceType::DecimalV2
                | SourceType::Decimal32
                | SourceType::Decimal64
                | SourceType::Decimal128I
        )
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column as reported by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDescriptor {
    name: String,
    type_tag: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    precision: u32,
    #[serde(default)]
    scale: u32,
}

impl ColumnDescriptor {
    pub fn new(
        name: impl Into<String>,
        type_tag: impl Into<String>,
        comment: impl Into<String>,
        precision: u32,
        scale: u32,
    ) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            comment: comment.into(),
            precision,
            scale,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSchema {
    columns: Vec<ColumnDescriptor>,
}

impl RawSchema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

impl FromIterator<ColumnDescriptor> for RawSchema {
    fn from_iter<I: IntoIterator<Item = ColumnDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
