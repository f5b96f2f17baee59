//! Scan-column descriptors sent by the execution backend.
//!
//! The backend only reports a name and a type tag per column. Folding those
//! into a [`RawSchema`] lets the scan path reuse the same type mapping as the
//! metadata path.

use bincode::config;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SchemaError},
    source::{ColumnDescriptor, RawSchema},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanColumnDesc {
    pub name: String,
    pub type_tag: String,
}

impl ScanColumnDesc {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }
}

/// Build a raw schema from backend descriptors. Comment is left empty and
/// precision/scale are recorded as `(0,0)`.
pub fn from_wire_columns(descriptors: &[ScanColumnDesc]) -> RawSchema {
    descriptors
        .iter()
        .map(|desc| ColumnDescriptor::new(desc.name.as_str(), desc.type_tag.as_str(), "", 0, 0))
        .collect()
}

pub fn encode_scan_columns(descriptors: &[ScanColumnDesc]) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(descriptors, config::standard())
        .map_err(|err| SchemaError::MalformedWire(err.to_string()))
}

pub fn decode_scan_columns(bytes: &[u8]) -> Result<Vec<ScanColumnDesc>> {
    let (descriptors, consumed): (Vec<ScanColumnDesc>, usize) =
        bincode::serde::decode_from_slice(bytes, config::standard())
            .map_err(|err| SchemaError::MalformedWire(err.to_string()))?;
    if consumed != bytes.len() {
        return Err(SchemaError::MalformedWire(format!(
            "{} trailing byte(s) after {} descriptor(s)",
            bytes.len() - consumed,
            descriptors.len()
        )));
    }
    debug!("Decoded {} scan column descriptor(s)", descriptors.len());
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::project;
    use crate::schema::{ColumnType, DecimalSpec, Field};

    #[test]
    fn wire_columns_map_through_projection() {
        let raw = from_wire_columns(&[
            ScanColumnDesc::new("c1", "INT"),
            ScanColumnDesc::new("c2", "VARCHAR"),
        ]);
        let schema = project(&raw, Some("")).expect("project");
        assert_eq!(
            schema.fields,
            vec![
                Field::nullable("c1", ColumnType::Integer),
                Field::nullable("c2", ColumnType::String),
            ]
        );
    }

    #[test]
    fn wire_decimals_keep_zero_precision_and_scale() {
        let raw = from_wire_columns(&[ScanColumnDesc::new("amount", "DECIMAL128I")]);
        let column = &raw.columns()[0];
        assert_eq!(column.comment(), "");
        let schema = project(&raw, None).expect("project");
        assert_eq!(
            schema.fields[0].datatype,
            ColumnType::Decimal(DecimalSpec::new(0, 0))
        );
    }

    #[test]
    fn payload_decodes_back_to_descriptors() {
        let descriptors = vec![
            ScanColumnDesc::new("k1", "TINYINT"),
            ScanColumnDesc::new("k2", "DATEV2"),
        ];
        let bytes = encode_scan_columns(&descriptors).expect("encode");
        assert_eq!(decode_scan_columns(&bytes).expect("decode"), descriptors);
    }

    #[test]
    fn truncated_and_padded_payloads_are_rejected() {
        let bytes = encode_scan_columns(&[ScanColumnDesc::new("k1", "INT")]).expect("encode");

        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(
            decode_scan_columns(truncated),
            Err(SchemaError::MalformedWire(_))
        ));

        let mut padded = bytes.clone();
        padded.push(0);
        let err = decode_scan_columns(&padded).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }
}
