//! Schema discovery against the remote metadata service.
//!
//! Transport is an injected [`MetadataClient`]; this module only turns the
//! returned response body into a [`RawSchema`] and hands it to the projector.
//! No retries or caching happen here.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::{
    config::ReadOptions,
    error::{Result, SchemaError},
    mapping::project_selection,
    schema::Schema,
    source::{ColumnDescriptor, RawSchema},
};

const STATUS_OK: i64 = 200;

/// Fetches the raw schema response body for the table described by `options`.
pub trait MetadataClient: Send + Sync {
    fn fetch_schema_body(&self, options: &ReadOptions) -> anyhow::Result<String>;
}

/// Serves a previously saved schema response from disk.
#[derive(Debug, Clone)]
pub struct FileMetadataClient {
    path: PathBuf,
}

impl FileMetadataClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataClient for FileMetadataClient {
    fn fetch_schema_body(&self, _options: &ReadOptions) -> anyhow::Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Reading schema response {:?}", self.path))
    }
}

#[derive(Debug, Deserialize)]
struct SchemaResponse {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default, rename = "keysType")]
    keys_type: Option<String>,
    #[serde(default)]
    properties: Option<Vec<PropertyResponse>>,
}

#[derive(Debug, Deserialize)]
struct PropertyResponse {
    name: String,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    precision: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    scale: u32,
}

// The service renders precision/scale as numbers or numeric strings
// depending on its version.
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| de::Error::custom(format!("expected an unsigned integer, found {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an unsigned integer, found '{s}'"))),
        Some(other) => Err(de::Error::custom(format!(
            "expected an unsigned integer, found {other}"
        ))),
    }
}

/// Parse a schema response body into the remote column list.
pub fn parse_schema_response(body: &str) -> Result<RawSchema> {
    let response: SchemaResponse = serde_json::from_str(body)
        .map_err(|err| SchemaError::MetadataUnavailable(format!("malformed response: {err}")))?;

    if let Some(status) = response.status
        && status != STATUS_OK
    {
        let msg = response.msg.as_deref().unwrap_or("no message");
        return Err(SchemaError::MetadataUnavailable(format!(
            "service returned status {status}: {msg}"
        )));
    }

    let properties = response.properties.ok_or_else(|| {
        SchemaError::MetadataUnavailable("response has no 'properties' list".to_string())
    })?;
    if let Some(keys_type) = response.keys_type.as_deref() {
        debug!("Remote table keys type: {keys_type}");
    }

    Ok(properties
        .into_iter()
        .map(|p| {
            ColumnDescriptor::new(
                p.name,
                p.type_tag,
                p.comment.unwrap_or_default(),
                p.precision,
                p.scale,
            )
        })
        .collect())
}

/// One call to the collaborator. Its error text is passed through unchanged.
pub fn fetch_schema(client: &dyn MetadataClient, options: &ReadOptions) -> Result<RawSchema> {
    let body = client
        .fetch_schema_body(options)
        .map_err(|err| SchemaError::MetadataUnavailable(format!("{err:#}")))?;
    let raw = parse_schema_response(&body)?;
    debug!("Fetched raw schema with {} column(s)", raw.len());
    Ok(raw)
}

/// Fetch, then project with the options' `read-field-list`.
pub fn discover_schema(client: &dyn MetadataClient, options: &ReadOptions) -> Result<Schema> {
    let raw = fetch_schema(client, options)?;
    project_selection(&raw, &options.field_selection())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, DecimalSpec};
    use anyhow::anyhow;

    const BODY: &str = r#"{
        "keysType": "DUP_KEYS",
        "status": 200,
        "properties": [
            {"name": "id", "aggregation_type": "", "comment": "", "type": "BIGINT"},
            {"name": "price", "comment": "unit price", "type": "DECIMALV2", "precision": "27", "scale": "9"},
            {"name": "qty", "type": "DECIMAL64", "precision": 12, "scale": 2}
        ]
    }"#;

    struct Fixed(&'static str);

    impl MetadataClient for Fixed {
        fn fetch_schema_body(&self, _options: &ReadOptions) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl MetadataClient for Failing {
        fn fetch_schema_body(&self, _options: &ReadOptions) -> anyhow::Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    #[test]
    fn parse_accepts_numeric_and_string_precision() {
        let raw = parse_schema_response(BODY).expect("parse body");
        assert_eq!(raw.names(), vec!["id", "price", "qty"]);
        let price = raw.column("price").unwrap();
        assert_eq!((price.precision(), price.scale()), (27, 9));
        assert_eq!(price.comment(), "unit price");
        let qty = raw.column("qty").unwrap();
        assert_eq!((qty.precision(), qty.scale()), (12, 2));
        let id = raw.column("id").unwrap();
        assert_eq!((id.precision(), id.scale()), (0, 0));
    }

    #[test]
    fn non_ok_status_is_metadata_unavailable() {
        let err =
            parse_schema_response(r#"{"status": 404, "msg": "table not found"}"#).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MetadataUnavailable(
                "service returned status 404: table not found".to_string()
            )
        );
    }

    #[test]
    fn malformed_bodies_are_metadata_unavailable() {
        for body in [
            "not json",
            r#"{"status": 200}"#,
            r#"{"status": 200, "properties": [{"name": "a"}]}"#,
            r#"{"status": 200, "properties": [{"name": "a", "type": "INT", "scale": -1}]}"#,
        ] {
            let err = parse_schema_response(body).unwrap_err();
            assert!(
                matches!(err, SchemaError::MetadataUnavailable(_)),
                "body {body} gave {err:?}"
            );
        }
    }

    #[test]
    fn collaborator_failures_pass_through() {
        let err = fetch_schema(&Failing, &ReadOptions::new()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MetadataUnavailable("connection refused".to_string())
        );
    }

    #[test]
    fn discover_schema_applies_configured_field_list() {
        let options = ReadOptions::new().with_field_list("qty,id");
        let schema = discover_schema(&Fixed(BODY), &options).expect("discover");
        assert_eq!(schema.field_names(), vec!["id", "qty"]);
        assert_eq!(
            schema.field("qty").map(|f| &f.datatype),
            Some(&ColumnType::Decimal(DecimalSpec::new(12, 2)))
        );
    }
}
