//! Target engine schema model.
//!
//! [`ColumnType`] is the closed set of engine types a remote column can be
//! converted into, [`Field`] pairs a column name with its type and
//! nullability, and [`Schema`] is the ordered field list handed to
//! downstream planning and row decoding.

use std::{fmt, str::FromStr};

use anyhow::{Context, Result as AnyResult, anyhow, bail, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DecimalSpec {
    pub precision: u32,
    pub scale: u32,
}

impl DecimalSpec {
    /// Carries precision and scale verbatim. A `(0,0)` spec coming from the
    /// scan-column path is kept as-is for the consumer to interpret.
    pub const fn new(precision: u32, scale: u32) -> Self {
        Self { precision, scale }
    }

    pub fn is_unspecified(&self) -> bool {
        self.precision == 0 && self.scale == 0
    }

    pub fn signature(&self) -> String {
        format!("decimal({},{})", self.precision, self.scale)
    }

    pub fn describe(&self) -> String {
        format!("decimal(precision={},scale={})", self.precision, self.scale)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Null,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    String,
    Binary,
    Decimal(DecimalSpec),
}

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.signature_token())
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        ColumnType::from_str(&token).map_err(|err| de::Error::custom(err.to_string()))
    }
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Null => "null",
            ColumnType::Boolean => "boolean",
            ColumnType::Byte => "byte",
            ColumnType::Short => "short",
            ColumnType::Integer => "integer",
            ColumnType::Long => "long",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::String => "string",
            ColumnType::Binary => "binary",
            ColumnType::Decimal(_) => "decimal",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &[
            "null",
            "boolean",
            "byte",
            "short",
            "integer",
            "long",
            "float",
            "double",
            "string",
            "binary",
            "decimal(precision,scale)",
        ]
    }

    pub fn describe(&self) -> String {
        match self {
            ColumnType::Decimal(spec) => spec.describe(),
            _ => self.as_str().to_string(),
        }
    }

    pub fn signature_token(&self) -> String {
        match self {
            ColumnType::Decimal(spec) => spec.signature(),
            _ => self.as_str().to_string(),
        }
    }

    pub fn decimal_spec(&self) -> Option<&DecimalSpec> {
        match self {
            ColumnType::Decimal(spec) => Some(spec),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl FromStr for ColumnType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "null" => Ok(ColumnType::Null),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            "byte" | "int8" => Ok(ColumnType::Byte),
            "short" | "int16" => Ok(ColumnType::Short),
            "integer" | "int" | "int32" => Ok(ColumnType::Integer),
            "long" | "int64" => Ok(ColumnType::Long),
            "float" | "float32" => Ok(ColumnType::Float),
            "double" | "float64" => Ok(ColumnType::Double),
            "string" => Ok(ColumnType::String),
            "binary" => Ok(ColumnType::Binary),
            other if other.starts_with("decimal") => parse_decimal_type(&normalized),
            _ => Err(anyhow!(
                "Unknown column type '{value}'. Supported types: {}",
                ColumnType::variants().join(", ")
            )),
        }
    }
}

fn parse_decimal_type(value: &str) -> AnyResult<ColumnType> {
    let start = value.find('(').ok_or_else(|| {
        anyhow!("Decimal type must specify precision and scale, e.g. decimal(18,4)")
    })?;
    ensure!(
        value.ends_with(')'),
        "Decimal type must close with ')', e.g. decimal(18,4)"
    );
    let inner = &value[start + 1..value.len() - 1];
    let mut precision: Option<u32> = None;
    let mut scale: Option<u32> = None;
    let mut positional = Vec::new();

    for part in inner.split(',') {
        let token = part.trim();
        if token.is_empty() {
            continue;
        }
        match token
            .split_once(['=', ':'])
            .map(|(k, v)| (k.trim(), v.trim()))
        {
            Some((key, raw)) => {
                let parsed: u32 = raw
                    .parse()
                    .with_context(|| format!("Invalid decimal {key} '{raw}'"))?;
                match key {
                    "precision" => precision = Some(parsed),
                    "scale" => scale = Some(parsed),
                    other => bail!("Unknown decimal option '{other}' in '{token}'"),
                }
            }
            None => positional.push(token),
        }
    }
    ensure!(
        positional.len() <= 2,
        "Decimal type accepts at most two positional arguments"
    );

    if let Some(first) = positional.first()
        && precision.is_none()
    {
        precision = Some(
            first
                .parse()
                .with_context(|| format!("Invalid decimal precision '{first}'"))?,
        );
    }
    if let Some(second) = positional.get(1)
        && scale.is_none()
    {
        scale = Some(
            second
                .parse()
                .with_context(|| format!("Invalid decimal scale '{second}'"))?,
        );
    }

    let precision = precision
        .ok_or_else(|| anyhow!("Decimal type requires a precision value, e.g. decimal(18,4)"))?;
    let scale =
        scale.ok_or_else(|| anyhow!("Decimal type requires a scale value, e.g. decimal(18,4)"))?;
    Ok(ColumnType::Decimal(DecimalSpec::new(precision, scale)))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub datatype: ColumnType,
    #[serde(default = "Field::default_nullable")]
    pub nullable: bool,
}

impl Field {
    /// Remote columns never assert non-nullability, so fields start nullable.
    pub fn nullable(name: impl Into<String>, datatype: ColumnType) -> Self {
        Self {
            name: name.into(),
            datatype,
            nullable: true,
        }
    }

    pub const fn default_nullable() -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn to_json_string(&self) -> AnyResult<String> {
        serde_json::to_string_pretty(self).context("Serializing schema to JSON")
    }

    pub fn to_yaml_string(&self) -> AnyResult<String> {
        serde_yaml::to_string(self).context("Serializing schema to YAML")
    }
}
