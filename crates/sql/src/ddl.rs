//! Recursive rendering of field-type trees into table DDL.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

const SCALAR_KINDS: [&str; 6] = ["timestamp", "string", "float", "int", "bigint", "boolean"];

/// Scalar column types supported by the table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Timestamp,
    String,
    Float,
    Int,
    Bigint,
    Boolean,
}

impl ScalarType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::String => "string",
            Self::Float => "float",
            Self::Int => "int",
            Self::Bigint => "bigint",
            Self::Boolean => "boolean",
        }
    }
}

/// One field in a table schema: a scalar, an array of scalars, or a struct
/// of nested fields.
///
/// Kinds are kept as strings so that schema documents loaded from
/// configuration fail with [`SchemaError::UnknownFieldDefinition`] at
/// render time instead of a deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub kind: String,
    /// Item type for `array` fields; arrays hold scalars only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    /// Member fields for `struct` fields, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<IndexMap<String, Field>>,
}

impl Field {
    pub fn scalar(kind: ScalarType) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            items: None,
            fields: None,
        }
    }

    pub fn array(items: ScalarType) -> Self {
        Self {
            kind: "array".to_string(),
            items: Some(items.as_str().to_string()),
            fields: None,
        }
    }

    pub fn structure<N, I>(fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Field)>,
    {
        Self {
            kind: "struct".to_string(),
            items: None,
            fields: Some(
                fields
                    .into_iter()
                    .map(|(name, field)| (name.into(), field))
                    .collect(),
            ),
        }
    }
}

/// Render one field definition, e.g. `bigint`, `array<float>`, or
/// `struct<ts:bigint, v:array<float>>`.
pub fn render_field(field: &Field) -> Result<String, SchemaError> {
    match field.kind.as_str() {
        kind if SCALAR_KINDS.contains(&kind) => Ok(kind.to_string()),
        "array" => {
            let items = field.items.as_deref().ok_or(SchemaError::MissingItems)?;
            Ok(format!("array<{}>", render_scalar(items)?))
        }
        "struct" => {
            let members = field.fields.as_ref().ok_or(SchemaError::MissingFields)?;
            let rendered = members
                .iter()
                .map(|(name, member)| Ok(format!("{}:{}", name, render_field(member)?)))
                .collect::<Result<Vec<_>, SchemaError>>()?;
            Ok(format!("struct<{}>", rendered.join(", ")))
        }
        other => Err(SchemaError::UnknownFieldDefinition(other.to_string())),
    }
}

fn render_scalar(kind: &str) -> Result<&str, SchemaError> {
    if SCALAR_KINDS.contains(&kind) {
        Ok(kind)
    } else {
        Err(SchemaError::UnknownFieldDefinition(kind.to_string()))
    }
}

/// A complete external-table description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub database: String,
    pub table: String,
    /// S3 location holding the table's JSON documents.
    pub s3_location: String,
    pub fields: IndexMap<String, Field>,
}

/// Render the `CREATE EXTERNAL TABLE` statement for a table of JSON
/// documents on object storage. Top-level field names are backtick-quoted.
pub fn create_table_sql(definition: &TableDefinition) -> Result<String, SchemaError> {
    let columns = definition
        .fields
        .iter()
        .map(|(name, field)| Ok(format!("`{}` {}", name, render_field(field)?)))
        .collect::<Result<Vec<_>, SchemaError>>()?
        .join(", ");
    Ok(format!(
        "CREATE EXTERNAL TABLE {database}.{table} ({columns}) \
         ROW FORMAT SERDE 'org.openx.data.jsonserde.JsonSerDe' \
         WITH SERDEPROPERTIES ('serialization.format' = '1') \
         LOCATION '{location}' \
         TBLPROPERTIES ('has_encrypted_data'='false');",
        database = definition.database,
        table = definition.table,
        columns = columns,
        location = definition.s3_location,
    ))
}
