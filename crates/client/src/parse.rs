//! Typed parsing of raw result grids.
//!
//! The service returns every cell as a string, typed only by the column
//! metadata. DESCRIBE-style metadata queries additionally pack all logical
//! columns of a row into one tab-separated cell; this module resolves that
//! ambiguity positionally and coerces cells into typed values.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::service::{ColumnInfo, ResultGrid, Row};

/// A parsed cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Numbers(Vec<f64>),
}

/// One parsed row, keyed by column name in column order.
pub type TypedRecord = IndexMap<String, CellValue>;

/// Cell formatter closure: raw string in, typed value out.
pub type CellFormatter = Arc<dyn Fn(&str) -> CellValue + Send + Sync>;

/// Options for [`parse_result_grid`].
///
/// Formatter overrides merge into the built-in table: column-keyed rules
/// win over type-keyed rules, which win over the built-ins.
#[derive(Default, Clone)]
pub struct ParseOptions {
    skip: usize,
    by_type: HashMap<String, CellFormatter>,
    by_column: HashMap<String, CellFormatter>,
}

impl std::fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("skip", &self.skip)
            .field("type_overrides", &self.by_type.len())
            .field("column_overrides", &self.by_column.len())
            .finish()
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the first `n` rows. Used to drop the header row the service
    /// echoes as data for some queries.
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    /// Override the formatter for a type tag.
    pub fn format_type<F>(mut self, tag: impl Into<String>, formatter: F) -> Self
    where
        F: Fn(&str) -> CellValue + Send + Sync + 'static,
    {
        self.by_type.insert(tag.into(), Arc::new(formatter));
        self
    }

    /// Override the formatter for a single column by name.
    pub fn format_column<F>(mut self, name: impl Into<String>, formatter: F) -> Self
    where
        F: Fn(&str) -> CellValue + Send + Sync + 'static,
    {
        self.by_column.insert(name.into(), Arc::new(formatter));
        self
    }

    fn coerce(&self, column: &ColumnInfo, raw: &str) -> CellValue {
        if let Some(formatter) = self.by_column.get(&column.name) {
            return formatter(raw);
        }
        if let Some(formatter) = self.by_type.get(&column.column_type) {
            return formatter(raw);
        }
        match column.column_type.as_str() {
            "integer" => raw
                .parse::<i64>()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            "array" => serde_json::from_str::<Vec<f64>>(raw)
                .map(CellValue::Numbers)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            _ => CellValue::Text(raw.to_string()),
        }
    }
}

/// Parse a raw grid into typed records.
///
/// A grid with absent rows or absent column metadata parses to an empty
/// sequence; an empty result set is not an error. Pure and deterministic.
pub fn parse_result_grid(grid: &ResultGrid, options: &ParseOptions) -> Vec<TypedRecord> {
    let columns = match &grid.metadata {
        Some(metadata) => &metadata.columns,
        None => return Vec::new(),
    };
    let rows = match &grid.rows {
        Some(rows) => rows,
        None => return Vec::new(),
    };
    rows.iter()
        .skip(options.skip)
        .map(|row| parse_row(row, columns, options))
        .collect()
}

fn parse_row(row: &Row, columns: &[ColumnInfo], options: &ParseOptions) -> TypedRecord {
    // A row that arrives as a single cell for several columns is tab-packed:
    // split it and index into the fields positionally. A row whose cell
    // count already matches the columns is never split.
    let packed: Option<Vec<String>> = if row.data.len() != columns.len() && row.data.len() == 1 {
        row.data[0]
            .as_ref()
            .map(|cell| cell.split('\t').map(|field| field.trim().to_string()).collect())
    } else {
        None
    };

    let mut record = TypedRecord::new();
    for (index, column) in columns.iter().enumerate() {
        let value = match &packed {
            Some(fields) => fields.get(index).map(String::as_str),
            None => row.data.get(index).and_then(Option::as_deref),
        };
        if let Some(raw) = value {
            record.insert(column.name.clone(), options.coerce(column, raw));
        }
    }
    record
}
