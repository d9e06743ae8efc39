//! DDL generation for the Tarn query helpers.
//!
//! Renders a nested field-type tree into the `CREATE EXTERNAL TABLE`
//! statement understood by the SQL-on-object-storage service: scalar
//! columns, `array<scalar>` columns, and arbitrarily nested `struct`
//! columns over JSON documents in an S3 location.
pub mod ddl;
pub mod error;

pub use ddl::{create_table_sql, render_field, Field, ScalarType, TableDefinition};
pub use error::SchemaError;
