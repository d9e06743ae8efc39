//! Table DDL rendering tests.

use indexmap::IndexMap;
use tarn_sql::{create_table_sql, render_field, Field, ScalarType, SchemaError, TableDefinition};

#[test]
fn scalar_kinds_render_verbatim() {
    let kinds = [
        (ScalarType::Timestamp, "timestamp"),
        (ScalarType::String, "string"),
        (ScalarType::Float, "float"),
        (ScalarType::Int, "int"),
        (ScalarType::Bigint, "bigint"),
        (ScalarType::Boolean, "boolean"),
    ];
    for (kind, expected) in kinds {
        assert_eq!(render_field(&Field::scalar(kind)).unwrap(), expected);
    }
}

#[test]
fn array_of_scalars() {
    assert_eq!(
        render_field(&Field::array(ScalarType::Float)).unwrap(),
        "array<float>"
    );
}

#[test]
fn struct_renders_members_in_declaration_order() {
    let field = Field::structure(vec![
        ("ts", Field::scalar(ScalarType::Bigint)),
        ("v", Field::array(ScalarType::Float)),
    ]);
    assert_eq!(
        render_field(&field).unwrap(),
        "struct<ts:bigint, v:array<float>>"
    );
}

#[test]
fn structs_nest() {
    let field = Field::structure(vec![(
        "inner",
        Field::structure(vec![("flag", Field::scalar(ScalarType::Boolean))]),
    )]);
    assert_eq!(
        render_field(&field).unwrap(),
        "struct<inner:struct<flag:boolean>>"
    );
}

#[test]
fn empty_struct_renders_empty_member_list() {
    let field = Field::structure(Vec::<(String, Field)>::new());
    assert_eq!(render_field(&field).unwrap(), "struct<>");
}

#[test]
fn unknown_kind_is_a_schema_error() {
    let field = Field {
        kind: "decimal".to_string(),
        items: None,
        fields: None,
    };
    assert_eq!(
        render_field(&field),
        Err(SchemaError::UnknownFieldDefinition("decimal".to_string()))
    );
}

#[test]
fn array_items_must_be_scalar() {
    let field = Field {
        kind: "array".to_string(),
        items: Some("struct".to_string()),
        fields: None,
    };
    assert_eq!(
        render_field(&field),
        Err(SchemaError::UnknownFieldDefinition("struct".to_string()))
    );
}

#[test]
fn array_without_items_is_a_schema_error() {
    let field = Field {
        kind: "array".to_string(),
        items: None,
        fields: None,
    };
    assert_eq!(render_field(&field), Err(SchemaError::MissingItems));
}

#[test]
fn struct_without_fields_is_a_schema_error() {
    let field = Field {
        kind: "struct".to_string(),
        items: None,
        fields: None,
    };
    assert_eq!(render_field(&field), Err(SchemaError::MissingFields));
}

#[test]
fn full_statement() {
    let mut fields = IndexMap::new();
    fields.insert("reported".to_string(), Field::scalar(ScalarType::Timestamp));
    fields.insert(
        "state".to_string(),
        Field::structure(vec![
            ("ts", Field::scalar(ScalarType::Bigint)),
            ("v", Field::array(ScalarType::Float)),
        ]),
    );

    let sql = create_table_sql(&TableDefinition {
        database: "lake".to_string(),
        table: "readings".to_string(),
        s3_location: "s3://device-messages/".to_string(),
        fields,
    })
    .unwrap();

    assert_eq!(
        sql,
        "CREATE EXTERNAL TABLE lake.readings \
         (`reported` timestamp, `state` struct<ts:bigint, v:array<float>>) \
         ROW FORMAT SERDE 'org.openx.data.jsonserde.JsonSerDe' \
         WITH SERDEPROPERTIES ('serialization.format' = '1') \
         LOCATION 's3://device-messages/' \
         TBLPROPERTIES ('has_encrypted_data'='false');"
    );
}

#[test]
fn invalid_nested_field_fails_the_statement() {
    let mut fields = IndexMap::new();
    fields.insert(
        "state".to_string(),
        Field::structure(vec![(
            "v",
            Field {
                kind: "blob".to_string(),
                items: None,
                fields: None,
            },
        )]),
    );
    let definition = TableDefinition {
        database: "lake".to_string(),
        table: "readings".to_string(),
        s3_location: "s3://device-messages/".to_string(),
        fields,
    };
    assert_eq!(
        create_table_sql(&definition),
        Err(SchemaError::UnknownFieldDefinition("blob".to_string()))
    );
}

#[test]
fn schema_documents_deserialize_and_render() {
    let definition: TableDefinition = serde_json::from_str(
        r#"{
            "database": "lake",
            "table": "readings",
            "s3_location": "s3://device-messages/",
            "fields": {
                "reported": {"type": "timestamp"},
                "acc": {"type": "array", "items": "float"},
                "gps": {"type": "struct", "fields": {
                    "lat": {"type": "float"},
                    "lng": {"type": "float"}
                }}
            }
        }"#,
    )
    .unwrap();

    let sql = create_table_sql(&definition).unwrap();
    assert!(sql.contains("`reported` timestamp"));
    assert!(sql.contains("`acc` array<float>"));
    assert!(sql.contains("`gps` struct<lat:float, lng:float>"));
}
