//! Shared `User`/`Address` fixture schema.

#![allow(dead_code)]

use reqguard_core::{Constraint, FieldKind, FieldSpec, Schema, SchemaDescription};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: String,
    pub zip: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub email: String,
    pub age: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    pub address: Address,
}

pub static ADDRESS: SchemaDescription = SchemaDescription::record(
    "Address",
    &[
        FieldSpec::new("city")
            .kind(FieldKind::String)
            .constraints(&[Constraint::Required]),
        FieldSpec::new("zip").kind(FieldKind::Integer).constraints(&[
            Constraint::Required,
            Constraint::Min(10000.0),
            Constraint::Max(99999.0),
        ]),
    ],
);

pub static USER: SchemaDescription = SchemaDescription::record(
    "User",
    &[
        FieldSpec::new("name")
            .kind(FieldKind::String)
            .constraints(&[Constraint::Required]),
        FieldSpec::new("email")
            .kind(FieldKind::String)
            .constraints(&[Constraint::Required, Constraint::Email]),
        FieldSpec::new("age").kind(FieldKind::Integer).constraints(&[
            Constraint::Required,
            Constraint::Min(10.0),
            Constraint::Max(20.0),
        ]),
        FieldSpec::new("phone")
            .kind(FieldKind::String)
            .constraints(&[Constraint::OmitEmpty, Constraint::E164]),
        FieldSpec::new("address")
            .record(&ADDRESS)
            .constraints(&[Constraint::Required]),
    ],
);

impl Schema for Address {
    fn schema() -> &'static SchemaDescription {
        &ADDRESS
    }
}

impl Schema for User {
    fn schema() -> &'static SchemaDescription {
        &USER
    }
}

pub fn alice() -> User {
    User {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        age: 15,
        phone: String::new(),
        address: Address {
            city: "New York".into(),
            zip: 12345,
        },
    }
}

pub const VALID_JSON: &str =
    r#"{"name":"Alice","email":"alice@example.com","age":15,"address":{"city":"New York","zip":12345}}"#;
