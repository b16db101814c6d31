//! Mapping of raw query rows into typed records.
//!
//! A row carries three map projections in fixed order: source node,
//! relationship, target node. Field names are fixed by [`crate::queries`].

use serde_json::{Map, Value};

use depvis_core::{Node, Record, Relationship};

/// One column of a result row: a projected map of field name to value.
pub type RawProjection = Map<String, Value>;

/// One result row, columns in query order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub source: RawProjection,
    pub relationship: RawProjection,
    pub target: RawProjection,
}

impl RawRow {
    pub fn new(source: RawProjection, relationship: RawProjection, target: RawProjection) -> Self {
        Self {
            source,
            relationship,
            target,
        }
    }
}

/// A raw row did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("Result row has no `{column}` column: {reason}")]
    MissingColumn { column: String, reason: String },

    #[error("Projection is missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("Field `{field}` is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Build a node from a `{id, size, vendor, name, type, version, url}` projection.
pub fn map_node(raw: &RawProjection) -> Result<Node, MappingError> {
    Ok(Node {
        id: int_field(raw, "id")?,
        size: int_field(raw, "size")?,
        vendor: string_field(raw, "vendor")?,
        name: string_field(raw, "name")?,
        kind: string_field(raw, "type")?,
        version: string_field(raw, "version")?,
        url: optional_string_field(raw, "url")?,
    })
}

/// Build a relationship from an `{id, size, version, for}` projection.
pub fn map_relationship(raw: &RawProjection) -> Result<Relationship, MappingError> {
    Ok(Relationship {
        id: int_field(raw, "id")?,
        size: int_field(raw, "size")?,
        version: string_field(raw, "version")?,
        scope: string_field(raw, "for")?,
    })
}

/// Map every row to a record, preserving the store's row order.
///
/// Fails on the first malformed row; no partial result is returned.
pub fn map_records(rows: &[RawRow]) -> Result<Vec<Record>, MappingError> {
    rows.iter()
        .map(|row| {
            Ok(Record::new(
                map_node(&row.source)?,
                map_relationship(&row.relationship)?,
                map_node(&row.target)?,
            ))
        })
        .collect()
}

fn field<'a>(raw: &'a RawProjection, name: &'static str) -> Result<&'a Value, MappingError> {
    match raw.get(name) {
        None | Some(Value::Null) => Err(MappingError::MissingField { field: name }),
        Some(value) => Ok(value),
    }
}

fn int_field(raw: &RawProjection, name: &'static str) -> Result<i64, MappingError> {
    field(raw, name)?
        .as_i64()
        .ok_or(MappingError::InvalidField {
            field: name,
            expected: "an integer",
        })
}

fn string_field(raw: &RawProjection, name: &'static str) -> Result<String, MappingError> {
    field(raw, name)?
        .as_str()
        .map(str::to_string)
        .ok_or(MappingError::InvalidField {
            field: name,
            expected: "a string",
        })
}

// Nodes created without a url may come back with the key present but null.
fn optional_string_field(raw: &RawProjection, name: &'static str) -> Result<String, MappingError> {
    match raw.get(name) {
        None => Err(MappingError::MissingField { field: name }),
        Some(Value::Null) => Ok(String::new()),
        Some(_) => string_field(raw, name),
    }
}
