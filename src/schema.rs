//! Table definitions of the output database
//!
//! Only the leading columns are declared up front so they keep a stable
//! order. Every other column is added on demand when records carry it.

use indexmap::IndexMap;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Id,
    String,
    Real,
    Boolean,
    Date,
}

impl FieldType {
    /// Infer the column type of a value that has no declared column.
    pub fn infer(value: &serde_json::Value) -> Option<Self> {
        Some(match value {
            serde_json::Value::Null => return None,
            serde_json::Value::Bool(_) => Self::Boolean,
            serde_json::Value::Number(_) => Self::Real,
            _ => Self::String,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub id_name: &'static str,
    pub fields: IndexMap<&'static str, FieldType>,
}

impl TableSchema {
    pub fn points() -> Self {
        Self {
            name: config::POINTS_TABLE,
            id_name: "id",
            fields: IndexMap::from([
                ("id", FieldType::Id),
                ("pure_name", FieldType::String),
                ("full_name", FieldType::String),
                ("region", FieldType::Boolean),
                ("completed_in_km", FieldType::Real),
                ("percentage", FieldType::Real),
                ("distance_to_25_in_km", FieldType::Real),
                ("distance_to_50_in_km", FieldType::Real),
                ("distance_to_75_in_km", FieldType::Real),
                ("updated", FieldType::Date),
            ]),
        }
    }

    pub fn champions() -> Self {
        Self {
            name: config::CHAMPIONS_TABLE,
            id_name: "id",
            fields: IndexMap::from([
                ("id", FieldType::Id),
                ("full_name", FieldType::String),
                ("name", FieldType::String),
                ("points", FieldType::Real),
                ("updated", FieldType::Date),
            ]),
        }
    }

    /// Both output tables, in write order.
    pub fn all() -> [Self; 2] {
        [Self::points(), Self::champions()]
    }
}
