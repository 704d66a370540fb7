//! Content-derived record identity

use chrono::NaiveDate;
use sha1::{Digest as _, Sha1};

use super::types::{ChampionRecord, Identified, PointsRecord};

/// Records identified by their full name.
pub trait FullName {
    fn full_name(&self) -> &str;
}

impl FullName for PointsRecord {
    fn full_name(&self) -> &str {
        &self.full_name
    }
}

impl FullName for ChampionRecord {
    fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// Lowercase hex SHA-1 of the full name.
pub fn record_id(full_name: &str) -> String {
    format!("{:x}", Sha1::digest(full_name.as_bytes()))
}

/// Stamp a record with its identity and the export date.
pub fn assign<T: FullName>(record: T, updated: NaiveDate) -> Identified<T> {
    Identified {
        id: record_id(record.full_name()),
        record,
        updated,
    }
}
