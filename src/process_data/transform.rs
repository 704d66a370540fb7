//! Raw row to record transformation
//!
//! Builds typed records from a raw row and the hierarchy that was open when
//! the row was scanned. Header labels are matched loosely: case and runs of
//! whitespace do not matter.

use std::sync::LazyLock;

use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::{
    config::{FULL_NAME_SEPARATOR, SEPARATOR},
    spreadsheet::CellValue,
};

use super::{
    hierarchy::{Levels, strip_separators},
    types::{ChampionRecord, Measure, Measures, PointsRecord, Threshold},
};

static DISTANCE_TO: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^distance to (\d+)\s*%\s*\(km\)$").unwrap());

static POINTS_BONUS_AT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^points bonus @\s*(\d+)\s*%$").unwrap());

/// Fields computed for points records. Source columns of the same name are dropped.
const POINTS_FIELDS: [&str; 6] = ["id", "name", "pure_name", "full_name", "region", "updated"];

/// Fields computed for champion records.
const CHAMPION_FIELDS: [&str; 5] = ["id", "name", "full_name", "points", "updated"];

/// Lowercase and collapse whitespace.
fn normalize_label(label: &str) -> String {
    label.split_whitespace().join(" ").to_lowercase()
}

fn threshold(pattern: &regex::Regex, label: &str) -> Option<Threshold> {
    let percent = pattern.captures(label)?.get(1)?.as_str().parse().ok()?;
    Threshold::from_percent(percent)
}

impl Measure {
    /// Recognize a measurement column by its header label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = normalize_label(label);
        match label.as_str() {
            "completed (km)" | "completed_in_km" => Some(Self::CompletedKm),
            "percentage" => Some(Self::Percentage),
            "total (km)" | "total_in_km" => Some(Self::TotalKm),
            label => threshold(&DISTANCE_TO, label)
                .map(Self::DistanceTo)
                .or_else(|| threshold(&POINTS_BONUS_AT, label).map(Self::PointsBonusAt)),
        }
    }
}

/// Build a points record. Every column is kept, empty ones included.
pub fn points_record(cells: IndexMap<String, CellValue>, name: String, levels: Levels) -> PointsRecord {
    let mut measures = Measures::default();
    let mut extra = IndexMap::new();
    for (label, cell) in cells {
        if let Some(measure) = Measure::from_label(&label) {
            measures.set(measure, cell.into_numeric());
            continue;
        }
        let field = label.to_lowercase();
        let reserved = POINTS_FIELDS.contains(&field.as_str())
            || Measures::FIELDS.contains(&field.as_str())
            || levels.has_field(&field);
        if !reserved {
            extra.insert(field, cell);
        }
    }
    let pure_name = strip_separators(&name);
    let full_name = [levels.full_name().as_str(), pure_name.as_str()].join(FULL_NAME_SEPARATOR);
    PointsRecord {
        region: name.contains(SEPARATOR),
        pure_name,
        full_name,
        name,
        measures,
        levels,
        extra,
    }
}

/// Build a champion record. Champion rows are sparse, empty cells are dropped.
pub fn champion_record(
    cells: IndexMap<String, CellValue>,
    name: String,
    levels: Levels,
) -> ChampionRecord {
    let mut points = None;
    let mut extra = IndexMap::new();
    for (label, cell) in cells.into_iter().filter(|(_, cell)| !cell.is_empty()) {
        let field = label.to_lowercase();
        if field == "points" {
            points = Some(cell.into_numeric());
        } else if !CHAMPION_FIELDS.contains(&field.as_str()) && !levels.has_field(&field) {
            extra.insert(field, cell);
        }
    }
    ChampionRecord {
        full_name: levels.full_name(),
        name,
        points,
        levels,
        extra,
    }
}
