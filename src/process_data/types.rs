//! Record types produced by a scan

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::spreadsheet::CellValue;

use super::hierarchy::Levels;

/// Progress of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsRecord {
    pub pure_name: String,
    pub full_name: String,
    pub region: bool,
    pub name: String,
    #[serde(flatten)]
    pub measures: Measures,
    #[serde(flatten)]
    pub levels: Levels,
    /// Remaining columns, keyed by lowercased header.
    #[serde(flatten)]
    pub extra: IndexMap<String, CellValue>,
}

/// Monthly champion of a hierarchy node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionRecord {
    pub full_name: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<CellValue>,
    #[serde(flatten)]
    pub levels: Levels,
    /// Remaining non-empty columns, keyed by lowercased header.
    #[serde(flatten)]
    pub extra: IndexMap<String, CellValue>,
}

/// Progress thresholds reported by the export, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    P25,
    P50,
    P75,
    P90,
    P99,
}

impl Threshold {
    pub fn from_percent(percent: u32) -> Option<Self> {
        Some(match percent {
            25 => Self::P25,
            50 => Self::P50,
            75 => Self::P75,
            90 => Self::P90,
            99 => Self::P99,
            _ => return None,
        })
    }
}

/// Known measurement column of a points row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    CompletedKm,
    Percentage,
    TotalKm,
    DistanceTo(Threshold),
    PointsBonusAt(Threshold),
}

/// Measurement columns of a points row. Cells that do not hold a number are
/// kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measures {
    pub completed_in_km: CellValue,
    pub percentage: CellValue,
    pub distance_to_25_in_km: CellValue,
    pub distance_to_50_in_km: CellValue,
    pub distance_to_75_in_km: CellValue,
    pub distance_to_90_in_km: CellValue,
    pub distance_to_99_in_km: CellValue,
    pub points_bonus_at_25: CellValue,
    pub points_bonus_at_50: CellValue,
    pub points_bonus_at_75: CellValue,
    pub points_bonus_at_90: CellValue,
    pub points_bonus_at_99: CellValue,
    pub total_in_km: CellValue,
}

impl Measures {
    pub const FIELDS: [&str; 13] = [
        "completed_in_km",
        "percentage",
        "distance_to_25_in_km",
        "distance_to_50_in_km",
        "distance_to_75_in_km",
        "distance_to_90_in_km",
        "distance_to_99_in_km",
        "points_bonus_at_25",
        "points_bonus_at_50",
        "points_bonus_at_75",
        "points_bonus_at_90",
        "points_bonus_at_99",
        "total_in_km",
    ];

    pub fn set(&mut self, measure: Measure, value: CellValue) {
        let slot = match measure {
            Measure::CompletedKm => &mut self.completed_in_km,
            Measure::Percentage => &mut self.percentage,
            Measure::TotalKm => &mut self.total_in_km,
            Measure::DistanceTo(Threshold::P25) => &mut self.distance_to_25_in_km,
            Measure::DistanceTo(Threshold::P50) => &mut self.distance_to_50_in_km,
            Measure::DistanceTo(Threshold::P75) => &mut self.distance_to_75_in_km,
            Measure::DistanceTo(Threshold::P90) => &mut self.distance_to_90_in_km,
            Measure::DistanceTo(Threshold::P99) => &mut self.distance_to_99_in_km,
            Measure::PointsBonusAt(Threshold::P25) => &mut self.points_bonus_at_25,
            Measure::PointsBonusAt(Threshold::P50) => &mut self.points_bonus_at_50,
            Measure::PointsBonusAt(Threshold::P75) => &mut self.points_bonus_at_75,
            Measure::PointsBonusAt(Threshold::P90) => &mut self.points_bonus_at_90,
            Measure::PointsBonusAt(Threshold::P99) => &mut self.points_bonus_at_99,
        };
        *slot = value;
    }
}

/// A record stamped with its identity and the export date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identified<T> {
    pub id: String,
    #[serde(flatten)]
    pub record: T,
    pub updated: NaiveDate,
}

/// Records accumulated during one scan, keyed like the tables they go to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tables {
    pub points: Vec<Identified<PointsRecord>>,
    pub champions: Vec<Identified<ChampionRecord>>,
}

impl Tables {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.champions.is_empty()
    }
}
