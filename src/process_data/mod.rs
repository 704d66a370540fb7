//! Spreadsheet rows to records
//!
//! A single pass over the rows in sheet order. Marker rows update the
//! hierarchy, data rows become records that carry a snapshot of it. Row order
//! matters: a row is attributed to whatever hierarchy was open above it.

use chrono::NaiveDate;
use tracing::{debug, info, trace};

use crate::{ErrorContext, ErrorDetail, spreadsheet::RawRow};

pub mod classify;
pub mod hierarchy;
pub mod identity;
pub mod transform;
mod types;

pub use classify::{RowKind, classify};
pub use hierarchy::{HierarchyState, Levels, Marker};
pub use types::{
    ChampionRecord, Identified, Measure, Measures, PointsRecord, Tables, Threshold,
};

/// Scan `rows` and collect the records of both tables.
///
/// Fails on the first malformed row; nothing is returned in that case.
pub fn convert(
    ctx: &ErrorContext,
    rows: impl IntoIterator<Item = RawRow>,
    updated: NaiveDate,
) -> Result<Tables, crate::Error> {
    let mut hierarchy = HierarchyState::default();
    let mut tables = Tables::default();
    for row in rows {
        let ctx = ctx.with_row(row.line);
        let name = row.name().map_err(|detail| ctx.error(detail))?;
        let kind = classify(&name);
        trace!(line = row.line, name, ?kind, "classify row");
        match kind {
            RowKind::Ignore | RowKind::AchievementsHeader | RowKind::BonusHeader => {}
            RowKind::ContinentMarker | RowKind::LevelMarker => {
                if let Some(marker) = hierarchy.observe(&name) {
                    debug!(line = row.line, ?marker, "enter hierarchy");
                }
            }
            RowKind::Champion => {
                let levels = hierarchy
                    .snapshot()
                    .ok_or_else(|| ctx.error(ErrorDetail::MissingContinent))?;
                let record = transform::champion_record(row.cells, name, levels);
                tables.champions.push(identity::assign(record, updated));
            }
            RowKind::Points => {
                let levels = hierarchy
                    .snapshot()
                    .ok_or_else(|| ctx.error(ErrorDetail::MissingContinent))?;
                let record = transform::points_record(row.cells, name, levels);
                tables.points.push(identity::assign(record, updated));
            }
        }
    }
    info!(
        points = tables.points.len(),
        champions = tables.champions.len(),
        "scanned rows"
    );
    Ok(tables)
}
