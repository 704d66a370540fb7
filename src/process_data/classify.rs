//! Row classification by the name column

use crate::config::{
    ACHIEVEMENTS_PREFIX, BONUS_PREFIX, CHAMPION_PREFIX, CONTINENTS, SEPARATOR, WORLD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Ignore,
    ContinentMarker,
    LevelMarker,
    AchievementsHeader,
    BonusHeader,
    Champion,
    Points,
}

/// Classify a row by its name. Checks run in a fixed order, first match wins.
pub fn classify(name: &str) -> RowKind {
    if name == WORLD {
        RowKind::Ignore
    } else if CONTINENTS.contains(&name) {
        RowKind::ContinentMarker
    } else if name.starts_with(SEPARATOR) {
        RowKind::LevelMarker
    } else if name.starts_with(ACHIEVEMENTS_PREFIX) {
        RowKind::AchievementsHeader
    } else if name.starts_with(BONUS_PREFIX) {
        // bonus point tables are not converted yet
        RowKind::BonusHeader
    } else if name.starts_with(CHAMPION_PREFIX) {
        RowKind::Champion
    } else {
        RowKind::Points
    }
}
