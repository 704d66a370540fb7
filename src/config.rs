//! Fixed layout of the export and per-run settings
//!
//! The export has exactly one layout, so everything about it lives here as
//! constants. [`RunConfig`] holds what varies between runs and is derived from
//! the input path alone.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{ErrorContext, ErrorDetail};

/// Zero-based physical row holding the column labels.
pub const HEADER_ROW: usize = 1;

/// Column whose value drives row classification.
pub const NAME_COLUMN: &str = "Name";

/// Prefix character of admin-level marker rows. Its count encodes the depth.
pub const SEPARATOR: char = '-';

/// Separator between the segments of a full name.
pub const FULL_NAME_SEPARATOR: &str = " > ";

/// Deepest admin level that has a slot in a full name.
pub const MAX_ADMIN_LEVEL: usize = 9;

/// Continent rows carry no marker prefix. Only these two appear in the export.
pub const CONTINENTS: [&str; 2] = ["East Asia", "Europe"];

/// Row naming the whole world, carries nothing useful.
pub const WORLD: &str = "Earth";

pub const ACHIEVEMENTS_PREFIX: &str = "Achievements";
pub const BONUS_PREFIX: &str = "Bonus points";
pub const CHAMPION_PREFIX: &str = "Monthly champion";

/// `chrono` format of the input file name.
pub const FILE_NAME_PATTERN: &str = "earth-%d-%m-%y.xlsx";

pub const DATABASE_EXTENSION: &str = "db";

pub const POINTS_TABLE: &str = "points";
pub const CHAMPIONS_TABLE: &str = "champions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub database: PathBuf,
    /// Date of the export, stamped on every record as `updated`.
    pub updated: NaiveDate,
}

impl RunConfig {
    /// Derive the run settings from the input path.
    ///
    /// The database is written to the working directory and named after the
    /// input file stem.
    pub fn from_input(input: impl Into<PathBuf>) -> Result<Self, crate::Error> {
        let input = input.into();
        let ctx = ErrorContext::new(&input);
        let updated = parse_export_date(&input).map_err(|detail| ctx.error(detail))?;
        let stem = input
            .file_stem()
            .ok_or_else(|| ctx.error(invalid_file_name(&input)))?;
        let database = PathBuf::from(stem).with_extension(DATABASE_EXTENSION);
        Ok(Self {
            input,
            database,
            updated,
        })
    }

    /// Place the database in `dir` instead of the working directory.
    pub fn with_database_dir(self, dir: impl AsRef<Path>) -> Self {
        let database = dir.as_ref().join(&self.database);
        Self { database, ..self }
    }
}

fn invalid_file_name(path: &Path) -> ErrorDetail {
    ErrorDetail::InvalidFileName {
        pattern: FILE_NAME_PATTERN,
        name: path.display().to_string(),
    }
}

/// Parse the export date encoded in the file name, e.g. `earth-05-03-24.xlsx`.
pub fn parse_export_date(path: &Path) -> Result<NaiveDate, ErrorDetail> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| invalid_file_name(path))?;
    NaiveDate::parse_from_str(name, FILE_NAME_PATTERN).map_err(|_| invalid_file_name(path))
}
