//! Job execution module
//!
//! This module writes the records of a scan into the output database.

mod executor;
pub mod sql;
pub mod storage;

pub use executor::{JobError, JobExecutor};
