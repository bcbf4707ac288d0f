//! Data model shared by the cohort survival crates.

pub mod curve;
pub mod error;
pub mod options;
pub mod profile;
pub mod subject;

pub use curve::{CensoredEntry, CurvePoint, LogrankResult, SurvivalCurve};
pub use error::{Result, SurvError};
pub use options::AnalysisOptions;
pub use profile::{
    ColumnSpec, EventColumns, EventMode, EventPolarity, OutputLayout, SchemaProfile,
};
pub use subject::{Group, GroupKey, GroupingKey, RowId, Subject, SurvivalRecord};
