//! Subject rows and the per-subject quantities derived from them.
//!
//! Every derived value carries the [`RowId`] of the subject it came from.
//! Joins between subjects, survival records and censored entries go through
//! that id, never through positions inside a filtered subset.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a subject among the data rows of the input table (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub usize);

impl RowId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value of the grouping column for one cohort.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey(String);

impl GroupKey {
    /// Key of the single group used when the table has no grouping column.
    pub const IMPLICIT: &'static str = "0";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn implicit() -> Self {
        Self(Self::IMPLICIT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How subjects are assigned to groups, decided once when the table is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingKey {
    /// Group by the values of this column.
    Column(String),
    /// The grouping column is absent; every subject goes to [`GroupKey::implicit`].
    Implicit,
}

impl GroupingKey {
    pub fn column(&self) -> Option<&str> {
        match self {
            GroupingKey::Column(name) => Some(name),
            GroupingKey::Implicit => None,
        }
    }
}

/// One input row, restricted to the columns the active profile reads.
///
/// Date, day-count and status cells are kept as raw text; `None` marks an
/// empty or missing-value cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub row: RowId,
    pub subject_id: String,
    pub group: GroupKey,
    pub reference_date: Option<String>,
    pub change_date: Option<String>,
    pub change_day: Option<String>,
    pub status: Option<String>,
}

/// Survival time and event indicator derived for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalRecord {
    pub row: RowId,
    pub subject_id: String,
    /// `None` when neither the dates nor the day count yield a value.
    pub survival_days: Option<f64>,
    pub event_occurred: bool,
}

/// Subjects sharing one group key, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    pub subjects: Vec<Subject>,
}

impl Group {
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            subjects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RowId> + '_ {
        self.subjects.iter().map(|subject| subject.row)
    }
}
