//! Schema profiles for the supported input generations.
//!
//! A profile names the columns a run reads, the polarity of the status flag,
//! the output layout and whether curves start with a synthetic origin. The
//! profile is chosen by configuration; it is never guessed from the columns
//! present in a table.
//!
//! | Profile | Event occurred when | Layout | Origin point |
//! |---|---|---|---|
//! | `vital-status` | `vital_status` is false | concatenated, `group_label` | no |
//! | `progression-survival` | mode dependent, see [`EventMode`] | one file pair per group | no |
//! | `donor` | `status` is true | concatenated, `dataset_id` | yes |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurvError;

/// Event type analyzed by the progression-survival profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventMode {
    /// Overall survival: the event is death (`"survival"`).
    #[default]
    OverallSurvival,
    /// Progression-free survival: the event is progression (`"progression"`).
    ProgressionFree,
}

impl EventMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EventMode::OverallSurvival => "survival",
            EventMode::ProgressionFree => "progression",
        }
    }
}

impl FromStr for EventMode {
    type Err = SurvError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "survival" => Ok(EventMode::OverallSurvival),
            "progression" => Ok(EventMode::ProgressionFree),
            other => Err(SurvError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which value of the status flag means the event occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPolarity {
    /// `true` records the event (progressed, deceased).
    EventWhenTrue,
    /// `false` records the event (the flag means "alive").
    EventWhenFalse,
}

impl EventPolarity {
    pub fn event_occurred(self, flag: bool) -> bool {
        match self {
            EventPolarity::EventWhenTrue => flag,
            EventPolarity::EventWhenFalse => !flag,
        }
    }
}

/// Columns holding the status change of one event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventColumns {
    pub change_date: &'static str,
    pub change_day: &'static str,
    pub status: &'static str,
    pub polarity: EventPolarity,
}

const VITAL_EVENT: EventColumns = EventColumns {
    change_date: "vital_status_change_date",
    change_day: "vital_status_change_day",
    status: "vital_status",
    polarity: EventPolarity::EventWhenFalse,
};

const PROGRESSION_EVENT: EventColumns = EventColumns {
    change_date: "progression_status_change_date",
    change_day: "progression_status_change_day",
    status: "progression_status",
    polarity: EventPolarity::EventWhenTrue,
};

const DONOR_EVENT: EventColumns = EventColumns {
    change_date: "status_change_date",
    change_day: "status_change_day",
    status: "status",
    polarity: EventPolarity::EventWhenTrue,
};

/// How result tables are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLayout {
    /// One curve table and one censored table, rows tagged with `label_column`.
    Concatenated { label_column: &'static str },
    /// One curve file and one censored file per group, key embedded in the name.
    PerGroup,
}

/// Full column specification for one run (profile plus event mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub subject_id: &'static str,
    pub reference_date: &'static str,
    pub grouping: &'static str,
    pub event: EventColumns,
}

impl ColumnSpec {
    /// Columns that must be present in the input table.
    pub fn required(&self) -> [&'static str; 5] {
        [
            self.subject_id,
            self.reference_date,
            self.event.change_date,
            self.event.change_day,
            self.event.status,
        ]
    }
}

/// Supported input schema generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaProfile {
    /// Single event type; `vital_status` true means alive.
    VitalStatus,
    /// Overall or progression-free survival selected by `options.json`.
    #[default]
    ProgressionSurvival,
    /// Donors from several datasets; `status` true means deceased.
    Donor,
}

impl SchemaProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaProfile::VitalStatus => "vital-status",
            SchemaProfile::ProgressionSurvival => "progression-survival",
            SchemaProfile::Donor => "donor",
        }
    }

    /// Whether this profile reads the event mode from the options file.
    pub fn uses_event_mode(self) -> bool {
        matches!(self, SchemaProfile::ProgressionSurvival)
    }

    /// Column specification for the given mode.
    ///
    /// Profiles without an event mode ignore `mode`.
    pub fn columns(self, mode: EventMode) -> ColumnSpec {
        match self {
            SchemaProfile::VitalStatus => ColumnSpec {
                subject_id: "sample_id",
                reference_date: "diagnosis_date",
                grouping: "label",
                event: VITAL_EVENT,
            },
            SchemaProfile::ProgressionSurvival => ColumnSpec {
                subject_id: "sample_id",
                reference_date: "diagnosis_date",
                grouping: "label",
                event: match mode {
                    EventMode::OverallSurvival => VITAL_EVENT,
                    EventMode::ProgressionFree => PROGRESSION_EVENT,
                },
            },
            SchemaProfile::Donor => ColumnSpec {
                subject_id: "donor_id",
                reference_date: "enrolment_date",
                grouping: "dataset_id",
                event: DONOR_EVENT,
            },
        }
    }

    pub fn layout(self) -> OutputLayout {
        match self {
            SchemaProfile::VitalStatus => OutputLayout::Concatenated {
                label_column: "group_label",
            },
            SchemaProfile::ProgressionSurvival => OutputLayout::PerGroup,
            SchemaProfile::Donor => OutputLayout::Concatenated {
                label_column: "dataset_id",
            },
        }
    }

    /// Whether curves get the synthetic `(0, 1, 1, 1)` origin point.
    pub fn prepends_origin(self) -> bool {
        matches!(self, SchemaProfile::Donor)
    }
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
