//! Input side of a survival run: the subject table and the options file.

pub mod options;
pub mod polars_utils;
pub mod subjects;
pub mod tsv_table;

use std::path::{Path, PathBuf};

pub use options::{OPTIONS_FILE, load_options, parse_options};
pub use polars_utils::{any_to_string, format_numeric};
pub use subjects::{SubjectTable, load_subjects};
pub use tsv_table::{TsvTable, is_missing_value, read_tsv_table};

/// Name of the subject table inside the working directory.
pub const INPUT_FILE: &str = "input.tsv";

pub fn input_path(dir: &Path) -> PathBuf {
    dir.join(INPUT_FILE)
}
