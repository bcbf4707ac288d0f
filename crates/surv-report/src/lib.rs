//! Output generation for cohort survival runs.
//!
//! - **Frames**: polars tables for curves, censored subjects and the log-rank test
//! - **Layouts**: one concatenated table pair, or one pair per group
//! - **TSV**: tab-separated files with a header row

pub mod frames;
pub mod outputs;
pub mod tsv;

pub use frames::{censored_frame, concat_frames, curve_frame, logrank_frame, with_label};
pub use outputs::{
    CENSORED_FILE, LOGRANK_FILE, OutputTable, RESULT_FILE, assemble_outputs, check_file_key,
    group_censored_file, group_result_file, write_outputs,
};
pub use tsv::{frame_to_string, write_frame, write_tsv};
