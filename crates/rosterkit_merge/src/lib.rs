//! `rosterkit_merge` v1:
//! TA roster / course assignment merge.
//!
//! Modules:
//! - `conf`   : fixed sheet layouts, output header and colors
//! - `spec`   : records/config/errors
//! - `reader` : course summary and TA summary readers
//! - `merge`  : one-to-many left join on student id
//! - `writer` : merged summary workbook writer
//! - `report` : run-time report model
//! - `run`    : read -> merge -> write orchestration

pub mod conf;
pub mod merge;
pub mod reader;
pub mod report;
pub mod run;
pub mod spec;
pub mod writer;

pub use merge::{merge_roster_assignments, merge_roster_assignments_with_report};
pub use reader::{parse_units, read_course_assignments, read_ta_roster};
pub use report::{ReportMerge, ReportMergeBuilder};
pub use run::run_merge;
pub use spec::{
    MergeRunError, SpecAssignmentRecord, SpecMergeRunConfig, SpecMergedRecord, SpecRosterRecord,
};
pub use writer::{read_merged_summary, write_merged_summary};
