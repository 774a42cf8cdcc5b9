//! Merge report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one merge run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportMerge {
    /// Roster records read.
    pub cnt_roster_rows: u64,
    /// Assignment records read.
    pub cnt_assignment_rows: u64,
    /// Roster records with at least one matching assignment.
    pub cnt_roster_matched: u64,
    /// Roster records without a matching assignment.
    pub cnt_roster_unmatched: u64,
    /// Merged records produced.
    pub cnt_merged_rows: u64,
    /// Non-empty units cells that did not parse as a decimal.
    pub cnt_units_unparsed: u64,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportMerge {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_roster_rows".to_string(), self.cnt_roster_rows);
        dict_counts.insert("cnt_assignment_rows".to_string(), self.cnt_assignment_rows);
        dict_counts.insert("cnt_roster_matched".to_string(), self.cnt_roster_matched);
        dict_counts.insert("cnt_roster_unmatched".to_string(), self.cnt_roster_unmatched);
        dict_counts.insert("cnt_merged_rows".to_string(), self.cnt_merged_rows);
        dict_counts.insert("cnt_units_unparsed".to_string(), self.cnt_units_unparsed);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} roster={} assignments={} matched={} unmatched={} rows={} units_unparsed={} warnings={}",
            dict_counts["cnt_roster_rows"],
            dict_counts["cnt_assignment_rows"],
            dict_counts["cnt_roster_matched"],
            dict_counts["cnt_roster_unmatched"],
            dict_counts["cnt_merged_rows"],
            dict_counts["cnt_units_unparsed"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[MERGE]"))
    }
}

/// Mutable accumulator for merge statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportMergeBuilder {
    /// See [`ReportMerge::cnt_roster_rows`].
    pub cnt_roster_rows: u64,
    /// See [`ReportMerge::cnt_assignment_rows`].
    pub cnt_assignment_rows: u64,
    /// See [`ReportMerge::cnt_roster_matched`].
    pub cnt_roster_matched: u64,
    /// See [`ReportMerge::cnt_roster_unmatched`].
    pub cnt_roster_unmatched: u64,
    /// See [`ReportMerge::cnt_merged_rows`].
    pub cnt_merged_rows: u64,
    /// See [`ReportMerge::cnt_units_unparsed`].
    pub cnt_units_unparsed: u64,
    /// See [`ReportMerge::warnings`].
    pub warnings: Vec<String>,
}

impl ReportMergeBuilder {
    /// Increment roster matched count by one.
    pub fn add_roster_matched(&mut self) {
        self.cnt_roster_matched += 1;
    }

    /// Increment roster unmatched count by one.
    pub fn add_roster_unmatched(&mut self) {
        self.cnt_roster_unmatched += 1;
    }

    /// Increment units-unparsed count by one.
    pub fn add_units_unparsed(&mut self) {
        self.cnt_units_unparsed += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportMerge {
        ReportMerge {
            cnt_roster_rows: self.cnt_roster_rows,
            cnt_assignment_rows: self.cnt_assignment_rows,
            cnt_roster_matched: self.cnt_roster_matched,
            cnt_roster_unmatched: self.cnt_roster_unmatched,
            cnt_merged_rows: self.cnt_merged_rows,
            cnt_units_unparsed: self.cnt_units_unparsed,
            warnings: self.warnings,
        }
    }
}
