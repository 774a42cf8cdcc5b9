//! One-to-many left join of roster records against assignment records.

use tracing::debug;

use crate::report::ReportMergeBuilder;
use crate::spec::{SpecAssignmentRecord, SpecMergedRecord, SpecRosterRecord};

/// Join `roster` against `assignments` on student id.
///
/// Output follows roster order; the matches of one roster record keep
/// assignment order. A roster record with N matches yields N records, one
/// with no match yields a single record with course/type/units unset.
///
/// Ids are compared with exact, case-sensitive string equality. No index is
/// built, so the cost is `roster.len() * assignments.len()` comparisons.
pub fn merge_roster_assignments(
    roster: &[SpecRosterRecord],
    assignments: &[SpecAssignmentRecord],
) -> Vec<SpecMergedRecord> {
    let mut builder_report = ReportMergeBuilder::default();
    merge_roster_assignments_with_report(roster, assignments, &mut builder_report)
}

/// Same as [`merge_roster_assignments`], recording match counts.
pub fn merge_roster_assignments_with_report(
    roster: &[SpecRosterRecord],
    assignments: &[SpecAssignmentRecord],
    builder_report: &mut ReportMergeBuilder,
) -> Vec<SpecMergedRecord> {
    let mut l_merged = Vec::with_capacity(roster.len());

    for roster_record in roster {
        let n_len_before = l_merged.len();
        l_merged.extend(
            assignments
                .iter()
                .filter(|assignment| assignment.student_id == roster_record.student_id)
                .map(|assignment| SpecMergedRecord::from_match(roster_record, assignment)),
        );

        if l_merged.len() == n_len_before {
            builder_report.add_roster_unmatched();
            l_merged.push(SpecMergedRecord::from_roster(roster_record));
        } else {
            builder_report.add_roster_matched();
        }
    }

    builder_report.cnt_roster_rows = roster.len() as u64;
    builder_report.cnt_merged_rows = l_merged.len() as u64;
    debug!(
        roster = roster.len(),
        assignments = assignments.len(),
        merged = l_merged.len(),
        "roster merged"
    );
    l_merged
}
