//! Read -> merge -> write orchestration for one run.

use tracing::info;

use crate::merge::merge_roster_assignments_with_report;
use crate::reader::{read_course_assignments_with_report, read_ta_roster};
use crate::report::{ReportMerge, ReportMergeBuilder};
use crate::spec::{MergeRunError, SpecMergeRunConfig};
use crate::writer::write_merged_summary;

/// Run the whole pipeline described by `config`.
///
/// Stages run strictly in sequence and each workbook is closed before the
/// next stage starts. The first error aborts the run; a partial output file
/// may remain only if the final save itself fails midway.
pub fn run_merge(config: &SpecMergeRunConfig) -> Result<ReportMerge, MergeRunError> {
    let mut builder_report = ReportMergeBuilder::default();

    let l_assignments =
        read_course_assignments_with_report(&config.path_file_course_summary, &mut builder_report)?;
    info!(
        path = %config.path_file_course_summary.display(),
        assignments = l_assignments.len(),
        "course summary loaded"
    );

    let l_roster = read_ta_roster(&config.path_file_ta_summary)?;
    info!(
        path = %config.path_file_ta_summary.display(),
        roster = l_roster.len(),
        "TA summary loaded"
    );

    let l_merged =
        merge_roster_assignments_with_report(&l_roster, &l_assignments, &mut builder_report);

    let report_xlsx = write_merged_summary(&config.path_file_out, &l_merged)?;
    for c_warning in report_xlsx.warnings {
        builder_report.add_warning(c_warning);
    }
    info!(
        path = %config.path_file_out.display(),
        rows = l_merged.len(),
        "merged summary saved"
    );

    Ok(builder_report.build())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rust_xlsxwriter::Workbook;

    use super::*;
    use crate::writer::read_merged_summary;

    fn write_course_summary(path: &Path) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Course Summary").expect("write");
        worksheet.write_string(1, 1, "Course").expect("write");
        worksheet.write_string(2, 1, "CS101").expect("write");
        worksheet.write_string(2, 4, "Lab").expect("write");
        worksheet.write_string(2, 7, "S1").expect("write");
        worksheet.write_number(2, 9, 3.0).expect("write");
        worksheet.write_string(2, 10, "S2").expect("write");
        worksheet.write_string(2, 12, "N/A").expect("write");
        worksheet.write_string(3, 1, "CS102").expect("write");
        worksheet.write_string(3, 4, "Tutorial").expect("write");
        worksheet.write_string(3, 7, "S1").expect("write");
        worksheet.write_number(3, 9, 4.0).expect("write");
        workbook.save(path).expect("save");
    }

    fn write_ta_summary(path: &Path) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Pool").expect("write");
        for (n_row, (c_pool, c_id)) in [("Lab", "S1"), ("Marking", "S3"), ("Lab", "S2")]
            .iter()
            .enumerate()
        {
            let n_row = n_row as u32 + 1;
            worksheet.write_string(n_row, 0, *c_pool).expect("write");
            worksheet.write_string(n_row, 2, *c_id).expect("write");
            worksheet.write_string(n_row, 3, "First").expect("write");
            worksheet.write_string(n_row, 4, "Last").expect("write");
            worksheet.write_string(n_row, 5, "mail@example.edu").expect("write");
            worksheet.write_string(n_row, 10, "PhD").expect("write");
            worksheet.write_string(n_row, 14, "B").expect("write");
        }
        workbook.save(path).expect("save");
    }

    #[test]
    fn run_merge_end_to_end() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = SpecMergeRunConfig {
            path_file_course_summary: tmp.path().join("course.xlsx"),
            path_file_ta_summary: tmp.path().join("ta.xlsx"),
            path_file_out: tmp.path().join("out.xlsx"),
        };
        write_course_summary(&config.path_file_course_summary);
        write_ta_summary(&config.path_file_ta_summary);

        let report = run_merge(&config).expect("run");
        assert_eq!(report.cnt_assignment_rows, 3);
        assert_eq!(report.cnt_roster_rows, 3);
        assert_eq!(report.cnt_roster_matched, 2);
        assert_eq!(report.cnt_roster_unmatched, 1);
        assert_eq!(report.cnt_merged_rows, 4);
        assert_eq!(report.cnt_units_unparsed, 1);

        let l_out = read_merged_summary(&config.path_file_out).expect("read output");
        let l_rows: Vec<(&str, Option<&str>, Option<f64>)> = l_out
            .iter()
            .map(|rec| (rec.roster.student_id.as_str(), rec.course.as_deref(), rec.units))
            .collect();
        assert_eq!(
            l_rows,
            vec![
                ("S1", Some("CS101"), Some(3.0)),
                ("S1", Some("CS102"), Some(4.0)),
                ("S3", None, None),
                ("S2", Some("CS101"), None),
            ]
        );
        assert!(l_out.iter().take(2).all(|rec| rec.roster.pool == "Lab"));
    }

    #[test]
    fn run_merge_missing_input_writes_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = SpecMergeRunConfig {
            path_file_course_summary: tmp.path().join("missing_course.xlsx"),
            path_file_ta_summary: tmp.path().join("missing_ta.xlsx"),
            path_file_out: tmp.path().join("out.xlsx"),
        };

        let err = run_merge(&config).expect_err("must fail");
        assert!(matches!(err, MergeRunError::Read { .. }));
        assert!(!config.path_file_out.exists());
    }
}
