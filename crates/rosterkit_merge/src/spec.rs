//! Record models, run configuration and top-level error types.

use std::path::PathBuf;

use rosterkit_io_xlsx::XlsxIoError;

////////////////////////////////////////////////////////////////////////////////
// #region Records

/// One populated assignment slot of a course summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecAssignmentRecord {
    /// Banner id of the assigned student.
    pub student_id: String,
    /// Course name, verbatim (may be empty).
    pub course: String,
    /// Assignment type such as tutorial or lab, verbatim (may be empty).
    pub assignment_type: String,
    /// Units; `None` when the cell is not a finite decimal.
    pub units: Option<f64>,
}

/// One TA summary row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecRosterRecord {
    /// Assignment pool / cohort label.
    pub pool: String,
    /// Banner id, the join key.
    pub student_id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Program of study.
    pub program: String,
    /// Pay rate, verbatim.
    pub rate: String,
}

/// Roster record extended with at most one matched assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecMergedRecord {
    /// Roster fields, copied unchanged.
    pub roster: SpecRosterRecord,
    /// Matched course; unset when there is no match or the course is empty.
    pub course: Option<String>,
    /// Matched assignment type.
    pub assignment_type: Option<String>,
    /// Matched units.
    pub units: Option<f64>,
}

impl SpecMergedRecord {
    /// Roster record with course/type/units unset.
    pub fn from_roster(roster: &SpecRosterRecord) -> Self {
        Self {
            roster: roster.clone(),
            course: None,
            assignment_type: None,
            units: None,
        }
    }

    /// Roster record overlaid with one matched assignment.
    ///
    /// An empty course or type is stored unset; a sheet cannot tell an empty
    /// string from a blank cell.
    pub fn from_match(roster: &SpecRosterRecord, assignment: &SpecAssignmentRecord) -> Self {
        let derive_text = |c_value: &str| (!c_value.is_empty()).then(|| c_value.to_string());
        Self {
            roster: roster.clone(),
            course: derive_text(&assignment.course),
            assignment_type: derive_text(&assignment.assignment_type),
            units: assignment.units,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ConfigAndErrors

/// Input and output paths for one merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeRunConfig {
    /// Course summary workbook (assignments).
    pub path_file_course_summary: PathBuf,
    /// TA summary workbook (roster).
    pub path_file_ta_summary: PathBuf,
    /// Merged summary workbook; replaced when present.
    pub path_file_out: PathBuf,
}

/// Fatal errors of a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeRunError {
    /// Input workbook could not be read.
    #[error("Failed to read {}", path.display())]
    Read {
        /// Input workbook path.
        path: PathBuf,
        /// Underlying XLSX error.
        #[source]
        source: XlsxIoError,
    },
    /// A cell could not be read as text.
    #[error("Unreadable cell at row {row}, column {col} of {}: {message}", path.display())]
    CellType {
        /// Input workbook path.
        path: PathBuf,
        /// One-based row number.
        row: usize,
        /// One-based column number.
        col: usize,
        /// Reason text.
        message: String,
    },
    /// Merged records could not be laid out as a table.
    #[error("Failed to build merged summary table: {0}")]
    Table(String),
    /// Output workbook could not be written.
    #[error("Failed to write {}", path.display())]
    Write {
        /// Output workbook path.
        path: PathBuf,
        /// Underlying XLSX error.
        #[source]
        source: XlsxIoError,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(course: &str, assignment_type: &str) -> SpecAssignmentRecord {
        SpecAssignmentRecord {
            student_id: "S1".to_string(),
            course: course.to_string(),
            assignment_type: assignment_type.to_string(),
            units: Some(2.0),
        }
    }

    #[test]
    fn from_match_copies_assignment_fields() {
        let roster = SpecRosterRecord {
            student_id: "S1".to_string(),
            ..Default::default()
        };
        let merged = SpecMergedRecord::from_match(&roster, &assignment("CS101", "Lab"));
        assert_eq!(merged.roster, roster);
        assert_eq!(merged.course.as_deref(), Some("CS101"));
        assert_eq!(merged.assignment_type.as_deref(), Some("Lab"));
        assert_eq!(merged.units, Some(2.0));
    }

    #[test]
    fn from_match_stores_empty_course_and_type_unset() {
        let roster = SpecRosterRecord::default();
        let merged = SpecMergedRecord::from_match(&roster, &assignment("", ""));
        assert_eq!(merged.course, None);
        assert_eq!(merged.assignment_type, None);
        assert_eq!(merged.units, Some(2.0));

        let merged_partial = SpecMergedRecord::from_match(&roster, &assignment("", "Lab"));
        assert_eq!(merged_partial.course, None);
        assert_eq!(merged_partial.assignment_type.as_deref(), Some("Lab"));
    }
}
