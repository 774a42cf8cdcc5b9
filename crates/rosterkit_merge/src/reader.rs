//! Course summary and TA summary readers.
//!
//! Both read the first worksheet only and address cells by the fixed columns
//! in [`crate::conf`].

use std::path::Path;

use rosterkit_io_xlsx::{EnumSheetCell, SpecSheetGrid, SpecSheetRow, read_first_sheet};
use tracing::{debug, warn};

use crate::conf::{
    N_COL_ASSIGNMENT_TYPE, N_COL_COURSE, N_COL_EMAIL, N_COL_FIRST_NAME, N_COL_LAST_NAME,
    N_COL_POOL, N_COL_PROGRAM, N_COL_RATE, N_COL_STUDENT_ID, N_ROWS_SKIP_COURSE_SUMMARY,
    N_ROWS_SKIP_TA_SUMMARY, N_SLOTS_PER_COURSE_ROW, derive_slot_columns,
};
use crate::report::ReportMergeBuilder;
use crate::spec::{MergeRunError, SpecAssignmentRecord, SpecRosterRecord};

////////////////////////////////////////////////////////////////////////////////
// #region UnitsParsing

/// Parse a units cell as a finite decimal.
///
/// Numeric cells yield their value, text cells are trimmed and parsed.
/// Everything else, including `NaN`/`inf` text, yields `None`.
pub fn parse_units(cell: &EnumSheetCell) -> Option<f64> {
    let n_units = match cell {
        EnumSheetCell::Number(val) => *val,
        EnumSheetCell::Text(val) => val.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n_units.is_finite().then_some(n_units)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CourseSummary

/// Read assignment records from the course summary workbook at `path`.
pub fn read_course_assignments<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<SpecAssignmentRecord>, MergeRunError> {
    let mut builder_report = ReportMergeBuilder::default();
    read_course_assignments_with_report(path, &mut builder_report)
}

/// Same as [`read_course_assignments`], recording counts and unit warnings.
pub fn read_course_assignments_with_report<P: AsRef<Path>>(
    path: P,
    builder_report: &mut ReportMergeBuilder,
) -> Result<Vec<SpecAssignmentRecord>, MergeRunError> {
    let path_file_in = path.as_ref();
    let grid = read_first_sheet(path_file_in).map_err(|source| MergeRunError::Read {
        path: path_file_in.to_path_buf(),
        source,
    })?;
    derive_course_assignments_from_grid(&grid, path_file_in, builder_report)
}

/// Flatten course summary rows into one record per populated slot.
///
/// Slots are emitted in row order, then slot order. A slot is populated when
/// its student id cell is non-empty.
pub fn derive_course_assignments_from_grid(
    grid: &SpecSheetGrid,
    path_file_in: &Path,
    builder_report: &mut ReportMergeBuilder,
) -> Result<Vec<SpecAssignmentRecord>, MergeRunError> {
    let mut l_assignments = Vec::new();

    for row in grid.rows_after(N_ROWS_SKIP_COURSE_SUMMARY) {
        let c_course = read_cell_text(row, N_COL_COURSE, path_file_in)?;
        let c_assignment_type = read_cell_text(row, N_COL_ASSIGNMENT_TYPE, path_file_in)?;

        for n_slot in 0..N_SLOTS_PER_COURSE_ROW {
            let (n_col_student_id, n_col_units) = derive_slot_columns(n_slot);

            let c_student_id = read_cell_text(row, n_col_student_id, path_file_in)?;
            if c_student_id.is_empty() {
                continue;
            }

            let cell_units = row.cell(n_col_units);
            let units = parse_units(cell_units);
            if units.is_none() && !cell_units.is_empty() {
                let c_msg = format!(
                    "Units \"{cell_units}\" at row {}, column {} is not a decimal; left unset.",
                    row.row_idx + 1,
                    n_col_units + 1
                );
                warn!(student_id = %c_student_id, "{c_msg}");
                builder_report.add_units_unparsed();
                builder_report.add_warning(c_msg);
            }

            l_assignments.push(SpecAssignmentRecord {
                student_id: c_student_id,
                course: c_course.clone(),
                assignment_type: c_assignment_type.clone(),
                units,
            });
        }
    }

    builder_report.cnt_assignment_rows = l_assignments.len() as u64;
    debug!(
        path = %path_file_in.display(),
        assignments = l_assignments.len(),
        "course summary read"
    );
    Ok(l_assignments)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TaSummary

/// Read roster records from the TA summary workbook at `path`.
pub fn read_ta_roster<P: AsRef<Path>>(path: P) -> Result<Vec<SpecRosterRecord>, MergeRunError> {
    let path_file_in = path.as_ref();
    let grid = read_first_sheet(path_file_in).map_err(|source| MergeRunError::Read {
        path: path_file_in.to_path_buf(),
        source,
    })?;
    derive_roster_from_grid(&grid, path_file_in)
}

/// One roster record per used row after the header.
///
/// An error-valued cell in any roster column fails the whole read.
pub fn derive_roster_from_grid(
    grid: &SpecSheetGrid,
    path_file_in: &Path,
) -> Result<Vec<SpecRosterRecord>, MergeRunError> {
    let l_roster = grid
        .rows_after(N_ROWS_SKIP_TA_SUMMARY)
        .map(|row| {
            Ok(SpecRosterRecord {
                pool: read_cell_text(row, N_COL_POOL, path_file_in)?,
                student_id: read_cell_text(row, N_COL_STUDENT_ID, path_file_in)?,
                first_name: read_cell_text(row, N_COL_FIRST_NAME, path_file_in)?,
                last_name: read_cell_text(row, N_COL_LAST_NAME, path_file_in)?,
                email: read_cell_text(row, N_COL_EMAIL, path_file_in)?,
                program: read_cell_text(row, N_COL_PROGRAM, path_file_in)?,
                rate: read_cell_text(row, N_COL_RATE, path_file_in)?,
            })
        })
        .collect::<Result<Vec<_>, MergeRunError>>()?;

    debug!(
        path = %path_file_in.display(),
        roster = l_roster.len(),
        "TA summary read"
    );
    Ok(l_roster)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

pub(crate) fn read_cell_text(
    row: &SpecSheetRow,
    col_idx: usize,
    path_file_in: &Path,
) -> Result<String, MergeRunError> {
    row.cell(col_idx)
        .to_text()
        .map_err(|message| MergeRunError::CellType {
            path: path_file_in.to_path_buf(),
            row: row.row_idx + 1,
            col: col_idx + 1,
            message,
        })
}
