//! Fixed sheet layouts and output presets.
//!
//! Column indices are zero-based (`0` = column `A`).

use rosterkit_io_xlsx::{SpecXlsxFormatSet, derive_default_xlsx_formats};

////////////////////////////////////////////////////////////////////////////////
// #region CourseSummaryLayout

/// Title and header rows at the top of the course summary sheet.
pub const N_ROWS_SKIP_COURSE_SUMMARY: usize = 2;
/// Course name column (`B`).
pub const N_COL_COURSE: usize = 1;
/// Assignment type column (`E`).
pub const N_COL_ASSIGNMENT_TYPE: usize = 4;
/// Student id column of the first assignment slot (`H`).
pub const N_COL_SLOT_STUDENT_ID_FIRST: usize = 7;
/// Column distance between consecutive slots.
pub const N_COL_SLOT_STRIDE: usize = 3;
/// Units column offset from the slot's student id column.
pub const N_COL_SLOT_UNITS_OFFSET: usize = 2;
/// Assignment slots per course row.
pub const N_SLOTS_PER_COURSE_ROW: usize = 11;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TaSummaryLayout

/// Header rows at the top of the TA summary sheet.
pub const N_ROWS_SKIP_TA_SUMMARY: usize = 1;
/// Pool (`A`).
pub const N_COL_POOL: usize = 0;
/// Banner id (`C`).
pub const N_COL_STUDENT_ID: usize = 2;
/// First name (`D`).
pub const N_COL_FIRST_NAME: usize = 3;
/// Last name (`E`).
pub const N_COL_LAST_NAME: usize = 4;
/// Email (`F`).
pub const N_COL_EMAIL: usize = 5;
/// Program (`K`).
pub const N_COL_PROGRAM: usize = 10;
/// Rate (`O`).
pub const N_COL_RATE: usize = 14;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SummaryOutput

/// Sheet name of the merged summary workbook.
pub const C_SHEET_NAME_SUMMARY: &str = "Updated Summary";

/// Output header, in column order.
pub const TUP_SUMMARY_HEADER: [&str; 10] = [
    "Pool",
    "First Name",
    "Last Name",
    "Student ID",
    "Email",
    "Program",
    "Rate",
    "Course",
    "Type",
    "Units",
];

/// Header row fill (light blue).
pub const C_COLOR_HEADER_BG: &str = "#ADD8E6";
/// Fill of even-indexed data rows (light gray).
pub const C_COLOR_BAND_BG: &str = "#D3D3D3";

/// Default formats with the summary's header and band fills.
pub fn derive_summary_xlsx_formats() -> SpecXlsxFormatSet {
    let mut formats = derive_default_xlsx_formats();
    formats.header.bg_color = Some(C_COLOR_HEADER_BG.to_string());
    formats.band.bg_color = Some(C_COLOR_BAND_BG.to_string());
    formats
}

/// Zero-based `(student_id, units)` columns of assignment slot `n_slot`.
pub fn derive_slot_columns(n_slot: usize) -> (usize, usize) {
    let n_col_student_id = N_COL_SLOT_STUDENT_ID_FIRST + n_slot * N_COL_SLOT_STRIDE;
    (n_col_student_id, n_col_student_id + N_COL_SLOT_UNITS_OFFSET)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
