//! Merged summary workbook writer.

use std::path::Path;

use polars::prelude::{Column, DataFrame};
use rosterkit_io_xlsx::{
    SpecSheetReadOptions, SpecSheetRow, SpecXlsxReport, SpecXlsxSheetWriteOptions, XlsxWriter,
    read_first_sheet_with_options,
};
use tracing::debug;

use crate::conf::{C_SHEET_NAME_SUMMARY, TUP_SUMMARY_HEADER, derive_summary_xlsx_formats};
use crate::reader::{parse_units, read_cell_text};
use crate::spec::{MergeRunError, SpecMergedRecord, SpecRosterRecord};

/// Render units in their default decimal text form; unset stays unset.
pub fn format_units(units: Option<f64>) -> Option<String> {
    units.map(|n_units| n_units.to_string())
}

/// Lay merged records out as the 10-column summary table.
///
/// Every column is text; unset course/type/units are nulls.
pub fn derive_summary_dataframe(records: &[SpecMergedRecord]) -> Result<DataFrame, MergeRunError> {
    let derive_text_col = |n_idx: usize, get: &dyn Fn(&SpecRosterRecord) -> String| {
        Column::new(
            TUP_SUMMARY_HEADER[n_idx].into(),
            records
                .iter()
                .map(|rec| get(&rec.roster))
                .collect::<Vec<String>>(),
        )
    };

    let l_cols = vec![
        derive_text_col(0, &|rec| rec.pool.clone()),
        derive_text_col(1, &|rec| rec.first_name.clone()),
        derive_text_col(2, &|rec| rec.last_name.clone()),
        derive_text_col(3, &|rec| rec.student_id.clone()),
        derive_text_col(4, &|rec| rec.email.clone()),
        derive_text_col(5, &|rec| rec.program.clone()),
        derive_text_col(6, &|rec| rec.rate.clone()),
        Column::new(
            TUP_SUMMARY_HEADER[7].into(),
            records
                .iter()
                .map(|rec| rec.course.clone())
                .collect::<Vec<Option<String>>>(),
        ),
        Column::new(
            TUP_SUMMARY_HEADER[8].into(),
            records
                .iter()
                .map(|rec| rec.assignment_type.clone())
                .collect::<Vec<Option<String>>>(),
        ),
        Column::new(
            TUP_SUMMARY_HEADER[9].into(),
            records
                .iter()
                .map(|rec| format_units(rec.units))
                .collect::<Vec<Option<String>>>(),
        ),
    ];

    DataFrame::new(l_cols).map_err(|err| MergeRunError::Table(err.to_string()))
}

/// Write `records` to a fresh summary workbook at `path`.
///
/// One sheet, a light blue header row and light gray shading on even-indexed
/// data rows. An existing file is replaced.
pub fn write_merged_summary<P: AsRef<Path>>(
    path: P,
    records: &[SpecMergedRecord],
) -> Result<SpecXlsxReport, MergeRunError> {
    let path_file_out = path.as_ref();
    let df_summary = derive_summary_dataframe(records)?;

    let mut writer = XlsxWriter::new(path_file_out, derive_summary_xlsx_formats());

    let map_write_err = |source| MergeRunError::Write {
        path: path_file_out.to_path_buf(),
        source,
    };
    let report = writer
        .write_table_sheet(
            &df_summary,
            C_SHEET_NAME_SUMMARY,
            &SpecXlsxSheetWriteOptions {
                if_band_rows: true,
                ..Default::default()
            },
        )
        .map_err(map_write_err)?;
    writer.close().map_err(map_write_err)?;

    debug!(
        path = %writer.path_file_out().display(),
        rows = records.len(),
        "merged summary written"
    );
    Ok(report)
}

/// Read a summary workbook written by [`write_merged_summary`] back into records.
///
/// Every row below the header is one record, including rows whose cells are
/// all blank. Blank course/type/units cells come back unset.
pub fn read_merged_summary<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<SpecMergedRecord>, MergeRunError> {
    let path_file_in = path.as_ref();
    let grid = read_first_sheet_with_options(
        path_file_in,
        &SpecSheetReadOptions {
            if_keep_blank_rows: true,
        },
    )
    .map_err(|source| MergeRunError::Read {
        path: path_file_in.to_path_buf(),
        source,
    })?;

    grid.rows_after(1)
        .map(|row| derive_merged_record_from_row(row, path_file_in))
        .collect()
}

fn derive_merged_record_from_row(
    row: &SpecSheetRow,
    path_file_in: &Path,
) -> Result<SpecMergedRecord, MergeRunError> {
    let read_optional = |n_col: usize| -> Result<Option<String>, MergeRunError> {
        let c_value = read_cell_text(row, n_col, path_file_in)?;
        Ok((!c_value.is_empty()).then_some(c_value))
    };

    Ok(SpecMergedRecord {
        roster: SpecRosterRecord {
            pool: read_cell_text(row, 0, path_file_in)?,
            first_name: read_cell_text(row, 1, path_file_in)?,
            last_name: read_cell_text(row, 2, path_file_in)?,
            student_id: read_cell_text(row, 3, path_file_in)?,
            email: read_cell_text(row, 4, path_file_in)?,
            program: read_cell_text(row, 5, path_file_in)?,
            rate: read_cell_text(row, 6, path_file_in)?,
        },
        course: read_optional(7)?,
        assignment_type: read_optional(8)?,
        units: parse_units(row.cell(9)),
    })
}
