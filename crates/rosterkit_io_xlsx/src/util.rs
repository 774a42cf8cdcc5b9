//! Pure helpers shared by the reader and writer.

use std::collections::BTreeMap;

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::XlsxIoError;

////////////////////////////////////////////////////////////////////////////////
// #region TableValidation

/// Reject header rows that name the same column twice.
///
/// The error lists each repeated name with its zero-based positions.
pub fn validate_unique_columns(columns: &[String]) -> Result<(), XlsxIoError> {
    let mut dict_positions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_positions.entry(c_name.as_str()).or_default().push(n_idx);
    }

    let l_repeated: Vec<String> = dict_positions
        .into_iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .map(|(c_name, l_pos)| format!("{c_name:?} at {l_pos:?}"))
        .collect();
    if l_repeated.is_empty() {
        return Ok(());
    }
    Err(XlsxIoError::Layout(format!(
        "Repeated column names: {}",
        l_repeated.join("; ")
    )))
}

/// Check that one header row plus `n_rows_body` rows of `n_cols` columns fit
/// on a single worksheet.
pub fn validate_table_extent(n_rows_body: usize, n_cols: usize) -> Result<(), XlsxIoError> {
    if n_cols > N_NCOLS_EXCEL_MAX {
        return Err(XlsxIoError::Layout(format!(
            "Table too wide: {n_cols} columns exceeds Excel limit of {N_NCOLS_EXCEL_MAX}."
        )));
    }
    if n_rows_body >= N_NROWS_EXCEL_MAX {
        return Err(XlsxIoError::Layout(format!(
            "Table too tall: header plus {n_rows_body} rows exceeds {N_NROWS_EXCEL_MAX}."
        )));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Excel-safe sheet name: illegal characters become `chr_replace`, outer
/// whitespace is dropped and the result is cut to 31 characters.
///
/// A name that ends up empty becomes `Sheet1`.
pub fn sanitize_sheet_name(name: &str, chr_replace: char) -> String {
    let c_name: String = name
        .trim()
        .chars()
        .map(|chr| {
            if TUP_EXCEL_ILLEGAL.contains(&chr) {
                chr_replace
            } else {
                chr
            }
        })
        .take(N_LEN_EXCEL_SHEET_NAME_MAX)
        .collect();
    if c_name.is_empty() {
        return "Sheet1".to_string();
    }
    c_name
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Widths

/// Approximate displayed width of `s` in Excel character units.
///
/// Non-ASCII characters count as 1.6 units.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

pub(crate) fn cast_row_num(value: usize) -> Result<u32, XlsxIoError> {
    u32::try_from(value).map_err(|_| XlsxIoError::Layout(format!("row index overflow: {value}")))
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, XlsxIoError> {
    u16::try_from(value)
        .map_err(|_| XlsxIoError::Layout(format!("column index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
