//! First-sheet cell grid reader backed by calamine.
//!
//! Rows are addressed with absolute zero-based sheet coordinates, so column
//! `0` is always column `A` regardless of where the used range starts.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::spec::{EnumSheetCell, XlsxIoError};

static CELL_EMPTY: EnumSheetCell = EnumSheetCell::Empty;

/// One used worksheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetRow {
    /// Absolute zero-based row index in the worksheet.
    pub row_idx: usize,
    /// Cells from column `A` up to the last column of the used range.
    pub cells: Vec<EnumSheetCell>,
}

impl SpecSheetRow {
    /// Cell at absolute zero-based column `col_idx`; empty when out of range.
    pub fn cell(&self, col_idx: usize) -> &EnumSheetCell {
        self.cells.get(col_idx).unwrap_or(&CELL_EMPTY)
    }

    /// `true` when at least one cell holds a value.
    pub fn is_used(&self) -> bool {
        self.cells.iter().any(|cell| !cell.is_empty())
    }
}

/// Rows of one worksheet, top to bottom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetGrid {
    /// Worksheet name.
    pub sheet_name: String,
    /// Used rows only, or every row when blank rows are kept.
    pub rows: Vec<SpecSheetRow>,
}

impl SpecSheetGrid {
    /// Rows after skipping the first `n_rows_skip` rows of the grid.
    pub fn rows_after(&self, n_rows_skip: usize) -> impl Iterator<Item = &SpecSheetRow> {
        self.rows.iter().skip(n_rows_skip)
    }
}

/// Options for [`read_first_sheet_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecSheetReadOptions {
    /// Keep every row from the top of the sheet down to the last written row,
    /// including rows whose cells are all blank, so that `rows[i].row_idx == i`.
    pub if_keep_blank_rows: bool,
}

/// Read every used row of the first worksheet in the workbook at `path`.
///
/// The workbook handle is released before returning.
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<SpecSheetGrid, XlsxIoError> {
    read_first_sheet_with_options(path, &SpecSheetReadOptions::default())
}

/// Same as [`read_first_sheet`] with explicit row handling.
///
/// The last row is taken from the larger of the last value-bearing cell and
/// the sheet's declared dimension, which also covers formatted blank cells.
/// A sheet without any value has no rows.
pub fn read_first_sheet_with_options<P: AsRef<Path>>(
    path: P,
    options: &SpecSheetReadOptions,
) -> Result<SpecSheetGrid, XlsxIoError> {
    let path_file_in = path.as_ref();

    let mut workbook: Xlsx<_> =
        open_workbook(path_file_in).map_err(|err: calamine::XlsxError| XlsxIoError::Open {
            path: path_file_in.to_path_buf(),
            message: err.to_string(),
        })?;

    let Some(c_sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(XlsxIoError::MissingSheet {
            path: path_file_in.to_path_buf(),
        });
    };
    let derive_sheet_error = |err: calamine::XlsxError| XlsxIoError::Open {
        path: path_file_in.to_path_buf(),
        message: format!("Failed to read sheet {c_sheet_name:?}: {err}"),
    };
    let n_row_last_declared = workbook
        .worksheet_cells_reader(&c_sheet_name)
        .map(|reader| reader.dimensions().end.0 as usize)
        .map_err(derive_sheet_error)?;
    let range = workbook
        .worksheet_range(&c_sheet_name)
        .map_err(derive_sheet_error)?;

    let l_rows_range = derive_rows_from_range(&range);
    let rows = if options.if_keep_blank_rows {
        derive_dense_rows(l_rows_range, n_row_last_declared)
    } else {
        l_rows_range.into_iter().filter(SpecSheetRow::is_used).collect()
    };
    let grid = SpecSheetGrid {
        sheet_name: c_sheet_name,
        rows,
    };
    debug!(
        path = %path_file_in.display(),
        sheet = %grid.sheet_name,
        rows = grid.rows.len(),
        if_keep_blank_rows = options.if_keep_blank_rows,
        "read first worksheet"
    );
    Ok(grid)
}

/// Every row of the value-bearing range, padded to absolute columns.
fn derive_rows_from_range(range: &Range<Data>) -> Vec<SpecSheetRow> {
    let Some((n_row_start, n_col_start)) = range.start() else {
        return vec![];
    };

    range
        .rows()
        .enumerate()
        .map(|(n_row_rel, v_row)| {
            let mut l_cells = vec![EnumSheetCell::Empty; n_col_start as usize];
            l_cells.extend(v_row.iter().map(derive_sheet_cell_from_data));
            SpecSheetRow {
                row_idx: n_row_start as usize + n_row_rel,
                cells: l_cells,
            }
        })
        .collect()
}

/// Fill blank rows above the range and below it down to `n_row_last_declared`.
fn derive_dense_rows(
    l_rows_range: Vec<SpecSheetRow>,
    n_row_last_declared: usize,
) -> Vec<SpecSheetRow> {
    let Some(n_row_last_range) = l_rows_range.last().map(|row| row.row_idx) else {
        return vec![];
    };
    let n_row_first_range = l_rows_range.first().map_or(0, |row| row.row_idx);
    let n_row_last = usize::max(n_row_last_range, n_row_last_declared);
    let derive_blank_row = |row_idx: usize| SpecSheetRow {
        row_idx,
        cells: vec![],
    };

    let mut l_rows: Vec<SpecSheetRow> = (0..n_row_first_range).map(derive_blank_row).collect();
    l_rows.extend(l_rows_range);
    l_rows.extend((n_row_last_range + 1..=n_row_last).map(derive_blank_row));
    l_rows
}

fn derive_sheet_cell_from_data(value: &Data) -> EnumSheetCell {
    match value {
        Data::Empty => EnumSheetCell::Empty,
        Data::String(val) => EnumSheetCell::Text(val.clone()),
        Data::Int(val) => EnumSheetCell::Number(*val as f64),
        Data::Float(val) => EnumSheetCell::Number(*val),
        Data::Bool(val) => EnumSheetCell::Boolean(*val),
        Data::DateTime(val) => EnumSheetCell::Number(val.as_f64()),
        Data::Error(val) => EnumSheetCell::Error(val.to_string()),
        other => EnumSheetCell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::{Format, Workbook};

    use super::*;

    #[test]
    fn read_first_sheet_keeps_absolute_columns_and_drops_blank_rows() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("grid.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(1, 2, "first").expect("write");
        worksheet.write_number(1, 4, 3.5).expect("write");
        worksheet.write_boolean(3, 3, true).expect("write");
        let other = workbook.add_worksheet();
        other.write_string(0, 0, "ignored").expect("write");
        workbook.save(&path).expect("save");

        let grid = read_first_sheet(&path).expect("read");
        assert_eq!(grid.sheet_name, "Sheet1");
        assert_eq!(grid.rows.len(), 2);

        let row_first = &grid.rows[0];
        assert_eq!(row_first.row_idx, 1);
        assert_eq!(row_first.cell(0), &EnumSheetCell::Empty);
        assert_eq!(row_first.cell(2), &EnumSheetCell::Text("first".to_string()));
        assert_eq!(row_first.cell(4), &EnumSheetCell::Number(3.5));
        assert_eq!(row_first.cell(99), &EnumSheetCell::Empty);

        let row_second = &grid.rows[1];
        assert_eq!(row_second.row_idx, 3);
        assert_eq!(row_second.cell(3), &EnumSheetCell::Boolean(true));

        assert_eq!(grid.rows_after(1).count(), 1);
    }

    #[test]
    fn read_first_sheet_missing_file_is_open_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = read_first_sheet(tmp.path().join("missing.xlsx")).expect_err("must fail");
        assert!(matches!(err, XlsxIoError::Open { .. }));
    }

    #[test]
    fn read_first_sheet_empty_sheet_has_no_rows() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("empty.xlsx");

        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).expect("save");

        let grid = read_first_sheet(&path).expect("read");
        assert!(grid.rows.is_empty());
    }

    #[test]
    fn read_first_sheet_keeps_blank_rows_down_to_last_written_row() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("dense.xlsx");
        let fmt_shaded = Format::new().set_background_color("#D3D3D3");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Header").expect("write");
        worksheet.write_blank(1, 0, &fmt_shaded).expect("write");
        worksheet.write_string(2, 1, "value").expect("write");
        worksheet.write_blank(3, 0, &fmt_shaded).expect("write");
        worksheet.write_blank(4, 0, &fmt_shaded).expect("write");
        workbook.save(&path).expect("save");

        let grid_sparse = read_first_sheet(&path).expect("read");
        assert_eq!(grid_sparse.rows.len(), 2);

        let grid = read_first_sheet_with_options(
            &path,
            &SpecSheetReadOptions {
                if_keep_blank_rows: true,
            },
        )
        .expect("read dense");
        assert_eq!(grid.rows.len(), 5);
        for (n_idx, row) in grid.rows.iter().enumerate() {
            assert_eq!(row.row_idx, n_idx);
        }
        assert!(!grid.rows[1].is_used());
        assert_eq!(grid.rows[2].cell(1), &EnumSheetCell::Text("value".to_string()));
        assert!(!grid.rows[4].is_used());
        assert_eq!(grid.rows_after(1).count(), 4);
    }

    #[test]
    fn read_first_sheet_dense_starts_at_row_one() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(2, 0, "late").expect("write");
        workbook.save(&path).expect("save");

        let grid = read_first_sheet_with_options(
            &path,
            &SpecSheetReadOptions {
                if_keep_blank_rows: true,
            },
        )
        .expect("read dense");
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[0].cell(0), &EnumSheetCell::Empty);
        assert_eq!(grid.rows[2].cell(0), &EnumSheetCell::Text("late".to_string()));
    }
}
