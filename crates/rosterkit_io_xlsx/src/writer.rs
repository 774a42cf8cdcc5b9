//! Formatted table writer: one `DataFrame` per worksheet.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::conf::N_WIDTH_EXCEL_COLUMN_MAX;
use crate::spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumCellValue, SpecCellFormat, SpecColumnWidthPolicy,
    SpecXlsxFormatSet, SpecXlsxReport, SpecXlsxSheetWriteOptions, XlsxIoError,
};
use crate::util::{
    cast_col_num, cast_row_num, estimate_unicode_string_width, sanitize_sheet_name,
    validate_table_extent, validate_unique_columns,
};

/// Workbook buffered in memory until [`Self::close`].
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    formats: SpecXlsxFormatSet,
    set_sheet_names: BTreeSet<String>,
    if_closed: bool,
}

impl XlsxWriter {
    pub fn new(path_file_out: impl Into<PathBuf>, formats: SpecXlsxFormatSet) -> Self {
        Self {
            path_file_out: path_file_out.into(),
            workbook: Workbook::new(),
            formats,
            set_sheet_names: BTreeSet::new(),
            if_closed: false,
        }
    }

    pub fn path_file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Save the workbook, replacing any existing file.
    ///
    /// Calling it again after a successful save does nothing.
    pub fn close(&mut self) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_write_error)?;
        self.if_closed = true;
        debug!(path = %self.path_file_out.display(), "workbook saved");
        Ok(())
    }

    /// Add a sheet holding `df_table`: column names as a header row, then one
    /// row per dataframe row in order. Nulls become formatted blanks.
    pub fn write_table_sheet(
        &mut self,
        df_table: &DataFrame,
        sheet_name: &str,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<SpecXlsxReport, XlsxIoError> {
        if self.if_closed {
            return Err(XlsxIoError::Layout(
                "Workbook already saved; no more sheets can be added.".to_string(),
            ));
        }
        validate_width_policy(&options.policy_width)?;

        let l_col_names: Vec<String> = df_table
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        validate_unique_columns(&l_col_names)?;
        let n_rows_body = df_table.height();
        validate_table_extent(n_rows_body, l_col_names.len())?;

        let mut report = SpecXlsxReport::default();
        let c_sheet_name = sanitize_sheet_name(sheet_name, '_');
        if c_sheet_name != sheet_name {
            report.warnings.push(format!(
                "Sheet name {sheet_name:?} stored as {c_sheet_name:?}."
            ));
        }
        if !self.set_sheet_names.insert(c_sheet_name.clone()) {
            return Err(XlsxIoError::Layout(format!(
                "Sheet {c_sheet_name:?} already exists in this workbook."
            )));
        }

        let fmt_header = derive_rust_xlsx_format(&self.formats.header);
        let fmt_body = derive_rust_xlsx_format(&self.formats.text);
        let fmt_body_band =
            derive_rust_xlsx_format(&self.formats.text.overlay(&self.formats.band));

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&c_sheet_name)
            .map_err(derive_write_error)?;

        let mut l_widths: Vec<usize> = Vec::with_capacity(l_col_names.len());
        for (n_col, c_name) in l_col_names.iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num(n_col)?, c_name, &fmt_header)
                .map_err(derive_write_error)?;
            l_widths.push(estimate_unicode_string_width(c_name));
        }
        if options.if_freeze_header {
            worksheet.set_freeze_panes(1, 0).map_err(derive_write_error)?;
        }

        let policy_width = &options.policy_width;
        let n_rows_inspected = policy_width
            .n_rows_inspected_max
            .unwrap_or(n_rows_body)
            .min(n_rows_body);
        let l_cols = df_table.get_columns();
        for n_row in 0..n_rows_body {
            let fmt_row = match select_row_format(n_row, options) {
                EnumRowFormat::Plain => &fmt_body,
                EnumRowFormat::Band => &fmt_body_band,
            };
            for (n_col, col) in l_cols.iter().enumerate() {
                let any_value = col.get(n_row).map_err(|err| {
                    XlsxIoError::Layout(format!(
                        "Cannot read row {n_row} of column {:?}: {err}",
                        col.name()
                    ))
                })?;
                let value = derive_cell_value(any_value);
                if policy_width.if_autofit && n_row < n_rows_inspected {
                    l_widths[n_col] = l_widths[n_col].max(estimate_cell_width(&value));
                }
                write_body_cell(worksheet, n_row + 1, n_col, &value, fmt_row)?;
            }
        }

        if policy_width.if_autofit {
            apply_column_widths(worksheet, &l_widths, policy_width)?;
        }

        debug!(
            sheet = %c_sheet_name,
            rows = n_rows_body,
            cols = l_col_names.len(),
            "table sheet written"
        );
        report.sheet_name = c_sheet_name;
        report.n_rows_body = n_rows_body;
        report.n_cols = l_col_names.len();
        Ok(report)
    }
}

/// Body row style, before mapping to a concrete `Format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumRowFormat {
    Plain,
    Band,
}

/// Zero-based body row `n_row`; even rows are banded when bands are on.
fn select_row_format(n_row: usize, options: &SpecXlsxSheetWriteOptions) -> EnumRowFormat {
    if options.if_band_rows && n_row % 2 == 0 {
        EnumRowFormat::Band
    } else {
        EnumRowFormat::Plain
    }
}

fn validate_width_policy(policy_width: &SpecColumnWidthPolicy) -> Result<(), XlsxIoError> {
    if policy_width.n_width_min == 0 || policy_width.n_width_max < policy_width.n_width_min {
        return Err(XlsxIoError::Layout(format!(
            "Column width bounds must satisfy 1 <= min <= max, got min={} max={}.",
            policy_width.n_width_min, policy_width.n_width_max
        )));
    }
    Ok(())
}

fn apply_column_widths(
    worksheet: &mut Worksheet,
    l_widths: &[usize],
    policy_width: &SpecColumnWidthPolicy,
) -> Result<(), XlsxIoError> {
    let n_max = policy_width.n_width_max.min(N_WIDTH_EXCEL_COLUMN_MAX);
    let n_min = policy_width.n_width_min.min(n_max);
    for (n_col, n_width) in l_widths.iter().enumerate() {
        let n_width_final = (n_width + policy_width.n_width_padding).clamp(n_min, n_max);
        worksheet
            .set_column_width(cast_col_num(n_col)?, n_width_final as f64)
            .map_err(derive_write_error)?;
    }
    Ok(())
}

fn estimate_cell_width(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::Blank => 0,
        EnumCellValue::Text(val) => estimate_unicode_string_width(val),
        EnumCellValue::Number(val) => val.to_string().len(),
    }
}

// Small integer dtypes are feature-gated in polars and fall back to text.
fn derive_cell_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::Blank,
        AnyValue::String(val) => EnumCellValue::Text(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::Text(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::Text(if val { "TRUE" } else { "FALSE" }.to_string())
        }
        AnyValue::Int32(val) => EnumCellValue::Number(val.into()),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val.into()),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val.into()),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        other => EnumCellValue::Text(other.to_string()),
    }
}

fn write_body_cell(
    worksheet: &mut Worksheet,
    n_row: usize,
    n_col: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxIoError> {
    let (n_row, n_col) = (cast_row_num(n_row)?, cast_col_num(n_col)?);
    match value {
        EnumCellValue::Blank => worksheet.write_blank(n_row, n_col, format),
        EnumCellValue::Text(val) => worksheet.write_string_with_format(n_row, n_col, val, format),
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)
        }
    }
    .map_err(derive_write_error)?;
    Ok(())
}

fn derive_rust_xlsx_format(fmt_spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if let Some(c_font) = &fmt_spec.font_name {
        format = format.set_font_name(c_font.as_str());
    }
    if let Some(n_size) = fmt_spec.font_size {
        format = format.set_font_size(n_size);
    }
    if fmt_spec.bold == Some(true) {
        format = format.set_bold();
    }
    if let Some(align) = fmt_spec.align {
        format = format.set_align(match align {
            EnumAlignHorizontal::Left => FormatAlign::Left,
            EnumAlignHorizontal::Center => FormatAlign::Center,
            EnumAlignHorizontal::Right => FormatAlign::Right,
        });
    }
    if let Some(valign) = fmt_spec.valign {
        format = format.set_align(match valign {
            EnumAlignVertical::Top => FormatAlign::Top,
            EnumAlignVertical::Center => FormatAlign::VerticalCenter,
            EnumAlignVertical::Bottom => FormatAlign::Bottom,
        });
    }
    if let Some(c_color) = &fmt_spec.bg_color {
        format = format.set_background_color(c_color.as_str());
    }
    format
}

fn derive_write_error(err: XlsxError) -> XlsxIoError {
    XlsxIoError::Write(err.to_string())
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;
    use crate::conf::derive_default_xlsx_formats;
    use crate::reader::read_first_sheet;
    use crate::spec::EnumSheetCell;

    fn derive_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Name".into(), vec!["a".to_string(), "b".to_string()]),
            Column::new("Note".into(), vec![Some("x".to_string()), None]),
            Column::new("Score".into(), vec![1.5f64, 2.0f64]),
        ])
        .expect("dataframe")
    }

    #[test]
    fn band_rows_alternate_from_first_body_row() {
        let options_band = SpecXlsxSheetWriteOptions {
            if_band_rows: true,
            ..Default::default()
        };
        let l_selected: Vec<EnumRowFormat> = (0..4)
            .map(|n_row| select_row_format(n_row, &options_band))
            .collect();
        assert_eq!(
            l_selected,
            vec![
                EnumRowFormat::Band,
                EnumRowFormat::Plain,
                EnumRowFormat::Band,
                EnumRowFormat::Plain,
            ]
        );

        let options_plain = SpecXlsxSheetWriteOptions::default();
        assert!(
            (0..4).all(|n_row| select_row_format(n_row, &options_plain) == EnumRowFormat::Plain)
        );
    }

    #[test]
    fn header_and_band_formats_carry_fill_and_font() {
        let mut formats = derive_default_xlsx_formats();
        formats.header.bg_color = Some("#ADD8E6".to_string());

        let fmt_band_expected = Format::new()
            .set_font_name("Calibri")
            .set_font_size(11)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color("#F2F2F2");
        let fmt_band = derive_rust_xlsx_format(&formats.text.overlay(&formats.band));
        assert_eq!(fmt_band, fmt_band_expected);
        assert_ne!(derive_rust_xlsx_format(&formats.text), fmt_band_expected);

        let fmt_header_expected = Format::new()
            .set_font_name("Calibri")
            .set_font_size(11)
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color("#ADD8E6");
        assert_eq!(derive_rust_xlsx_format(&formats.header), fmt_header_expected);
    }

    #[test]
    fn table_sheet_round_trips_values() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("out.xlsx");

        let mut writer = XlsxWriter::new(&path, derive_default_xlsx_formats());
        let report = writer
            .write_table_sheet(
                &derive_df(),
                "Data",
                &SpecXlsxSheetWriteOptions {
                    if_band_rows: true,
                    ..Default::default()
                },
            )
            .expect("write sheet");
        writer.close().expect("close");

        assert_eq!(report.sheet_name, "Data");
        assert_eq!(report.n_rows_body, 2);
        assert_eq!(report.n_cols, 3);
        assert!(report.warnings.is_empty());

        let grid = read_first_sheet(&path).expect("read back");
        assert_eq!(grid.sheet_name, "Data");
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[0].cell(0), &EnumSheetCell::Text("Name".to_string()));
        assert_eq!(grid.rows[0].cell(2), &EnumSheetCell::Text("Score".to_string()));
        assert_eq!(grid.rows[1].cell(1), &EnumSheetCell::Text("x".to_string()));
        assert_eq!(grid.rows[1].cell(2), &EnumSheetCell::Number(1.5));
        assert_eq!(grid.rows[2].cell(0), &EnumSheetCell::Text("b".to_string()));
        assert_eq!(grid.rows[2].cell(1), &EnumSheetCell::Empty);
    }

    #[test]
    fn close_is_idempotent_and_blocks_new_sheets() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(
            tmp.path().join("out.xlsx"),
            derive_default_xlsx_formats(),
        );
        writer
            .write_table_sheet(&derive_df(), "Data", &Default::default())
            .expect("write sheet");
        writer.close().expect("close");
        writer.close().expect("close twice");

        let err = writer
            .write_table_sheet(&derive_df(), "More", &Default::default())
            .expect_err("closed");
        assert!(matches!(err, XlsxIoError::Layout(_)));
    }

    #[test]
    fn sheet_name_sanitized_and_duplicates_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(
            tmp.path().join("out.xlsx"),
            derive_default_xlsx_formats(),
        );
        let report = writer
            .write_table_sheet(&derive_df(), "a/b", &Default::default())
            .expect("write first");
        assert_eq!(report.sheet_name, "a_b");
        assert_eq!(report.warnings.len(), 1);

        let err = writer
            .write_table_sheet(&derive_df(), "a_b", &Default::default())
            .expect_err("duplicate");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn close_into_missing_directory_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(
            tmp.path().join("no_such_dir").join("out.xlsx"),
            derive_default_xlsx_formats(),
        );
        writer
            .write_table_sheet(&derive_df(), "Data", &Default::default())
            .expect("write sheet");
        let err = writer.close().expect_err("unwritable path");
        assert!(matches!(err, XlsxIoError::Write(_)));
    }

    #[test]
    fn inverted_width_bounds_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(
            tmp.path().join("out.xlsx"),
            derive_default_xlsx_formats(),
        );
        let options = SpecXlsxSheetWriteOptions {
            policy_width: SpecColumnWidthPolicy {
                n_width_min: 20,
                n_width_max: 10,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            writer.write_table_sheet(&derive_df(), "Data", &options),
            Err(XlsxIoError::Layout(_))
        ));
    }
}
