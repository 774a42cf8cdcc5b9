//! Excel limits and the default format set.

use crate::spec::{EnumAlignHorizontal, EnumAlignVertical, SpecCellFormat, SpecXlsxFormatSet};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

/// Widest column Excel accepts, in character units.
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;

/// Calibri 11 body text, bold centered header, light gray band.
pub fn derive_default_xlsx_formats() -> SpecXlsxFormatSet {
    let fmt_text = SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        align: Some(EnumAlignHorizontal::Left),
        valign: Some(EnumAlignVertical::Center),
        ..Default::default()
    };
    let fmt_header = fmt_text.overlay(&SpecCellFormat {
        bold: Some(true),
        align: Some(EnumAlignHorizontal::Center),
        ..Default::default()
    });

    SpecXlsxFormatSet {
        text: fmt_text,
        header: fmt_header,
        band: SpecCellFormat {
            bg_color: Some("#F2F2F2".to_string()),
            ..Default::default()
        },
    }
}
