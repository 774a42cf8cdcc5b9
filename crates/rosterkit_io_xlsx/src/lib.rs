//! `rosterkit_io_xlsx` v1:
//! Rust-side XLSX read/write kernel.
//!
//! Modules:
//! - `conf`   : Excel limits and the default format set
//! - `spec`   : formats/cells/sheet options/errors
//! - `util`   : pure helper functions
//! - `reader` : first-sheet cell grid reader (calamine)
//! - `writer` : formatted table writer (rust_xlsxwriter)
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, derive_default_xlsx_formats,
};
pub use reader::{
    SpecSheetGrid, SpecSheetReadOptions, SpecSheetRow, read_first_sheet,
    read_first_sheet_with_options,
};
pub use spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumCellValue, EnumSheetCell, SpecCellFormat,
    SpecColumnWidthPolicy, SpecXlsxFormatSet, SpecXlsxReport, SpecXlsxSheetWriteOptions,
    XlsxIoError,
};
pub use util::{sanitize_sheet_name, validate_table_extent, validate_unique_columns};
pub use writer::XlsxWriter;
