//! Formats, cell values, sheet options, reports and errors.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormats

/// Horizontal alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumAlignHorizontal {
    Left,
    Center,
    Right,
}

/// Vertical alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumAlignVertical {
    Top,
    Center,
    Bottom,
}

/// Layered cell format.
///
/// Unset fields fall through to the layer below when combined with
/// [`Self::overlay`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<u16>,
    pub bold: Option<bool>,
    pub align: Option<EnumAlignHorizontal>,
    pub valign: Option<EnumAlignVertical>,
    /// Solid fill color, `#RRGGBB`.
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// `self` with every field set in `top` replaced by `top`'s value.
    pub fn overlay(&self, top: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: top.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: top.font_size.or(self.font_size),
            bold: top.bold.or(self.bold),
            align: top.align.or(self.align),
            valign: top.valign.or(self.valign),
            bg_color: top.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

/// The three formats a table sheet is drawn with.
///
/// `band` is a patch: shaded body rows use `text` overlaid with `band`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxFormatSet {
    pub text: SpecCellFormat,
    pub header: SpecCellFormat,
    pub band: SpecCellFormat,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Value about to be written into one body cell.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Null; written as a formatted blank.
    Blank,
    Text(String),
    Number(f64),
}

/// One cell as read back from a worksheet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumSheetCell {
    /// No value.
    Empty,
    /// Text value (also ISO date/duration strings).
    Text(String),
    /// Numeric value (integers, floats and date serials).
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Spreadsheet error value such as `#N/A`.
    Error(String),
}

impl EnumSheetCell {
    /// `true` for [`Self::Empty`] and empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render the cell as display text.
    ///
    /// Empty cells render as `""`. Error-valued cells cannot be rendered and
    /// return the error text as `Err`.
    pub fn to_text(&self) -> Result<String, String> {
        match self {
            Self::Empty => Ok(String::new()),
            Self::Text(s) => Ok(s.clone()),
            Self::Number(n) => Ok(n.to_string()),
            Self::Boolean(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Self::Error(e) => Err(format!("cell holds error value {e}")),
        }
    }
}

impl fmt::Display for EnumSheetCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{e}"),
            _ => write!(f, "{}", self.to_text().unwrap_or_default()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetOptions

/// Column width inference from written text.
///
/// Width is the widest inspected cell (header always included) plus
/// `n_width_padding`, clamped to `[n_width_min, n_width_max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColumnWidthPolicy {
    /// Leave Excel's default widths untouched when `false`.
    pub if_autofit: bool,
    /// Body rows inspected per column; `None` inspects all.
    pub n_rows_inspected_max: Option<usize>,
    pub n_width_min: usize,
    pub n_width_max: usize,
    pub n_width_padding: usize,
}

impl Default for SpecColumnWidthPolicy {
    fn default() -> Self {
        Self {
            if_autofit: true,
            n_rows_inspected_max: Some(5_000),
            n_width_min: 6,
            n_width_max: 50,
            n_width_padding: 2,
        }
    }
}

/// Options for one table sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxSheetWriteOptions {
    /// Keep the header row visible while scrolling.
    pub if_freeze_header: bool,
    /// Shade body rows with an even zero-based index using the band format.
    pub if_band_rows: bool,
    pub policy_width: SpecColumnWidthPolicy,
}

impl Default for SpecXlsxSheetWriteOptions {
    fn default() -> Self {
        Self {
            if_freeze_header: true,
            if_band_rows: false,
            policy_width: SpecColumnWidthPolicy::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportAndErrors

/// What one table-sheet write produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet name as stored in the workbook, after sanitizing.
    pub sheet_name: String,
    /// Body rows written; the header row is not counted.
    pub n_rows_body: usize,
    pub n_cols: usize,
    pub warnings: Vec<String>,
}

/// Errors raised by the XLSX kernel.
#[derive(Debug, thiserror::Error)]
pub enum XlsxIoError {
    /// Workbook could not be opened or parsed.
    #[error("Failed to open workbook {}: {message}", path.display())]
    Open {
        /// Workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Workbook has no worksheet to read.
    #[error("Workbook has no worksheets: {}", path.display())]
    MissingSheet {
        /// Workbook path.
        path: PathBuf,
    },
    /// Worksheet write or workbook save failed.
    #[error("xlsx write error: {0}")]
    Write(String),
    /// Table shape or writer state is not writable.
    #[error("{0}")]
    Layout(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
