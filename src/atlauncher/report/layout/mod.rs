use std::fmt;

use chrono::NaiveDateTime;
use rust_xlsxwriter::{ColNum, RowNum, TableStyle};
use tracing::warn;

use crate::atlauncher::report::error::{ReportError, Result};
use crate::atlauncher::report::model::{CategorySet, RowRecord, UpdatedAt};

/// Longest text Excel accepts in a single cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// A field of [`RowRecord`] that can be laid out as a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ModName,
    Description,
    Detail,
    Category,
    Links,
    FileName,
    UpdatedAt,
}

impl Column {
    /// Header text written above the column.
    pub fn header(self) -> &'static str {
        match self {
            Column::ModName => "Mod Name",
            Column::Description => "Description",
            Column::Detail => "Detail",
            Column::Category => "Category",
            Column::Links => "Links",
            Column::FileName => "File Name",
            Column::UpdatedAt => "Updated At",
        }
    }
}

/// Placement and styling of one report column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub column: Column,
    pub width: f64,
    /// Wrap long text and align it to the top of the cell.
    pub wrap: bool,
}

impl ColumnSpec {
    pub fn new(column: Column, width: f64) -> Self {
        Self {
            column,
            width,
            wrap: false,
        }
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }
}

/// Every constant that shapes the report worksheet.
#[derive(Clone)]
pub struct ReportLayout {
    pub sheet_name: String,
    pub columns: Vec<ColumnSpec>,
    pub data_row_height: f64,
    pub timestamp_format: String,
    pub table_name: String,
    pub table_style: TableStyle,
    /// Zero-based column holding the category listing. It is not derived from
    /// the number of data columns.
    pub categories_column: ColNum,
    pub categories_header: String,
    pub categories_width: f64,
}

// `TableStyle` does not implement `Debug`, so it is shown as a placeholder.
impl fmt::Debug for ReportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportLayout")
            .field("sheet_name", &self.sheet_name)
            .field("columns", &self.columns)
            .field("data_row_height", &self.data_row_height)
            .field("timestamp_format", &self.timestamp_format)
            .field("table_name", &self.table_name)
            .field("table_style", &format_args!("TableStyle"))
            .field("categories_column", &self.categories_column)
            .field("categories_header", &self.categories_header)
            .field("categories_width", &self.categories_width)
            .finish()
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Mods".to_string(),
            columns: vec![
                ColumnSpec::new(Column::ModName, 30.0),
                ColumnSpec::new(Column::Description, 50.0).wrapped(),
                ColumnSpec::new(Column::Detail, 60.0).wrapped(),
                ColumnSpec::new(Column::Category, 30.0).wrapped(),
                ColumnSpec::new(Column::Links, 15.0),
                ColumnSpec::new(Column::FileName, 40.0),
                ColumnSpec::new(Column::UpdatedAt, 20.0),
            ],
            data_row_height: 15.0,
            timestamp_format: "yyyy-mm-dd hh:mm:ss".to_string(),
            table_name: "ModsTable".to_string(),
            table_style: TableStyle::Medium9,
            categories_column: 10,
            categories_header: "Categorias".to_string(),
            categories_width: 25.0,
        }
    }
}

impl ReportLayout {
    /// Checks that the data table and the category listing do not overlap.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(ReportError::InvalidLayout(
                "at least one data column is required".to_string(),
            ));
        }
        if usize::from(self.categories_column) < self.columns.len() {
            return Err(ReportError::InvalidLayout(format!(
                "category column {} overlaps the {} data columns",
                self.categories_column,
                self.columns.len()
            )));
        }
        Ok(())
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|spec| spec.column.header()).collect()
    }
}

/// Content of a planned cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Link { text: String, url: String },
    Timestamp(NaiveDateTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    Wrapped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCell {
    pub row: RowNum,
    pub col: ColNum,
    pub value: CellValue,
    pub style: CellStyle,
}

/// Filterable table spanning the header and data rows.
#[derive(Clone)]
pub struct TableRegion {
    pub name: String,
    pub style: TableStyle,
    pub first_row: RowNum,
    pub first_col: ColNum,
    pub last_row: RowNum,
    pub last_col: ColNum,
    pub headers: Vec<String>,
}

// `TableStyle` does not implement `Debug`, so it is shown as a placeholder.
impl fmt::Debug for TableRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRegion")
            .field("name", &self.name)
            .field("style", &format_args!("TableStyle"))
            .field("first_row", &self.first_row)
            .field("first_col", &self.first_col)
            .field("last_row", &self.last_row)
            .field("last_col", &self.last_col)
            .field("headers", &self.headers)
            .finish()
    }
}

/// Everything the workbook renderer needs to produce the report sheet.
#[derive(Debug, Clone)]
pub struct SheetPlan {
    pub sheet_name: String,
    /// Rows above this index stay visible while scrolling.
    pub frozen_rows: RowNum,
    pub cells: Vec<PlannedCell>,
    pub row_heights: Vec<(RowNum, f64)>,
    pub column_widths: Vec<(ColNum, f64)>,
    pub timestamp_format: String,
    pub table: Option<TableRegion>,
}

impl SheetPlan {
    /// Looks up the planned cell at the given position.
    pub fn cell(&self, row: RowNum, col: ColNum) -> Option<&PlannedCell> {
        self.cells
            .iter()
            .find(|cell| cell.row == row && cell.col == col)
    }
}

/// Lays out the rows and the category listing on a single sheet.
pub fn plan_sheet(
    rows: &[RowRecord],
    categories: &CategorySet,
    layout: &ReportLayout,
) -> Result<SheetPlan> {
    layout.validate()?;

    let mut cells = Vec::with_capacity((rows.len() + 1) * layout.columns.len());
    for (col, spec) in (0..).zip(&layout.columns) {
        cells.push(text_cell(0, col, spec.column.header(), CellStyle::Plain));
    }

    let mut row_heights = Vec::with_capacity(rows.len());
    for (row, record) in (1..).zip(rows) {
        for (col, spec) in (0..).zip(&layout.columns) {
            let style = if spec.wrap {
                CellStyle::Wrapped
            } else {
                CellStyle::Plain
            };
            cells.push(PlannedCell {
                row,
                col,
                value: cell_value(record, spec.column),
                style,
            });
        }
        row_heights.push((row, layout.data_row_height));
    }

    let last_col = to_col(layout.columns.len() - 1)?;
    let table = if rows.is_empty() {
        None
    } else {
        Some(TableRegion {
            name: layout.table_name.clone(),
            style: layout.table_style.clone(),
            first_row: 0,
            first_col: 0,
            last_row: to_row(rows.len())?,
            last_col,
            headers: layout.headers().into_iter().map(String::from).collect(),
        })
    };

    let mut column_widths: Vec<(ColNum, f64)> = (0..)
        .zip(&layout.columns)
        .map(|(col, spec)| (col, spec.width))
        .collect();

    let side = layout.categories_column;
    cells.push(text_cell(0, side, &layout.categories_header, CellStyle::Plain));
    for (row, tag) in (1..).zip(categories.sorted()) {
        cells.push(text_cell(row, side, tag, CellStyle::Plain));
    }
    column_widths.push((side, layout.categories_width));

    Ok(SheetPlan {
        sheet_name: layout.sheet_name.clone(),
        frozen_rows: 1,
        cells,
        row_heights,
        column_widths,
        timestamp_format: layout.timestamp_format.clone(),
        table,
    })
}

fn cell_value(record: &RowRecord, column: Column) -> CellValue {
    match column {
        Column::ModName => text(&record.mod_name),
        Column::Description => text(&record.description),
        Column::Detail => text(&record.detail),
        Column::Category => text(&record.category),
        Column::Links => match &record.link_url {
            Some(url) => CellValue::Link {
                text: fit_cell_text(&record.link_label),
                url: url.clone(),
            },
            None => text(&record.link_label),
        },
        Column::FileName => text(&record.file_name),
        Column::UpdatedAt => match &record.updated {
            UpdatedAt::Timestamp(value) => CellValue::Timestamp(*value),
            UpdatedAt::Text(raw) => text(raw),
            UpdatedAt::Empty => CellValue::Text(String::new()),
        },
    }
}

fn text(value: &str) -> CellValue {
    CellValue::Text(fit_cell_text(value))
}

fn text_cell(row: RowNum, col: ColNum, value: &str, style: CellStyle) -> PlannedCell {
    PlannedCell {
        row,
        col,
        value: text(value),
        style,
    }
}

/// Truncates text to what a single cell can hold.
pub fn fit_cell_text(value: &str) -> String {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                original_chars = value.chars().count(),
                kept_chars = MAX_CELL_CHARS,
                "cell text truncated"
            );
            value[..cut].to_string()
        }
        None => value.to_string(),
    }
}

fn to_row(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| ReportError::InvalidLayout(format!("row {index} is out of range")))
}

fn to_col(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| ReportError::InvalidLayout(format!("column {index} is out of range")))
}
