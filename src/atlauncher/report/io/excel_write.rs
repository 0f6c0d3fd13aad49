use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Table, TableColumn, Workbook, Worksheet};

use crate::atlauncher::report::error::Result;
use crate::atlauncher::report::layout::{CellStyle, CellValue, SheetPlan, TableRegion};

/// Writes the planned sheet to a new workbook at the given path.
pub fn write_sheet(path: &Path, plan: &SheetPlan) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    render_sheet(worksheet, plan)?;
    workbook.save(path)?;
    Ok(())
}

fn render_sheet(worksheet: &mut Worksheet, plan: &SheetPlan) -> Result<()> {
    worksheet.set_name(&plan.sheet_name)?;
    worksheet.set_freeze_panes(plan.frozen_rows, 0)?;

    let wrapped = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    let timestamp = Format::new().set_num_format(&plan.timestamp_format);

    for cell in &plan.cells {
        match (&cell.value, cell.style) {
            (CellValue::Text(text), CellStyle::Plain) => {
                worksheet.write_string(cell.row, cell.col, text)?;
            }
            (CellValue::Text(text), CellStyle::Wrapped) => {
                worksheet.write_string_with_format(cell.row, cell.col, text, &wrapped)?;
            }
            (CellValue::Link { text, url }, _) => {
                worksheet.write_url_with_text(cell.row, cell.col, url.as_str(), text.as_str())?;
            }
            (CellValue::Timestamp(value), _) => {
                worksheet.write_datetime_with_format(cell.row, cell.col, value, &timestamp)?;
            }
        }
    }

    for &(row, height) in &plan.row_heights {
        worksheet.set_row_height(row, height)?;
    }

    if let Some(region) = &plan.table {
        add_table(worksheet, region)?;
    }

    for &(col, width) in &plan.column_widths {
        worksheet.set_column_width(col, width)?;
    }

    Ok(())
}

fn add_table(worksheet: &mut Worksheet, region: &TableRegion) -> Result<()> {
    let columns: Vec<TableColumn> = region
        .headers
        .iter()
        .map(|header| TableColumn::new().set_header(header))
        .collect();

    let table = Table::new()
        .set_name(&region.name)
        .set_style(region.style.clone())
        .set_banded_rows(true)
        .set_banded_columns(false)
        .set_first_column(false)
        .set_last_column(false)
        .set_autofilter(true)
        .set_columns(&columns);

    worksheet.add_table(
        region.first_row,
        region.first_col,
        region.last_row,
        region.last_col,
        &table,
    )?;
    Ok(())
}
