use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::atlauncher::report::error::Result;
use crate::atlauncher::report::io::{excel_write, instance};
use crate::atlauncher::report::layout::{ReportLayout, plan_sheet};
use crate::atlauncher::report::rows::build_rows;

/// Version label used in the file name when the descriptor has none.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Outcome of a successful report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Absolute path of the written workbook.
    pub output: PathBuf,
    pub row_count: usize,
    pub category_count: usize,
}

/// Path of the report written next to the given `instance.json`.
pub fn output_path_for(instance_path: &Path, version: Option<&str>) -> PathBuf {
    let version = version.filter(|v| !v.is_empty()).unwrap_or(UNKNOWN_VERSION);
    let directory = instance_path.parent().unwrap_or_else(|| Path::new("."));
    directory.join(format!("Mods {version}.xlsx"))
}

/// Resolves the input against the working directory. An empty argument names
/// the working directory itself, which the loader then reports as missing.
fn absolute_input(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(std::env::current_dir()?);
    }
    Ok(std::path::absolute(path)?)
}

/// Generates the mods report for an instance using the default layout.
pub fn generate_report(instance_path: &Path) -> Result<ReportSummary> {
    generate_report_with_layout(instance_path, &ReportLayout::default())
}

/// Loads the instance descriptor, flattens its mods and writes the workbook
/// next to it.
#[instrument(level = "info", skip_all, fields(input = %instance_path.display()))]
pub fn generate_report_with_layout(
    instance_path: &Path,
    layout: &ReportLayout,
) -> Result<ReportSummary> {
    let instance_path = absolute_input(instance_path)?;
    let descriptor = instance::load_instance(&instance_path)?;

    let (rows, categories) = build_rows(descriptor.mods());
    info!(
        row_count = rows.len(),
        category_count = categories.len(),
        "mod rows built"
    );

    let plan = plan_sheet(&rows, &categories, layout)?;
    debug!(
        cell_count = plan.cells.len(),
        has_table = plan.table.is_some(),
        "sheet planned"
    );

    let output = output_path_for(&instance_path, descriptor.version());
    excel_write::write_sheet(&output, &plan)?;
    info!(output = %output.display(), "report written");

    Ok(ReportSummary {
        output,
        row_count: rows.len(),
        category_count: categories.len(),
    })
}
