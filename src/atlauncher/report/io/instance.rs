use std::fs;
use std::path::Path;

use tracing::debug;

use crate::atlauncher::report::error::{ReportError, Result};
use crate::atlauncher::report::model::InstanceDescriptor;

/// Reads and parses an ATLauncher `instance.json`.
///
/// The path must name an existing regular file; anything else is reported as
/// [`ReportError::MissingInput`] before any read is attempted.
pub fn load_instance(path: &Path) -> Result<InstanceDescriptor> {
    if !path.is_file() {
        return Err(ReportError::MissingInput(path.to_path_buf()));
    }

    let source = fs::read_to_string(path)?;
    let descriptor: InstanceDescriptor =
        serde_json::from_str(&source).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        mod_count = descriptor.mods().len(),
        version = descriptor.version(),
        "instance descriptor loaded"
    );
    Ok(descriptor)
}
