pub mod timestamp;

use chrono::{Local, TimeZone};

use crate::atlauncher::report::model::{
    CategorySet, ModEntry, ModrinthProject, RowRecord, UpdatedAt, non_empty,
};

pub use timestamp::{parse_updated, parse_updated_in};

/// Description used for mods that were not installed from Modrinth.
pub const UNTRUSTED_DESCRIPTION: &str = "No Modrinth source available (untrusted source)";
/// Link label for mods with a Modrinth project page.
pub const MODRINTH_LABEL: &str = "Modrinth";
/// Link label for mods without any Modrinth metadata.
pub const NO_MODRINTH_LABEL: &str = "No Modrinth";
/// Prefix of a Modrinth project page.
pub const MODRINTH_MOD_URL: &str = "https://modrinth.com/mod/";
/// Separator used when joining category tags into one cell.
pub const CATEGORY_SEPARATOR: &str = ";";

/// Flattens the mod entries into report rows, converting timestamps to the
/// local time zone.
pub fn build_rows(mods: &[ModEntry]) -> (Vec<RowRecord>, CategorySet) {
    build_rows_in(mods, &Local)
}

/// Flattens the mod entries into report rows, one per entry and in the same
/// order, collecting every category tag seen along the way.
pub fn build_rows_in<Tz: TimeZone>(mods: &[ModEntry], zone: &Tz) -> (Vec<RowRecord>, CategorySet) {
    let mut categories = CategorySet::new();
    let rows = mods
        .iter()
        .map(|entry| {
            if let Some(project) = &entry.modrinth_project {
                categories.extend(project.tags());
            }
            build_row(entry, zone)
        })
        .collect();
    (rows, categories)
}

/// Builds the row for a single mod entry.
pub fn build_row<Tz: TimeZone>(entry: &ModEntry, zone: &Tz) -> RowRecord {
    let mod_name = display_name(entry).to_string();
    let file_name = non_empty(&entry.file).unwrap_or_default().to_string();

    match &entry.modrinth_project {
        Some(project) => {
            let link_url = modrinth_link(project);
            let link_label = if link_url.is_some() { MODRINTH_LABEL } else { "" };
            RowRecord {
                mod_name,
                description: project.description.clone().unwrap_or_default(),
                detail: project.body.clone().unwrap_or_default(),
                category: project.tags().collect::<Vec<_>>().join(CATEGORY_SEPARATOR),
                link_label: link_label.to_string(),
                link_url,
                file_name,
                updated: parse_updated_in(project.updated.as_deref(), zone),
            }
        }
        None => RowRecord {
            mod_name,
            description: UNTRUSTED_DESCRIPTION.to_string(),
            detail: String::new(),
            category: String::new(),
            link_label: NO_MODRINTH_LABEL.to_string(),
            link_url: None,
            file_name,
            updated: UpdatedAt::Empty,
        },
    }
}

/// Resolves the name shown for a mod: the Modrinth title when enriched, then
/// the launcher's name, then the jar file name.
pub fn display_name(entry: &ModEntry) -> &str {
    entry
        .modrinth_project
        .as_ref()
        .and_then(|project| non_empty(&project.title))
        .or_else(|| non_empty(&entry.name))
        .or_else(|| non_empty(&entry.file))
        .unwrap_or_default()
}

/// Project page URL, preferring the slug over the opaque id.
pub fn modrinth_link(project: &ModrinthProject) -> Option<String> {
    non_empty(&project.slug)
        .or_else(|| non_empty(&project.id))
        .map(|slug| format!("{MODRINTH_MOD_URL}{slug}"))
}
