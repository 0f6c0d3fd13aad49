use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Root of an ATLauncher `instance.json` document. Only the fields the report
/// needs are modelled; everything else in the file is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceDescriptor {
    #[serde(default)]
    pub launcher: Launcher,
}

/// The `launcher` object holding the installed mods and the pack version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub mods: Vec<ModEntry>,
}

impl InstanceDescriptor {
    /// Installed mods, in the order the launcher lists them.
    pub fn mods(&self) -> &[ModEntry] {
        &self.launcher.mods
    }

    /// Pack version label, if the descriptor carries a non-empty one.
    pub fn version(&self) -> Option<&str> {
        non_empty(&self.launcher.version)
    }
}

/// One installed mod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    /// Catalog metadata attached by the launcher. `null` and `{}` both count
    /// as "no enrichment".
    #[serde(default, deserialize_with = "deserialize_project")]
    pub modrinth_project: Option<ModrinthProject>,
}

/// Modrinth catalog metadata embedded in a mod entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModrinthProject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl ModrinthProject {
    /// Non-empty category tags in their stored order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flatten()
            .filter_map(|tag| tag.as_deref())
            .filter(|tag| !tag.is_empty())
    }
}

fn deserialize_project<'de, D>(deserializer: D) -> Result<Option<ModrinthProject>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Map<String, Value>> = Option::deserialize(deserializer)?;
    match raw {
        Some(map) if !map.is_empty() => serde_json::from_value(Value::Object(map))
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Treats `None` and `Some("")` alike.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Value of the "Updated At" column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatedAt {
    /// A successfully parsed timestamp, already shifted to local time.
    Timestamp(NaiveDateTime),
    /// The raw catalog value, kept verbatim because it could not be parsed.
    Text(String),
    /// The catalog carried no timestamp.
    Empty,
}

/// A mod flattened into the values of one report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    pub mod_name: String,
    pub description: String,
    pub detail: String,
    pub category: String,
    pub link_label: String,
    pub link_url: Option<String>,
    pub file_name: String,
    pub updated: UpdatedAt,
}

/// Distinct category tags seen across all mods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    tags: BTreeSet<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag; empty tags are ignored.
    pub fn insert(&mut self, tag: &str) {
        if !tag.is_empty() && !self.tags.contains(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags ordered case-insensitively. Tags differing only in case keep
    /// their byte order so the listing is deterministic.
    pub fn sorted(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_by_cached_key(|tag| tag.to_lowercase());
        tags
    }
}

impl<'a> Extend<&'a str> for CategorySet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}
