use std::fs;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};
use mods_report::io::instance::load_instance;
use mods_report::model::{CategorySet, InstanceDescriptor, ModEntry, UpdatedAt};
use mods_report::rows::{
    NO_MODRINTH_LABEL, UNTRUSTED_DESCRIPTION, build_rows_in, display_name, parse_updated_in,
};
use mods_report::{ReportError, rows};
use serde_json::json;
use tempfile::tempdir;

fn descriptor(value: serde_json::Value) -> InstanceDescriptor {
    serde_json::from_value(value).expect("descriptor parsed")
}

fn entry(value: serde_json::Value) -> ModEntry {
    serde_json::from_value(value).expect("mod entry parsed")
}

fn at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(h, m, s))
        .expect("valid date-time")
}

#[test]
fn enriched_mod_uses_catalog_metadata() {
    let instance = descriptor(json!({
        "launcher": {
            "version": "1.2",
            "mods": [{
                "name": "Example (launcher)",
                "file": "examplemod-1.0.jar",
                "modrinthProject": {
                    "id": "AbCd1234",
                    "slug": "examplemod",
                    "title": "Example Mod",
                    "description": "Adds examples.",
                    "body": "# Example\nLong text.",
                    "categories": ["utility", "library"],
                    "updated": "2024-03-01T10:00:00Z"
                }
            }]
        }
    }));

    let (rows, categories) = build_rows_in(instance.mods(), &Utc);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.mod_name, "Example Mod");
    assert_eq!(row.description, "Adds examples.");
    assert_eq!(row.detail, "# Example\nLong text.");
    assert_eq!(row.category, "utility;library");
    assert_eq!(row.link_label, "Modrinth");
    assert_eq!(
        row.link_url.as_deref(),
        Some("https://modrinth.com/mod/examplemod")
    );
    assert_eq!(row.file_name, "examplemod-1.0.jar");
    assert_eq!(row.updated, UpdatedAt::Timestamp(at(2024, 3, 1, 10, 0, 0)));
    assert_eq!(categories.sorted(), vec!["library", "utility"]);
}

#[test]
fn unenriched_mod_gets_fallback_text() {
    let mods = vec![
        entry(json!({"name": "Mystery", "file": "mystery.jar"})),
        entry(json!({"name": "Nulled", "file": "nulled.jar", "modrinthProject": null})),
        entry(json!({"name": "Emptied", "file": "emptied.jar", "modrinthProject": {}})),
    ];

    let (rows, categories) = build_rows_in(&mods, &Utc);

    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.description, UNTRUSTED_DESCRIPTION);
        assert_eq!(row.detail, "");
        assert_eq!(row.category, "");
        assert_eq!(row.link_label, NO_MODRINTH_LABEL);
        assert_eq!(row.link_url, None);
        assert_eq!(row.updated, UpdatedAt::Empty);
    }
    assert_eq!(rows[2].mod_name, "Emptied");
    assert!(categories.is_empty());
}

#[test]
fn rows_preserve_input_order() {
    let mods: Vec<ModEntry> = ["zeta", "alpha", "mid", "alpha"]
        .iter()
        .map(|name| entry(json!({"name": name, "file": format!("{name}.jar")})))
        .collect();

    let (rows, _) = build_rows_in(&mods, &Utc);

    let names: Vec<&str> = rows.iter().map(|row| row.mod_name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid", "alpha"]);
}

#[test]
fn display_name_follows_fallback_chain() {
    let titled = entry(json!({
        "name": "launcher name",
        "file": "file.jar",
        "modrinthProject": {"title": "Catalog Title"}
    }));
    let untitled = entry(json!({
        "name": "launcher name",
        "file": "file.jar",
        "modrinthProject": {"title": "", "slug": "x"}
    }));
    let file_only = entry(json!({"name": "", "file": "file.jar"}));
    let nothing = entry(json!({"modrinthProject": {"slug": "x"}}));

    assert_eq!(display_name(&titled), "Catalog Title");
    assert_eq!(display_name(&untitled), "launcher name");
    assert_eq!(display_name(&file_only), "file.jar");
    assert_eq!(display_name(&nothing), "");
}

#[test]
fn link_prefers_slug_then_id() {
    let mods = vec![
        entry(json!({"modrinthProject": {"slug": "sodium", "id": "AANobbMI"}})),
        entry(json!({"modrinthProject": {"slug": "", "id": "AANobbMI"}})),
        entry(json!({"modrinthProject": {"title": "No link"}})),
    ];

    let (rows, _) = build_rows_in(&mods, &Utc);

    assert_eq!(
        rows[0].link_url.as_deref(),
        Some("https://modrinth.com/mod/sodium")
    );
    assert_eq!(
        rows[1].link_url.as_deref(),
        Some("https://modrinth.com/mod/AANobbMI")
    );
    assert_eq!(rows[2].link_url, None);
    assert_eq!(rows[2].link_label, "");
}

#[test]
fn categories_are_deduplicated_across_mods() {
    let mods = vec![
        entry(json!({"modrinthProject": {"slug": "a", "categories": ["Utility", null, "", "storage"]}})),
        entry(json!({"modrinthProject": {"slug": "b", "categories": ["storage", "adventure"]}})),
        entry(json!({"modrinthProject": {"slug": "c", "categories": null}})),
        entry(json!({"name": "unenriched"})),
    ];

    let (rows, categories) = build_rows_in(&mods, &Utc);

    assert_eq!(rows[0].category, "Utility;storage");
    assert_eq!(rows[1].category, "storage;adventure");
    assert_eq!(rows[2].category, "");
    assert_eq!(categories.len(), 3);
    assert_eq!(categories.sorted(), vec!["adventure", "storage", "Utility"]);
}

#[test]
fn category_listing_ignores_case_when_sorting() {
    let mut categories = CategorySet::new();
    categories.extend(["beta", "Alpha", "gamma", "Beta", "", "alpha"]);

    assert_eq!(
        categories.sorted(),
        vec!["Alpha", "alpha", "Beta", "beta", "gamma"]
    );
    assert!(!categories.contains(""));
}

#[test]
fn zulu_timestamp_is_converted_to_target_zone() {
    let plus_two = FixedOffset::east_opt(2 * 3600).expect("valid offset");

    assert_eq!(
        parse_updated_in(Some("2024-03-01T10:00:00Z"), &plus_two),
        UpdatedAt::Timestamp(at(2024, 3, 1, 12, 0, 0))
    );
    assert_eq!(
        parse_updated_in(Some("2024-03-01T10:00:00.123456+05:00"), &Utc),
        UpdatedAt::Timestamp(
            at(2024, 3, 1, 5, 0, 0) + chrono::Duration::microseconds(123_456)
        )
    );
}

#[test]
fn naive_timestamps_are_kept_as_is() {
    assert_eq!(
        parse_updated_in(Some("2023-12-31T23:59:58"), &Utc),
        UpdatedAt::Timestamp(at(2023, 12, 31, 23, 59, 58))
    );
    assert_eq!(
        parse_updated_in(Some("2023-12-31 08:15"), &Utc),
        UpdatedAt::Timestamp(at(2023, 12, 31, 8, 15, 0))
    );
    assert_eq!(
        parse_updated_in(Some("2023-12-31"), &Utc),
        UpdatedAt::Timestamp(at(2023, 12, 31, 0, 0, 0))
    );
}

#[test]
fn basic_and_reduced_precision_forms_are_accepted() {
    assert_eq!(
        parse_updated_in(Some("2024-03-01T10Z"), &Utc),
        UpdatedAt::Timestamp(at(2024, 3, 1, 10, 0, 0))
    );
    assert_eq!(
        parse_updated_in(Some("20240301T100000Z"), &Utc),
        UpdatedAt::Timestamp(at(2024, 3, 1, 10, 0, 0))
    );
    assert_eq!(
        parse_updated_in(Some("20240301T1030+0200"), &Utc),
        UpdatedAt::Timestamp(at(2024, 3, 1, 8, 30, 0))
    );
    assert_eq!(
        parse_updated_in(Some("2024-03-01T10:30:00-05"), &Utc),
        UpdatedAt::Timestamp(at(2024, 3, 1, 15, 30, 0))
    );
    assert_eq!(
        parse_updated_in(Some("20240301"), &Utc),
        UpdatedAt::Timestamp(at(2024, 3, 1, 0, 0, 0))
    );
    assert_eq!(
        parse_updated_in(Some("20240301T103Z"), &Utc),
        UpdatedAt::Text("20240301T103Z".to_string())
    );
}

#[test]
fn unparseable_timestamp_survives_verbatim() {
    assert_eq!(
        parse_updated_in(Some("not-a-date"), &Utc),
        UpdatedAt::Text("not-a-date".to_string())
    );
    assert_eq!(
        parse_updated_in(Some("2024-13-45T10:00:00Z"), &Utc),
        UpdatedAt::Text("2024-13-45T10:00:00Z".to_string())
    );
    assert_eq!(parse_updated_in(Some(""), &Utc), UpdatedAt::Empty);
    assert_eq!(parse_updated_in(None, &Utc), UpdatedAt::Empty);
}

#[test]
fn local_zone_entry_point_parses_same_instant() {
    let (local_rows, _) = rows::build_rows(&[entry(json!({
        "modrinthProject": {"slug": "a", "updated": "2024-03-01T10:00:00Z"}
    }))]);

    assert!(matches!(local_rows[0].updated, UpdatedAt::Timestamp(_)));
}

#[test]
fn loader_reports_missing_file() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("instance.json");

    let error = load_instance(&path).expect_err("missing file rejected");

    assert!(matches!(error, ReportError::MissingInput(ref missing) if missing == &path));
}

#[test]
fn loader_treats_directory_as_missing() {
    let temp_dir = tempdir().expect("temporary directory");

    let error = load_instance(temp_dir.path()).expect_err("directory rejected");

    assert!(matches!(error, ReportError::MissingInput(_)));
}

#[test]
fn loader_propagates_malformed_json() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("instance.json");
    fs::write(&path, "{\"launcher\": {\"mods\": [").expect("input written");

    let error = load_instance(&path).expect_err("malformed JSON rejected");

    assert!(matches!(error, ReportError::Parse { .. }));
}

#[test]
fn loader_defaults_missing_launcher_fields() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("instance.json");
    fs::write(&path, r#"{"uuid": "1234", "launcher": {"name": "Pack"}}"#)
        .expect("input written");

    let instance = load_instance(&path).expect("descriptor loaded");

    assert!(instance.mods().is_empty());
    assert_eq!(instance.version(), None);
}
