use super::{
    build_manifest, bundle, fetch_path, write_site, ManifestStyle, SectionPayload, SiteLayout,
};
use crate::comments::CommentSyntax;
use crate::error::Error;
use crate::formats::json::read_manifest;
use crate::retry::RetryPolicy;
use crate::section::{CodeExample, Section};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn quick() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::ZERO,
    }
}

fn layout(root: &Path, style: ManifestStyle) -> SiteLayout {
    SiteLayout {
        output_dir: root.to_path_buf(),
        manifest_file: "sections-manifest.json".to_string(),
        fetch_prefix: "/data".to_string(),
        style,
    }
}

fn payload(id: &str, prefix: &str, title: &str, examples: usize) -> SectionPayload {
    SectionPayload {
        id: id.to_string(),
        order_prefix: prefix.to_string(),
        section: Section {
            title: title.to_string(),
            code_examples: (0..examples)
                .map(|i| CodeExample::new(format!("Example {i}"), format!("x := {i}")))
                .collect(),
        },
    }
}

#[test]
fn test_fetch_path() {
    assert_eq!(fetch_path("/data", "basics"), "/data/sections/basics.json");
    assert_eq!(fetch_path("/data/", "basics"), "/data/sections/basics.json");
}

#[test]
fn test_rich_manifest_rows() {
    let sections = vec![payload("basics", "000", "Basics", 1)];

    let manifest = build_manifest(&sections, ManifestStyle::Rich, "/data");

    assert_eq!(manifest[0].order_prefix.as_deref(), Some("000"));
    assert_eq!(
        manifest[0].file_path.as_deref(),
        Some("/data/sections/basics.json")
    );
}

#[test]
fn test_manifest_ids_are_unique() {
    let sections = vec![
        payload("basics", "000", "Basics", 1),
        payload("basics", "010", "Basics again", 1),
    ];

    let manifest = build_manifest(&sections, ManifestStyle::Compact, "/data");

    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest[0].title, "Basics");
}

#[test]
fn test_write_site_in_declared_order() {
    let out = TempDir::new().unwrap();
    let sections = vec![
        payload("basics", "000", "Basics", 2),
        payload("functions", "010", "Functions", 1),
    ];
    let layout = layout(out.path(), ManifestStyle::Compact);

    let report = write_site(&sections, &layout, &quick()).unwrap();

    assert!(report.is_success());
    let manifest_text = fs::read_to_string(layout.manifest_path()).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest_text).unwrap();
    assert_eq!(
        manifest,
        serde_json::json!([
            { "id": "basics", "title": "Basics" },
            { "id": "functions", "title": "Functions" }
        ])
    );

    let basics: Section =
        serde_json::from_str(&fs::read_to_string(layout.section_path("basics")).unwrap()).unwrap();
    assert_eq!(basics.code_examples.len(), 2);
}

#[test]
fn test_write_site_fatal_when_output_cannot_be_created() {
    let out = TempDir::new().unwrap();
    let blocker = out.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();
    let layout = layout(&blocker.join("public"), ManifestStyle::Compact);

    let result = write_site(&[], &layout, &quick());

    assert!(matches!(result, Err(Error::FatalDir { .. })));
}

#[test]
fn test_bundle_normalizes_and_skips_bad_sources() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(
        src.path().join("basics.json"),
        r#"{"title":"Basics","codeExamples":[
            {"title":"Hello","code":"fmt.Println(1)"},
            {"title":"Hello notes","code":"// prints one"},
            {"title":"Vars","code":"var x int"}
        ]}"#,
    )
    .unwrap();
    fs::write(src.path().join("empty.json"), "  \n").unwrap();
    fs::write(src.path().join("broken.json"), r#"{"title":"No examples"}"#).unwrap();
    fs::write(
        src.path().join("functions.json"),
        r#"{"title":"Functions","codeExamples":[{"title":"Add","code":"func add() {}"}]}"#,
    )
    .unwrap();

    let order: Vec<String> = ["basics", "missing", "empty", "broken", "functions", "basics"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let layout = layout(out.path(), ManifestStyle::Compact);

    let report = bundle(
        src.path(),
        &order,
        &layout,
        &CommentSyntax::default(),
        &quick(),
    )
    .unwrap();

    assert!(report.is_success());
    assert_eq!(report.skipped.len(), 3);

    let manifest = read_manifest(&layout.manifest_path()).unwrap();
    let ids: Vec<&str> = manifest.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["basics", "functions"]);
    assert!(manifest.iter().all(|entry| entry.file_path.is_none()));

    let basics: Section =
        serde_json::from_str(&fs::read_to_string(layout.section_path("basics")).unwrap()).unwrap();
    assert_eq!(
        basics.code_examples,
        vec![
            CodeExample::new("Hello", "fmt.Println(1)").with_description("prints one"),
            CodeExample::new("Vars", "var x int"),
        ]
    );
}
