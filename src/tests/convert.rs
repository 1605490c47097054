use super::{group_sections, json_to_markdown, markdown_to_json, read_example};
use crate::comments::CommentSyntax;
use crate::document::DocumentStyle;
use crate::formats::json::read_manifest;
use crate::manifest::{ManifestStyle, SiteLayout};
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

fn rich_layout(root: &Path) -> SiteLayout {
    SiteLayout {
        output_dir: root.to_path_buf(),
        manifest_file: "index.json".to_string(),
        fetch_prefix: "/data".to_string(),
        style: ManifestStyle::Rich,
    }
}

fn order(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

fn write_sources(dir: &Path) {
    fs::write(
        dir.join("basics.json"),
        r#"{"title":"Basics","codeExamples":[
            {"title":"Hello World","code":"fmt.Println(\"hello\")"},
            {"title":"Hello notes","code":"// Prints a greeting."},
            {"title":"Variables","code":"var x int = 1"}
        ]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("flow-control.json"),
        r#"{"title":"Flow Control","codeExamples":[
            {"title":"For","code":"for i := 0; i < 3; i++ {\n\tfmt.Println(i)\n}"}
        ]}"#,
    )
    .unwrap();
}

#[test]
fn test_json_to_markdown_layout() {
    let json = TempDir::new().unwrap();
    let md = TempDir::new().unwrap();
    write_sources(json.path());

    let report = json_to_markdown(
        json.path(),
        md.path(),
        &order(&["basics", "missing", "flow-control"]),
        &CommentSyntax::default(),
        &DocumentStyle::default(),
        &quick(),
    )
    .unwrap();

    assert!(report.is_success());
    assert_eq!(report.skipped.len(), 1);
    assert!(md.path().join("000_basics/000_hello-world.md").is_file());
    assert!(md.path().join("000_basics/010_variables.md").is_file());
    assert!(md.path().join("010_flow-control/000_for.md").is_file());
    assert_eq!(
        fs::read_dir(md.path().join("000_basics")).unwrap().count(),
        2
    );

    let hello = fs::read_to_string(md.path().join("000_basics/000_hello-world.md")).unwrap();
    assert!(hello.starts_with("## Title\ntitle: Hello World\n## Tags\ntags: [\"basics\"]\n"));
    assert!(hello.contains("```text\nPrints a greeting.\n```"));
}

#[test]
fn test_round_trip_through_markdown() {
    let json = TempDir::new().unwrap();
    let md = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_sources(json.path());
    let style = DocumentStyle::default();

    json_to_markdown(
        json.path(),
        md.path(),
        &order(&["basics", "flow-control"]),
        &CommentSyntax::default(),
        &style,
        &quick(),
    )
    .unwrap();
    let layout = rich_layout(out.path());
    let report = markdown_to_json(md.path(), &layout, &style, &quick()).unwrap();

    assert!(report.is_success());
    let manifest = read_manifest(&layout.manifest_path()).unwrap();
    let rows: Vec<(&str, &str, Option<&str>)> = manifest
        .iter()
        .map(|e| (e.id.as_str(), e.title.as_str(), e.order_prefix.as_deref()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("basics", "Basics", Some("000")),
            ("flow-control", "Flow Control", Some("010")),
        ]
    );
    assert_eq!(
        manifest[1].file_path.as_deref(),
        Some("/data/sections/flow-control.json")
    );

    let basics: Section =
        serde_json::from_str(&fs::read_to_string(layout.section_path("basics")).unwrap()).unwrap();
    assert_eq!(
        basics.code_examples,
        vec![
            CodeExample::new("Hello World", "fmt.Println(\"hello\")")
                .with_description("Prints a greeting."),
            CodeExample::new("Variables", "var x int = 1"),
        ]
    );
}

#[test]
fn test_markdown_to_json_skips_invalid_files() {
    let md = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let chapter = md.path().join("000_basics");
    fs::create_dir_all(&chapter).unwrap();
    fs::write(
        chapter.join("000_valid.md"),
        "## Title\ntitle: Valid\n## Tags\ntags: []\n\n## Code\n\n```go\nx := 1\n```\n",
    )
    .unwrap();
    fs::write(
        chapter.join("010_untitled.md"),
        "## Tags\ntags: []\n\n## Code\n\n```go\ny := 2\n```\n",
    )
    .unwrap();
    fs::write(
        chapter.join("020_no-code.md"),
        "## Title\ntitle: Prose only\n\nJust words.\n",
    )
    .unwrap();
    fs::write(md.path().join("README.md"), "# not an example\n").unwrap();

    let layout = rich_layout(out.path());
    let report = markdown_to_json(md.path(), &layout, &DocumentStyle::default(), &quick()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.skipped.len(), 3);
    let basics: Section =
        serde_json::from_str(&fs::read_to_string(layout.section_path("basics")).unwrap()).unwrap();
    assert_eq!(basics.code_examples, vec![CodeExample::new("Valid", "x := 1")]);
}

#[test]
fn test_read_example_unions_tags() {
    let md = TempDir::new().unwrap();
    let chapter = md.path().join("020_functions");
    fs::create_dir_all(&chapter).unwrap();
    let path = chapter.join("030_closures.md");
    fs::write(
        &path,
        "## Title\ntitle: Closures\n## Tags\ntags: [\"functions\", closures]\n\n## Code\n\n```go\nf := func() {}\n```\n",
    )
    .unwrap();

    let parsed = read_example(&path, &DocumentStyle::default()).unwrap();

    assert_eq!(parsed.tags, vec!["functions", "closures"]);
    assert_eq!(parsed.chapter_prefix, "020");
    assert_eq!(parsed.example_prefix, "030");
}

#[test]
fn test_group_sections_orders_by_prefix() {
    let md = TempDir::new().unwrap();
    let style = DocumentStyle::default();
    let files = [
        ("010_functions", "000_add.md", "Add"),
        ("000_basics", "020_third.md", "Third"),
        ("000_basics", "000_first.md", "First"),
    ];
    let mut parsed = Vec::new();
    for (dir, file, title) in files {
        let chapter = md.path().join(dir);
        fs::create_dir_all(&chapter).unwrap();
        let path = chapter.join(file);
        fs::write(
            &path,
            format!("## Title\ntitle: {title}\n\n## Code\n\n```go\n_ = 0\n```\n"),
        )
        .unwrap();
        parsed.push(read_example(&path, &style).unwrap());
    }

    let sections = group_sections(parsed);

    let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["basics", "functions"]);
    let titles: Vec<&str> = sections[0]
        .section
        .code_examples
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["First", "Third"]);
}
