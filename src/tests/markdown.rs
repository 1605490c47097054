use super::{extract_fences, MarkdownFormat};

#[test]
fn test_fences_carry_their_section_heading() {
    let source = "## Title\ntitle: Hello\n\n## Description\n\n```text\nSays hello.\n```\n\n## Code\n\n```go\nfmt.Println(\"hello\")\n```\n";

    let fences = extract_fences(source, &MarkdownFormat).unwrap();

    assert_eq!(fences.len(), 2);
    assert_eq!(fences[0].heading.as_deref(), Some("Description"));
    assert_eq!(fences[0].language.as_deref(), Some("text"));
    assert_eq!(fences[0].content.trim(), "Says hello.");
    assert_eq!(fences[1].heading.as_deref(), Some("Code"));
    assert_eq!(fences[1].language.as_deref(), Some("go"));
    assert_eq!(fences[1].content.trim(), "fmt.Println(\"hello\")");
}

#[test]
fn test_fence_outside_any_section_has_no_heading() {
    let source = "Some prose.\n\n```go\nx := 1\n```\n";

    let fences = extract_fences(source, &MarkdownFormat).unwrap();

    assert_eq!(fences.len(), 1);
    assert_eq!(fences[0].heading, None);
    assert_eq!(fences[0].language.as_deref(), Some("go"));
}

#[test]
fn test_fence_without_info_string() {
    let source = "## Code\n\n```\nplain\n```\n";

    let fences = extract_fences(source, &MarkdownFormat).unwrap();

    assert_eq!(fences.len(), 1);
    assert_eq!(fences[0].language, None);
    assert_eq!(fences[0].content.trim(), "plain");
}

#[test]
fn test_longer_fence_keeps_inner_backticks() {
    let source = "## Code\n\n````go\ns := `raw\n```\n`\n````\n";

    let fences = extract_fences(source, &MarkdownFormat).unwrap();

    assert_eq!(fences.len(), 1);
    assert!(fences[0].content.contains("```"));
}
