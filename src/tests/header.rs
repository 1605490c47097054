use super::{is_label_heading, parse_header, parse_tag_list, render_header, Labels};
use crate::error::Error;
use rstest::rstest;

#[rstest]
#[case("[]", vec![])]
#[case("[basics]", vec!["basics"])]
#[case("[\"basics\", 'flow control']", vec!["basics", "flow control"])]
#[case("[ a , b ,c ]", vec!["a", "b", "c"])]
#[case("[a, b,]", vec!["a", "b"])]
#[case("[a,,b]", vec!["a", "b"])]
#[case("[\"\", x]", vec!["x"])]
#[case("  [\"a,b\"]  ", vec!["a,b"])]
fn test_parse_tag_list(#[case] input: &str, #[case] expected: Vec<&str>) {
    assert_eq!(parse_tag_list(input).unwrap(), expected, "input: {input:?}");
}

#[rstest]
#[case("basics")]
#[case("[[nested]]")]
#[case("[a]]")]
#[case("[\"unterminated]")]
#[case("[a")]
fn test_parse_tag_list_rejects(#[case] input: &str) {
    assert!(
        matches!(parse_tag_list(input), Err(Error::MalformedTags { .. })),
        "input: {input:?}"
    );
}

#[test]
fn test_label_heading() {
    assert!(is_label_heading("## Title", "Title"));
    assert!(is_label_heading("  ##   Title  ", "Title"));
    assert!(!is_label_heading("### Title", "Title"));
    assert!(!is_label_heading("## Titles", "Title"));
    assert!(!is_label_heading("title: Title", "Title"));
}

#[test]
fn test_parse_header() {
    let labels = Labels::default();
    let content = "## Title\ntitle:  Hello World \n## Tags\ntags: [\"basics\", intro]\n\nBody";

    let header = parse_header(content, &labels);

    assert_eq!(header.title.as_deref(), Some("Hello World"));
    assert_eq!(header.tags.as_deref(), Some("[\"basics\", intro]"));
}

#[test]
fn test_parse_header_allows_blank_line_after_label() {
    let labels = Labels::default();
    let header = parse_header("## Title\n\ntitle: Spaced\n", &labels);
    assert_eq!(header.title.as_deref(), Some("Spaced"));
    assert_eq!(header.tags, None);
}

#[test]
fn test_parse_header_without_title_line() {
    let labels = Labels::default();
    let header = parse_header("## Tags\ntags: []\n", &labels);
    assert_eq!(header.title, None);

    let empty = parse_header("## Title\ntitle:   \n", &labels);
    assert_eq!(empty.title, None);
}

#[test]
fn test_parse_header_with_custom_labels() {
    let labels = Labels {
        title: "タイトル".to_string(),
        tags: "タグ".to_string(),
        description: "解説".to_string(),
        code: "コード".to_string(),
    };
    let header = parse_header("## タイトル\ntitle: 変数\n## タグ\ntags: [basics]\n", &labels);
    assert_eq!(header.title.as_deref(), Some("変数"));
    assert_eq!(header.tags.as_deref(), Some("[basics]"));
}

#[test]
fn test_rendered_header_parses_back() {
    let labels = Labels::default();
    let tags = vec!["basics".to_string(), "say \"hi\"".to_string()];

    let rendered = render_header("Hello World", &tags, &labels);
    assert_eq!(
        rendered,
        "## Title\ntitle: Hello World\n## Tags\ntags: [\"basics\", 'say \"hi\"']\n"
    );

    let header = parse_header(&rendered, &labels);
    assert_eq!(header.title.as_deref(), Some("Hello World"));
    assert_eq!(parse_tag_list(header.tags.as_deref().unwrap()).unwrap(), tags);
}

#[test]
fn test_render_drops_tags_with_both_quotes() {
    let labels = Labels::default();
    let tags = vec![
        "plain".to_string(),
        "it's \"quoted\"".to_string(),
        "say \"hi\"".to_string(),
    ];

    let rendered = render_header("T", &tags, &labels);
    let header = parse_header(&rendered, &labels);

    assert_eq!(
        parse_tag_list(&header.tags.unwrap()).unwrap(),
        vec!["plain", "say \"hi\""]
    );
}
