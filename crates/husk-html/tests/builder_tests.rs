//! Integration tests for the tree builder.

use husk_dom::{Attribute, DOCUMENT_TAG, Element};
use husk_html::{BuilderOptions, IssueKind, Token, TokenSink, TreeBuilder};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// Helper to build a tree with default options
fn build(markup: &str) -> Element {
    TreeBuilder::new().build(markup)
}

fn build_with(markup: &str, options: BuilderOptions) -> Element {
    TreeBuilder::with_options(options).build(markup)
}

/// Helper to get the first element with the given tag name (pre-order)
fn find<'a>(root: &'a Element, tag: &str) -> Option<&'a Element> {
    root.descendants().find(|element| element.tag_name == tag)
}

fn tag_names(elements: &[Element]) -> Vec<&str> {
    elements.iter().map(|element| element.tag_name.as_str()).collect()
}

#[test]
fn test_empty_input_yields_empty_root() {
    let mut builder = TreeBuilder::new();
    let root = builder.build("");
    assert_eq!(root, Element::document());
    assert_eq!(root.tag_name, DOCUMENT_TAG);
    assert!(builder.issues().is_empty());
}

#[test]
fn test_children_in_document_order() {
    let root = build("<div><h1>Title</h1><p>one</p><p>two</p></div>");
    let div = &root.children[0];
    assert_eq!(tag_names(&div.children), vec!["h1", "p", "p"]);
    assert_eq!(div.children[1].text, "one");
    assert_eq!(div.children[2].text, "two");
}

#[test]
fn test_attributes_are_preserved_in_order() {
    let root = build(r#"<p id=a hidden id="b">x</p>"#);
    assert_eq!(
        root.children[0].attributes,
        vec![
            Attribute::new("id", "a"),
            Attribute::bare("hidden"),
            Attribute::new("id", "b"),
        ]
    );
}

#[test]
fn test_script_and_style_are_never_attached() {
    let root = build("<script>alert(1)</script><style>p{}</style><p>Real text</p>");
    assert_eq!(tag_names(&root.children), vec!["p"]);
    assert_eq!(root.children[0].text, "Real text");
}

#[test]
fn test_ignored_element_swallows_nested_markup() {
    let options = BuilderOptions::default().ignore("nav");
    let root = build_with(
        "<body><nav><ul><li>Home</li></ul></nav><p>content</p></body>",
        options,
    );
    let body = &root.children[0];
    assert_eq!(tag_names(&body.children), vec!["p"]);
    assert!(find(&root, "li").is_none());
}

#[test]
fn test_ignore_set_can_be_replaced() {
    let options = BuilderOptions::default().with_ignored_tags(["Footer"]);
    let root = build_with("<script>x</script><footer>f</footer>", options);
    assert_eq!(tag_names(&root.children), vec!["script"]);
}

#[test]
fn test_text_is_trimmed_and_last_write_wins() {
    let root = build("<p>  first <!-- c --> second  </p>");
    assert_eq!(root.children[0].text, "second");

    let root = build("<p>one<b>two</b>three</p>");
    let p = &root.children[0];
    assert_eq!(p.text, "three");
    assert_eq!(p.children[0].text, "two");
}

#[test]
fn test_whitespace_only_text_keeps_earlier_text() {
    let root = build("<p>kept<br/>   </p>");
    assert_eq!(root.children[0].text, "kept");
}

#[test]
fn test_text_outside_elements_is_dropped() {
    let root = build("loose <p>kept</p> trailing");
    assert!(root.text.is_empty());
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].text, "kept");
}

#[test]
fn test_mismatched_end_tag_is_ignored() {
    let mut builder = TreeBuilder::new();
    let root = builder.build("<div><p>text</div>");

    let div = &root.children[0];
    assert_eq!(div.tag_name, "div");
    assert_eq!(div.children[0].tag_name, "p");
    assert_eq!(div.children[0].text, "text");

    let kinds: Vec<(IssueKind, &str)> = builder
        .issues()
        .iter()
        .map(|issue| (issue.kind, issue.tag_name.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (IssueKind::UnmatchedEndTag, "div"),
            (IssueKind::UnclosedElement, "p"),
            (IssueKind::UnclosedElement, "div"),
        ]
    );
    assert_eq!(builder.issues()[0].token_index, 3);
    assert_eq!(
        builder.issues()[0].to_string(),
        "unmatched-end-tag: </div> at token 3"
    );
}

#[test]
fn test_stray_end_tag_on_empty_stack() {
    let mut builder = TreeBuilder::new();
    let root = builder.build("</p><p>x</p>");
    assert_eq!(root.children.len(), 1);
    assert_eq!(builder.issues().len(), 1);
    assert_eq!(builder.issues()[0].kind, IssueKind::UnmatchedEndTag);
}

#[test]
fn test_self_closing_tag_is_closed_immediately() {
    let root = build("<div><br/>text</div>");
    let div = &root.children[0];
    assert_eq!(tag_names(&div.children), vec!["br"]);
    assert_eq!(div.text, "text");
}

#[test]
fn test_void_elements_nest_by_default() {
    let root = build("<div><img src=x>caption</div>");
    let img = &root.children[0].children[0];
    assert_eq!(img.tag_name, "img");
    assert_eq!(img.text, "caption");
}

#[test]
fn test_close_void_elements() {
    let mut builder =
        TreeBuilder::with_options(BuilderOptions::default().with_close_void_elements(true));
    let root = builder.build("<div><img src=x>caption</div>");
    let div = &root.children[0];
    assert_eq!(div.text, "caption");
    assert!(div.children[0].is_leaf());
    assert!(builder.issues().is_empty());
}

#[test]
fn test_nested_singletons_without_folding() {
    let root = build(r#"<div class="x"><div><p>Hello <b>world</b></p></div></div>"#);
    let p = find(&root, "p").expect("p element");
    assert_eq!(p.text, "Hello");
    assert_eq!(p.children, vec![Element::with_text("b", "world")]);
    assert_eq!(root.collapsed().tag_name, "b");
}

#[test]
fn test_fold_inline_joins_text() {
    let options = BuilderOptions::default().with_fold_inline(true);
    let root = build_with(
        r#"<div class="x"><div><p>Hello <b>world</b></p></div></div>"#,
        options,
    );
    let leaf = root.collapsed();
    assert_eq!(leaf.tag_name, "p");
    assert!(leaf.is_leaf());
    assert_eq!(leaf.text, "Hello world");
}

#[test]
fn test_fold_inline_keeps_blocks_inside_inline() {
    let options = BuilderOptions::default().with_fold_inline(true);
    let root = build_with(
        "<div><a href=/x><h2>Heading</h2></a><p>Body <em>text</em>.</p></div>",
        options,
    );
    let div = &root.children[0];
    assert_eq!(tag_names(&div.children), vec!["h2", "p"]);
    assert_eq!(div.children[1].text, "Body text .");
}

#[test]
fn test_fold_inline_at_top_level_attaches() {
    let options = BuilderOptions::default().with_fold_inline(true);
    let root = build_with("<b>bold</b>", options);
    assert_eq!(root.children, vec![Element::with_text("b", "bold")]);
}

#[test]
fn test_builder_is_reusable() {
    let mut builder = TreeBuilder::new();
    let first = builder.build("<div><p>unclosed");
    assert!(!builder.issues().is_empty());

    let second = builder.build("<p>fresh</p>");
    assert!(builder.issues().is_empty());
    assert_eq!(builder.open_depth(), 0);
    assert_eq!(second.children, vec![Element::with_text("p", "fresh")]);
    assert_eq!(first.children[0].tag_name, "div");
}

#[test]
fn test_driven_as_token_sink() {
    let mut builder = TreeBuilder::new();
    builder.reset();
    builder.process_token(Token::StartTag {
        name: "ul".to_string(),
        self_closing: false,
        attributes: Vec::new(),
    });
    builder.on_start_tag("li", Vec::new());
    builder.on_text(" item ");
    assert_eq!(builder.open_depth(), 2);
    builder.on_end_tag("li");
    builder.process_token(Token::EndOfFile);

    let root = builder.finish();
    assert_eq!(root.children[0].children, vec![Element::with_text("li", "item")]);
    assert_eq!(builder.issues().len(), 1);
    assert_eq!(builder.issues()[0].kind, IssueKind::UnclosedElement);
}

#[test]
fn test_character_references_reach_the_tree() {
    let root = build("<p title=&quot;q&quot;>Fish &amp; Chips</p>");
    let p = &root.children[0];
    assert_eq!(p.text, "Fish & Chips");
    assert_eq!(p.attribute("title"), Some(&Attribute::new("title", "\"q\"")));
}

// Property tests over random tag soup.

const FRAGMENTS: &[&str] = &[
    "<div>", "</div>", "<p>", "</p>", "<b>", "</b>", "<script>", "</script>", "<style>",
    "</style>", "<li>", "</li>", "<br/>", "text", "more words", " ", "&amp;", "<", ">", "<!--",
    "-->", "</span>", "<img src=x>",
];

#[derive(Debug, Clone)]
struct Soup(String);

impl Arbitrary for Soup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::from(u8::arbitrary(g) % 40);
        let markup = (0..len)
            .filter_map(|_| g.choose(FRAGMENTS).copied())
            .collect();
        Self(markup)
    }
}

#[quickcheck]
fn prop_ignored_tags_never_reach_the_tree(soup: Soup, fold_inline: bool) -> bool {
    let options = BuilderOptions::default().with_fold_inline(fold_inline);
    let root = build_with(&soup.0, options);
    root.descendants()
        .all(|element| element.tag_name != "script" && element.tag_name != "style")
}

#[quickcheck]
fn prop_build_always_closes_everything(soup: Soup) -> bool {
    let mut builder = TreeBuilder::new();
    let root = builder.build(&soup.0);
    root.tag_name == DOCUMENT_TAG && builder.open_depth() == 0
}

#[quickcheck]
fn prop_build_is_deterministic(soup: Soup) -> bool {
    let mut builder = TreeBuilder::new();
    let first = builder.build(&soup.0);
    let second = builder.build(&soup.0);
    first == second && first == build(&soup.0)
}

#[quickcheck]
fn prop_text_is_trimmed(soup: Soup) -> bool {
    build(&soup.0)
        .descendants()
        .all(|element| element.text.trim() == element.text)
}
