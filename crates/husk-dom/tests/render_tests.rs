//! Integration tests for the normalizing serializer.

use husk_dom::{Attribute, AttributeFilter, Element, RenderOptions, render};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const TAGS: &[&str] = &["div", "p", "span", "li", "section", "article"];
const WORDS: &[&str] = &["alpha", "beta", "gamma", "delta", "Hello world", "x"];

/// Random tree with bounded depth and fan-out.
#[derive(Debug, Clone)]
struct Tree(Element);

impl Arbitrary for Tree {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_element(g, 4))
    }
}

fn arbitrary_element(g: &mut Gen, depth: usize) -> Element {
    let tag = g.choose(TAGS).copied().unwrap_or("div");
    let mut element = Element::new(tag, arbitrary_attributes(g));
    let fan_out = if depth == 0 { 0 } else { usize::from(u8::arbitrary(g) % 4) };
    for _ in 0..fan_out {
        element.append_child(arbitrary_element(g, depth - 1));
    }
    if bool::arbitrary(g) {
        element.text = g.choose(WORDS).copied().unwrap_or("x").to_string();
    }
    element
}

fn arbitrary_attributes(g: &mut Gen) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    if bool::arbitrary(g) {
        attributes.push(Attribute::new("class", "denied-value"));
    }
    if bool::arbitrary(g) {
        attributes.push(Attribute::new("lang", "en"));
    }
    if bool::arbitrary(g) {
        attributes.push(Attribute::bare("hidden"));
    }
    attributes
}

fn wrap(mut element: Element, times: usize) -> Element {
    for i in 0..times {
        let mut wrapper = Element::new("div", vec![Attribute::new("class", "wrapper")]);
        if i % 2 == 0 {
            wrapper.text = String::from("ignored wrapper text");
        }
        wrapper.append_child(element);
        element = wrapper;
    }
    element
}

fn default_render(element: &Element) -> String {
    render(element, &RenderOptions::default())
}

#[quickcheck]
fn prop_collapse_is_idempotent(tree: Tree, wrappers: u8) -> bool {
    let wrapped = wrap(tree.0.clone(), usize::from(wrappers % 8));
    default_render(&wrapped) == default_render(&tree.0)
}

#[quickcheck]
fn prop_leaf_texts_appear_in_order(tree: Tree) -> bool {
    let rendered = default_render(&tree.0);
    let mut cursor = 0;
    for text in tree.0.leaf_texts() {
        match rendered[cursor..].find(text) {
            Some(offset) => cursor += offset + text.len(),
            None => return false,
        }
    }
    true
}

#[quickcheck]
fn prop_denied_attributes_never_rendered(tree: Tree) -> bool {
    !default_render(&tree.0).contains("denied-value")
}

#[quickcheck]
fn prop_allowed_attributes_survive_on_rendered_leaves(tree: Tree) -> bool {
    let rendered = default_render(&tree.0);
    tree.0
        .descendants()
        .filter(|element| element.is_leaf() && !element.text.is_empty())
        .filter(|element| element.attribute("lang").is_some())
        .all(|_| rendered.contains("lang=\"en\""))
}

#[test]
fn test_empty_document_renders_empty_string() {
    assert_eq!(default_render(&Element::document()), "");
}

#[test]
fn test_document_with_only_empty_leaves_renders_empty_string() {
    let mut document = Element::document();
    document.append_child(Element::new("img", vec![Attribute::new("src", "a.png")]));
    assert_eq!(default_render(&document), "");
}

#[test]
fn test_document_with_two_children_keeps_root_wrapper() {
    let mut document = Element::document();
    document.append_child(Element::with_text("h1", "Title"));
    document.append_child(Element::with_text("p", "Body"));
    assert_eq!(
        default_render(&document),
        "<document>\n\t<h1>\n\t\tTitle\n\t</h1>\n\t<p>\n\t\tBody\n\t</p>\n</document>"
    );
}

#[test]
fn test_nested_containers_indent_cumulatively() {
    let mut inner = Element::new("ul", Vec::new());
    inner.append_child(Element::with_text("li", "a"));
    inner.append_child(Element::with_text("li", "b"));
    let mut outer = Element::new("nav", vec![Attribute::new("aria-label", "main")]);
    outer.append_child(Element::with_text("h2", "Menu"));
    outer.append_child(inner);

    assert_eq!(
        default_render(&outer),
        "<nav>\n\t<h2>\n\t\tMenu\n\t</h2>\n\t<ul>\n\t\t<li>\n\t\t\ta\n\t\t</li>\n\t\t<li>\n\t\t\tb\n\t\t</li>\n\t</ul>\n</nav>"
    );
}

#[test]
fn test_duplicate_attributes_are_rendered_in_order() {
    let mut leaf = Element::new(
        "p",
        vec![Attribute::new("title", "one"), Attribute::new("title", "two")],
    );
    leaf.text = String::from("x");
    assert_eq!(
        default_render(&leaf),
        "<p title=\"one\" title=\"two\">\n\tx\n</p>"
    );
}

#[test]
fn test_allow_all_filter_keeps_everything() {
    let mut leaf = Element::new("a", vec![Attribute::new("href", "/home")]);
    leaf.text = String::from("x");
    let options = RenderOptions::default().with_filter(AttributeFilter::allow_all());
    assert_eq!(render(&leaf, &options), "<a href=\"/home\">\n\tx\n</a>");
}

#[test]
fn test_prefix_filter() {
    let mut leaf = Element::new(
        "div",
        vec![
            Attribute::new("data-track", "1"),
            Attribute::new("aria-live", "polite"),
            Attribute::new("lang", "fr"),
        ],
    );
    leaf.text = String::from("x");
    let filter = AttributeFilter::from_patterns(["data-*", "aria-*"]).unwrap();
    let options = RenderOptions::default().with_filter(filter);
    assert_eq!(render(&leaf, &options), "<div lang=\"fr\">\n\tx\n</div>");
}

#[test]
fn test_deep_chain_renders_and_drops() {
    let mut element = Element::with_text("p", "deep");
    for _ in 0..200_000 {
        let mut wrapper = Element::new("div", Vec::new());
        wrapper.append_child(element);
        element = wrapper;
    }
    assert_eq!(element.descendants().count(), 200_001);
    assert_eq!(default_render(&element), "<p>\n\tdeep\n</p>");
    drop(element);
}

#[test]
fn test_descendants_preorder() {
    let mut root = Element::document();
    let mut a = Element::new("a", Vec::new());
    a.append_child(Element::new("b", Vec::new()));
    root.append_child(a);
    root.append_child(Element::new("c", Vec::new()));

    let order: Vec<&str> = root.descendants().map(|e| e.tag_name.as_str()).collect();
    assert_eq!(order, ["document", "a", "b", "c"]);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_keeps_bare_and_empty_values_apart() {
    let element = Element::new(
        "input",
        vec![Attribute::bare("disabled"), Attribute::new("value", "")],
    );
    let json = serde_json::to_value(&element).unwrap();
    assert_eq!(json["attributes"][0]["value"], serde_json::Value::Null);
    assert_eq!(json["attributes"][1]["value"], "");

    let back: Element = serde_json::from_value(json).unwrap();
    assert_eq!(back, element);
}
