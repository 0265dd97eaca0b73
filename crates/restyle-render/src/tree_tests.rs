use super::*;

fn element(tree: &mut RenderTree, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let mut data = ElementData::new(tag);
    for (name, value) in attrs {
        data.set_attr(name, *value);
    }
    tree.create_element(data)
}

/// `<div><p id=a>one</p><p id=b>two</p></div>`
fn sample() -> (RenderTree, NodeId, NodeId, NodeId) {
    let mut tree = RenderTree::new();
    let root = element(&mut tree, "div", &[]);
    let a = element(&mut tree, "p", &[("id", "a")]);
    let b = element(&mut tree, "p", &[("id", "b")]);
    let one = tree.create_text("one");
    let two = tree.create_text("two");
    tree.append(a, one);
    tree.append(b, two);
    tree.append(root, a);
    tree.append(root, b);
    (tree, root, a, b)
}

#[test]
fn test_outer_html() {
    let (tree, root, _, _) = sample();
    assert_eq!(
        tree.outer_html(root),
        "<div><p id=\"a\">one</p><p id=\"b\">two</p></div>"
    );
}

#[test]
fn test_insert_before_and_after() {
    let (mut tree, root, a, b) = sample();
    let c = element(&mut tree, "hr", &[]);
    assert!(tree.insert_after(b, c));
    let d = element(&mut tree, "br", &[]);
    assert!(tree.insert_before(a, d));
    assert_eq!(
        tree.inner_html(root),
        "<br><p id=\"a\">one</p><p id=\"b\">two</p><hr>"
    );
}

#[test]
fn test_insert_next_to_detached_fails() {
    let (mut tree, root, _, _) = sample();
    let c = element(&mut tree, "hr", &[]);
    assert!(!tree.insert_after(root, c));
}

#[test]
fn test_append_moves_node() {
    let (mut tree, root, a, b) = sample();
    tree.append(b, a);
    assert_eq!(tree.children(root), &[b]);
    assert_eq!(tree.parent(a), Some(b));
}

#[test]
fn test_deep_clone_is_detached_copy() {
    let (mut tree, root, a, _) = sample();
    let copy = tree.deep_clone(a);
    assert_eq!(tree.parent(copy), None);
    assert_eq!(tree.outer_html(copy), tree.outer_html(a));
    assert_ne!(copy, a);
    assert_eq!(tree.children(root).len(), 2);
}

#[test]
fn test_detach_and_ancestry() {
    let (mut tree, root, a, _) = sample();
    let text = tree.children(a)[0];
    assert!(tree.is_inclusive_descendant(text, root));
    tree.detach(a);
    assert!(!tree.is_inclusive_descendant(text, root));
    assert!(tree.is_inclusive_descendant(text, a));
}

#[test]
fn test_descendants_document_order() {
    let (tree, root, a, b) = sample();
    let descendants = tree.descendants(root);
    assert_eq!(descendants.len(), 4);
    assert_eq!(descendants[0], a);
    assert_eq!(descendants[2], b);
}

#[test]
fn test_text_content_and_set_text() {
    let (mut tree, root, a, _) = sample();
    assert_eq!(tree.text_content(root), "onetwo");
    tree.set_text(a, "<new>");
    assert_eq!(tree.outer_html(a), "<p id=\"a\">&lt;new&gt;</p>");
    assert_eq!(tree.text_content(a), "<new>");
}

#[test]
fn test_escaping_and_raw_text() {
    let mut tree = RenderTree::new();
    let div = element(&mut tree, "div", &[("title", "a\"b")]);
    let style = element(&mut tree, "style", &[]);
    let css = tree.create_text("a > b { }");
    tree.append(style, css);
    tree.append(div, style);
    assert_eq!(
        tree.outer_html(div),
        "<div title=\"a&quot;b\"><style>a > b { }</style></div>"
    );
}

#[test]
fn test_class_helpers() {
    let mut data = ElementData::new("DIV");
    assert_eq!(data.tag, "div");
    data.add_class("a");
    data.add_class("b");
    data.add_class("a");
    assert_eq!(data.attr("class"), Some("a b"));
    data.remove_class("a");
    assert_eq!(data.attr("class"), Some("b"));
    data.remove_class("b");
    assert_eq!(data.attr("class"), None);
}

#[test]
fn test_element_siblings() {
    let (tree, _, a, b) = sample();
    assert_eq!(tree.element_siblings(b), vec![a, b]);
    assert_eq!(tree.parent_element(a).map(|p| tree.tag(p)), Some(Some("div")));
}

#[test]
fn test_contains_rejects_foreign_ids() {
    let (tree, root, _, b) = sample();
    let (other, other_root, _, _) = sample();
    assert!(tree.contains(root));
    assert!(tree.contains(b));
    assert!(!tree.contains(other_root));
    assert!(other.contains(other_root));

    let small = RenderTree::new();
    assert!(!small.contains(b));
}
