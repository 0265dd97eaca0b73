//! Build a render tree from normalized body markup.
//!
//! While copying nodes out of the parsed fragment:
//! - `<script>` elements are dropped.
//! - `on*` handler attributes and `javascript:` URLs are stripped.
//! - Relative `<img src>` values are resolved against the page origin.
//! - Links open in a new browsing context without an opener.

use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::tree::{ElementData, NodeId, RenderTree};

const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

/// Parse `body_html` into a new tree under a `div` carrying
/// `container_class`. Returns the tree and the container.
pub fn build_tree(body_html: &str, base_url: &str, container_class: &str) -> (RenderTree, NodeId) {
    let fragment = Html::parse_fragment(body_html);
    let mut tree = RenderTree::new();

    let mut container = ElementData::new("div");
    container.set_attr("class", container_class);
    let root = tree.create_element(container);

    let mut stripped = 0usize;
    append_children(&mut tree, root, fragment.root_element(), base_url, &mut stripped);
    if stripped > 0 {
        debug!(stripped, "Removed active attributes while building render tree");
    }

    (tree, root)
}

fn append_children(
    tree: &mut RenderTree,
    parent: NodeId,
    source: ElementRef<'_>,
    base_url: &str,
    stripped: &mut usize,
) {
    for child in source.children() {
        match child.value() {
            Node::Text(text) => {
                let content: &str = &text.text;
                let node = tree.create_text(content);
                tree.append(parent, node);
            }
            Node::Comment(comment) => {
                let content: &str = &comment.comment;
                let node = tree.create_comment(content);
                tree.append(parent, node);
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    append_element(tree, parent, element, base_url, stripped);
                }
            }
            _ => {}
        }
    }
}

fn append_element(
    tree: &mut RenderTree,
    parent: NodeId,
    source: ElementRef<'_>,
    base_url: &str,
    stripped: &mut usize,
) {
    let tag = source.value().name().to_ascii_lowercase();
    if tag == "script" {
        *stripped += 1;
        return;
    }

    let mut data = ElementData::new(tag.as_str());
    for (name, value) in source.value().attrs() {
        let name = name.to_ascii_lowercase();
        if name.starts_with("on")
            || (URL_ATTRIBUTES.contains(&name.as_str()) && is_javascript_url(value))
        {
            *stripped += 1;
            continue;
        }
        data.attrs.push((name, value.to_string()));
    }

    match tag.as_str() {
        "img" => {
            let resolved = data
                .attr("src")
                .and_then(|src| resolve_image_src(src, base_url));
            if let Some(src) = resolved {
                data.set_attr("src", src);
            }
        }
        "a" => {
            data.set_attr("target", "_blank");
            data.set_attr("rel", "noopener noreferrer");
        }
        _ => {}
    }

    let node = tree.create_element(data);
    tree.append(parent, node);
    append_children(tree, node, source, base_url, stripped);
}

fn is_javascript_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(11)
        .collect();
    compact.eq_ignore_ascii_case("javascript:")
}

/// Absolute form of a relative image source, or `None` when it needs none.
fn resolve_image_src(src: &str, base_url: &str) -> Option<String> {
    let src = src.trim();
    let lower = src.to_ascii_lowercase();
    if src.is_empty()
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("data:")
        || src.starts_with("//")
    {
        return None;
    }
    if src.starts_with('/') {
        Some(format!("{}{}", base_url, src))
    } else {
        Some(format!("{}/{}", base_url, src))
    }
}
