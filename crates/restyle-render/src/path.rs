//! Selection paths: best-effort selectors for clicked nodes.
//!
//! A path walks from the node up to, but not including, the container. Each
//! level contributes `#id` (and the walk stops) or the tag with up to two
//! class tokens, joined with ` > `.

use restyle_config::RenderConfig;

use crate::tree::{ElementData, NodeId, RenderTree};

/// Knobs for path derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
    /// Id of the control-panel subtree. Nodes inside it get no path.
    pub reserved_root_id: String,
    /// Class tokens with this prefix are skipped.
    pub reserved_class_prefix: String,
    /// Maximum number of segments.
    pub max_depth: Option<usize>,
    /// Class tokens of this length or longer are skipped.
    pub max_class_len: Option<usize>,
}

impl PathOptions {
    /// Options for the preview renderer: every ancestor, every class length.
    pub fn preview(config: &RenderConfig) -> Self {
        Self {
            reserved_root_id: config.reserved_root_id.clone(),
            reserved_class_prefix: config.reserved_class_prefix.clone(),
            max_depth: config.max_path_depth,
            max_class_len: None,
        }
    }

    /// Options for pages edited in place: at most four segments and no
    /// class tokens of 25 characters or more.
    pub fn in_page(config: &RenderConfig) -> Self {
        Self {
            reserved_root_id: config.reserved_root_id.clone(),
            reserved_class_prefix: config.reserved_class_prefix.clone(),
            max_depth: Some(config.max_path_depth.unwrap_or(4)),
            max_class_len: Some(25),
        }
    }
}

/// Path of `node` relative to `container`.
///
/// `None` for the container itself, for nodes outside it and for nodes in
/// the reserved subtree. Deriving the path twice for the same node in the
/// same tree yields the same string.
pub fn selection_path(
    tree: &RenderTree,
    node: NodeId,
    container: NodeId,
    options: &PathOptions,
) -> Option<String> {
    if node == container
        || !tree.is_inclusive_descendant(node, container)
        || is_reserved(tree, node, &options.reserved_root_id)
    {
        return None;
    }

    let mut segments = Vec::new();
    let mut current = node;
    while current != container {
        let element = tree.element(current)?;
        if let Some(id) = element.id() {
            segments.push(format!("#{}", id));
            break;
        }
        segments.push(tag_segment(
            element,
            &options.reserved_class_prefix,
            options.max_class_len,
        ));
        if options.max_depth.is_some_and(|max| segments.len() >= max) {
            break;
        }
        current = tree.parent(current)?;
    }

    segments.reverse();
    Some(segments.join(" > "))
}

/// `#id` when the element has one, else its tag segment.
pub fn best_selector(
    element: &ElementData,
    reserved_class_prefix: &str,
    max_class_len: Option<usize>,
) -> String {
    match element.id() {
        Some(id) => format!("#{}", id),
        None => tag_segment(element, reserved_class_prefix, max_class_len),
    }
}

fn tag_segment(
    element: &ElementData,
    reserved_class_prefix: &str,
    max_class_len: Option<usize>,
) -> String {
    let classes: Vec<&str> = element
        .classes()
        .filter(|class| reserved_class_prefix.is_empty() || !class.starts_with(reserved_class_prefix))
        .filter(|class| max_class_len.is_none_or(|max| class.len() < max))
        .take(2)
        .collect();
    if classes.is_empty() {
        element.tag.clone()
    } else {
        format!("{}.{}", element.tag, classes.join("."))
    }
}

/// Whether `node` is the reserved root or lies inside it.
pub fn is_reserved(tree: &RenderTree, node: NodeId, reserved_root_id: &str) -> bool {
    if reserved_root_id.is_empty() {
        return false;
    }
    let mut current = Some(node);
    while let Some(id) = current {
        if tree
            .element(id)
            .is_some_and(|e| e.attr("id") == Some(reserved_root_id))
        {
            return true;
        }
        current = tree.parent(id);
    }
    false
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
