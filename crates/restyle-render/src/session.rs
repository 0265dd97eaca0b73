//! Render session: one loaded page, its scoped CSS and selection state.
//!
//! A session owns its tree exclusively. Reloading replaces the tree, the
//! injected CSS and the selection wholesale. Loads are ticketed so a result
//! that arrives after a newer load was started is discarded.

use tracing::{debug, info};
use uuid::Uuid;

use restyle_config::RenderConfig;
use restyle_css::CssScoper;
use restyle_protocols::{NormalizedPage, RenderError, SelectorError};

use crate::builder::build_tree;
use crate::path::{is_reserved, selection_path, PathOptions};
use crate::selector::SelectorList;
use crate::tree::{NodeId, RenderTree};

/// Selection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Idle,
    Selecting,
}

/// How plain clicks are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Every click selects the clicked node (preview renderer).
    AlwaysSelect,
    /// Clicks only select after [`RenderSession::start_selecting`]
    /// (page edited in place).
    ExplicitSelect,
}

/// Pointer and keyboard input delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Click(NodeId),
    Hover(NodeId),
    Submit(NodeId),
    KeyDown(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// What the session did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The click was consumed and selected a node.
    Selected { path: String, notice: String },
    /// The hovered node is now highlighted.
    Highlighted(NodeId),
    /// Selecting mode was cancelled.
    Cancelled { notice: String },
    /// The default action was prevented and nothing else happened.
    Suppressed,
    /// The event was not for the session.
    Ignored,
    /// The event proceeds with its default behavior.
    Default,
}

/// Handle for one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Applied,
    /// A newer load was started; the page was discarded.
    Stale,
}

pub const SELECTING_NOTICE: &str = "Click on any element to select it. Press Escape to cancel.";
pub const CANCELLED_NOTICE: &str = "Selection cancelled.";

/// One rendered page plus its interaction state.
#[derive(Debug)]
pub struct RenderSession {
    id: Uuid,
    config: RenderConfig,
    click_policy: ClickPolicy,
    tree: RenderTree,
    container: NodeId,
    base_url: String,
    title: String,
    scoped_css: String,
    generation: u64,
    mode: SelectionMode,
    selected: Option<NodeId>,
    hovered: Option<NodeId>,
}

impl RenderSession {
    pub fn new(config: RenderConfig, click_policy: ClickPolicy) -> Self {
        let (tree, container) = build_tree("", "", &config.container_class);
        Self {
            id: Uuid::new_v4(),
            config,
            click_policy,
            tree,
            container,
            base_url: String::new(),
            title: String::new(),
            scoped_css: String::new(),
            generation: 0,
            mode: SelectionMode::Idle,
            selected: None,
            hovered: None,
        }
    }

    /// Session for the preview renderer.
    pub fn preview(config: RenderConfig) -> Self {
        Self::new(config, ClickPolicy::AlwaysSelect)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Scoped stylesheet injected for the current page.
    pub fn scoped_css(&self) -> &str {
        &self.scoped_css
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    // ---- loading ----

    /// Start a load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Install `page` if `ticket` is still the latest load.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        page: &NormalizedPage,
    ) -> Result<LoadStatus, RenderError> {
        if ticket.generation != self.generation {
            debug!(
                session = %self.id,
                ticket = ticket.generation,
                latest = self.generation,
                "Discarding stale page load"
            );
            return Ok(LoadStatus::Stale);
        }
        if !page.success {
            return Err(RenderError::PageFailed(
                page.error
                    .clone()
                    .unwrap_or_else(|| "Failed to load website".to_string()),
            ));
        }

        let (tree, container) =
            build_tree(&page.body_html, &page.base_url, &self.config.container_class);
        self.tree = tree;
        self.container = container;
        self.base_url = page.base_url.clone();
        self.title = page.title.clone();
        self.scoped_css = CssScoper::new(self.config.container_selector()).scope(&page.css);
        self.mode = SelectionMode::Idle;
        self.selected = None;
        self.hovered = None;

        info!(
            session = %self.id,
            title = %self.title,
            nodes = self.tree.len(),
            "Loaded page into render session"
        );
        Ok(LoadStatus::Applied)
    }

    /// Begin and finish a load in one step.
    pub fn load(&mut self, page: &NormalizedPage) -> Result<LoadStatus, RenderError> {
        let ticket = self.begin_load();
        self.finish_load(ticket, page)
    }

    // ---- selection ----

    fn path_options(&self) -> PathOptions {
        match self.click_policy {
            ClickPolicy::AlwaysSelect => PathOptions::preview(&self.config),
            ClickPolicy::ExplicitSelect => PathOptions::in_page(&self.config),
        }
    }

    fn marker(&self, name: &str) -> String {
        format!("{}-{}", self.config.reserved_class_prefix, name)
    }

    /// Enter selecting mode and return the notice to show.
    pub fn start_selecting(&mut self) -> &'static str {
        self.mode = SelectionMode::Selecting;
        SELECTING_NOTICE
    }

    fn stop_selecting(&mut self) {
        self.mode = SelectionMode::Idle;
        self.clear_marker("highlight");
        self.hovered = None;
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.clear_marker("selected");
        self.selected = None;
    }

    /// Selected node, if it is still part of the page.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
            .filter(|node| self.tree.is_inclusive_descendant(*node, self.container))
    }

    /// Path of the selected node.
    pub fn selected_path(&self) -> Option<String> {
        self.selected().and_then(|node| self.path_of(node))
    }

    /// Path of `node`, or `None` when it belongs to a replaced page.
    pub fn path_of(&self, node: NodeId) -> Option<String> {
        if !self.tree.contains(node) {
            return None;
        }
        selection_path(&self.tree, node, self.container, &self.path_options())
    }

    /// Select `node` directly, returning its path.
    pub fn select(&mut self, node: NodeId) -> Option<String> {
        let path = self.path_of(node)?;
        self.clear_selection();
        self.clear_marker("highlight");
        self.hovered = None;

        let marker = self.marker("selected");
        if let Some(element) = self.tree.element_mut(node) {
            element.add_class(&marker);
        }
        self.selected = Some(node);
        debug!(session = %self.id, path = %path, "Selected node");
        Some(path)
    }

    fn clear_marker(&mut self, name: &str) {
        let marker = self.marker(name);
        for node in self.tree.descendants(self.container) {
            if let Some(element) = self.tree.element_mut(node) {
                element.remove_class(&marker);
            }
        }
    }

    fn selection_notice(&self, node: NodeId) -> String {
        let tag = self.tree.tag(node).unwrap_or_default();
        let text: String = self.tree.text_content(node).chars().take(30).collect();
        if text.is_empty() {
            format!("Selected: <{}>", tag)
        } else {
            format!("Selected: <{}> \"{}...\"", tag, text)
        }
    }

    fn is_selectable(&self, node: NodeId) -> bool {
        self.tree.contains(node)
            && node != self.container
            && self.tree.is_inclusive_descendant(node, self.container)
            && !is_reserved(&self.tree, node, &self.config.reserved_root_id)
    }

    /// Route one input event through the selection state machine.
    pub fn dispatch(&mut self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Submit(_) => EventOutcome::Suppressed,
            UiEvent::KeyDown(Key::Escape) if self.mode == SelectionMode::Selecting => {
                self.stop_selecting();
                EventOutcome::Cancelled {
                    notice: CANCELLED_NOTICE.to_string(),
                }
            }
            UiEvent::KeyDown(_) => EventOutcome::Ignored,
            UiEvent::Hover(node) => {
                if self.mode != SelectionMode::Selecting || !self.is_selectable(node) {
                    return EventOutcome::Ignored;
                }
                self.clear_marker("highlight");
                let marker = self.marker("highlight");
                if let Some(element) = self.tree.element_mut(node) {
                    element.add_class(&marker);
                }
                self.hovered = Some(node);
                EventOutcome::Highlighted(node)
            }
            UiEvent::Click(node) => {
                let intercept = match self.click_policy {
                    ClickPolicy::AlwaysSelect => true,
                    ClickPolicy::ExplicitSelect => self.mode == SelectionMode::Selecting,
                };
                if !intercept {
                    return EventOutcome::Default;
                }
                if !self.is_selectable(node) {
                    return EventOutcome::Ignored;
                }
                let Some(path) = self.select(node) else {
                    return EventOutcome::Ignored;
                };
                if self.mode == SelectionMode::Selecting {
                    self.stop_selecting();
                }
                EventOutcome::Selected {
                    path,
                    notice: self.selection_notice(node),
                }
            }
        }
    }

    /// Hovered node while selecting.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    // ---- queries and output ----

    /// Nodes matching `selector` in document order.
    ///
    /// The container itself only matches selectors whose subject is
    /// `:scope`; the reserved subtree never matches.
    pub fn query(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        let mut candidates = Vec::new();
        if list.targets_scope() {
            candidates.push(self.container);
        }
        candidates.extend(self.tree.descendants(self.container));

        Ok(candidates
            .into_iter()
            .filter(|node| list.matches(&self.tree, *node, self.container))
            .filter(|node| !is_reserved(&self.tree, *node, &self.config.reserved_root_id))
            .collect())
    }

    /// First node matching `selector`.
    pub fn query_first(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.query(selector)?.into_iter().next())
    }

    /// The container subtree as HTML.
    pub fn render_html(&self) -> String {
        self.tree.outer_html(self.container)
    }

    /// Scoped CSS in a `<style>` element followed by the container markup.
    pub fn render_document(&self) -> String {
        format!(
            "<style>{}</style>{}",
            self.scoped_css.replace("</style", "<\\/style"),
            self.render_html()
        )
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
