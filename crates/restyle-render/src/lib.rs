//! # Restyle Render
//!
//! The rendered copy of a proxied page and everything needed to interact
//! with it:
//!
//! - [`RenderTree`] - arena DOM owned by one session
//! - [`SelectorList`] - the selector subset used by instructions
//! - [`selection_path`] - best-effort selectors for clicked nodes
//! - [`RenderSession`] - load tickets, scoped CSS and the selection state machine

mod builder;
mod path;
mod selector;
mod session;
mod style;
mod tree;

pub use builder::build_tree;
pub use path::{best_selector, is_reserved, selection_path, PathOptions};
pub use selector::SelectorList;
pub use session::{
    ClickPolicy, EventOutcome, Key, LoadStatus, LoadTicket, RenderSession, SelectionMode, UiEvent,
    CANCELLED_NOTICE, SELECTING_NOTICE,
};
pub use style::{css_property_name, set_style_property, style_property, InlineStyle};
pub use tree::{ElementData, NodeId, NodeKind, RenderTree};
