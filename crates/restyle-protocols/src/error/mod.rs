//! Error types for the Restyle pipeline.
//!
//! The taxonomy follows the pipeline stages: fetching, normalizing, proxying,
//! rendering, applying instructions and running assistant turns.

mod apply;
mod assistant;
mod fetch;
mod proxy;
mod render;
mod selector;

pub use apply::*;
pub use assistant::*;
pub use fetch::*;
pub use proxy::*;
pub use render::*;
pub use selector::*;
