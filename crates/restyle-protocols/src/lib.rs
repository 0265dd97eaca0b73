//! # Restyle Protocols
//!
//! Data types shared by every Restyle crate. Contains no I/O.
//!
//! ## Core Types
//!
//! - [`FetchResult`] - Raw outcome of fetching one page
//! - [`NormalizedPage`] - Wire contract returned by the proxy
//! - [`InstructionSet`] - CSS rules and DOM actions consumed by the mutation engine

pub mod error;
pub mod instruction;
pub mod page;

pub use error::{
    ApplyError, AssistantError, FetchError, NormalizeError, ProxyError, RenderError,
    SelectorError,
};
pub use instruction::{
    ActionInstruction, ActionKind, CssInstruction, InsertPosition, InstructionSet,
};
pub use page::{FetchResult, NormalizedPage};
