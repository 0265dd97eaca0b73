//! # Restyle Mutation
//!
//! Applies [`InstructionSet`](restyle_protocols::InstructionSet)s to a
//! [`RenderSession`](restyle_render::RenderSession). Every instruction runs
//! independently; failures are logged and recorded in the
//! [`ApplicationReport`] instead of aborting the batch.

mod canned;
mod engine;
mod report;

pub use canned::{canned_instructions, EXAMPLE_PROMPTS};
pub use engine::{apply, MutationEngine};
pub use report::{ApplicationReport, InstructionOutcome, OutcomeStatus};
