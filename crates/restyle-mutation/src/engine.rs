//! Instruction interpreter.

use tracing::{info, warn};

use restyle_protocols::{
    ActionInstruction, ActionKind, ApplyError, CssInstruction, InsertPosition, InstructionSet,
};
use restyle_render::{set_style_property, NodeId, RenderSession};

use crate::report::{ApplicationReport, InstructionOutcome, OutcomeStatus};

/// Applies instructions to one session.
pub struct MutationEngine<'s> {
    session: &'s mut RenderSession,
}

/// Apply `instructions` to `session`.
pub fn apply(session: &mut RenderSession, instructions: &InstructionSet) -> ApplicationReport {
    MutationEngine::new(session).apply(instructions)
}

impl<'s> MutationEngine<'s> {
    pub fn new(session: &'s mut RenderSession) -> Self {
        Self { session }
    }

    /// Apply CSS instructions, then actions, each in order.
    pub fn apply(&mut self, instructions: &InstructionSet) -> ApplicationReport {
        let mut outcomes = Vec::with_capacity(instructions.len());
        for instruction in &instructions.css {
            outcomes.push(self.apply_css(instruction));
        }
        for instruction in &instructions.actions {
            outcomes.push(self.apply_action(instruction));
        }

        for outcome in &outcomes {
            for error in &outcome.errors {
                warn!(
                    kind = %outcome.kind,
                    selector = %outcome.selector,
                    error = %error,
                    "Instruction failed"
                );
            }
        }

        ApplicationReport {
            outcomes,
            message: instructions.message.clone(),
        }
    }

    /// Matches for `selector`, or the selected node when nothing matches.
    fn resolve(&self, selector: &str) -> Result<(Vec<NodeId>, bool), ApplyError> {
        let matches = self
            .session
            .query(selector)
            .map_err(|source| ApplyError::InvalidSelector {
                selector: selector.to_string(),
                source,
            })?;
        if !matches.is_empty() {
            return Ok((matches, false));
        }
        match self.session.selected() {
            Some(selected) => {
                warn!(selector, "No elements matched, using the selected element");
                Ok((vec![selected], true))
            }
            None => Err(ApplyError::NoMatch(selector.to_string())),
        }
    }

    fn apply_css(&mut self, instruction: &CssInstruction) -> InstructionOutcome {
        let outcome = InstructionOutcome::new("css", &instruction.selector);
        let (targets, used_selection) = match self.resolve(&instruction.selector) {
            Ok(resolved) => resolved,
            Err(e) => return outcome.failed(e),
        };

        let mut outcome = InstructionOutcome {
            used_selection,
            ..outcome
        };
        let mut applied_any = false;
        for (property, value) in instruction.style_entries() {
            let Some(value) = value else {
                outcome.errors.push(ApplyError::InvalidStyle {
                    property: property.to_string(),
                    reason: "value must be a string or number".to_string(),
                });
                continue;
            };
            match self.set_style(&targets, property, &value) {
                Ok(()) => applied_any = true,
                Err(e) => outcome.errors.push(e),
            }
        }

        outcome.affected = if applied_any { targets.len() } else { 0 };
        outcome.status = match (applied_any, outcome.errors.is_empty()) {
            (_, true) => OutcomeStatus::Applied,
            (true, false) => OutcomeStatus::Partial,
            (false, false) => OutcomeStatus::Failed,
        };
        if applied_any {
            info!(
                selector = %instruction.selector,
                count = targets.len(),
                "Applied styles"
            );
        }
        outcome
    }

    fn set_style(&mut self, targets: &[NodeId], property: &str, value: &str) -> Result<(), ApplyError> {
        let tree = self.session.tree_mut();
        for node in targets {
            if let Some(element) = tree.element_mut(*node) {
                set_style_property(element, property, value)?;
            }
        }
        Ok(())
    }

    fn apply_action(&mut self, instruction: &ActionInstruction) -> InstructionOutcome {
        let outcome = InstructionOutcome::new(instruction.kind.as_str(), &instruction.selector);
        if instruction.kind == ActionKind::Unsupported {
            return outcome.failed(ApplyError::UnsupportedAction);
        }

        let (targets, used_selection) = match self.resolve(&instruction.selector) {
            Ok(resolved) => resolved,
            Err(e) => return outcome.failed(e),
        };
        let outcome = InstructionOutcome {
            used_selection,
            ..outcome
        };

        let result = match instruction.kind {
            ActionKind::Hide => self.set_style(&targets, "display", "none").map(|_| targets.len()),
            ActionKind::Show => self.set_style(&targets, "display", "").map(|_| targets.len()),
            ActionKind::Text => self.set_text(targets[0], instruction.value.as_deref()),
            ActionKind::Move => self.move_node(
                targets[0],
                instruction.target.as_deref(),
                instruction.position.unwrap_or_default(),
            ),
            ActionKind::Remove => {
                let tree = self.session.tree_mut();
                for node in &targets {
                    tree.detach(*node);
                }
                Ok(targets.len())
            }
            ActionKind::Unsupported => Err(ApplyError::UnsupportedAction),
        };

        match result {
            Ok(affected) => {
                info!(
                    action = instruction.kind.as_str(),
                    selector = %instruction.selector,
                    affected,
                    "Applied action"
                );
                InstructionOutcome { affected, ..outcome }
            }
            Err(e) => outcome.failed(e),
        }
    }

    fn set_text(&mut self, node: NodeId, value: Option<&str>) -> Result<usize, ApplyError> {
        let value = value
            .filter(|v| !v.is_empty())
            .ok_or(ApplyError::MissingValue)?;
        self.session.tree_mut().set_text(node, value);
        Ok(1)
    }

    /// Clone `source` next to or into the first `target` match, then
    /// remove the original.
    fn move_node(
        &mut self,
        source: NodeId,
        target: Option<&str>,
        position: InsertPosition,
    ) -> Result<usize, ApplyError> {
        let target_selector = target
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApplyError::MissingTarget)?;
        let target = self
            .session
            .query_first(target_selector)
            .map_err(|source| ApplyError::InvalidSelector {
                selector: target_selector.to_string(),
                source,
            })?
            .ok_or_else(|| ApplyError::TargetNotFound(target_selector.to_string()))?;

        let tree = self.session.tree_mut();
        if tree.is_inclusive_descendant(target, source) {
            return Err(ApplyError::TargetInsideSource);
        }

        let clone = tree.deep_clone(source);
        let inserted = match position {
            InsertPosition::Before => tree.insert_before(target, clone),
            InsertPosition::After => tree.insert_after(target, clone),
            InsertPosition::Inside => {
                tree.append(target, clone);
                true
            }
        };
        if !inserted {
            return Err(ApplyError::TargetNotFound(target_selector.to_string()));
        }
        tree.detach(source);
        Ok(1)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
