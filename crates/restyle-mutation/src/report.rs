//! Per-instruction application results.

use serde::{Serialize, Serializer};

use restyle_protocols::ApplyError;

/// How far one instruction got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// Every effect was applied.
    Applied,
    /// Some style properties were rejected; the rest were applied.
    Partial,
    /// Nothing was applied.
    Failed,
}

/// Result of one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionOutcome {
    /// `css` or the action type.
    pub kind: String,
    pub selector: String,
    /// Number of nodes changed.
    pub affected: usize,
    /// Whether the selected node stood in for an empty match.
    pub used_selection: bool,
    pub status: OutcomeStatus,
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<ApplyError>,
}

impl InstructionOutcome {
    pub(crate) fn new(kind: &str, selector: &str) -> Self {
        Self {
            kind: kind.to_string(),
            selector: selector.to_string(),
            affected: 0,
            used_selection: false,
            status: OutcomeStatus::Applied,
            errors: Vec::new(),
        }
    }

    pub(crate) fn failed(mut self, error: ApplyError) -> Self {
        self.status = OutcomeStatus::Failed;
        self.errors.push(error);
        self
    }
}

fn serialize_errors<S: Serializer>(errors: &[ApplyError], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

/// Results of applying one instruction set, in instruction order
/// (CSS instructions first, then actions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationReport {
    pub outcomes: Vec<InstructionOutcome>,
    /// The set's user-facing message, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApplicationReport {
    /// Instructions that applied fully.
    pub fn applied(&self) -> usize {
        self.count(OutcomeStatus::Applied)
    }

    pub fn partial(&self) -> usize {
        self.count(OutcomeStatus::Partial)
    }

    pub fn failed(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Every recorded error, in order.
    pub fn errors(&self) -> impl Iterator<Item = &ApplyError> {
        self.outcomes.iter().flat_map(|o| o.errors.iter())
    }

    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| o.status == OutcomeStatus::Applied)
    }

    /// Message shown after a successful turn.
    pub fn user_message(&self) -> &str {
        self.message.as_deref().unwrap_or("Changes applied!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_message() {
        let report = ApplicationReport {
            outcomes: vec![
                InstructionOutcome::new("css", "h1"),
                InstructionOutcome::new("hide", ".x").failed(ApplyError::NoMatch(".x".to_string())),
            ],
            message: None,
        };
        assert_eq!(report.applied(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.partial(), 0);
        assert!(!report.is_clean());
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.user_message(), "Changes applied!");
    }

    #[test]
    fn test_serializes_errors_as_text() {
        let report = ApplicationReport {
            outcomes: vec![
                InstructionOutcome::new("remove", "#a").failed(ApplyError::NoMatch("#a".to_string())),
            ],
            message: Some("Removed".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "failed");
        assert_eq!(
            json["outcomes"][0]["errors"][0],
            "No elements found for selector: #a"
        );
        assert_eq!(json["message"], "Removed");
    }
}
