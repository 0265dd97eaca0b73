//! Model reply interpretation.

use serde_json::{Deserializer, Value};
use tracing::debug;

use restyle_protocols::InstructionSet;

/// What a model reply turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// The reply carried an instruction object.
    Instructions {
        set: InstructionSet,
        /// The JSON text as it appeared in the reply.
        raw_json: String,
    },
    /// No usable JSON object; show the text as-is.
    Text(String),
}

/// First top-level JSON object embedded in `text`, with its source slice.
///
/// Prose before or after the object is ignored. Each `{` is tried in turn,
/// so a stray brace in leading prose does not hide a later object.
pub fn extract_json_object(text: &str) -> Option<(Value, &str)> {
    for (start, _) in text.match_indices('{') {
        let candidate = &text[start..];
        let mut stream = Deserializer::from_str(candidate).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value @ Value::Object(_))) => {
                let end = stream.byte_offset();
                return Some((value, &candidate[..end]));
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => debug!(offset = start, error = %e, "Not a JSON object"),
            None => {}
        }
    }
    None
}

/// Classify a model reply.
pub fn interpret_reply(text: &str) -> ModelReply {
    match extract_json_object(text) {
        Some((value, raw)) => ModelReply::Instructions {
            set: InstructionSet::from_value(&value),
            raw_json: raw.to_string(),
        },
        None => ModelReply::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        let (value, raw) = extract_json_object(r#"{"message": "ok"}"#).unwrap();
        assert_eq!(value["message"], "ok");
        assert_eq!(raw, r#"{"message": "ok"}"#);
    }

    #[test]
    fn test_object_in_prose() {
        let text = "Sure! Here you go:\n```json\n{\"css\": [], \"message\": \"Done {really}\"}\n```\nEnjoy.";
        let (value, raw) = extract_json_object(text).unwrap();
        assert_eq!(value["message"], "Done {really}");
        assert!(raw.starts_with('{') && raw.ends_with('}'));
    }

    #[test]
    fn test_stray_brace_before_object() {
        let text = "Use {braces} wisely: {\"message\": \"hi\"}";
        let (value, _) = extract_json_object(text).unwrap();
        assert_eq!(value["message"], "hi");
    }

    #[test]
    fn test_first_object_wins() {
        let text = r#"{"message": "one"} and {"message": "two"}"#;
        let (value, _) = extract_json_object(text).unwrap();
        assert_eq!(value["message"], "one");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let reply = interpret_reply("I can't do that on this page.");
        assert_eq!(reply, ModelReply::Text("I can't do that on this page.".to_string()));
    }

    #[test]
    fn test_broken_json_passes_through() {
        let reply = interpret_reply("{\"css\": [ oops");
        assert!(matches!(reply, ModelReply::Text(_)));
    }

    #[test]
    fn test_instructions() {
        let reply = interpret_reply(
            r#"{"css": [{"selector": "h1", "styles": {"color": "red"}}],
                "actions": [{"type": "hide", "selector": "nav"}],
                "message": "Styled"}"#,
        );
        let ModelReply::Instructions { set, .. } = reply else {
            panic!("expected instructions");
        };
        assert_eq!(set.css.len(), 1);
        assert_eq!(set.actions.len(), 1);
        assert_eq!(set.message.as_deref(), Some("Styled"));
    }
}
