use super::*;
use serde_json::json;

#[test]
fn test_parse_full_instruction_set() {
    let value = json!({
        "css": [{"selector": "h1", "styles": {"color": "red", "fontSize": 24}}],
        "actions": [
            {"type": "hide", "selector": "nav"},
            {"type": "move", "selector": "#a", "target": "#b", "position": "after"},
            {"type": "text", "selector": "h2", "value": "Hello"}
        ],
        "message": "Done"
    });
    let set = InstructionSet::from_value(&value);
    assert_eq!(set.css.len(), 1);
    assert_eq!(set.actions.len(), 3);
    assert_eq!(set.len(), 4);
    assert_eq!(set.message.as_deref(), Some("Done"));
    assert_eq!(set.actions[1].kind, ActionKind::Move);
    assert_eq!(set.actions[1].position, Some(InsertPosition::After));
    assert_eq!(set.actions[2].value.as_deref(), Some("Hello"));
}

#[test]
fn test_style_entries_render_numbers() {
    let value = json!({"css": [{"selector": "p", "styles": {"opacity": 0.5, "color": "blue", "bad": [1]}}]});
    let set = InstructionSet::from_value(&value);
    let entries: Vec<_> = set.css[0].style_entries().collect();
    assert!(entries.contains(&("opacity", Some("0.5".to_string()))));
    assert!(entries.contains(&("color", Some("blue".to_string()))));
    assert!(entries.contains(&("bad", None)));
}

#[test]
fn test_malformed_entries_are_skipped() {
    let value = json!({
        "css": [{"styles": {"color": "red"}}, {"selector": "a", "styles": {}}],
        "actions": [{"selector": "x"}, {"type": "remove", "selector": ".ad"}]
    });
    let set = InstructionSet::from_value(&value);
    assert_eq!(set.css.len(), 1);
    assert_eq!(set.css[0].selector, "a");
    assert_eq!(set.actions.len(), 1);
    assert_eq!(set.actions[0].kind, ActionKind::Remove);
}

#[test]
fn test_non_array_fields_are_empty() {
    let value = json!({"css": "h1 { color: red }", "actions": {"type": "hide"}});
    let set = InstructionSet::from_value(&value);
    assert!(set.is_empty());
    assert!(set.message.is_none());
}

#[test]
fn test_unknown_action_type() {
    let action: ActionInstruction =
        serde_json::from_value(json!({"type": "explode", "selector": "body"})).unwrap();
    assert_eq!(action.kind, ActionKind::Unsupported);
}

#[test]
fn test_unknown_position_falls_back_to_inside() {
    let action: ActionInstruction = serde_json::from_value(
        json!({"type": "move", "selector": "#a", "target": "#b", "position": "underneath"}),
    )
    .unwrap();
    assert_eq!(action.position, Some(InsertPosition::Inside));
    assert_eq!(InsertPosition::default(), InsertPosition::Inside);
}

#[test]
fn test_builders() {
    let set = InstructionSet::default()
        .with_css(CssInstruction::new("h1", [("color", "red")]))
        .with_action(ActionInstruction::move_to("#a", "#b", InsertPosition::Before))
        .with_message("ok");
    assert_eq!(set.css[0].styles["color"], json!("red"));
    assert_eq!(set.actions[0].target.as_deref(), Some("#b"));
    assert_eq!(ActionInstruction::text("p", "x").kind.as_str(), "text");
}

#[test]
fn test_serialize_skips_empty_optionals() {
    let json = serde_json::to_value(ActionInstruction::hide("nav")).unwrap();
    assert_eq!(json, json!({"type": "hide", "selector": "nav"}));
}

#[test]
fn test_styles_keep_given_order() {
    let value = json!({
        "css": [{"selector": "h1", "styles": {"zIndex": "2", "backgroundColor": "red", "background": "none"}}]
    });
    let set = InstructionSet::from_value(&value);
    let properties: Vec<&str> = set.css[0].style_entries().map(|(p, _)| p).collect();
    assert_eq!(properties, vec!["zIndex", "backgroundColor", "background"]);
}
