//! Keyword rules used when no language model is attached.

use restyle_protocols::{ActionInstruction, CssInstruction, InstructionSet};
use restyle_render::RenderSession;

/// Suggested prompts shown in an empty chat.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "Make the header background dark blue",
    "Increase the font size of all headings",
    "Hide the navigation bar",
    "Change all buttons to have rounded corners",
];

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";
const NAVIGATION: &str = "nav, header, .navbar, .header";
const BUTTONS: &str =
    "button, .btn, a.button, input[type=\"button\"], input[type=\"submit\"]";

/// Map a free-text prompt to a fixed instruction set.
///
/// Rules are checked in order and the first keyword hit wins. Color rules
/// target the selected element, or the whole page when nothing is selected.
pub fn canned_instructions(prompt: &str, session: &RenderSession) -> Option<InstructionSet> {
    let lower = prompt.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    let selected = session.selected_path();
    let target = selected.clone().unwrap_or_else(|| ":scope".to_string());

    let set = if has(&["dark blue", "blue background"]) {
        InstructionSet::default().with_css(CssInstruction::new(
            target,
            [("backgroundColor", "#1e3a5f"), ("color", "white")],
        ))
    } else if has(&["font size", "larger"]) {
        InstructionSet::default()
            .with_css(CssInstruction::new(HEADINGS, [("fontSize", "120%")]))
    } else if has(&["hide"]) {
        let selector = session
            .query_first(NAVIGATION)
            .ok()
            .flatten()
            .and_then(|node| session.path_of(node))
            .unwrap_or_else(|| NAVIGATION.to_string());
        InstructionSet::default().with_action(ActionInstruction::hide(selector))
    } else if has(&["rounded"]) {
        InstructionSet::default()
            .with_css(CssInstruction::new(BUTTONS, [("borderRadius", "12px")]))
    } else if has(&["red"]) {
        InstructionSet::default()
            .with_css(CssInstruction::new(target, [("backgroundColor", "#dc2626")]))
    } else if has(&["green"]) {
        InstructionSet::default()
            .with_css(CssInstruction::new(target, [("backgroundColor", "#16a34a")]))
    } else {
        return None;
    };

    let message = match selected {
        Some(path) => format!("Applied modification to {}: {}", path, prompt),
        None => format!("Applied modification: {}", prompt),
    };
    Some(set.with_message(message))
}
