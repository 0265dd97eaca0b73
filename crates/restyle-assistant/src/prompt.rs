//! Prompt construction.

use url::Url;

use restyle_render::{best_selector, style_property, RenderSession};

/// Landmark groups described in the system prompt: label, selector, limit.
const LANDMARKS: [(&str, &str, usize); 4] = [
    ("Header/Nav", "header, nav, .header, .navbar, [role='banner']", 2),
    ("Main content", "main, article, .main, .content, [role='main']", 2),
    ("Footer", "footer, .footer", 1),
    ("Search", "input[type='search'], .search-box, [role='search']", 2),
];

/// Class tokens this long or longer are left out of landmark selectors.
const MAX_LANDMARK_CLASS_LEN: usize = 30;

const CONTRACT: &str = r#"When the user describes a change, respond ONLY with valid JSON in this exact format:
{
  "css": [{"selector": "CSS_SELECTOR", "styles": {"property": "value"}}],
  "actions": [{"type": "move|hide|show|text|remove", "selector": "CSS_SELECTOR", "target": "TARGET_SELECTOR", "position": "before|after|inside", "value": "TEXT"}],
  "message": "Brief description of what was done"
}

Rules:
1. Use camelCase for CSS properties (backgroundColor, not background-color)
2. For "move" actions, clone the element to the target location
3. For "hide" set display:none, for "show" remove display:none
4. If user says something like "bottom right", use position:fixed and right:0, bottom:0
5. Be creative with selectors - use IDs, classes, tag names, or combinations
6. If unsure, make your best guess based on typical website structure
7. ALWAYS respond with valid JSON only, no extra text"#;

/// The system message for a conversation about the loaded page.
pub fn system_prompt(session: &RenderSession) -> String {
    let hostname = Url::parse(session.base_url())
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_default();

    format!(
        "You are Restyle, an assistant that modifies website UI using CSS and DOM manipulation.\n\n\
         {}\n\n\
         The current page is: {}\n\
         Page title: {}\n\n\
         Key elements on this page:\n{}",
        CONTRACT,
        hostname,
        session.title(),
        page_context(session)
    )
}

/// One `- Label: selector` line per landmark found on the page.
pub fn page_context(session: &RenderSession) -> String {
    let prefix = &session.config().reserved_class_prefix;
    let mut lines = Vec::new();
    for (label, selector, limit) in LANDMARKS {
        let Ok(nodes) = session.query(selector) else {
            continue;
        };
        for node in nodes.into_iter().take(limit) {
            if let Some(element) = session.tree().element(node) {
                let best = best_selector(element, prefix, Some(MAX_LANDMARK_CLASS_LEN));
                lines.push(format!("- {}: {}", label, best));
            }
        }
    }

    if lines.is_empty() {
        "No specific elements identified".to_string()
    } else {
        lines.join("\n")
    }
}

/// Wrap `prompt` with a description of the selected element, if any.
pub fn context_prompt(session: &RenderSession, prompt: &str) -> String {
    let (Some(node), Some(path)) = (session.selected(), session.selected_path()) else {
        return prompt.to_string();
    };
    let Some(element) = session.tree().element(node) else {
        return prompt.to_string();
    };

    let style = |property: &str| {
        style_property(element, property).unwrap_or_else(|| "auto".to_string())
    };
    let text: String = session.tree().text_content(node).chars().take(50).collect();

    format!(
        "[Selected element: {}\n\
         Tag: {}\n\
         Current styles: position={}, display={}, width={}, height={}\n\
         Text content: \"{}...\"]\n\n\
         User request: {}",
        path,
        element.tag,
        style("position"),
        style("display"),
        style("width"),
        style("height"),
        text,
        prompt
    )
}
