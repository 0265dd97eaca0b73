//! One-shot commands: `fetch`, `apply` and `scope`.

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, warn};

use restyle_assistant::{interpret_reply, Assistant, ModelReply, TurnOutcome};
use restyle_config::Config;
use restyle_css::scope_css;
use restyle_mutation::apply;
use restyle_protocols::NormalizedPage;
use restyle_proxy::ProxyService;
use restyle_render::RenderSession;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

async fn fetch_page(config: &Config, url: &str) -> Result<NormalizedPage, Box<dyn std::error::Error>> {
    let service = ProxyService::new(&config.fetcher)?;
    let outcome = service.handle(Some(url)).await;
    if !outcome.is_success() {
        let message = outcome.page.error.unwrap_or_default();
        return Err(format!("{} ({})", message, outcome.status).into());
    }
    Ok(outcome.page)
}

/// `restyle fetch <url>`
pub(crate) async fn fetch(config: &Config, url: &str) -> CommandResult {
    let page = fetch_page(config, url).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

/// `restyle apply <url> [--reply <file> | --prompt <text>] [--select <selector>]`
pub(crate) async fn apply_to_page(
    config: &Config,
    url: &str,
    reply: Option<&Path>,
    prompt: Option<&str>,
    select: Option<&str>,
) -> CommandResult {
    let output = applied_page(config, url, reply, prompt, select).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Load `url`, apply the reply or prompt and describe the result.
async fn applied_page(
    config: &Config,
    url: &str,
    reply: Option<&Path>,
    prompt: Option<&str>,
    select: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let page = fetch_page(config, url).await?;
    let mut session = RenderSession::preview(config.render.clone());
    session.load(&page)?;

    if let Some(selector) = select {
        match session.query_first(selector)? {
            Some(node) => {
                let path = session.select(node);
                info!(selector, path = path.as_deref().unwrap_or_default(), "Selected element");
            }
            None => warn!(selector, "Nothing to select"),
        }
    }

    let report = match (reply, prompt) {
        (Some(file), _) => {
            let text = std::fs::read_to_string(file)?;
            match interpret_reply(&text) {
                ModelReply::Instructions { set, .. } => Some(apply(&mut session, &set)),
                ModelReply::Text(text) => {
                    println!("{}", text);
                    None
                }
            }
        }
        (None, Some(prompt)) => {
            let mut assistant = Assistant::new(&session);
            assistant.begin_turn(prompt, &session)?;
            match assistant.complete_locally(&mut session)? {
                TurnOutcome::Applied { report, notice } => {
                    info!("{}", notice);
                    Some(report)
                }
                other => {
                    println!("{}", other.notice());
                    None
                }
            }
        }
        (None, None) => None,
    };

    Ok(json!({
        "title": session.title(),
        "baseUrl": session.base_url(),
        "report": report,
        "document": session.render_document(),
    }))
}

/// `restyle scope <css-file> --container <selector>`
pub(crate) fn scope(css_file: &Path, container: &str) -> CommandResult {
    let css = std::fs::read_to_string(css_file)?;
    print!("{}", scope_css(&css, container));
    Ok(())
}
