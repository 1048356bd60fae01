//! HTML page rendering — template loading, config canonicalization, and
//! placeholder substitution.

use serde_json::Value;

use crate::types::{ChartError, ChartRequest, ChartResult};

/// Build-time copy of the page template, used when no live `template.html`
/// is present.
pub const DEFAULT_TEMPLATE: &str = include_str!("template.html");

/// Path probed for a live template override, so the page can be edited
/// without restarting the server.
const LIVE_TEMPLATE_PATH: &str = "template.html";

/// Placeholder names every template must provide.
const PLACEHOLDERS: [&str; 5] = ["title", "width", "height", "option", "option_str"];

/// Load the page template, preferring a live `template.html` in the working
/// directory over the embedded copy.
///
/// Re-read on every render; reading is cheap and keeping no cache means
/// external edits are picked up immediately.
pub fn load_template() -> String {
    match std::fs::read_to_string(LIVE_TEMPLATE_PATH) {
        Ok(text) => text,
        Err(_) => DEFAULT_TEMPLATE.to_string(),
    }
}

/// Serialize the chart config to indented JSON, falling back to the compact
/// form when pretty-printing fails.
pub fn canonicalize(config: &Value) -> String {
    match serde_json::to_string_pretty(config) {
        Ok(pretty) => pretty,
        Err(e) => {
            tracing::warn!(error = %e, "pretty-printing chart config failed, using compact form");
            config.to_string()
        }
    }
}

/// Substitute a request into the template, producing the full page.
///
/// The canonical config is injected twice: raw into the chart script and
/// HTML-escaped into the display block. A template missing any placeholder
/// is rejected before anything is substituted.
pub fn render(request: &ChartRequest, template: &str) -> ChartResult<String> {
    for name in PLACEHOLDERS {
        if !template.contains(&format!("{{{{{name}}}}}")) {
            return Err(ChartError::Render(format!(
                "template is missing the {{{{{name}}}}} placeholder"
            )));
        }
    }

    let option = canonicalize(&request.config);
    let vars = [
        ("title", escape_html(&request.title)),
        ("width", request.width.to_string()),
        ("height", request.height.to_string()),
        ("option", option.clone()),
        ("option_str", escape_html(&option)),
    ];

    Ok(substitute(template, &vars))
}

/// Single-pass placeholder substitution.
///
/// Substituted values are never rescanned, so request data containing
/// placeholder-like text cannot corrupt the output.
fn substitute(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        match rest.find("}}") {
            Some(end) => {
                let name = &rest[2..end];
                if let Some((_, value)) = vars.iter().find(|(key, _)| *key == name) {
                    out.push_str(value);
                    rest = &rest[end + 2..];
                } else {
                    // Not one of ours; emit the braces and keep scanning.
                    out.push_str("{{");
                    rest = &rest[2..];
                }
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Minimal HTML entity escaping for text interpolated into markup.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
