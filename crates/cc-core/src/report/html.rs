//! HTML report generation
//!
//! Produces the same element structure and class names the browser
//! client renders, so saved reports pick up the same stylesheet.

use super::{ClaimView, ReportView, SourceView};

pub fn generate(view: &ReportView) -> String {
    let mut out = String::new();

    out.push_str("<div class=\"report\">\n");
    out.push_str(&format!(
        "  <h2 class=\"{}\">{}</h2>\n",
        escape(&view.badge_class),
        escape(&view.heading)
    ));
    out.push_str(&format!("  <p>{}</p>\n", escape(&view.explanation)));
    out.push_str("  <h3>Claims:</h3>\n");

    for claim in &view.claims {
        push_claim(&mut out, claim);
    }

    out.push_str("</div>\n");
    out
}

fn push_claim(out: &mut String, claim: &ClaimView) {
    out.push_str("  <div class=\"claim\">\n");
    out.push_str(&format!(
        "    <p><strong>Claim:</strong> {}</p>\n",
        escape(&claim.claim)
    ));
    out.push_str(&format!(
        "    <p class=\"{}\"><strong>Status:</strong> {}</p>\n",
        escape(&claim.status_class),
        escape(&claim.status)
    ));
    out.push_str(&format!(
        "    <p><strong>Explanation:</strong> {}</p>\n",
        escape(&claim.explanation)
    ));
    out.push_str("    <h4>Sources:</h4>\n");
    out.push_str("    <ul>\n");
    for source in &claim.sources {
        out.push_str(&format!("      <li>{}</li>\n", source_item(source)));
    }
    out.push_str("    </ul>\n");
    out.push_str("  </div>\n");
}

fn source_item(source: &SourceView) -> String {
    let title = match &source.href {
        Some(href) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape(href),
            escape(&source.title)
        ),
        None => escape(&source.title),
    };
    format!("{}: {}", title, escape(&source.summary))
}

/// Escape text for use in element content and quoted attributes
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
