//! Markdown report generation

use super::ReportView;

pub fn generate(view: &ReportView) -> String {
    let mut md = String::new();

    md.push_str(&format!("## {}\n\n", view.heading));
    md.push_str(&format!("{}\n\n", view.explanation));
    md.push_str("### Claims\n");

    for (i, claim) in view.claims.iter().enumerate() {
        md.push_str(&format!("\n#### {}. {}\n\n", i + 1, claim.claim));
        md.push_str(&format!("- **Status:** {}\n", claim.status));
        md.push_str(&format!("- **Explanation:** {}\n", claim.explanation));

        if claim.sources.is_empty() {
            continue;
        }

        md.push_str("\n**Sources:**\n\n");
        for source in &claim.sources {
            match source.encoded_href() {
                Some(href) => md.push_str(&format!(
                    "- [{}](<{}>): {}\n",
                    escape_link_text(&source.title),
                    href,
                    source.summary
                )),
                None => md.push_str(&format!("- {}: {}\n", source.title, source.summary)),
            }
        }
    }

    md
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
