//! Plain text report generation

use super::ReportView;

pub fn generate(view: &ReportView) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", view.heading));
    output.push_str(&format!("{}\n", "=".repeat(view.heading.chars().count())));
    output.push_str(&format!("{}\n", view.explanation));
    output.push_str("\nClaims:\n");

    if view.claims.is_empty() {
        output.push_str("  (none)\n");
    }

    for (i, claim) in view.claims.iter().enumerate() {
        output.push_str(&format!("\n  {}. {}\n", i + 1, claim.claim));
        output.push_str(&format!("     Status: {}\n", claim.status));
        output.push_str(&format!("     Explanation: {}\n", claim.explanation));
        output.push_str("     Sources:\n");
        for source in &claim.sources {
            match source.encoded_href() {
                Some(href) => output.push_str(&format!(
                    "       - {} <{}>: {}\n",
                    source.title, href, source.summary
                )),
                None => output.push_str(&format!("       - {}: {}\n", source.title, source.summary)),
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_result;

    #[test]
    fn test_text_report() {
        let text = generate(&ReportView::from(&sample_result()));
        assert!(text.starts_with("Credibility Score: 50 (Yellow)\n"));
        assert!(text.contains("  1. The Earth is round.\n     Status: True\n"));
        assert!(text.contains("  2. Water boils at 50C at sea level.\n     Status: False\n"));
        assert!(text.contains("       - Wikipedia - Earth <https://en.wikipedia.org/wiki/Earth>: The Earth is an oblate spheroid.\n"));
    }

    #[test]
    fn test_text_link_is_encoded() {
        let mut result = sample_result();
        result.claims[0].sources[0].link = "https://example.com/a>b".to_string();
        let text = generate(&ReportView::from(&result));
        assert!(text.contains("       - Wikipedia - Earth <https://example.com/a%3Eb>: "));
    }

    #[test]
    fn test_text_report_without_claims() {
        let mut result = sample_result();
        result.claims.clear();
        let text = generate(&ReportView::from(&result));
        assert!(text.contains("Claims:\n  (none)\n"));
    }
}
