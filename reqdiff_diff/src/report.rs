use crate::model::{DocumentDiff, FindingLevel};

/// Format a markdown-oriented human report from a document diff.
pub fn format_markdown_report(diff: &DocumentDiff, left_label: &str, right_label: &str) -> String {
    let mut out = String::new();
    out.push_str("# Request Diff Report\n\n");
    out.push_str(&format!("- Old: `{left_label}`\n"));
    out.push_str(&format!("- New: `{right_label}`\n"));
    out.push_str(&format!("- Profile: {:?}\n\n", diff.profile));

    let changed = diff.changed_sections();
    out.push_str("## Summary\n\n");
    out.push_str(&format!(
        "- Sections compared: {}\n- Sections changed: {}\n\n",
        diff.sections.len(),
        changed.len()
    ));

    out.push_str("## Sections\n\n");
    if changed.is_empty() {
        out.push_str("No changes detected.\n");
    } else {
        for summary in diff.sections.iter().filter(|s| s.has_changes) {
            out.push_str(&format!(
                "- [{}] {} (`{}`)\n",
                presence_badge(summary.present_old, summary.present_new),
                summary.title,
                summary.key,
            ));
        }
    }

    if !diff.findings.is_empty() {
        out.push_str("\n## Findings\n\n");
        for finding in &diff.findings {
            let level = match finding.level {
                FindingLevel::Warning => "warning",
                FindingLevel::Info => "info",
            };
            match finding.section {
                Some(section) => out.push_str(&format!(
                    "- {level} [{}] ({section}): {}\n",
                    finding.code, finding.message
                )),
                None => out.push_str(&format!(
                    "- {level} [{}]: {}\n",
                    finding.code, finding.message
                )),
            }
        }
    }

    out
}

fn presence_badge(present_old: bool, present_new: bool) -> &'static str {
    match (present_old, present_new) {
        (false, true) => "A",
        (true, false) => "D",
        _ => "M",
    }
}
