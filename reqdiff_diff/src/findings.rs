use reqdiff_doc::{Document, KeyValue, lookup};
use serde_json::Value;

use crate::model::{Finding, FindingLevel, SectionKey, SectionProfile};
use crate::reconcile::ambiguous_keys;
use crate::sections::{example_key, items_at, registry, split_params};

/// Tolerant request lists whose duplicate keys are worth flagging.
///
/// Params are checked per placement, since query and path params are
/// reconciled separately.
const TOLERANT_LISTS: [(SectionKey, &str); 3] = [
    (SectionKey::Headers, "request.headers"),
    (SectionKey::Vars, "request.vars.req"),
    (SectionKey::Vars, "request.vars.res"),
];

pub(crate) fn collect_findings(
    old: Option<&Document>,
    new: Option<&Document>,
    profile: SectionProfile,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    collect_document_findings(old, "old", &mut findings);
    collect_document_findings(new, "new", &mut findings);
    if let (Some(old), Some(new)) = (old, new) {
        collect_ambiguity_findings(old, new, profile, &mut findings);
    }
    findings.sort_by(|a, b| (&a.message, a.section).cmp(&(&b.message, b.section)));
    findings
}

fn collect_document_findings(doc: Option<&Document>, side: &str, out: &mut Vec<Finding>) {
    let Some(doc) = doc else {
        return;
    };

    for pf in &doc.metadata.parse_findings {
        tracing::warn!("{side} document could not be parsed: {}", pf.message);
        out.push(Finding {
            code: "unparsed_document".to_string(),
            level: FindingLevel::Warning,
            message: format!("{side} document parse failure [{}]: {}", pf.code, pf.message),
            section: None,
        });
    }

    if !doc.has_parse_findings() && !doc.is_object() {
        out.push(Finding {
            code: "non_object_document".to_string(),
            level: FindingLevel::Info,
            message: format!("{side} document root is not an object; no sections are present"),
            section: None,
        });
    }
}

fn collect_ambiguity_findings(
    old: &Document,
    new: &Document,
    profile: SectionProfile,
    out: &mut Vec<Finding>,
) {
    let declared = |key: SectionKey| registry(profile).iter().any(|spec| spec.key == key);

    for (section, path) in TOLERANT_LISTS {
        if declared(section) {
            let old_records = records(old.get(path));
            let new_records = records(new.get(path));
            push_ambiguities(section, path, &old_records, &new_records, out);
        }
    }

    if declared(SectionKey::Params) {
        let (old_query, old_path) = split_params(&records(old.get("request.params")));
        let (new_query, new_path) = split_params(&records(new.get("request.params")));
        push_ambiguities(
            SectionKey::Params,
            "request.params (query)",
            &old_query,
            &new_query,
            out,
        );
        push_ambiguities(
            SectionKey::Params,
            "request.params (path)",
            &old_path,
            &new_path,
            out,
        );
    }

    if declared(SectionKey::Examples) {
        collect_example_ambiguities(old, new, out);
    }
}

/// Examples paired the same way the examples view pairs them.
fn collect_example_ambiguities(old: &Document, new: &Document, out: &mut Vec<Finding>) {
    let other: Vec<(String, &Value)> = items_at(&old.root, "examples")
        .iter()
        .enumerate()
        .map(|(idx, example)| (example_key(example, idx), example))
        .collect();

    for (idx, example) in items_at(&new.root, "examples").iter().enumerate() {
        let key = example_key(example, idx);
        // Last example with a key wins, as in the view.
        let Some(&(_, counterpart)) = other.iter().rev().find(|(k, _)| *k == key) else {
            continue;
        };

        for list in ["request.headers", "response.headers"] {
            let label = format!("examples[{key}].{list}");
            push_ambiguities(
                SectionKey::Examples,
                &label,
                &records(lookup(counterpart, list)),
                &records(lookup(example, list)),
                out,
            );
        }

        for placement in ["query", "path"] {
            let of_type = |root: &Value| -> Vec<KeyValue> {
                records(lookup(root, "request.params"))
                    .into_iter()
                    .filter(|p| p.kind.as_deref() == Some(placement))
                    .collect()
            };
            let label = format!("examples[{key}].request.params ({placement})");
            push_ambiguities(
                SectionKey::Examples,
                &label,
                &of_type(counterpart),
                &of_type(example),
                out,
            );
        }
    }
}

fn push_ambiguities(
    section: SectionKey,
    label: &str,
    old_records: &[KeyValue],
    new_records: &[KeyValue],
    out: &mut Vec<Finding>,
) {
    for (key, old_count, new_count) in ambiguous_keys(old_records, new_records) {
        out.push(Finding {
            code: "ambiguous_duplicate_key".to_string(),
            level: FindingLevel::Warning,
            message: format!(
                "ambiguous key `{key}` in {label} appears {old_count}x on old and \
                 {new_count}x on new; pairing is positional"
            ),
            section: Some(section),
        });
    }
}

fn records(value: Option<&Value>) -> Vec<KeyValue> {
    value
        .and_then(Value::as_array)
        .map(|items| KeyValue::list(items))
        .unwrap_or_default()
}
