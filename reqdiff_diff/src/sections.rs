use std::collections::HashMap;

use reqdiff_doc::{Document, KeyValue, lookup, value_text};
use serde_json::{Map, Value};

use crate::engine::{line_diff_for, word_diff_for};
use crate::error::{DiffError, DiffResult};
use crate::findings::collect_findings;
use crate::model::{
    DiffOptions, DiffSegment, DocumentDiff, ExampleBody, ExampleDiff, ExampleRequest,
    ExampleResponse, FieldRecord, Reconciled, SectionKey, SectionProfile, SectionSummary,
    SectionView, Side, Status, TagRecord,
};
use crate::reconcile::{MatchMode, reconcile};
use crate::variant::{compare_fields, diff_auth, diff_body};

static ABSENT: Value = Value::Null;

/// Registry entry: where a section lives and when it has content.
pub struct SectionSpec {
    pub key: SectionKey,
    pub title: &'static str,
    /// Dot paths compared to decide whether the section changed.
    pub paths: &'static [&'static str],
    /// Whether a document root has displayable content for this section.
    pub presence: fn(&Value) -> bool,
}

impl SectionSpec {
    /// `true` when any declared path differs (deep equality; absent equals absent).
    pub fn has_changes(&self, old: &Value, new: &Value) -> bool {
        self.paths
            .iter()
            .any(|path| lookup(old, path) != lookup(new, path))
    }

    pub fn is_present(&self, root: &Value) -> bool {
        (self.presence)(root)
    }
}

const META: SectionSpec = SectionSpec {
    key: SectionKey::Meta,
    title: "Info",
    paths: &["name", "type", "seq", "tags"],
    presence: |root| {
        truthy(lookup(root, "name"))
            || truthy(lookup(root, "type"))
            || truthy(lookup(root, "seq"))
            || has_items(root, "tags")
    },
};

const URL: SectionSpec = SectionSpec {
    key: SectionKey::Url,
    title: "URL",
    paths: &["request.url", "request.method"],
    presence: |root| truthy(lookup(root, "request.url")) || truthy(lookup(root, "request.method")),
};

const PARAMS: SectionSpec = SectionSpec {
    key: SectionKey::Params,
    title: "Parameters",
    paths: &["request.params"],
    presence: |root| has_items(root, "request.params"),
};

const HEADERS: SectionSpec = SectionSpec {
    key: SectionKey::Headers,
    title: "Headers",
    paths: &["request.headers"],
    presence: |root| has_items(root, "request.headers"),
};

const AUTH: SectionSpec = SectionSpec {
    key: SectionKey::Auth,
    title: "Authentication",
    paths: &["request.auth"],
    presence: |root| has_keys(root, "request.auth"),
};

const BODY: SectionSpec = SectionSpec {
    key: SectionKey::Body,
    title: "Body",
    paths: &["request.body"],
    presence: |root| has_keys(root, "request.body"),
};

const VARS: SectionSpec = SectionSpec {
    key: SectionKey::Vars,
    title: "Variables",
    paths: &["request.vars.req", "request.vars.res"],
    presence: |root| has_items(root, "request.vars.req") || has_items(root, "request.vars.res"),
};

const ASSERTIONS: SectionSpec = SectionSpec {
    key: SectionKey::Assertions,
    title: "Assertions",
    paths: &["request.assertions"],
    presence: |root| has_items(root, "request.assertions"),
};

const SCRIPT: SectionSpec = SectionSpec {
    key: SectionKey::Script,
    title: "Scripts & Tests",
    paths: &["request.script.req", "request.script.res", "request.tests"],
    presence: |root| {
        truthy(lookup(root, "request.script.req"))
            || truthy(lookup(root, "request.script.res"))
            || truthy(lookup(root, "request.tests"))
    },
};

const SETTINGS: SectionSpec = SectionSpec {
    key: SectionKey::Settings,
    title: "Settings",
    paths: &["settings"],
    presence: |root| has_keys(root, "settings"),
};

const DOCS: SectionSpec = SectionSpec {
    key: SectionKey::Docs,
    title: "Documentation",
    paths: &["request.docs"],
    presence: |root| truthy(lookup(root, "request.docs")),
};

const EXAMPLES: SectionSpec = SectionSpec {
    key: SectionKey::Examples,
    title: "Examples",
    paths: &["examples"],
    presence: |root| has_items(root, "examples"),
};

// OpenAPI sync only counts auth/body that select a real mode.
const OPENAPI_AUTH: SectionSpec = SectionSpec {
    presence: |root| selected_mode(root, "request.auth.mode"),
    ..AUTH
};

const OPENAPI_BODY: SectionSpec = SectionSpec {
    presence: |root| {
        selected_mode(root, "request.body.mode")
            && (["json", "text", "xml", "graphql"]
                .iter()
                .any(|kind| truthy(lookup(root, &format!("request.body.{kind}"))))
                || has_items(root, "request.body.formUrlEncoded")
                || has_items(root, "request.body.multipartForm"))
    },
    ..BODY
};

const GIT_SECTIONS: &[SectionSpec] = &[
    META, URL, PARAMS, HEADERS, AUTH, BODY, VARS, ASSERTIONS, SCRIPT, SETTINGS, DOCS, EXAMPLES,
];

const OPENAPI_SECTIONS: &[SectionSpec] = &[URL, PARAMS, HEADERS, OPENAPI_AUTH, OPENAPI_BODY];

/// Sections declared by `profile`, in display order.
pub fn registry(profile: SectionProfile) -> &'static [SectionSpec] {
    match profile {
        SectionProfile::Git => GIT_SECTIONS,
        SectionProfile::OpenApi => OPENAPI_SECTIONS,
    }
}

/// Look up a section by key string.
pub fn find_section(profile: SectionProfile, key: &str) -> DiffResult<&'static SectionSpec> {
    let key: SectionKey = key.parse()?;
    registry(profile)
        .iter()
        .find(|spec| spec.key == key)
        .ok_or(DiffError::SectionNotInProfile { key, profile })
}

/// JavaScript-style truthiness used by the presence rules.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn has_items(root: &Value, path: &str) -> bool {
    lookup(root, path)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

fn has_keys(root: &Value, path: &str) -> bool {
    lookup(root, path)
        .and_then(Value::as_object)
        .is_some_and(|map| !map.is_empty())
}

fn selected_mode(root: &Value, path: &str) -> bool {
    lookup(root, path)
        .and_then(Value::as_str)
        .is_some_and(|mode| !mode.is_empty() && mode != "none")
}

fn root_of(doc: Option<&Document>) -> &Value {
    doc.map_or(&ABSENT, |d| &d.root)
}

/// Summarize every section of `options.profile` for two document versions.
///
/// Either side may be absent (the file did not exist there). Documents whose
/// root is not an object report no sections present.
pub fn diff_documents(
    old: Option<&Document>,
    new: Option<&Document>,
    options: DiffOptions,
) -> DocumentDiff {
    let old_root = root_of(old);
    let new_root = root_of(new);

    let sections = registry(options.profile)
        .iter()
        .map(|spec| {
            let summary = SectionSummary {
                key: spec.key,
                title: spec.title.to_string(),
                has_changes: spec.has_changes(old_root, new_root),
                present_old: spec.is_present(old_root),
                present_new: spec.is_present(new_root),
            };
            tracing::debug!(
                section = spec.key.as_str(),
                has_changes = summary.has_changes,
                "compared section"
            );
            summary
        })
        .collect::<Vec<_>>();

    let has_changes = sections.iter().any(|s| s.has_changes);
    let findings = collect_findings(old, new, options.profile);

    DocumentDiff {
        profile: options.profile,
        has_changes,
        sections,
        findings,
    }
}

/// Detailed view of one section by key string.
///
/// Fails only when `key` is unknown or not declared by the profile.
pub fn diff_section(
    old: Option<&Document>,
    new: Option<&Document>,
    key: &str,
    side: Side,
    options: DiffOptions,
) -> DiffResult<SectionView> {
    let spec = find_section(options.profile, key)?;
    Ok(section_view(old, new, spec.key, side))
}

/// Detailed view of one section rendered for `side`.
pub fn section_view(
    old: Option<&Document>,
    new: Option<&Document>,
    key: SectionKey,
    side: Side,
) -> SectionView {
    let old = root_of(old);
    let new = root_of(new);
    let (current, other) = side.arrange(old, new);

    match key {
        SectionKey::Meta => meta_view(current, other, side),
        SectionKey::Url => url_view(current, other, side),
        SectionKey::Params => {
            let (query, path) = split_params(&records_at(current, "request.params"));
            let (other_query, other_path) = split_params(&records_at(other, "request.params"));
            SectionView::Params {
                query: reconcile(&query, &other_query, side, MatchMode::Tolerant),
                path: reconcile(&path, &other_path, side, MatchMode::Tolerant),
            }
        }
        SectionKey::Headers => SectionView::Headers {
            headers: reconcile_at(current, other, "request.headers", side, MatchMode::Tolerant),
        },
        SectionKey::Auth => SectionView::Auth {
            auth: diff_auth(object_at(old, "request.auth"), object_at(new, "request.auth"), side),
        },
        SectionKey::Body => SectionView::Body {
            body: diff_body(object_at(old, "request.body"), object_at(new, "request.body"), side),
        },
        SectionKey::Vars => SectionView::Vars {
            req: reconcile_at(current, other, "request.vars.req", side, MatchMode::Tolerant),
            res: reconcile_at(current, other, "request.vars.res", side, MatchMode::Tolerant),
        },
        SectionKey::Assertions => SectionView::Assertions {
            assertions: reconcile_at(
                current,
                other,
                "request.assertions",
                side,
                MatchMode::Strict,
            ),
        },
        SectionKey::Script => SectionView::Script {
            req: line_diff_at(current, other, "request.script.req", side),
            res: line_diff_at(current, other, "request.script.res", side),
            tests: line_diff_at(current, other, "request.tests", side),
        },
        SectionKey::Settings => SectionView::Settings {
            fields: compare_fields(
                &object_at(current, "settings").cloned().unwrap_or_default(),
                &object_at(other, "settings").cloned().unwrap_or_default(),
                side,
            ),
        },
        SectionKey::Docs => SectionView::Docs {
            docs: line_diff_at(current, other, "request.docs", side),
        },
        SectionKey::Examples => SectionView::Examples {
            examples: diff_examples(current, other, side),
        },
    }
}

fn object_at<'a>(root: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
    lookup(root, path).and_then(Value::as_object)
}

pub(crate) fn items_at<'a>(root: &'a Value, path: &str) -> &'a [Value] {
    lookup(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text_at(root: &Value, path: &str) -> String {
    lookup(root, path).map(value_text).unwrap_or_default()
}

fn records_at(root: &Value, path: &str) -> Vec<KeyValue> {
    KeyValue::list(items_at(root, path))
}

fn reconcile_at(
    current: &Value,
    other: &Value,
    path: &str,
    side: Side,
    mode: MatchMode,
) -> Vec<Reconciled<KeyValue>> {
    reconcile(&records_at(current, path), &records_at(other, path), side, mode)
}

fn line_diff_at(current: &Value, other: &Value, path: &str, side: Side) -> Vec<DiffSegment> {
    line_diff_for(&text_at(current, path), &text_at(other, path), side)
}

/// Params without a `type` are query params.
pub(crate) fn split_params(params: &[KeyValue]) -> (Vec<KeyValue>, Vec<KeyValue>) {
    params
        .iter()
        .cloned()
        .partition(|p| p.kind.as_deref() != Some("path"))
}

fn pick_fields(root: &Value, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| {
            lookup(root, key)
                .filter(|v| !v.is_null())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
}

fn meta_view(current: &Value, other: &Value, side: Side) -> SectionView {
    const FIELDS: [&str; 3] = ["name", "type", "seq"];

    let tags = |root: &Value| -> Vec<String> {
        items_at(root, "tags").iter().map(value_text).collect()
    };
    let other_tags = tags(other);

    SectionView::Meta {
        fields: compare_fields(
            &pick_fields(current, &FIELDS),
            &pick_fields(other, &FIELDS),
            side,
        ),
        name: word_diff_for(&text_at(current, "name"), &text_at(other, "name"), side),
        tags: tags(current)
            .into_iter()
            .map(|tag| {
                let status = if other_tags.contains(&tag) {
                    Status::Unchanged
                } else {
                    side.missing_status()
                };
                TagRecord { tag, status }
            })
            .collect(),
    }
}

fn effective_method(root: &Value) -> String {
    match text_at(root, "request.method") {
        method if method.is_empty() => "GET".to_string(),
        method => method,
    }
}

fn url_view(current: &Value, other: &Value, side: Side) -> SectionView {
    let method = effective_method(current);
    let status = if method == effective_method(other) {
        Status::Unchanged
    } else {
        Status::Modified
    };

    SectionView::Url {
        method: FieldRecord {
            key: "method".to_string(),
            value: method,
            status,
        },
        url: word_diff_for(
            &text_at(current, "request.url"),
            &text_at(other, "request.url"),
            side,
        ),
    }
}

pub(crate) fn example_key(example: &Value, idx: usize) -> String {
    match lookup(example, "name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("example-{idx}"),
    }
}

fn opt_text_at(root: &Value, path: &str) -> Option<String> {
    lookup(root, path).filter(|v| !v.is_null()).map(value_text)
}

fn changed(current: &Value, other: Option<&Value>, path: &str) -> bool {
    lookup(current, path) != other.and_then(|o| lookup(o, path))
}

/// Display text of an example body: the first non-empty of the text modes,
/// then the GraphQL query, then a generic `content` field.
pub fn body_content(body: Option<&Value>) -> String {
    let Some(body) = body else {
        return String::new();
    };
    ["json", "text", "xml", "sparql", "graphql.query", "content"]
        .iter()
        .filter_map(|path| lookup(body, path).and_then(Value::as_str))
        .find(|content| !content.is_empty())
        .unwrap_or("")
        .to_string()
}

fn example_body(
    current: Option<&Value>,
    other: Option<&Value>,
    side: Side,
) -> Option<ExampleBody> {
    let body = current.filter(|b| !b.is_null())?;
    let content = body_content(Some(body));
    if content.is_empty() {
        return None;
    }

    let kind = ["mode", "type"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|k| !k.is_empty())
        .unwrap_or("text")
        .to_string();

    Some(ExampleBody {
        kind,
        segments: line_diff_for(&content, &body_content(other), side),
    })
}

fn example_records(
    current: &Value,
    other: Option<&Value>,
    path: &str,
    side: Side,
) -> Vec<Reconciled<KeyValue>> {
    let other = other.map_or(&[][..], |o| items_at(o, path));
    reconcile(
        &KeyValue::list(items_at(current, path)),
        &KeyValue::list(other),
        side,
        MatchMode::Tolerant,
    )
}

fn example_request(request: &Value, other: Option<&Value>, side: Side) -> ExampleRequest {
    let params = KeyValue::list(items_at(request, "params"));
    let other_params = KeyValue::list(other.map_or(&[][..], |o| items_at(o, "params")));
    let of_type = |records: &[KeyValue], kind: &str| -> Vec<KeyValue> {
        records
            .iter()
            .filter(|p| p.kind.as_deref() == Some(kind))
            .cloned()
            .collect()
    };

    ExampleRequest {
        method: opt_text_at(request, "method").map(|m| m.to_uppercase()),
        method_changed: changed(request, other, "method"),
        url: opt_text_at(request, "url"),
        url_changed: changed(request, other, "url"),
        query_params: reconcile(
            &of_type(&params, "query"),
            &of_type(&other_params, "query"),
            side,
            MatchMode::Tolerant,
        ),
        path_params: reconcile(
            &of_type(&params, "path"),
            &of_type(&other_params, "path"),
            side,
            MatchMode::Tolerant,
        ),
        headers: example_records(request, other, "headers", side),
        body: example_body(
            lookup(request, "body"),
            other.and_then(|o| lookup(o, "body")),
            side,
        ),
    }
}

fn example_response(response: &Value, other: Option<&Value>, side: Side) -> ExampleResponse {
    ExampleResponse {
        status: opt_text_at(response, "status"),
        status_changed: changed(response, other, "status"),
        status_text: opt_text_at(response, "statusText"),
        status_text_changed: changed(response, other, "statusText"),
        headers: example_records(response, other, "headers", side),
        body: example_body(
            lookup(response, "body"),
            other.and_then(|o| lookup(o, "body")),
            side,
        ),
    }
}

/// Match examples by name (position when unnamed); status is deep equality.
fn diff_examples(current: &Value, other: &Value, side: Side) -> Vec<ExampleDiff> {
    let mut by_key: HashMap<String, &Value> = HashMap::new();
    for (idx, example) in items_at(other, "examples").iter().enumerate() {
        by_key.insert(example_key(example, idx), example);
    }

    items_at(current, "examples")
        .iter()
        .enumerate()
        .map(|(idx, example)| {
            let key = example_key(example, idx);
            let counterpart = by_key.get(&key).copied();
            let status = match counterpart {
                None => side.missing_status(),
                Some(o) if o != example => Status::Modified,
                Some(_) => Status::Unchanged,
            };
            let part = |name: &str| lookup(example, name).filter(|v| v.is_object());
            let other_part = |name: &str| counterpart.and_then(|o| lookup(o, name));

            ExampleDiff {
                name: opt_text_at(example, "name"),
                description: opt_text_at(example, "description").filter(|d| !d.is_empty()),
                status,
                request: part("request")
                    .map(|request| example_request(request, other_part("request"), side)),
                response: part("response")
                    .map(|response| example_response(response, other_part("response"), side)),
                key,
            }
        })
        .collect()
}
