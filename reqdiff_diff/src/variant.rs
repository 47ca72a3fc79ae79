use reqdiff_doc::{FileEntry, KeyValue, Message, is_empty_value, value_text};
use serde_json::{Map, Value};

use crate::engine::line_diff_for;
use crate::model::{
    AuthDiff, BodyContent, BodyDiff, FieldRecord, MessageDiff, ModeDiff, Side, Status,
    VariantDiff, VariantSection,
};
use crate::reconcile::{MatchMode, reconcile, reconcile_files};

/// Mode value meaning "no variant selected".
const NONE_MODE: &str = "none";

/// Value shape a variant expects; other shapes are treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantShape {
    Text,
    Object,
    List,
}

impl VariantShape {
    fn accept(self, value: Option<&Value>) -> Option<&Value> {
        value.filter(|v| match self {
            // Structured text bodies (a YAML mapping under `json`) diff as compact JSON.
            VariantShape::Text => !v.is_null(),
            VariantShape::Object => v.is_object(),
            VariantShape::List => v.is_array(),
        })
    }
}

/// Comparator for one variant: `(current, other, side)`; `current` is never empty.
pub type VariantComparator<C> = fn(&Value, Option<&Value>, Side) -> C;

/// Dispatch-table entry keyed by discriminant string.
pub struct VariantSpec<C> {
    pub kind: &'static str,
    pub label: &'static str,
    pub shape: VariantShape,
    pub compare: VariantComparator<C>,
}

const fn variant<C>(
    kind: &'static str,
    label: &'static str,
    shape: VariantShape,
    compare: VariantComparator<C>,
) -> VariantSpec<C> {
    VariantSpec {
        kind,
        label,
        shape,
        compare,
    }
}

/// Body variants in display order.
pub const BODY_VARIANTS: &[VariantSpec<BodyContent>] = &[
    variant("json", "JSON", VariantShape::Text, compare_text_body),
    variant("text", "Text", VariantShape::Text, compare_text_body),
    variant("xml", "XML", VariantShape::Text, compare_text_body),
    variant("sparql", "SPARQL", VariantShape::Text, compare_text_body),
    variant("graphql", "GraphQL", VariantShape::Object, compare_graphql_body),
    variant("formUrlEncoded", "Form URL Encoded", VariantShape::List, compare_form_body),
    variant("multipartForm", "Multipart Form", VariantShape::List, compare_form_body),
    variant("file", "File", VariantShape::List, compare_file_body),
    variant("grpc", "gRPC", VariantShape::List, compare_message_body),
    variant("ws", "WebSocket", VariantShape::List, compare_message_body),
];

/// Auth schemes; each is a flat field set.
pub const AUTH_VARIANTS: &[VariantSpec<Vec<FieldRecord>>] = &[
    variant("awsv4", "AWS Sig v4", VariantShape::Object, compare_auth_fields),
    variant("basic", "Basic Auth", VariantShape::Object, compare_auth_fields),
    variant("bearer", "Bearer Token", VariantShape::Object, compare_auth_fields),
    variant("digest", "Digest Auth", VariantShape::Object, compare_auth_fields),
    variant("ntlm", "NTLM", VariantShape::Object, compare_auth_fields),
    variant("oauth2", "OAuth 2.0", VariantShape::Object, compare_auth_fields),
    variant("wsse", "WSSE", VariantShape::Object, compare_auth_fields),
    variant("apikey", "API Key", VariantShape::Object, compare_auth_fields),
];

fn mode_of(section: Option<&Map<String, Value>>) -> Option<&str> {
    section?.get("mode")?.as_str()
}

fn variant_value<'a>(section: Option<&'a Map<String, Value>>, kind: &str) -> Option<&'a Value> {
    section?.get(kind)
}

/// Compare discriminants; the status describes the old → new transition.
pub fn mode_diff(old_mode: Option<&str>, new_mode: Option<&str>, side: Side) -> ModeDiff {
    let status = match (old_mode, new_mode) {
        (old, new) if old == new => Status::Unchanged,
        (None, Some(_)) => Status::Added,
        (Some(_), None) => Status::Deleted,
        _ => Status::Modified,
    };
    let (current, other) = side.arrange(old_mode, new_mode);
    ModeDiff {
        current: current.map(str::to_string),
        other: other.map(str::to_string),
        status,
    }
}

fn is_selected(mode: Option<&str>) -> bool {
    mode.is_some_and(|m| !m.is_empty() && m != NONE_MODE)
}

/// Resolve the relevant variants of a discriminated section and compare each.
///
/// Relevant variants are the declared modes on either side (`none` excluded);
/// sections without any declared mode fall back to every known variant key
/// present on either side. Variants empty on the rendered side are skipped.
pub fn resolve_variants<C>(
    old: Option<&Map<String, Value>>,
    new: Option<&Map<String, Value>>,
    side: Side,
    table: &[VariantSpec<C>],
) -> VariantDiff<C> {
    let old_mode = mode_of(old);
    let new_mode = mode_of(new);
    let mode = mode_diff(old_mode, new_mode, side);

    let (current, other) = side.arrange(old, new);
    let (current_mode, other_mode) = side.arrange(old_mode, new_mode);
    let declared: Vec<&str> = [current_mode, other_mode]
        .into_iter()
        .filter(|m| is_selected(*m))
        .flatten()
        .collect();

    let sections = table
        .iter()
        .filter(|spec| {
            if declared.is_empty() {
                [current, other]
                    .into_iter()
                    .any(|s| variant_value(s, spec.kind).is_some_and(|v| !v.is_null()))
            } else {
                declared.contains(&spec.kind)
            }
        })
        .filter_map(|spec| {
            let current_value = spec.shape.accept(variant_value(current, spec.kind))?;
            if is_empty_value(Some(current_value)) {
                return None;
            }
            let other_value = spec.shape.accept(variant_value(other, spec.kind));

            Some(VariantSection {
                kind: spec.kind.to_string(),
                label: spec.label.to_string(),
                status: variant_status(current_value, other_value, side),
                content: (spec.compare)(current_value, other_value, side),
            })
        })
        .collect();

    VariantDiff { mode, sections }
}

fn variant_status(current: &Value, other: Option<&Value>, side: Side) -> Status {
    match other {
        _ if is_empty_value(other) => side.missing_status(),
        Some(other) if other != current => Status::Modified,
        _ => Status::Unchanged,
    }
}

/// Key-by-key comparison of two flat objects, listing the rendered side's fields.
pub fn compare_fields(
    current: &Map<String, Value>,
    other: &Map<String, Value>,
    side: Side,
) -> Vec<FieldRecord> {
    current
        .iter()
        .map(|(key, value)| {
            let status = match other.get(key) {
                None => side.missing_status(),
                Some(counterpart) if counterpart != value => Status::Modified,
                Some(_) => Status::Unchanged,
            };
            FieldRecord {
                key: key.clone(),
                value: value_text(value),
                status,
            }
        })
        .collect()
}

fn as_object(value: Option<&Value>) -> Map<String, Value> {
    value
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn as_items(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text_of(value: Option<&Value>) -> String {
    value.map(value_text).unwrap_or_default()
}

fn compare_auth_fields(current: &Value, other: Option<&Value>, side: Side) -> Vec<FieldRecord> {
    compare_fields(&as_object(Some(current)), &as_object(other), side)
}

fn compare_text_body(current: &Value, other: Option<&Value>, side: Side) -> BodyContent {
    BodyContent::Text {
        segments: line_diff_for(&value_text(current), &text_of(other), side),
    }
}

fn compare_graphql_body(current: &Value, other: Option<&Value>, side: Side) -> BodyContent {
    let part = |value: Option<&Value>, key: &str| text_of(value.and_then(|v| v.get(key)));
    BodyContent::Graphql {
        query: line_diff_for(&part(Some(current), "query"), &part(other, "query"), side),
        variables: line_diff_for(
            &part(Some(current), "variables"),
            &part(other, "variables"),
            side,
        ),
    }
}

fn compare_form_body(current: &Value, other: Option<&Value>, side: Side) -> BodyContent {
    let current = KeyValue::list(as_items(Some(current)));
    let other = KeyValue::list(as_items(other));
    BodyContent::Form {
        fields: reconcile(&current, &other, side, MatchMode::Strict),
    }
}

fn compare_file_body(current: &Value, other: Option<&Value>, side: Side) -> BodyContent {
    let current = FileEntry::list(as_items(Some(current)));
    let other = FileEntry::list(as_items(other));
    BodyContent::Files {
        files: reconcile_files(&current, &other, side),
    }
}

fn compare_message_body(current: &Value, other: Option<&Value>, side: Side) -> BodyContent {
    let current = Message::list(as_items(Some(current)));
    let other = Message::list(as_items(other));
    BodyContent::Messages {
        messages: diff_messages(&current, &other, side),
    }
}

/// Pair messages by index and line-diff each message's content.
pub fn diff_messages(current: &[Message], other: &[Message], side: Side) -> Vec<MessageDiff> {
    current
        .iter()
        .enumerate()
        .map(|(index, msg)| {
            let counterpart = other.get(index);
            let status = match counterpart {
                None => side.missing_status(),
                Some(o) if o.name != msg.name || o.kind != msg.kind => Status::Modified,
                Some(_) => Status::Unchanged,
            };
            let other_content = counterpart.map_or("", |o| o.content.as_str());
            MessageDiff {
                index,
                name: msg.name.clone(),
                kind: msg.kind.clone(),
                status,
                content: line_diff_for(&msg.content, other_content, side),
            }
        })
        .collect()
}

/// Variant diff of `request.auth`.
pub fn diff_auth(
    old: Option<&Map<String, Value>>,
    new: Option<&Map<String, Value>>,
    side: Side,
) -> AuthDiff {
    resolve_variants(old, new, side, AUTH_VARIANTS)
}

/// Variant diff of `request.body`.
pub fn diff_body(
    old: Option<&Map<String, Value>>,
    new: Option<&Map<String, Value>>,
    side: Side,
) -> BodyDiff {
    resolve_variants(old, new, side, BODY_VARIANTS)
}
