use reqdiff_doc::{Document, parse_json, parse_yaml};
use serde_json::json;

use super::{
    BodyContent, DiffCache, DiffError, DiffOptions, DiffSegment, FindingLevel, SectionKey,
    SectionProfile, SectionView, Side, Status, align, diff_documents, diff_section,
    line_diff_new, line_diff_old, section_view, tokenize_words, word_diff_new, word_diff_old,
};

fn doc(value: serde_json::Value) -> Document {
    Document::from_value(value)
}

fn seg(text: &str, status: Status) -> DiffSegment {
    DiffSegment::new(text, status)
}

fn statuses<T>(records: &[super::Reconciled<T>]) -> Vec<Status> {
    records.iter().map(|r| r.status).collect()
}

#[test]
fn word_tokens_keep_url_structure() {
    assert_eq!(
        tokenize_words("https://api.test/v1?x=1"),
        vec![
            "https", ":", "/", "/", "api", ".", "test", "/", "v1", "?", "x", "=", "1"
        ]
    );
    assert_eq!(tokenize_words("a  b"), vec!["a", " ", " ", "b"]);
    assert!(tokenize_words("").is_empty());
}

#[test]
fn line_diff_marks_removed_line() {
    let old = "line1\nline2\nline3";
    let new = "line1\nline3";

    assert_eq!(
        line_diff_old(old, new),
        vec![
            seg("line1", Status::Unchanged),
            seg("line2", Status::Deleted),
            seg("line3", Status::Unchanged),
        ]
    );
    assert_eq!(
        line_diff_new(old, new),
        vec![seg("line1", Status::Unchanged), seg("line3", Status::Unchanged)]
    );
}

#[test]
fn empty_side_renders_nothing_or_everything() {
    assert!(line_diff_old("", "a\nb").is_empty());
    assert_eq!(
        line_diff_new("", "a\nb"),
        vec![seg("a", Status::Added), seg("b", Status::Added)]
    );
    assert_eq!(
        line_diff_old("a\nb", ""),
        vec![seg("a", Status::Deleted), seg("b", Status::Deleted)]
    );
    assert!(line_diff_new("a\nb", "").is_empty());
}

#[test]
fn equal_inputs_are_one_unchanged_view() {
    assert_eq!(line_diff_old("", ""), vec![seg("", Status::Unchanged)]);
    assert_eq!(
        word_diff_new("same text", "same text"),
        vec![seg("same text", Status::Unchanged)]
    );
}

#[test]
fn word_diff_merges_runs() {
    assert_eq!(
        word_diff_old("hello world", "hello"),
        vec![seg("hello", Status::Unchanged), seg(" world", Status::Deleted)]
    );
    assert_eq!(
        word_diff_new("https://api.test/users", "https://api.test/users/1"),
        vec![
            seg("https://api.test/users", Status::Unchanged),
            seg("/1", Status::Added),
        ]
    );
}

#[test]
fn old_view_never_adds_and_new_view_never_deletes() {
    let old = "GET /users?page=1&limit=10";
    let new = "GET /accounts?page=2&limit=10&sort=asc";

    assert!(
        word_diff_old(old, new)
            .iter()
            .all(|s| s.status != Status::Added)
    );
    assert!(
        word_diff_new(old, new)
            .iter()
            .all(|s| s.status != Status::Deleted)
    );
}

#[test]
fn alignment_tie_moves_new_index_first() {
    assert_eq!(align(&["a", "b"], &["b", "a"]), vec![(1, 0)]);
    assert_eq!(align(&["x", "y", "z"], &["x", "z"]), vec![(0, 0), (2, 1)]);
    assert!(align::<&str>(&[], &["a"]).is_empty());
}

#[test]
fn duplicate_headers_pair_exact_then_by_key() {
    let old = doc(json!({"request": {"headers": [
        {"name": "X", "value": "1"},
        {"name": "X", "value": "2"}
    ]}}));
    let new = doc(json!({"request": {"headers": [
        {"name": "X", "value": "1"},
        {"name": "X", "value": "3"}
    ]}}));

    let SectionView::Headers { headers } =
        section_view(Some(&old), Some(&new), SectionKey::Headers, Side::New)
    else {
        panic!("expected headers view");
    };
    assert_eq!(statuses(&headers), vec![Status::Unchanged, Status::Modified]);
}

#[test]
fn disabled_header_counts_as_modified() {
    let old = doc(json!({"request": {"headers": [{"name": "A", "value": "1"}]}}));
    let new = doc(json!({"request": {"headers": [
        {"name": "A", "value": "1", "enabled": false},
        {"name": "B", "value": "2"}
    ]}}));

    let SectionView::Headers { headers } =
        section_view(Some(&old), Some(&new), SectionKey::Headers, Side::New)
    else {
        panic!("expected headers view");
    };
    assert_eq!(statuses(&headers), vec![Status::Modified, Status::Added]);

    let SectionView::Headers { headers } =
        section_view(Some(&old), Some(&new), SectionKey::Headers, Side::Old)
    else {
        panic!("expected headers view");
    };
    assert_eq!(statuses(&headers), vec![Status::Modified]);
}

#[test]
fn auth_mode_switch_reports_one_section_per_side() {
    let old = doc(json!({"request": {"auth": {"mode": "basic", "basic": {"username": "u"}}}}));
    let new = doc(json!({"request": {"auth": {"mode": "bearer", "bearer": {"token": "t"}}}}));

    let SectionView::Auth { auth } =
        section_view(Some(&old), Some(&new), SectionKey::Auth, Side::Old)
    else {
        panic!("expected auth view");
    };
    assert_eq!(auth.mode.status, Status::Modified);
    assert_eq!(auth.mode.current.as_deref(), Some("basic"));
    assert_eq!(auth.sections.len(), 1);
    assert_eq!(auth.sections[0].kind, "basic");
    assert_eq!(auth.sections[0].status, Status::Deleted);
    assert_eq!(auth.sections[0].content[0].key, "username");
    assert_eq!(auth.sections[0].content[0].status, Status::Deleted);

    let SectionView::Auth { auth } =
        section_view(Some(&old), Some(&new), SectionKey::Auth, Side::New)
    else {
        panic!("expected auth view");
    };
    assert_eq!(auth.mode.status, Status::Modified);
    assert_eq!(auth.sections.len(), 1);
    assert_eq!(auth.sections[0].kind, "bearer");
    assert_eq!(auth.sections[0].status, Status::Added);
}

#[test]
fn auth_fields_render_booleans_and_nulls() {
    let old = doc(json!({"request": {"auth": {"mode": "oauth2", "oauth2": {
        "pkce": true, "scope": null, "clientId": "a"
    }}}}));
    let new = doc(json!({"request": {"auth": {"mode": "oauth2", "oauth2": {
        "pkce": false, "scope": null, "clientId": "a"
    }}}}));

    let SectionView::Auth { auth } =
        section_view(Some(&old), Some(&new), SectionKey::Auth, Side::New)
    else {
        panic!("expected auth view");
    };
    assert_eq!(auth.mode.status, Status::Unchanged);
    let fields = &auth.sections[0].content;
    let rendered: Vec<(&str, &str, Status)> = fields
        .iter()
        .map(|f| (f.key.as_str(), f.value.as_str(), f.status))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("clientId", "a", Status::Unchanged),
            ("pkce", "false", Status::Modified),
            ("scope", "", Status::Unchanged),
        ]
    );
}

#[test]
fn non_object_auth_variant_is_treated_as_empty() {
    let old = doc(json!({"request": {"auth": {"mode": "basic", "basic": "oops"}}}));
    let new = doc(json!({"request": {"auth": {"mode": "basic", "basic": {"username": "u"}}}}));

    let SectionView::Auth { auth } =
        section_view(Some(&old), Some(&new), SectionKey::Auth, Side::New)
    else {
        panic!("expected auth view");
    };
    assert_eq!(auth.sections[0].status, Status::Added);
    assert_eq!(auth.sections[0].content[0].status, Status::Added);
}

#[test]
fn text_body_uses_line_diff() {
    let old = doc(json!({"request": {"body": {"mode": "json", "json": "{\n  \"a\": 1\n}"}}}));
    let new = doc(json!({"request": {"body": {"mode": "json", "json": "{\n  \"a\": 2\n}"}}}));

    let SectionView::Body { body } =
        section_view(Some(&old), Some(&new), SectionKey::Body, Side::New)
    else {
        panic!("expected body view");
    };
    assert_eq!(body.mode.status, Status::Unchanged);
    assert_eq!(body.sections.len(), 1);
    assert_eq!(body.sections[0].status, Status::Modified);
    assert_eq!(
        body.sections[0].content,
        BodyContent::Text {
            segments: vec![
                seg("{", Status::Unchanged),
                seg("  \"a\": 2", Status::Added),
                seg("}", Status::Unchanged),
            ]
        }
    );
}

#[test]
fn legacy_body_without_mode_uses_present_variants() {
    let old = doc(json!({"request": {"body": {"text": "x"}}}));
    let new = doc(json!({"request": {"body": {"text": "y", "xml": "<a/>"}}}));

    let SectionView::Body { body } =
        section_view(Some(&old), Some(&new), SectionKey::Body, Side::New)
    else {
        panic!("expected body view");
    };
    let kinds: Vec<&str> = body.sections.iter().map(|s| s.kind.as_str()).collect();
    assert_eq!(kinds, vec!["text", "xml"]);
    assert_eq!(body.sections[1].status, Status::Added);
}

#[test]
fn form_fields_match_strictly_by_name() {
    let old = doc(json!({"request": {"body": {"mode": "formUrlEncoded",
        "formUrlEncoded": [{"name": "a", "value": "1"}]}}}));
    let new = doc(json!({"request": {"body": {"mode": "formUrlEncoded",
        "formUrlEncoded": [{"name": "a", "value": "2"}, {"name": "b", "value": "3"}]}}}));

    let SectionView::Body { body } =
        section_view(Some(&old), Some(&new), SectionKey::Body, Side::New)
    else {
        panic!("expected body view");
    };
    let BodyContent::Form { fields } = &body.sections[0].content else {
        panic!("expected form content");
    };
    assert_eq!(statuses(fields), vec![Status::Modified, Status::Added]);
}

#[test]
fn file_body_pairs_by_path() {
    let old = doc(json!({"request": {"body": {"mode": "file", "file": [
        {"filePath": "/tmp/a.json", "contentType": "application/json"}
    ]}}}));
    let new = doc(json!({"request": {"body": {"mode": "file", "file": [
        {"filePath": "/tmp/a.json", "contentType": "text/plain"},
        {"filePath": "/tmp/b.json", "contentType": "application/json"}
    ]}}}));

    let SectionView::Body { body } =
        section_view(Some(&old), Some(&new), SectionKey::Body, Side::New)
    else {
        panic!("expected body view");
    };
    let BodyContent::Files { files } = &body.sections[0].content else {
        panic!("expected file content");
    };
    assert_eq!(statuses(files), vec![Status::Modified, Status::Added]);
}

#[test]
fn message_bodies_pair_by_index() {
    let old = doc(json!({"request": {"body": {"mode": "grpc", "grpc": [
        {"name": "m", "content": "a"}
    ]}}}));
    let new = doc(json!({"request": {"body": {"mode": "grpc", "grpc": [
        {"name": "m", "content": "b"},
        {"name": "n", "content": "c"}
    ]}}}));

    let SectionView::Body { body } =
        section_view(Some(&old), Some(&new), SectionKey::Body, Side::New)
    else {
        panic!("expected body view");
    };
    let BodyContent::Messages { messages } = &body.sections[0].content else {
        panic!("expected message content");
    };
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].status, Status::Unchanged);
    assert_eq!(messages[0].content, vec![seg("b", Status::Added)]);
    assert_eq!(messages[1].status, Status::Added);
    assert_eq!(messages[1].content, vec![seg("c", Status::Added)]);
}

#[test]
fn params_split_by_placement() {
    let old = doc(json!({"request": {"params": [
        {"name": "page", "value": "1"},
        {"name": "id", "value": "7", "type": "path"}
    ]}}));
    let new = doc(json!({"request": {"params": [
        {"name": "page", "value": "2", "type": "query"},
        {"name": "id", "value": "7", "type": "path"}
    ]}}));

    let SectionView::Params { query, path } =
        section_view(Some(&old), Some(&new), SectionKey::Params, Side::New)
    else {
        panic!("expected params view");
    };
    assert_eq!(statuses(&query), vec![Status::Modified]);
    assert_eq!(statuses(&path), vec![Status::Unchanged]);
}

#[test]
fn url_method_defaults_to_get() {
    let old = doc(json!({"request": {"url": "https://api.test/a"}}));
    let new = doc(json!({"request": {"url": "https://api.test/a", "method": "GET"}}));

    let SectionView::Url { method, url } =
        section_view(Some(&old), Some(&new), SectionKey::Url, Side::Old)
    else {
        panic!("expected url view");
    };
    assert_eq!(method.value, "GET");
    assert_eq!(method.status, Status::Unchanged);
    assert_eq!(url, vec![seg("https://api.test/a", Status::Unchanged)]);
}

#[test]
fn meta_tags_are_set_membership() {
    let old = doc(json!({"name": "List users", "tags": ["a", "b"]}));
    let new = doc(json!({"name": "List all users", "tags": ["b", "c"]}));

    let SectionView::Meta { tags, name, .. } =
        section_view(Some(&old), Some(&new), SectionKey::Meta, Side::New)
    else {
        panic!("expected meta view");
    };
    let tag_status: Vec<(&str, Status)> =
        tags.iter().map(|t| (t.tag.as_str(), t.status)).collect();
    assert_eq!(tag_status, vec![("b", Status::Unchanged), ("c", Status::Added)]);
    assert_eq!(
        name,
        vec![
            seg("List", Status::Unchanged),
            seg(" all", Status::Added),
            seg(" users", Status::Unchanged),
        ]
    );
}

#[test]
fn settings_compare_flat_fields() {
    let old = doc(json!({"settings": {"encodeUrl": true}}));
    let new = doc(json!({"settings": {"encodeUrl": false, "timeout": 0}}));

    let SectionView::Settings { fields } =
        section_view(Some(&old), Some(&new), SectionKey::Settings, Side::New)
    else {
        panic!("expected settings view");
    };
    let rendered: Vec<(&str, &str, Status)> = fields
        .iter()
        .map(|f| (f.key.as_str(), f.value.as_str(), f.status))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("encodeUrl", "false", Status::Modified),
            ("timeout", "0", Status::Added),
        ]
    );
}

#[test]
fn examples_match_by_name_then_position() {
    let old = doc(json!({"examples": [
        {"name": "ok", "response": {"status": 200, "statusText": "OK"}}
    ]}));
    let new = doc(json!({"examples": [
        {"name": "ok", "response": {"status": 201, "statusText": "OK"}},
        {"request": {"method": "post", "url": "https://api.test"}}
    ]}));

    let SectionView::Examples { examples } =
        section_view(Some(&old), Some(&new), SectionKey::Examples, Side::New)
    else {
        panic!("expected examples view");
    };
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].key, "ok");
    assert_eq!(examples[0].status, Status::Modified);
    let response = examples[0].response.as_ref().expect("response");
    assert_eq!(response.status.as_deref(), Some("201"));
    assert!(response.status_changed);
    assert!(!response.status_text_changed);

    assert_eq!(examples[1].key, "example-1");
    assert_eq!(examples[1].status, Status::Added);
    let request = examples[1].request.as_ref().expect("request");
    assert_eq!(request.method.as_deref(), Some("POST"));
}

#[test]
fn summary_flags_only_changed_sections() {
    let old = doc(json!({"name": "a", "request": {"url": "u", "docs": "x"}}));
    let new = doc(json!({"name": "a", "request": {"url": "u", "docs": "y"}}));

    let diff = diff_documents(Some(&old), Some(&new), DiffOptions::default());
    assert!(diff.has_changes);
    assert_eq!(diff.changed_sections(), vec![SectionKey::Docs]);
    assert_eq!(diff.sections.len(), SectionKey::ALL.len());
    assert!(diff.findings.is_empty());
}

#[test]
fn absent_side_reports_presence() {
    let new = doc(json!({"request": {"url": "https://api.test", "headers": [{"name": "A"}]}}));

    let diff = diff_documents(None, Some(&new), DiffOptions::default());
    let headers = diff.section(SectionKey::Headers).expect("headers summary");
    assert!(headers.has_changes);
    assert!(!headers.present_old);
    assert!(headers.present_new);

    let SectionView::Headers { headers } =
        section_view(None, Some(&new), SectionKey::Headers, Side::New)
    else {
        panic!("expected headers view");
    };
    assert_eq!(statuses(&headers), vec![Status::Added]);
}

#[test]
fn non_object_documents_have_no_sections() {
    let old = parse_json("[1, 2]");
    let new = parse_json("{ broken");

    let diff = diff_documents(Some(&old), Some(&new), DiffOptions::default());
    assert!(diff.sections.iter().all(|s| !s.present_old && !s.present_new));
    assert!(!diff.has_changes);

    let codes: Vec<(&str, FindingLevel)> = diff
        .findings
        .iter()
        .map(|f| (f.code.as_str(), f.level))
        .collect();
    assert!(codes.contains(&("non_object_document", FindingLevel::Info)));
    assert!(codes.contains(&("unparsed_document", FindingLevel::Warning)));
}

#[test]
fn duplicate_keys_on_both_sides_are_flagged() {
    let old = doc(json!({"request": {"headers": [
        {"name": "X", "value": "1"}, {"name": "X", "value": "2"}
    ]}}));
    let new = doc(json!({"request": {"headers": [
        {"name": "X", "value": "1"}, {"name": "X", "value": "3"}
    ]}}));

    let diff = diff_documents(Some(&old), Some(&new), DiffOptions::default());
    assert_eq!(diff.findings.len(), 1);
    assert_eq!(diff.findings[0].code, "ambiguous_duplicate_key");
    assert_eq!(diff.findings[0].section, Some(SectionKey::Headers));
}

#[test]
fn openapi_profile_ignores_unselected_auth() {
    let old = doc(json!({"request": {"auth": {"mode": "none"}}}));
    let options = DiffOptions::default().with_profile(SectionProfile::OpenApi);

    let diff = diff_documents(Some(&old), Some(&old), options);
    let auth = diff.section(SectionKey::Auth).expect("auth summary");
    assert!(!auth.present_old);
    assert!(diff.section(SectionKey::Meta).is_none());

    let git = diff_documents(Some(&old), Some(&old), DiffOptions::default());
    assert!(git.section(SectionKey::Auth).expect("auth summary").present_old);
}

#[test]
fn unknown_or_undeclared_sections_fail() {
    let empty = doc(json!({}));
    let err = diff_section(
        Some(&empty),
        Some(&empty),
        "nope",
        Side::Old,
        DiffOptions::default(),
    )
    .expect_err("unknown key");
    assert!(matches!(err, DiffError::UnknownSection(key) if key == "nope"));

    let err = diff_section(
        Some(&empty),
        Some(&empty),
        "meta",
        Side::Old,
        DiffOptions::new(SectionProfile::OpenApi),
    )
    .expect_err("meta is git-only");
    assert!(matches!(
        err,
        DiffError::SectionNotInProfile {
            key: SectionKey::Meta,
            ..
        }
    ));
}

#[test]
fn identical_documents_are_all_unchanged() {
    let request = doc(json!({
        "name": "Create user",
        "tags": ["users"],
        "request": {
            "method": "POST",
            "url": "https://api.test/users",
            "headers": [{"name": "Accept", "value": "application/json"}],
            "auth": {"mode": "bearer", "bearer": {"token": "t"}},
            "body": {"mode": "json", "json": "{}"},
            "script": {"req": "console.log(1)"}
        }
    }));

    let diff = diff_documents(Some(&request), Some(&request), DiffOptions::default());
    assert!(!diff.has_changes);

    for key in SectionKey::ALL {
        for side in [Side::Old, Side::New] {
            let view = section_view(Some(&request), Some(&request), key, side);
            let json = serde_json::to_value(&view).expect("serialize view");
            for status in ["added", "deleted", "modified"] {
                assert!(
                    !json.to_string().contains(&format!("\"status\":\"{status}\"")),
                    "{key} {side:?} contains {status}"
                );
            }
        }
    }
}

#[test]
fn cache_memoizes_per_section_and_side() {
    let old = doc(json!({"request": {"url": "a"}}));
    let new = doc(json!({"request": {"url": "b"}}));
    let mut cache = DiffCache::new();

    let first = cache
        .get_or_compute(Some(&old), Some(&new), SectionKey::Url, Side::Old)
        .clone();
    let again = cache
        .get_or_compute(Some(&old), Some(&new), SectionKey::Url, Side::Old)
        .clone();
    assert_eq!(first, again);
    assert_eq!(cache.len(), 1);

    cache.get_or_compute(Some(&old), Some(&new), SectionKey::Url, Side::New);
    cache.get_or_compute(Some(&old), None, SectionKey::Url, Side::New);
    assert_eq!(cache.len(), 3);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn assertions_match_strictly_with_last_record_winning() {
    let old = doc(json!({"request": {"assertions": [
        {"name": "res.status", "value": "eq 200"},
        {"name": "res.status", "value": "eq 201"}
    ]}}));
    let new = doc(json!({"request": {"assertions": [
        {"name": "res.status", "value": "eq 201"},
        {"name": "res.body.id", "value": "isNumber"}
    ]}}));

    let SectionView::Assertions { assertions } =
        section_view(Some(&old), Some(&new), SectionKey::Assertions, Side::Old)
    else {
        panic!("expected assertions view");
    };
    assert_eq!(statuses(&assertions), vec![Status::Modified, Status::Unchanged]);

    let SectionView::Assertions { assertions } =
        section_view(Some(&old), Some(&new), SectionKey::Assertions, Side::New)
    else {
        panic!("expected assertions view");
    };
    assert_eq!(statuses(&assertions), vec![Status::Unchanged, Status::Added]);

    let diff = diff_documents(Some(&old), Some(&new), DiffOptions::default());
    assert_eq!(diff.changed_sections(), vec![SectionKey::Assertions]);
    assert!(diff.findings.is_empty());
}

#[test]
fn form_fields_with_repeated_names_compare_against_last() {
    let old = doc(json!({"request": {"body": {"mode": "multipartForm", "multipartForm": [
        {"name": "a", "value": "1"},
        {"name": "a", "value": "2"}
    ]}}}));
    let new = doc(json!({"request": {"body": {"mode": "multipartForm", "multipartForm": [
        {"name": "a", "value": "2"}
    ]}}}));

    let SectionView::Body { body } =
        section_view(Some(&old), Some(&new), SectionKey::Body, Side::Old)
    else {
        panic!("expected body view");
    };
    let BodyContent::Form { fields } = &body.sections[0].content else {
        panic!("expected form content");
    };
    assert_eq!(statuses(fields), vec![Status::Modified, Status::Unchanged]);
}

#[test]
fn structured_text_body_diffs_as_compact_json() {
    let old = parse_yaml("request:\n  body:\n    mode: json\n    json:\n      a: 1\n");
    let new = parse_yaml("request:\n  body:\n    mode: json\n    json:\n      a: 2\n");

    let SectionView::Body { body } =
        section_view(Some(&old), Some(&new), SectionKey::Body, Side::New)
    else {
        panic!("expected body view");
    };
    assert_eq!(body.sections.len(), 1);
    assert_eq!(body.sections[0].status, Status::Modified);
    assert_eq!(
        body.sections[0].content,
        BodyContent::Text {
            segments: vec![seg("{\"a\":2}", Status::Added)]
        }
    );
}

#[test]
fn same_name_in_query_and_path_is_not_ambiguous() {
    let request = doc(json!({"request": {"params": [
        {"name": "id", "value": "1", "type": "query"},
        {"name": "id", "value": "2", "type": "path"}
    ]}}));

    let diff = diff_documents(Some(&request), Some(&request), DiffOptions::default());
    assert!(diff.findings.is_empty());

    let repeated = doc(json!({"request": {"params": [
        {"name": "id", "value": "1"},
        {"name": "id", "value": "2"},
        {"name": "id", "value": "3", "type": "path"}
    ]}}));
    let diff = diff_documents(Some(&repeated), Some(&repeated), DiffOptions::default());
    assert_eq!(diff.findings.len(), 1);
    assert_eq!(diff.findings[0].section, Some(SectionKey::Params));
    assert!(diff.findings[0].message.contains("request.params (query)"));
}

#[test]
fn duplicate_example_headers_are_flagged() {
    let example = |value: &str| {
        doc(json!({"examples": [{
            "name": "ok",
            "request": {"headers": [
                {"name": "X", "value": "1"},
                {"name": "X", "value": value}
            ]},
            "response": {"headers": [{"name": "Y", "value": "1"}]}
        }]}))
    };
    let old = example("2");
    let new = example("3");

    let diff = diff_documents(Some(&old), Some(&new), DiffOptions::default());
    assert_eq!(diff.findings.len(), 1);
    assert_eq!(diff.findings[0].code, "ambiguous_duplicate_key");
    assert_eq!(diff.findings[0].section, Some(SectionKey::Examples));
    assert!(diff.findings[0].message.contains("examples[ok].request.headers"));

    let openapi = diff_documents(
        Some(&old),
        Some(&new),
        DiffOptions::new(SectionProfile::OpenApi),
    );
    assert!(openapi.findings.is_empty());
}
