use std::fmt;
use std::str::FromStr;

use reqdiff_doc::{FileEntry, KeyValue};
use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Change classification shared by every component.
///
/// Text segments only use `Unchanged`, `Added` and `Deleted`; structured
/// records can also be `Modified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unchanged,
    Added,
    Deleted,
    Modified,
}

impl Status {
    pub fn is_changed(self) -> bool {
        self != Status::Unchanged
    }

    /// One-letter badge used by reports (`A`, `D`, `M`, blank for unchanged).
    pub fn badge(self) -> &'static str {
        match self {
            Status::Unchanged => " ",
            Status::Added => "A",
            Status::Deleted => "D",
            Status::Modified => "M",
        }
    }
}

/// Which version a per-side view is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Old,
    New,
}

impl Side {
    /// Status of a record that exists only on this side.
    pub fn missing_status(self) -> Status {
        match self {
            Side::Old => Status::Deleted,
            Side::New => Status::Added,
        }
    }

    /// Order a pair so this side's value comes first.
    ///
    /// `(old, new)` becomes `(current, other)`; applying it again to
    /// `(current, other)` restores `(old, new)`.
    pub fn arrange<T>(self, a: T, b: T) -> (T, T) {
        match self {
            Side::Old => (a, b),
            Side::New => (b, a),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Old => "old",
            Side::New => "new",
        }
    }
}

/// Tokenization granularity for free-text diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextGranularity {
    Word,
    Line,
}

/// One maximal run of text sharing a status on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub text: String,
    pub status: Status,
}

impl DiffSegment {
    pub fn new(text: impl Into<String>, status: Status) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }
}

/// A list record annotated with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciled<T> {
    #[serde(flatten)]
    pub record: T,
    pub status: Status,
}

/// One flat field compared by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    pub key: String,
    pub value: String,
    pub status: Status,
}

/// Discriminant (`mode`) comparison of a variant section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeDiff {
    pub current: Option<String>,
    pub other: Option<String>,
    pub status: Status,
}

/// Normalized output for one relevant variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSection<C> {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub status: Status,
    pub content: C,
}

/// Mode status plus the sections of every relevant variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDiff<C> {
    pub mode: ModeDiff,
    pub sections: Vec<VariantSection<C>>,
}

/// Fields of one auth scheme.
pub type AuthDiff = VariantDiff<Vec<FieldRecord>>;

/// One body variant.
pub type BodyDiff = VariantDiff<BodyContent>;

/// Shape-specific body comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyContent {
    Text {
        segments: Vec<DiffSegment>,
    },
    Graphql {
        query: Vec<DiffSegment>,
        variables: Vec<DiffSegment>,
    },
    Form {
        fields: Vec<Reconciled<KeyValue>>,
    },
    Files {
        files: Vec<Reconciled<FileEntry>>,
    },
    Messages {
        messages: Vec<MessageDiff>,
    },
}

/// One gRPC/WebSocket message paired by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDiff {
    pub index: usize,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Status,
    pub content: Vec<DiffSegment>,
}

/// Tag membership on the rendered side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub tag: String,
    pub status: Status,
}

/// Text content of an example request/response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleBody {
    pub kind: String,
    pub segments: Vec<DiffSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleRequest {
    pub method: Option<String>,
    pub method_changed: bool,
    pub url: Option<String>,
    pub url_changed: bool,
    pub query_params: Vec<Reconciled<KeyValue>>,
    pub path_params: Vec<Reconciled<KeyValue>>,
    pub headers: Vec<Reconciled<KeyValue>>,
    pub body: Option<ExampleBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleResponse {
    pub status: Option<String>,
    pub status_changed: bool,
    pub status_text: Option<String>,
    pub status_text_changed: bool,
    pub headers: Vec<Reconciled<KeyValue>>,
    pub body: Option<ExampleBody>,
}

/// One saved example matched by name (or position when unnamed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleDiff {
    pub key: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Status,
    pub request: Option<ExampleRequest>,
    pub response: Option<ExampleResponse>,
}

/// Detailed per-side view of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SectionView {
    Meta {
        fields: Vec<FieldRecord>,
        name: Vec<DiffSegment>,
        tags: Vec<TagRecord>,
    },
    Url {
        method: FieldRecord,
        url: Vec<DiffSegment>,
    },
    Params {
        query: Vec<Reconciled<KeyValue>>,
        path: Vec<Reconciled<KeyValue>>,
    },
    Headers {
        headers: Vec<Reconciled<KeyValue>>,
    },
    Auth {
        auth: AuthDiff,
    },
    Body {
        body: BodyDiff,
    },
    Vars {
        req: Vec<Reconciled<KeyValue>>,
        res: Vec<Reconciled<KeyValue>>,
    },
    Assertions {
        assertions: Vec<Reconciled<KeyValue>>,
    },
    Script {
        req: Vec<DiffSegment>,
        res: Vec<DiffSegment>,
        tests: Vec<DiffSegment>,
    },
    Settings {
        fields: Vec<FieldRecord>,
    },
    Docs {
        docs: Vec<DiffSegment>,
    },
    Examples {
        examples: Vec<ExampleDiff>,
    },
}

/// Registry key of a diffable section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Meta,
    Url,
    Params,
    Headers,
    Auth,
    Body,
    Vars,
    Assertions,
    Script,
    Settings,
    Docs,
    Examples,
}

impl SectionKey {
    pub const ALL: [SectionKey; 12] = [
        SectionKey::Meta,
        SectionKey::Url,
        SectionKey::Params,
        SectionKey::Headers,
        SectionKey::Auth,
        SectionKey::Body,
        SectionKey::Vars,
        SectionKey::Assertions,
        SectionKey::Script,
        SectionKey::Settings,
        SectionKey::Docs,
        SectionKey::Examples,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Meta => "meta",
            SectionKey::Url => "url",
            SectionKey::Params => "params",
            SectionKey::Headers => "headers",
            SectionKey::Auth => "auth",
            SectionKey::Body => "body",
            SectionKey::Vars => "vars",
            SectionKey::Assertions => "assertions",
            SectionKey::Script => "script",
            SectionKey::Settings => "settings",
            SectionKey::Docs => "docs",
            SectionKey::Examples => "examples",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DiffError::UnknownSection(s.to_string()))
    }
}

/// Which section registry to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionProfile {
    /// Every request section, as reviewed from version-control history.
    #[default]
    Git,
    /// HTTP request sections only, for comparisons against an OpenAPI definition.
    OpenApi,
}

/// Options controlling which sections a document diff covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    pub profile: SectionProfile,
}

impl DiffOptions {
    pub fn new(profile: SectionProfile) -> Self {
        Self { profile }
    }

    /// Override the section profile.
    pub fn with_profile(mut self, profile: SectionProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Per-section change summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub key: SectionKey,
    pub title: String,
    pub has_changes: bool,
    pub present_old: bool,
    pub present_new: bool,
}

/// Warning/info emitted for ambiguous pairings or unusable inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code: String,
    pub level: FindingLevel,
    pub message: String,
    pub section: Option<SectionKey>,
}

/// Severity level for a [`Finding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Warning,
    Info,
}

/// Top-level document diff output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDiff {
    pub profile: SectionProfile,
    pub has_changes: bool,
    pub sections: Vec<SectionSummary>,
    pub findings: Vec<Finding>,
}

impl DocumentDiff {
    /// Summary for `key`, if the profile declares it.
    pub fn section(&self, key: SectionKey) -> Option<&SectionSummary> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Keys of sections that differ, in registry order.
    pub fn changed_sections(&self) -> Vec<SectionKey> {
        self.sections
            .iter()
            .filter(|s| s.has_changes)
            .map(|s| s.key)
            .collect()
    }
}
