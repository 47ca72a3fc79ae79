//! Per-section diff engine for API request documents.
//!
//! This crate compares two versions of a request document (either may be
//! absent) and produces deterministic, serializable views:
//! - a summary of which sections differ ([`diff_documents`])
//! - a detailed per-side view of one section ([`diff_section`], [`section_view`])
//! - word and line level text segments ([`word_diff_old`], [`line_diff_new`], ...)
//! - a markdown report ([`format_markdown_report`])
//!
//! Every function is pure. Repeated calls on identical input produce identical
//! output; memoization is left to the caller via [`DiffCache`].
//!
//! # Example
//!
//! ```rust
//! use reqdiff_diff::{DiffOptions, SectionKey, diff_documents};
//! use reqdiff_doc::parse_json;
//!
//! let old = parse_json(r#"{"request": {"url": "https://api.test/users"}}"#);
//! let new = parse_json(r#"{"request": {"url": "https://api.test/users/1"}}"#);
//! let diff = diff_documents(Some(&old), Some(&new), DiffOptions::default());
//! assert_eq!(diff.changed_sections(), vec![SectionKey::Url]);
//! ```

mod cache;
mod engine;
mod error;
mod findings;
mod model;
mod reconcile;
mod report;
mod sections;
mod tokenize;
mod variant;

pub use cache::{CacheKey, DiffCache, content_hash};
pub use engine::{
    align, diff_text, line_diff_new, line_diff_old, merge_segments, word_diff_new, word_diff_old,
};
pub use error::{DiffError, DiffResult};
pub use model::{
    AuthDiff, BodyContent, BodyDiff, DiffOptions, DiffSegment, DocumentDiff, ExampleBody,
    ExampleDiff, ExampleRequest, ExampleResponse, FieldRecord, Finding, FindingLevel, MessageDiff,
    ModeDiff, Reconciled, SectionKey, SectionProfile, SectionSummary, SectionView, Side, Status,
    TagRecord, TextGranularity, VariantDiff, VariantSection,
};
pub use reconcile::{MatchMode, Reconcile, ambiguous_keys, reconcile, reconcile_files};
pub use report::format_markdown_report;
pub use sections::{
    SectionSpec, body_content, diff_documents, diff_section, find_section, registry, section_view,
};
pub use tokenize::{tokenize, tokenize_lines, tokenize_words};
pub use variant::{
    AUTH_VARIANTS, BODY_VARIANTS, VariantComparator, VariantShape, VariantSpec, compare_fields,
    diff_auth, diff_body, diff_messages, mode_diff, resolve_variants,
};

#[cfg(test)]
mod tests;
