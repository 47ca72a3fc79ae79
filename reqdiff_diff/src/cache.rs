//! Caller-owned memoization of section views.

use std::collections::HashMap;

use reqdiff_doc::Document;
use xxhash_rust::xxh3::xxh3_64;

use crate::model::{SectionKey, SectionView, Side};
use crate::sections::section_view;

/// Identity of one cached view: content hashes of both versions plus the
/// section and rendered side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub old: u64,
    pub new: u64,
    pub section: SectionKey,
    pub side: Side,
}

impl CacheKey {
    pub fn new(
        old: Option<&Document>,
        new: Option<&Document>,
        section: SectionKey,
        side: Side,
    ) -> Self {
        Self {
            old: content_hash(old),
            new: content_hash(new),
            section,
            side,
        }
    }
}

/// Hash of a document's canonical JSON form; an absent document hashes `null`.
pub fn content_hash(doc: Option<&Document>) -> u64 {
    let canonical = match doc {
        Some(doc) => doc.root.to_string(),
        None => serde_json::Value::Null.to_string(),
    };
    xxh3_64(canonical.as_bytes())
}

/// Memo of section views; nothing in the crate reads it implicitly.
#[derive(Debug, Default)]
pub struct DiffCache {
    entries: HashMap<CacheKey, SectionView>,
}

impl DiffCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view or compute and store it.
    pub fn get_or_compute(
        &mut self,
        old: Option<&Document>,
        new: Option<&Document>,
        section: SectionKey,
        side: Side,
    ) -> &SectionView {
        let key = CacheKey::new(old, new, section, side);
        self.entries.entry(key).or_insert_with(|| {
            tracing::debug!(section = section.as_str(), side = side.as_str(), "cache miss");
            section_view(old, new, section, side)
        })
    }

    pub fn get(&self, key: &CacheKey) -> Option<&SectionView> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
