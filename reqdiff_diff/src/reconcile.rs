use std::collections::HashMap;

use reqdiff_doc::{FileEntry, KeyValue};

use crate::model::{Reconciled, Side, Status};

/// A list record with a (possibly non-unique) identity key.
pub trait Reconcile {
    /// Identity key, usually the record name.
    fn key(&self) -> &str;

    /// `true` when every comparison field besides the key is equal.
    fn same_attributes(&self, other: &Self) -> bool;
}

impl Reconcile for KeyValue {
    fn key(&self) -> &str {
        &self.name
    }

    fn same_attributes(&self, other: &Self) -> bool {
        self.value == other.value && self.enabled == other.enabled && self.local == other.local
    }
}

/// How records are paired across sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Three passes over a consumable pool; duplicate keys pair by position.
    Tolerant,
    /// One pass against the other side indexed by key (last record wins).
    Strict,
}

#[derive(Debug)]
struct Slot<'a, T> {
    record: &'a T,
    consumed: bool,
}

/// Per-call arena of the other side's records.
#[derive(Debug)]
struct Pool<'a, T> {
    slots: Vec<Slot<'a, T>>,
}

impl<'a, T> Pool<'a, T> {
    fn new(records: &'a [T]) -> Self {
        Self {
            slots: records
                .iter()
                .map(|record| Slot {
                    record,
                    consumed: false,
                })
                .collect(),
        }
    }

    /// Consume the first unconsumed record matching `pred`.
    fn consume_first<F>(&mut self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        match self
            .slots
            .iter_mut()
            .find(|slot| !slot.consumed && pred(slot.record))
        {
            Some(slot) => {
                slot.consumed = true;
                true
            }
            None => false,
        }
    }
}

/// Classify every record of `current` against `other`.
///
/// `side` is the side `current` belongs to; records with no counterpart are
/// `deleted` on the old side and `added` on the new side.
pub fn reconcile<T>(current: &[T], other: &[T], side: Side, mode: MatchMode) -> Vec<Reconciled<T>>
where
    T: Reconcile + Clone,
{
    let statuses = match mode {
        MatchMode::Tolerant => tolerant_statuses(current, other, side),
        MatchMode::Strict => strict_statuses(current, other, side),
    };

    current
        .iter()
        .zip(statuses)
        .map(|(record, status)| Reconciled {
            record: record.clone(),
            status,
        })
        .collect()
}

fn tolerant_statuses<T: Reconcile>(current: &[T], other: &[T], side: Side) -> Vec<Status> {
    let mut pool = Pool::new(other);
    let mut statuses: Vec<Option<Status>> = vec![None; current.len()];

    for (record, status) in current.iter().zip(statuses.iter_mut()) {
        if pool.consume_first(|c| c.key() == record.key() && c.same_attributes(record)) {
            *status = Some(Status::Unchanged);
        }
    }

    for (record, status) in current.iter().zip(statuses.iter_mut()) {
        if status.is_none() && pool.consume_first(|c| c.key() == record.key()) {
            *status = Some(Status::Modified);
        }
    }

    statuses
        .into_iter()
        .map(|status| status.unwrap_or(side.missing_status()))
        .collect()
}

fn strict_statuses<T: Reconcile>(current: &[T], other: &[T], side: Side) -> Vec<Status> {
    let mut by_key: HashMap<&str, &T> = HashMap::new();
    for record in other {
        by_key.insert(record.key(), record);
    }

    current
        .iter()
        .map(|record| match by_key.get(record.key()) {
            None => side.missing_status(),
            Some(counterpart) if !record.same_attributes(counterpart) => Status::Modified,
            Some(_) => Status::Unchanged,
        })
        .collect()
}

/// Keys that occur more than once on both sides, with their counts, in
/// first-seen order.
///
/// Pairing for these keys is positional rather than semantic.
pub fn ambiguous_keys<T: Reconcile>(a: &[T], b: &[T]) -> Vec<(String, usize, usize)> {
    let a_counts = key_counts(a);
    let b_counts = key_counts(b);

    let mut out: Vec<(String, usize, usize)> = Vec::new();
    for record in a {
        let key = record.key();
        let a_count = a_counts.get(key).copied().unwrap_or(0);
        let b_count = b_counts.get(key).copied().unwrap_or(0);
        if a_count > 1 && b_count > 1 && !out.iter().any(|(seen, _, _)| seen == key) {
            out.push((key.to_string(), a_count, b_count));
        }
    }
    out
}

fn key_counts<T: Reconcile>(records: &[T]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.key()).or_insert(0usize) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FileKey<'a> {
    Path(&'a str),
    Index(usize),
}

fn file_key(file: &FileEntry, idx: usize) -> FileKey<'_> {
    file.file_path
        .as_deref()
        .map_or(FileKey::Index(idx), FileKey::Path)
}

/// Pair file entries by path, falling back to list position for entries
/// without one.
pub fn reconcile_files(
    current: &[FileEntry],
    other: &[FileEntry],
    side: Side,
) -> Vec<Reconciled<FileEntry>> {
    let mut by_key: HashMap<FileKey<'_>, &FileEntry> = HashMap::new();
    for (idx, file) in other.iter().enumerate() {
        by_key.insert(file_key(file, idx), file);
    }

    current
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            let status = match by_key.get(&file_key(file, idx)) {
                None => side.missing_status(),
                Some(counterpart)
                    if file.file_path != counterpart.file_path
                        || file.content_type != counterpart.content_type =>
                {
                    Status::Modified
                }
                Some(_) => Status::Unchanged,
            };
            Reconciled {
                record: file.clone(),
                status,
            }
        })
        .collect()
}
