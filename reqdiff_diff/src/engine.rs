use crate::model::{DiffSegment, Side, Status, TextGranularity};
use crate::tokenize::tokenize;

/// Compute an LCS alignment of two token sequences.
///
/// Returns `(i, j)` pairs with `a[i] == b[j]`, strictly increasing in both
/// indices. When backtracking hits a tie between dropping a token of `a` and
/// dropping a token of `b`, the `b` index moves first; this choice fixes the
/// segment boundaries for inputs with repeated tokens.
pub fn align<T: PartialEq>(a: &[T], b: &[T]) -> Vec<(usize, usize)> {
    let m = a.len();
    let n = b.len();
    let width = n + 1;
    let at = |i: usize, j: usize| i * width + j;

    let mut dp = vec![0usize; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            dp[at(i, j)] = if a[i - 1] == b[j - 1] {
                dp[at(i - 1, j - 1)] + 1
            } else {
                dp[at(i - 1, j)].max(dp[at(i, j - 1)])
            };
        }
    }

    let mut pairs = Vec::with_capacity(dp[at(m, n)]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[at(i - 1, j)] > dp[at(i, j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    pairs.reverse();
    pairs
}

/// Emit one segment per token, `unchanged` for aligned indices and
/// `unaligned` for the rest.
fn build_segments<I>(tokens: &[&str], aligned: I, unaligned: Status) -> Vec<DiffSegment>
where
    I: IntoIterator<Item = usize>,
{
    let mut aligned = aligned.into_iter().peekable();
    tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            let status = if aligned.peek() == Some(&idx) {
                aligned.next();
                Status::Unchanged
            } else {
                unaligned
            };
            DiffSegment::new(*token, status)
        })
        .collect()
}

/// Coalesce consecutive segments that share a status.
pub fn merge_segments(segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut merged: Vec<DiffSegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.status == segment.status => last.text.push_str(&segment.text),
            _ => merged.push(segment),
        }
    }
    merged
}

fn whole(text: &str, status: Status, granularity: TextGranularity) -> Vec<DiffSegment> {
    match granularity {
        TextGranularity::Word => vec![DiffSegment::new(text, status)],
        TextGranularity::Line => text
            .split('\n')
            .map(|line| DiffSegment::new(line, status))
            .collect(),
    }
}

/// Diff `old` against `new` and render the view for `side`.
///
/// The old view never contains `added` text and the new view never contains
/// `deleted` text. Word granularity merges runs; line granularity keeps one
/// segment per line.
pub fn diff_text(
    old: &str,
    new: &str,
    side: Side,
    granularity: TextGranularity,
) -> Vec<DiffSegment> {
    let (current, other) = side.arrange(old, new);

    if old == new {
        return whole(current, Status::Unchanged, granularity);
    }
    if current.is_empty() {
        return Vec::new();
    }
    if other.is_empty() {
        return whole(current, side.missing_status(), granularity);
    }

    let a = tokenize(old, granularity);
    let b = tokenize(new, granularity);
    let pairs = align(&a, &b);

    let segments = match side {
        Side::Old => build_segments(&a, pairs.iter().map(|p| p.0), Status::Deleted),
        Side::New => build_segments(&b, pairs.iter().map(|p| p.1), Status::Added),
    };

    match granularity {
        TextGranularity::Word => merge_segments(segments),
        TextGranularity::Line => segments,
    }
}

/// Word-level view of the old side.
pub fn word_diff_old(old: &str, new: &str) -> Vec<DiffSegment> {
    diff_text(old, new, Side::Old, TextGranularity::Word)
}

/// Word-level view of the new side.
pub fn word_diff_new(old: &str, new: &str) -> Vec<DiffSegment> {
    diff_text(old, new, Side::New, TextGranularity::Word)
}

/// Line-level view of the old side.
pub fn line_diff_old(old: &str, new: &str) -> Vec<DiffSegment> {
    diff_text(old, new, Side::Old, TextGranularity::Line)
}

/// Line-level view of the new side.
pub fn line_diff_new(old: &str, new: &str) -> Vec<DiffSegment> {
    diff_text(old, new, Side::New, TextGranularity::Line)
}

/// Line diff where the caller holds `(current, other)` rather than `(old, new)`.
pub(crate) fn line_diff_for(current: &str, other: &str, side: Side) -> Vec<DiffSegment> {
    let (old, new) = side.arrange(current, other);
    diff_text(old, new, side, TextGranularity::Line)
}

pub(crate) fn word_diff_for(current: &str, other: &str, side: Side) -> Vec<DiffSegment> {
    let (old, new) = side.arrange(current, other);
    diff_text(old, new, side, TextGranularity::Word)
}
