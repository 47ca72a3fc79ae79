//! Error types for the diff crate.

use crate::model::{SectionKey, SectionProfile};

/// Programmer errors surfaced by the section registry.
///
/// Leaf diff functions never fail; only registry lookups do.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The key does not name any known section.
    #[error("unknown section key: {0:?}")]
    UnknownSection(String),

    /// The section exists but the selected profile does not declare it.
    #[error("section {key} is not part of the {profile:?} profile")]
    SectionNotInProfile {
        key: SectionKey,
        profile: SectionProfile,
    },
}

/// Convenience alias for registry results.
pub type DiffResult<T> = Result<T, DiffError>;
