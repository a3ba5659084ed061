use thiserror::Error;

/// Why a view could not be derived from the current dataset and selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    #[error("metadata has not been loaded")]
    MetadataMissing,

    #[error("{kind} index {index} is out of range ({len} available)")]
    OutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// The selection points at data that has not been downloaded yet.
    #[error("{kind} data for '{id}' has not been loaded")]
    NotLoaded { kind: &'static str, id: String },

    #[error("no population entry for '{0}'")]
    MissingPopulation(String),
}

impl DeriveError {
    /// True when loading more data would resolve the error.
    pub fn is_not_loaded(&self) -> bool {
        matches!(self, DeriveError::MetadataMissing | DeriveError::NotLoaded { .. })
    }
}

pub type DeriveResult<T> = Result<T, DeriveError>;

/// Index into `items`, or [`DeriveError::OutOfRange`].
pub(crate) fn nth<'a, T>(items: &'a [T], index: usize, kind: &'static str) -> DeriveResult<&'a T> {
    items.get(index).ok_or(DeriveError::OutOfRange {
        kind,
        index,
        len: items.len(),
    })
}
