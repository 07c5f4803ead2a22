use thiserror::Error;

/// Failure to convert a dynamic [`Value`](crate::Value) into a typed field.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Json(#[from] ::serde_json::Error),
}

impl ValueError {
    /// Shorthand for [`ValueError::Mismatch`].
    #[inline]
    pub const fn mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::Mismatch { expected, found }
    }
}
