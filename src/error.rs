//! Compile errors and degradation warnings.
//!
//! The split follows the crate's error philosophy: bad *data* degrades and
//! is reported as a warning, bad *configuration* aborts the compile.

use crate::template::StoreError;

/// Fatal compile failures. Both variants are caller-configuration problems,
/// never properties of the transcription text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// `speed` must be strictly positive.
    #[error("speed must be > 0, got {0}")]
    InvalidSpeed(f64),
    /// The template store could not answer lookups at all.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Recoverable input problems collected during a compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileWarning {
    /// No phoneme template exists for this character; it was skipped.
    UnknownSymbol {
        ch: char,
        /// Codepoint index into the (normalized) input.
        index: usize,
    },
}
