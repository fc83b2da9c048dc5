//! Error types for environment construction and stepping.

use thiserror::Error;

/// Errors surfaced by the landing environment.
///
/// All of these are deterministic functions of bad input: there is no
/// I/O in the simulation core and therefore no transient failure mode
/// and no retry policy. An `Err` means the call itself was wrong and
/// the caller must change something.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LanderError {
    /// Malformed configuration or curriculum bounds, rejected at
    /// construction rather than silently clamped.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Action index outside the decoder's supported range. The step is
    /// failed rather than defaulted to "hold".
    #[error("invalid action {action} for {decoder} (expects 0..{num_actions})")]
    InvalidAction {
        /// The offending action index.
        action: usize,
        /// Cardinality of the configured action space.
        num_actions: usize,
        /// Name of the decoder that rejected it.
        decoder: &'static str,
    },

    /// A computation would have produced a meaningless direction, e.g.
    /// normalizing a zero-length vector where no default is acceptable.
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    /// `step()` called after the episode already terminated. The state
    /// machine refuses to emit results until `reset()` starts a new
    /// episode.
    #[error("episode already finished ({reason}); call reset() before stepping")]
    EpisodeFinished {
        /// Why the previous episode ended.
        reason: &'static str,
    },

    /// A batched call was handed a slice of the wrong length.
    #[error("size mismatch: expected {expected} entries, got {got}")]
    SizeMismatch {
        /// Length the call requires.
        expected: usize,
        /// Length actually provided.
        got: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LanderError>;
