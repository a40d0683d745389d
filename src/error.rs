//! Error kinds
//!
//! Every failure in the prover is fatal and surfaces to the caller
//! unchanged: no local recovery, no retries. The kinds below are distinct
//! and non-overlapping so callers can match on the cause without parsing
//! messages.

#![forbid(unsafe_code)]

/// Field-arithmetic failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A divisor handed to `batch_inverse` (or a scalar division) was zero.
    ///
    /// Only reachable under a malformed witness or adversarial input; a
    /// valid trace with random challenges hits zero denominators with
    /// negligible probability.
    #[error("attempted to invert zero")]
    ZeroInversion,
}

/// Fatal prover failures.
#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    /// Wrong protocol id, malformed sections, or inconsistent sizes in the
    /// proving key.
    #[error("invalid proving key: {0}")]
    InvalidProvingKey(String),

    /// Field prime mismatch or wrong witness length.
    #[error("witness mismatch: {0}")]
    WitnessMismatch(String),

    /// The permutation accumulator did not wrap to 1: the witness violates
    /// the circuit's copy constraints.
    #[error("copy constraint violation: permutation accumulator did not return to 1")]
    CopyConstraintViolation,

    /// A polynomial division left a non-zero remainder (debug builds only).
    #[error("divisibility violation in {0}")]
    DivisibilityViolation(&'static str),

    /// Field arithmetic failure.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Underlying byte-source read failure.
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ProverError>;
