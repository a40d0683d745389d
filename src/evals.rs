//! Coset evaluation windows
//!
//! Value-form view of a polynomial over the size-`4n` coset. The buffer is
//! read-only once built — rounds index into it but never mutate it — and
//! it never aliases the coefficient buffer it was produced from. The σ
//! buffer packs `σ1 ‖ σ2` into `8n` scalars; the prover addresses the two
//! halves as parallel windows at offsets `0` and `4n`.

#![forbid(unsafe_code)]

use ark_ff::FftField;

use crate::error::{ProverError, Result};

/// Read-only evaluation vector over the 4n coset (or a pair of them).
#[derive(Debug, Clone)]
pub struct Evaluations<F: FftField> {
    values: Vec<F>,
}

impl<F: FftField> Evaluations<F> {
    /// Wrap a value buffer.
    pub fn new(values: Vec<F>) -> Self {
        Self { values }
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bounds-checked access.
    #[inline]
    pub fn get(&self, i: usize) -> Result<F> {
        self.values.get(i).copied().ok_or_else(|| {
            ProverError::InvalidProvingKey(format!(
                "evaluation index {i} out of bounds (len {})",
                self.values.len()
            ))
        })
    }

    /// Access at `i mod len`, the shift-by-ω addressing on the coset.
    #[inline]
    pub fn get_wrapped(&self, i: usize) -> F {
        self.values[i % self.values.len()]
    }

    /// Underlying slice.
    #[inline]
    pub fn as_slice(&self) -> &[F] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;

    #[test]
    fn wrapped_access_cycles() {
        let e = Evaluations::new((0..8u64).map(Fr::from).collect());
        assert_eq!(e.get(3).unwrap(), Fr::from(3u64));
        assert!(e.get(8).is_err());
        assert_eq!(e.get_wrapped(8), Fr::from(0u64));
        assert_eq!(e.get_wrapped(13), Fr::from(5u64));
    }
}
