//! Evaluation domain & transforms
//!
//! The circuit domain is the multiplicative subgroup `H = ⟨ω⟩` of size
//! `n = 2^k`, with vanishing polynomial `Z_H(X) = X^n − 1`. Quotient
//! arithmetic runs on the 4×-oversampled coset `g·⟨ω_4n⟩`, where `g` is the
//! field's multiplicative generator: shifting off the subgroup keeps `Z_H`
//! invertible pointwise, and `Z_H(g·ω_4n^i) = g^n·ω_4^{i mod 4} − 1` cycles
//! with period 4.
//!
//! Transforms are in-place radix-2 passes: a bit-reversal reorder, then
//! butterfly spans doubling from pairs up to the full length, with the
//! inverse's `1/len` normalisation folded into the closing stage. The
//! coset pair scales coefficients by `g^i` (forward) and `g^{-i}`
//! (inverse) around a size-`4n` pass.

#![forbid(unsafe_code)]

use ark_ff::{FftField, Field, One, Zero};

use crate::error::{ProverError, Result};
use crate::field::pow_u64;

/// Multiplicative-subgroup domain of size `n = 2^k` with its 4n coset.
#[derive(Debug, Clone)]
pub struct Domain<F: FftField> {
    /// Domain size `n` (power of two).
    pub n: usize,
    /// `log2(n)`.
    pub k: u32,
    /// Primitive `n`-th root of unity.
    pub omega: F,
    /// Primitive `4n`-th root of unity (`omega_4n^4 = omega`).
    pub omega_4n: F,
    /// Coset shift `g` for the 4n quotient domain.
    pub coset: F,
}

impl<F: FftField> Domain<F> {
    /// Build the domain for `n = 2^k`, validating that the field supports
    /// the 4n transform and that `ω` has exact order `n`.
    pub fn new(k: u32) -> Result<Self> {
        if k == 0 || k + 2 > F::TWO_ADICITY {
            return Err(ProverError::InvalidProvingKey(format!(
                "domain power {k} outside the field's two-adic range"
            )));
        }
        let n = 1usize << k;
        let omega = F::get_root_of_unity(n as u64).ok_or_else(|| {
            ProverError::InvalidProvingKey(format!("no root of unity of order {n}"))
        })?;
        let omega_4n = F::get_root_of_unity(4 * n as u64).ok_or_else(|| {
            ProverError::InvalidProvingKey(format!("no root of unity of order {}", 4 * n))
        })?;

        let d = Self { n, k, omega, omega_4n, coset: F::GENERATOR };

        // Hygiene: ω^n == 1 and ω^(n/2) != 1 (exact order for power-of-two n).
        if !pow_u64(d.omega, n as u64).is_one() {
            return Err(ProverError::InvalidProvingKey("omega^n != 1".into()));
        }
        if n >= 2 && pow_u64(d.omega, (n / 2) as u64).is_one() {
            return Err(ProverError::InvalidProvingKey(
                "omega does not have exact order n".into(),
            ));
        }
        Ok(d)
    }

    /// `ω^i` for `i ∈ [0, n)`, the round-2 permutation labels.
    pub fn subgroup_powers(&self) -> Vec<F> {
        let mut out = Vec::with_capacity(self.n);
        let mut acc = F::one();
        for _ in 0..self.n {
            out.push(acc);
            acc *= self.omega;
        }
        out
    }

    /// `Z_H` evaluated on the 4n coset; index by `i % 4`.
    pub fn zh_on_coset(&self) -> [F; 4] {
        let g_n = pow_u64(self.coset, self.n as u64);
        let omega_4 = pow_u64(self.omega_4n, self.n as u64);
        let mut out = [F::zero(); 4];
        let mut acc = g_n;
        for slot in out.iter_mut() {
            *slot = acc - F::one();
            acc *= omega_4;
        }
        out
    }

    /// Forward NTT: coefficients → evaluations on `⟨ω⟩`, in place.
    pub fn ntt(&self, values: &mut [F]) {
        debug_assert_eq!(values.len(), self.n);
        radix2_pass(values, self.omega, F::one());
    }

    /// Inverse NTT: evaluations on `⟨ω⟩` → coefficients, in place.
    pub fn intt(&self, values: &mut [F]) -> Result<()> {
        debug_assert_eq!(values.len(), self.n);
        radix2_inverse_pass(values, self.omega)
    }

    /// Coset NTT of size `4n`: zero-extend `coeffs`, scale coefficient `i`
    /// by `g^i`, transform with the `4n`-th root.
    pub fn coset_ntt_4n(&self, coeffs: &[F]) -> Vec<F> {
        let m = 4 * self.n;
        debug_assert!(coeffs.len() <= m);
        let mut values = vec![F::zero(); m];
        let mut shift = F::one();
        for (slot, c) in values.iter_mut().zip(coeffs.iter()) {
            *slot = *c * shift;
            shift *= self.coset;
        }
        radix2_pass(&mut values, self.omega_4n, F::one());
        values
    }

    /// Inverse coset NTT of size `4n`: transform back, unscale by `g^{-i}`.
    pub fn coset_intt_4n(&self, evals: &[F]) -> Result<Vec<F>> {
        let m = 4 * self.n;
        debug_assert_eq!(evals.len(), m);
        let mut coeffs = evals.to_vec();
        radix2_inverse_pass(&mut coeffs, self.omega_4n)?;
        let inv_g = self
            .coset
            .inverse()
            .ok_or(crate::error::FieldError::ZeroInversion)?;
        let mut unshift = F::one();
        for c in coeffs.iter_mut() {
            *c *= unshift;
            unshift *= inv_g;
        }
        Ok(coeffs)
    }
}

/// Reorder into bit-reversed index order, the input permutation the
/// butterfly stages expect.
fn bit_reverse_reorder<F: Field>(values: &mut [F]) {
    if values.len() < 2 {
        return;
    }
    let index_bits = values.len().trailing_zeros();
    for idx in 0..values.len() {
        let mirrored = idx.reverse_bits() >> (usize::BITS - index_bits);
        if idx < mirrored {
            values.swap(idx, mirrored);
        }
    }
}

/// One in-place radix-2 pass over `⟨root⟩`, butterfly spans doubling from
/// pairs up to the full length. `tail_scale` rides on the final stage:
/// forward transforms pass one, inverse transforms pass `len^{-1}` and
/// save themselves a separate normalisation sweep.
fn radix2_pass<F: Field>(values: &mut [F], root: F, tail_scale: F) {
    let len = values.len();
    debug_assert!(len.is_power_of_two());
    bit_reverse_reorder(values);

    let mut span = 1usize;
    while span < len {
        let closing = 2 * span == len;
        let stage_root = pow_u64(root, (len / (2 * span)) as u64);
        for block in values.chunks_exact_mut(2 * span) {
            let (lo_half, hi_half) = block.split_at_mut(span);
            let mut twiddle = F::one();
            for (lo, hi) in lo_half.iter_mut().zip(hi_half.iter_mut()) {
                let shifted = *hi * twiddle;
                let sum = *lo + shifted;
                let diff = *lo - shifted;
                if closing {
                    *lo = sum * tail_scale;
                    *hi = diff * tail_scale;
                } else {
                    *lo = sum;
                    *hi = diff;
                }
                twiddle *= stage_root;
            }
        }
        span <<= 1;
    }
}

/// Inverse pass: forward butterflies over `root^{-1}` with the `1/len`
/// normalisation folded into the closing stage.
fn radix2_inverse_pass<F: Field>(values: &mut [F], root: F) -> Result<()> {
    let inv_root = root
        .inverse()
        .ok_or(crate::error::FieldError::ZeroInversion)?;
    let inv_len = F::from(values.len() as u64)
        .inverse()
        .ok_or(crate::error::FieldError::ZeroInversion)?;
    radix2_pass(values, inv_root, inv_len);
    Ok(())
}
