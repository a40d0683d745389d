//! Coefficient-form polynomials
//!
//! A `Polynomial` exclusively owns its coefficient buffer; buffers are
//! large at production sizes, so every operation mutates in place and
//! clones are explicit. Leading zeros are allowed — `degree` reports the
//! highest non-zero index (0 for the zero polynomial) and `truncate`
//! shrinks the buffer down to it.
//!
//! The division helpers implement the two special-cased divisors the
//! protocol needs: synthetic division by `X − ζ` (openings), which checks
//! its remainder under `debug_assertions`, and the `Z_H = X^n − 1`
//! recurrence on a 4n buffer (quotient), which runs unchecked.

#![forbid(unsafe_code)]

use ark_ff::{FftField, Field, Zero};

use crate::domain::Domain;
use crate::error::{ProverError, Result};

/// Dense univariate polynomial, low-degree coefficient first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<F: FftField> {
    coeffs: Vec<F>,
}

impl<F: FftField> Polynomial<F> {
    /// Wrap an existing coefficient buffer.
    pub fn from_coeffs(coeffs: Vec<F>) -> Self {
        Self { coeffs }
    }

    /// All-zero polynomial with `len` coefficient slots.
    pub fn zeros(len: usize) -> Self {
        Self { coeffs: vec![F::zero(); len] }
    }

    /// Interpolate from evaluations over the circuit subgroup (`iNTT`).
    pub fn from_evaluations(domain: &Domain<F>, mut evals: Vec<F>) -> Result<Self> {
        domain.intt(&mut evals)?;
        Ok(Self { coeffs: evals })
    }

    /// Coefficient slice, low degree first.
    #[inline]
    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    /// Number of coefficient slots (including leading zeros).
    #[inline]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// True when the buffer has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Index of the highest non-zero coefficient, or 0 if all are zero.
    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|c| !c.is_zero())
            .unwrap_or(0)
    }

    /// Horner evaluation from the high coefficient down.
    pub fn evaluate(&self, zeta: &F) -> F {
        let mut acc = F::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * zeta + c;
        }
        acc
    }

    /// `self += scale · other` (or plain addition when `scale` is `None`).
    ///
    /// `other` must not be longer than `self`.
    pub fn add(&mut self, other: &Self, scale: Option<F>) -> Result<()> {
        self.check_len(other, "add")?;
        match scale {
            Some(s) => {
                for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
                    *a += s * b;
                }
            }
            None => {
                for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
                    *a += b;
                }
            }
        }
        Ok(())
    }

    /// `self -= scale · other`, same length rule as [`Polynomial::add`].
    pub fn sub(&mut self, other: &Self, scale: Option<F>) -> Result<()> {
        self.check_len(other, "sub")?;
        match scale {
            Some(s) => {
                for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
                    *a -= s * b;
                }
            }
            None => {
                for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
                    *a -= b;
                }
            }
        }
        Ok(())
    }

    fn check_len(&self, other: &Self, op: &str) -> Result<()> {
        if other.coeffs.len() > self.coeffs.len() {
            return Err(ProverError::InvalidProvingKey(format!(
                "{op}: operand length {} exceeds target length {}",
                other.coeffs.len(),
                self.coeffs.len()
            )));
        }
        Ok(())
    }

    /// Scale every coefficient by `s`.
    pub fn mul_scalar(&mut self, s: &F) {
        for c in self.coeffs.iter_mut() {
            *c *= s;
        }
    }

    /// Add `s` to the constant term.
    pub fn add_scalar(&mut self, s: &F) {
        if self.coeffs.is_empty() {
            self.coeffs.push(*s);
        } else {
            self.coeffs[0] += s;
        }
    }

    /// Subtract `s` from the constant term.
    pub fn sub_scalar(&mut self, s: &F) {
        if self.coeffs.is_empty() {
            self.coeffs.push(-*s);
        } else {
            self.coeffs[0] -= s;
        }
    }

    /// Extend by `|factors|` slots, adding `factors[i]` at position `L+i`
    /// and subtracting it at position `i`. With `L == n` this realises
    /// `p(X) + (Σ b_i·X^i)·Z_H(X)`, which leaves values on the subgroup
    /// untouched.
    pub fn blind(&mut self, factors: &[F]) {
        let l = self.coeffs.len();
        self.coeffs.extend_from_slice(factors);
        for (i, f) in factors.iter().enumerate() {
            debug_assert_eq!(self.coeffs[l + i], *f);
            self.coeffs[i] -= f;
        }
    }

    /// Synthetic division by `X − ζ`, in place. The buffer keeps its
    /// length with the top coefficient forced to zero. The zero-remainder
    /// check (`c_0 == −ζ·q_0`) runs in debug builds only.
    pub fn div_by_x_minus(&mut self, zeta: F) -> Result<()> {
        let l = self.coeffs.len();
        if l < 2 {
            if l == 1 {
                self.coeffs[0] = F::zero();
            }
            return Ok(());
        }
        let c0 = self.coeffs[0];
        let mut carry = F::zero(); // q[i+1], zero above the top
        for i in (0..l - 1).rev() {
            let q_i = self.coeffs[i + 1] + zeta * carry;
            self.coeffs[i + 1] = carry;
            carry = q_i;
        }
        self.coeffs[0] = carry;

        #[cfg(debug_assertions)]
        if c0 + zeta * carry != F::zero() {
            return Err(ProverError::DivisibilityViolation("X - zeta division"));
        }
        #[cfg(not(debug_assertions))]
        let _ = c0;
        Ok(())
    }

    /// Divide a length-`4n` polynomial by `Z_H = X^n − 1` in coefficient
    /// space: `q_i = −c_i` for `i < n`, then `q_i = q_{i−n} − c_i`. On an
    /// exactly divisible input the top `n` output slots come out zero; the
    /// recurrence itself runs unconditionally and leaves remainder
    /// checking to the caller.
    pub fn div_by_zh(&mut self, n: usize) -> Result<()> {
        if self.coeffs.len() != 4 * n {
            return Err(ProverError::InvalidProvingKey(format!(
                "div_by_zh expects a 4n = {} buffer, got {}",
                4 * n,
                self.coeffs.len()
            )));
        }
        for i in 0..4 * n {
            if i < n {
                self.coeffs[i] = -self.coeffs[i];
            } else {
                self.coeffs[i] = self.coeffs[i - n] - self.coeffs[i];
            }
        }
        Ok(())
    }

    /// Split into `num_parts` chunks of `deg + 1` coefficients (the last
    /// chunk takes the remainder). Non-last chunks get `blinding[j]`
    /// appended at position `deg + 1`; non-first chunks subtract
    /// `blinding[j−1]` from coefficient 0, so the chunks weighted by
    /// `X^{j(deg+1)}` still sum to the original polynomial.
    pub fn split(&self, num_parts: usize, deg: usize, blinding: &[F]) -> Vec<Self> {
        debug_assert!(num_parts >= 1);
        debug_assert!(blinding.len() >= num_parts - 1);
        let chunk = deg + 1;
        let mut parts = Vec::with_capacity(num_parts);
        for j in 0..num_parts {
            let start = (j * chunk).min(self.coeffs.len());
            let end = if j + 1 == num_parts {
                self.coeffs.len()
            } else {
                ((j + 1) * chunk).min(self.coeffs.len())
            };
            let mut coeffs = self.coeffs[start..end].to_vec();
            if j + 1 < num_parts {
                coeffs.resize(chunk, F::zero());
                coeffs.push(blinding[j]);
            }
            if j > 0 {
                if coeffs.is_empty() {
                    coeffs.push(F::zero());
                }
                coeffs[0] -= blinding[j - 1];
            }
            parts.push(Self { coeffs });
        }
        parts
    }

    /// Shrink the buffer to `degree() + 1` slots.
    pub fn truncate(&mut self) {
        let keep = self.degree() + 1;
        self.coeffs.truncate(keep);
    }
}
