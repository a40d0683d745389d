//! Scalar-field helpers
//!
//! The arkworks `Field`/`PrimeField` traits already provide the pointwise
//! arithmetic the protocol needs (`add`, `mul`, `square`, `inverse`,
//! `from(u64)`, …), with Montgomery representation internal to the field
//! type. What this module adds is the batch layer on top: Montgomery's
//! batch-inversion trick, exponentiation by squaring, uniform sampling for
//! blinding factors, and the canonical little-endian byte codec that forms
//! the explicit Montgomery boundary — bytes on the wire are always reduced
//! non-Montgomery integers, and parsing them *is* the `to_montgomery`
//! conversion.

#![forbid(unsafe_code)]

use ark_ff::{BigInteger, Field, PrimeField, UniformRand, Zero};
use rand::Rng;

use crate::error::{FieldError, ProverError, Result};

/// Square-and-multiply exponentiation with a `u64` exponent.
#[inline]
pub fn pow_u64<F: Field>(mut base: F, mut exp: u64) -> F {
    let mut acc = F::one();
    while exp > 0 {
        if (exp & 1) == 1 {
            acc *= base;
        }
        base.square_in_place();
        exp >>= 1;
    }
    acc
}

/// Invert every element of `values` in place using Montgomery's trick:
/// one prefix-product pass, a single field inversion, and a back-propagation
/// pass. A zero element is an error — the caller's denominators must all be
/// non-zero for the permutation argument to be meaningful.
pub fn batch_inverse<F: Field>(values: &mut [F]) -> std::result::Result<(), FieldError> {
    if values.is_empty() {
        return Ok(());
    }

    // prefix[i] = values[0] * ... * values[i]
    let mut prefix = Vec::with_capacity(values.len());
    let mut running = F::one();
    for v in values.iter() {
        if v.is_zero() {
            return Err(FieldError::ZeroInversion);
        }
        running *= *v;
        prefix.push(running);
    }

    let mut inv = prefix[values.len() - 1]
        .inverse()
        .ok_or(FieldError::ZeroInversion)?;

    // Back-propagate: inv holds (values[0..=i]).inverse() at step i.
    for i in (1..values.len()).rev() {
        let out = inv * prefix[i - 1];
        inv *= values[i];
        values[i] = out;
    }
    values[0] = inv;
    Ok(())
}

/// Sample a uniformly random field element (blinding factors `b1..b8`).
#[inline]
pub fn sample<F: Field, R: Rng + ?Sized>(rng: &mut R) -> F {
    F::rand(rng)
}

/// Byte width of a canonical serialized scalar for field `F`.
#[inline]
pub fn scalar_byte_len<F: PrimeField>() -> usize {
    F::MODULUS_BIT_SIZE.div_ceil(8) as usize
}

/// Parse `count` canonical little-endian scalars from `bytes`.
///
/// Values at or above the modulus are rejected: the container formats pin
/// reduced encodings, so a non-canonical scalar means a corrupt source.
pub fn read_scalars_le<F: PrimeField>(bytes: &[u8], count: usize) -> Result<Vec<F>> {
    let width = scalar_byte_len::<F>();
    if bytes.len() < count * width {
        return Err(ProverError::InvalidProvingKey(format!(
            "scalar block too short: need {} bytes, have {}",
            count * width,
            bytes.len()
        )));
    }
    let mut out = Vec::with_capacity(count);
    for chunk in bytes[..count * width].chunks_exact(width) {
        out.push(read_scalar_le(chunk)?);
    }
    Ok(out)
}

/// Parse a single canonical little-endian scalar (`sFr` bytes).
pub fn read_scalar_le<F: PrimeField>(bytes: &[u8]) -> Result<F> {
    let elem = F::from_le_bytes_mod_order(bytes);
    // Round-tripping detects non-canonical input without bignum compares.
    if scalar_to_bytes_le(&elem) != bytes {
        return Err(ProverError::InvalidProvingKey(
            "non-canonical scalar encoding".into(),
        ));
    }
    Ok(elem)
}

/// Canonical (non-Montgomery) little-endian bytes of a scalar, `sFr` wide.
#[inline]
pub fn scalar_to_bytes_le<F: PrimeField>(value: &F) -> Vec<u8> {
    let mut bytes = value.into_bigint().to_bytes_le();
    bytes.truncate(scalar_byte_len::<F>());
    bytes.resize(scalar_byte_len::<F>(), 0u8);
    bytes
}
