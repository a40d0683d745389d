//! Fiat–Shamir transcript (Keccak-256)
//!
//! Deterministic challenge derivation: the transcript absorbs canonical
//! byte encodings of scalars and group elements, and `squeeze` finalises
//! the running Keccak-256 digest, reduces it modulo `r`, then restarts the
//! hasher with the digest as its only prior input — so chained squeezes
//! without intervening absorbs are themselves deterministic.
//!
//! The absorb/squeeze sequence is a total order fixed by the protocol:
//! reordering any absorb, or moving a `reset`, changes every downstream
//! challenge. Scalars are absorbed as `sFr`-wide canonical (non-Montgomery)
//! little-endian integers; group elements as affine `x` then `y` in
//! canonical little-endian base-field encoding, with the identity
//! contributing all-zero coordinates.

#![forbid(unsafe_code)]

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use std::marker::PhantomData;
use tiny_keccak::{Hasher as _, Keccak};

use crate::field::{scalar_byte_len, scalar_to_bytes_le};

/// Fiat–Shamir state over Keccak-256, producing challenges in `F`.
pub struct Transcript<F: PrimeField> {
    hasher: Keccak,
    _field: PhantomData<F>,
}

impl<F: PrimeField> Transcript<F> {
    /// Fresh transcript with empty state.
    pub fn new() -> Self {
        Self { hasher: Keccak::v256(), _field: PhantomData }
    }

    /// Absorb a scalar in canonical little-endian form.
    pub fn absorb_scalar(&mut self, s: &F) {
        self.hasher.update(&scalar_to_bytes_le(s));
    }

    /// Absorb an affine group element as `x ‖ y` base-field coordinates.
    pub fn absorb_group<G>(&mut self, p: &G)
    where
        G: AffineRepr,
        G::BaseField: PrimeField,
    {
        match p.xy() {
            Some((x, y)) => {
                self.hasher.update(&scalar_to_bytes_le(x));
                self.hasher.update(&scalar_to_bytes_le(y));
            }
            None => {
                let zeros = vec![0u8; 2 * scalar_byte_len::<G::BaseField>()];
                self.hasher.update(&zeros);
            }
        }
    }

    /// Finalise the digest, reduce it mod `r`, and restart the state with
    /// the digest as the sole prior input.
    pub fn squeeze(&mut self) -> F {
        let mut digest = [0u8; 32];
        let finished = std::mem::replace(&mut self.hasher, Keccak::v256());
        finished.finalize(&mut digest);
        self.hasher.update(&digest);
        F::from_le_bytes_mod_order(&digest)
    }

    /// Discard all state.
    pub fn reset(&mut self) {
        self.hasher = Keccak::v256();
    }
}

impl<F: PrimeField> Default for Transcript<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Affine};
    use ark_ec::AffineRepr;

    #[test]
    fn identical_absorbs_squeeze_identical_challenges() {
        let mut t1 = Transcript::<Fr>::new();
        let mut t2 = Transcript::<Fr>::new();
        for v in [3u64, 7, 11] {
            t1.absorb_scalar(&Fr::from(v));
            t2.absorb_scalar(&Fr::from(v));
        }
        t1.absorb_group(&G1Affine::generator());
        t2.absorb_group(&G1Affine::generator());
        assert_eq!(t1.squeeze(), t2.squeeze());
        // The re-seeded states stay in lockstep too.
        assert_eq!(t1.squeeze(), t2.squeeze());
    }

    #[test]
    fn absorb_order_matters() {
        let mut t1 = Transcript::<Fr>::new();
        t1.absorb_scalar(&Fr::from(1u64));
        t1.absorb_scalar(&Fr::from(2u64));
        let mut t2 = Transcript::<Fr>::new();
        t2.absorb_scalar(&Fr::from(2u64));
        t2.absorb_scalar(&Fr::from(1u64));
        assert_ne!(t1.squeeze(), t2.squeeze());
    }

    #[test]
    fn squeeze_reseeds_with_digest() {
        // After a squeeze, absorbing nothing more must still evolve the
        // state deterministically and differently from a fresh transcript.
        let mut t = Transcript::<Fr>::new();
        t.absorb_scalar(&Fr::from(42u64));
        let first = t.squeeze();
        let second = t.squeeze();
        assert_ne!(first, second);

        let mut fresh = Transcript::<Fr>::new();
        assert_ne!(second, fresh.squeeze());
    }

    #[test]
    fn reset_discards_prior_state() {
        let mut t1 = Transcript::<Fr>::new();
        t1.absorb_scalar(&Fr::from(9u64));
        t1.reset();
        t1.absorb_scalar(&Fr::from(5u64));

        let mut t2 = Transcript::<Fr>::new();
        t2.absorb_scalar(&Fr::from(5u64));
        assert_eq!(t1.squeeze(), t2.squeeze());
    }
}
