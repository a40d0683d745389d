//! Baby-Plonk prover core
//!
//! Baby-Plonk is a PLONK variant that encodes each circuit constraint
//! across a *pair* of adjacent rows: two wire columns `a`, `b` plus the
//! "primed" values taken from the following row, with the odd row's `b`
//! slot acting as the (negated) output wire. The prover consumes a
//! precomputed proving key (`zkey` container) and a witness (`wtns`
//! container) and emits a succinct non-interactive argument built from
//! KZG-style commitments over a powers-of-τ table.
//!
//! ## Protocol shape
//!
//! Five rounds behind a Keccak-256 Fiat–Shamir transcript:
//!
//! 1. Commit the blinded wire polynomials `[A]₁`, `[B]₁`.
//! 2. Sample (β, γ); build and commit the permutation accumulator `[Z]₁`.
//! 3. Sample α; evaluate gate/permutation/boundary identities on a 4n
//!    coset, divide by `Z_H`, split, commit `[T_L]₁`, `[T_H]₁`.
//! 4. Sample ζ; evaluate the openings at ζ and ζω.
//! 5. Sample aggregation challenges; commit the opening quotients
//!    `[W_ζ]₁`, `[W_ζω]₁`.
//!
//! The transcript's absorb/squeeze sequence (including its two resets) is
//! a fixed total order; see [`prover`] for the exact schedule.
//!
//! ## Curves
//!
//! BN254 and BLS12-381 are supported; [`prove`] selects the curve from the
//! base-field prime in the proving-key header. The round logic is generic
//! over [`ark_ec::pairing::Pairing`].

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms)]

/// Little-endian cursor shared by the container readers.
mod container;
/// Evaluation domain, radix-2 NTT/iNTT, and the 4n coset transforms.
pub mod domain;
/// Typed error kinds; every failure is fatal to the prover.
pub mod error;
/// Read-only coset evaluation windows.
pub mod evals;
/// Batch field helpers and the canonical scalar byte codec.
pub mod field;
/// Optional `tracing` subscriber bootstrap.
pub mod logging;
/// Multi-scalar multiplication over the powers-of-τ table.
pub mod msm;
/// Coefficient-form polynomials and the protocol's division helpers.
pub mod poly;
/// Proof object and its keyed export encoding.
pub mod proof;
/// The five-round prover.
pub mod prover;
/// Keccak-256 Fiat–Shamir transcript.
pub mod transcript;
/// Witness (`wtns`) container reader.
pub mod witness;
/// Proving-key (`zkey`) container reader.
pub mod zkey;

use ark_ff::{BigInteger, PrimeField};

pub use error::{FieldError, ProverError, Result};
pub use proof::{Proof, ProofExport};
pub use prover::{BabyPlonkProver, ProverOptions};

/// A proof rendered for interchange, with its public inputs.
#[derive(Debug, Clone)]
pub struct ProveOutput {
    /// Keyed proof object (decimal-string encoding).
    pub proof: ProofExport,
    /// Public inputs as decimal strings, in circuit order.
    pub public_inputs: Vec<String>,
}

fn base_prime_le<F: PrimeField>() -> Vec<u8> {
    let mut bytes = F::MODULUS.to_bytes_le();
    bytes.truncate(field::scalar_byte_len::<F>());
    bytes
}

/// Prove with the curve selected from the proving key's base-field prime.
///
/// Parses the `zkey` and `wtns` containers, dispatches to BN254 or
/// BLS12-381, runs the five rounds, and renders the keyed proof export.
pub fn prove(
    zkey_bytes: Vec<u8>,
    witness_bytes: &[u8],
    options: &ProverOptions,
) -> Result<ProveOutput> {
    let q = zkey::peek_base_prime(&zkey_bytes)?;
    if q == base_prime_le::<ark_bn254::Fq>() {
        let (proof, publics) =
            prover::prove::<ark_bn254::Bn254>(zkey_bytes, witness_bytes, options)?;
        Ok(ProveOutput {
            proof: proof.export("bn254"),
            public_inputs: publics.iter().map(|p| p.into_bigint().to_string()).collect(),
        })
    } else if q == base_prime_le::<ark_bls12_381::Fq>() {
        let (proof, publics) =
            prover::prove::<ark_bls12_381::Bls12_381>(zkey_bytes, witness_bytes, options)?;
        Ok(ProveOutput {
            proof: proof.export("bls12_381"),
            public_inputs: publics.iter().map(|p| p.into_bigint().to_string()).collect(),
        })
    } else {
        Err(ProverError::InvalidProvingKey(
            "unrecognised base-field prime; supported curves are bn254 and bls12_381".into(),
        ))
    }
}

/// [`prove`] over on-disk containers.
pub fn prove_files(
    zkey_path: &std::path::Path,
    witness_path: &std::path::Path,
    options: &ProverOptions,
) -> Result<ProveOutput> {
    let zkey_bytes = std::fs::read(zkey_path)?;
    let witness_bytes = std::fs::read(witness_path)?;
    prove(zkey_bytes, &witness_bytes, options)
}
