//! Multi-scalar multiplication over the powers-of-τ table
//!
//! Commitments are `Σ cᵢ·[τ^i]₁`. The τ table is loaded once from the
//! proving key and shared read-only across every call; the windowed
//! Pippenger bucketing itself comes from arkworks' variable-base MSM.
//! Scalars leave Montgomery form (`into_bigint`) before the group
//! arithmetic, and the point slice may be longer than the scalar slice —
//! trailing points are ignored.

#![forbid(unsafe_code)]

use ark_ec::{pairing::Pairing, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;

use crate::error::{ProverError, Result};

/// `Σ scalars[i] · points[i]` over the leading `|scalars|` points.
pub fn multi_exp<E: Pairing>(
    points: &[E::G1Affine],
    scalars: &[E::ScalarField],
) -> Result<E::G1Affine> {
    if points.len() < scalars.len() {
        return Err(ProverError::InvalidProvingKey(format!(
            "powers-of-tau table too short: {} points for {} scalars",
            points.len(),
            scalars.len()
        )));
    }
    let bigints: Vec<_> = scalars.iter().map(|s| s.into_bigint()).collect();
    let acc = E::G1::msm_bigint(&points[..scalars.len()], &bigints);
    Ok(acc.into_affine())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Bn254, Fr, G1Affine, G1Projective};
    use ark_ec::Group;
    use ark_ff::{UniformRand, Zero};
    use rand::{rngs::StdRng, SeedableRng};

    fn tau_table(len: usize, tau: Fr) -> Vec<G1Affine> {
        let gen = G1Projective::generator();
        let mut acc = Fr::from(1u64);
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push((gen * acc).into_affine());
            acc *= tau;
        }
        out
    }

    #[test]
    fn matches_naive_sum_and_ignores_trailing_points() {
        let mut rng = StdRng::seed_from_u64(21);
        let tau = Fr::rand(&mut rng);
        let points = tau_table(12, tau);
        let scalars: Vec<Fr> = (0..8).map(|_| Fr::rand(&mut rng)).collect();

        let expected = scalars
            .iter()
            .zip(&points)
            .fold(G1Projective::zero(), |acc, (s, p)| acc + G1Projective::from(*p) * s)
            .into_affine();

        let got = multi_exp::<Bn254>(&points, &scalars).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn short_table_is_an_error() {
        let points = tau_table(2, Fr::from(5u64));
        let scalars = vec![Fr::from(1u64); 3];
        assert!(multi_exp::<Bn254>(&points, &scalars).is_err());
    }
}
