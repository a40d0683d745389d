//! Proof object & export encoding
//!
//! `Proof` is the typed object the rounds fill in: seven G1 commitments and
//! the opening evaluations at `ζ` / `ζω`. `ProofExport` is the stable
//! interchange shape — decimal-string coordinates keyed exactly as the
//! verifier expects (`A`, `B`, `Z`, `TL`, `TH`, `Wxi`, `Wxiw` /
//! `a`, `b`, `s1`, `aw`, `bw`, `zw`, `r`), plus the protocol and curve
//! tags. The quotient evaluation `t` stays prover-internal: round 5 needs
//! it for the opening constant, the proof schema does not carry it.

#![forbid(unsafe_code)]

use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::{PrimeField, Zero};
use serde::{Deserialize, Serialize};

/// Protocol tag stamped into exported proofs.
pub const PROTOCOL_TAG: &str = "baby_plonk";

/// Group commitments and scalar evaluations accumulated across rounds.
#[derive(Debug, Clone)]
pub struct Proof<E: Pairing> {
    /// `[A]₁` — wire-a commitment (round 1).
    pub cm_a: E::G1Affine,
    /// `[B]₁` — wire-b commitment (round 1).
    pub cm_b: E::G1Affine,
    /// `[Z]₁` — permutation accumulator commitment (round 2).
    pub cm_z: E::G1Affine,
    /// `[T_L]₁` — low quotient part (round 3).
    pub cm_t_low: E::G1Affine,
    /// `[T_H]₁` — high quotient part (round 3).
    pub cm_t_high: E::G1Affine,
    /// `[W_ζ]₁` — opening proof at ζ (round 5).
    pub cm_wxi: E::G1Affine,
    /// `[W_ζω]₁` — opening proof at ζω (round 5).
    pub cm_wxiw: E::G1Affine,

    /// `A(ζ)`.
    pub eval_a: E::ScalarField,
    /// `B(ζ)`.
    pub eval_b: E::ScalarField,
    /// `σ1(ζ)`.
    pub eval_s1: E::ScalarField,
    /// `T(ζ)` — prover-internal, not exported.
    pub eval_t: E::ScalarField,
    /// `A(ζω)`.
    pub eval_aw: E::ScalarField,
    /// `B(ζω)`.
    pub eval_bw: E::ScalarField,
    /// `Z(ζω)`.
    pub eval_zw: E::ScalarField,
    /// `R(ζ)` — linearisation evaluation.
    pub eval_r: E::ScalarField,
}

impl<E: Pairing> Default for Proof<E> {
    fn default() -> Self {
        Self {
            cm_a: E::G1Affine::zero(),
            cm_b: E::G1Affine::zero(),
            cm_z: E::G1Affine::zero(),
            cm_t_low: E::G1Affine::zero(),
            cm_t_high: E::G1Affine::zero(),
            cm_wxi: E::G1Affine::zero(),
            cm_wxiw: E::G1Affine::zero(),
            eval_a: E::ScalarField::zero(),
            eval_b: E::ScalarField::zero(),
            eval_s1: E::ScalarField::zero(),
            eval_t: E::ScalarField::zero(),
            eval_aw: E::ScalarField::zero(),
            eval_bw: E::ScalarField::zero(),
            eval_zw: E::ScalarField::zero(),
            eval_r: E::ScalarField::zero(),
        }
    }
}

/// Affine point as decimal coordinate strings; the identity is `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointExport {
    /// Base-field x coordinate, decimal.
    pub x: String,
    /// Base-field y coordinate, decimal.
    pub y: String,
}

/// Curve-erased proof in the keyed interchange shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofExport {
    /// Wire-a commitment.
    #[serde(rename = "A")]
    pub a: PointExport,
    /// Wire-b commitment.
    #[serde(rename = "B")]
    pub b: PointExport,
    /// Permutation accumulator commitment.
    #[serde(rename = "Z")]
    pub z: PointExport,
    /// Low quotient part.
    #[serde(rename = "TL")]
    pub t_low: PointExport,
    /// High quotient part.
    #[serde(rename = "TH")]
    pub t_high: PointExport,
    /// Opening proof at ζ.
    #[serde(rename = "Wxi")]
    pub wxi: PointExport,
    /// Opening proof at ζω.
    #[serde(rename = "Wxiw")]
    pub wxiw: PointExport,

    /// `A(ζ)`, decimal.
    #[serde(rename = "a")]
    pub eval_a: String,
    /// `B(ζ)`, decimal.
    #[serde(rename = "b")]
    pub eval_b: String,
    /// `σ1(ζ)`, decimal.
    #[serde(rename = "s1")]
    pub eval_s1: String,
    /// `A(ζω)`, decimal.
    #[serde(rename = "aw")]
    pub eval_aw: String,
    /// `B(ζω)`, decimal.
    #[serde(rename = "bw")]
    pub eval_bw: String,
    /// `Z(ζω)`, decimal.
    #[serde(rename = "zw")]
    pub eval_zw: String,
    /// `R(ζ)`, decimal.
    #[serde(rename = "r")]
    pub eval_r: String,

    /// Always `"baby_plonk"`.
    pub protocol: String,
    /// Curve name (`"bn254"` or `"bls12_381"`).
    pub curve: String,
}

fn point_export<G>(p: &G) -> PointExport
where
    G: AffineRepr,
    G::BaseField: PrimeField,
{
    match p.xy() {
        Some((x, y)) => PointExport {
            x: x.into_bigint().to_string(),
            y: y.into_bigint().to_string(),
        },
        None => PointExport { x: "0".into(), y: "0".into() },
    }
}

fn scalar_export<F: PrimeField>(s: &F) -> String {
    s.into_bigint().to_string()
}

impl<E: Pairing> Proof<E>
where
    <E::G1Affine as AffineRepr>::BaseField: PrimeField,
{
    /// Render the keyed interchange shape for the named curve.
    pub fn export(&self, curve: &str) -> ProofExport {
        ProofExport {
            a: point_export(&self.cm_a),
            b: point_export(&self.cm_b),
            z: point_export(&self.cm_z),
            t_low: point_export(&self.cm_t_low),
            t_high: point_export(&self.cm_t_high),
            wxi: point_export(&self.cm_wxi),
            wxiw: point_export(&self.cm_wxiw),
            eval_a: scalar_export(&self.eval_a),
            eval_b: scalar_export(&self.eval_b),
            eval_s1: scalar_export(&self.eval_s1),
            eval_aw: scalar_export(&self.eval_aw),
            eval_bw: scalar_export(&self.eval_bw),
            eval_zw: scalar_export(&self.eval_zw),
            eval_r: scalar_export(&self.eval_r),
            protocol: PROTOCOL_TAG.to_string(),
            curve: curve.to_string(),
        }
    }
}
