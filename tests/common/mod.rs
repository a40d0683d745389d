//! Test fixtures: a tiny circuit builder that assembles valid `zkey` and
//! `wtns` containers for the prover.
//!
//! The builder takes wire maps, selector evaluations on the circuit
//! subgroup, and copy-constraint cycles; it derives the σ permutation
//! labels, interpolates every polynomial section with the crate's own
//! domain transforms, and synthesizes a deterministic powers-of-τ table
//! from a fixed seed.

use ark_bn254::{Fq, Fr, G1Projective};
use ark_ec::{CurveGroup, Group};
use ark_ff::{BigInteger, UniformRand, Zero};
use ark_serialize::CanonicalSerialize;
use rand::{rngs::StdRng, SeedableRng};

use baby_plonk::domain::Domain;
use baby_plonk::field::{scalar_byte_len, scalar_to_bytes_le};
use baby_plonk::zkey::{sections, PROTOCOL_BABY_PLONK, ZKEY_VERSION};

/// Which wire column a copy-constrained position lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    A,
    B,
}

/// Circuit description consumed by [`build_zkey`].
pub struct CircuitSpec {
    pub power: u32,
    pub n_vars: u32,
    pub n_public: u32,
    /// `(signal1, signal2, factor1, factor2)` addition records.
    pub additions: Vec<(u32, u32, Fr, Fr)>,
    pub a_map: Vec<u32>,
    pub b_map: Vec<u32>,
    /// `Q1` evaluations on the circuit subgroup (length n).
    pub q1: Vec<Fr>,
    /// `Q2` evaluations on the circuit subgroup (length n).
    pub q2: Vec<Fr>,
    /// Copy-constraint cycles over wire positions.
    pub cycles: Vec<Vec<(Wire, usize)>>,
}

pub const K1: u64 = 2;

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_scalars(out: &mut Vec<u8>, values: &[Fr]) {
    for v in values {
        out.extend_from_slice(&scalar_to_bytes_le(v));
    }
}

fn push_section(out: &mut Vec<u8>, id: u32, payload: &[u8]) {
    push_u32(out, id);
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(payload);
}

/// Interpolate subgroup evaluations and append `coeffs ‖ coset evals`.
fn push_poly_pair(out: &mut Vec<u8>, domain: &Domain<Fr>, evals_on_h: &[Fr]) {
    let mut coeffs = evals_on_h.to_vec();
    domain.intt(&mut coeffs).unwrap();
    let evals4 = domain.coset_ntt_4n(&coeffs);
    push_scalars(out, &coeffs);
    push_scalars(out, &evals4);
}

/// Derive σ1/σ2 label evaluations from the declared cycles.
fn sigma_labels(domain: &Domain<Fr>, cycles: &[Vec<(Wire, usize)>]) -> (Vec<Fr>, Vec<Fr>) {
    let k1 = Fr::from(K1);
    let labels_a = domain.subgroup_powers();
    let labels_b: Vec<Fr> = labels_a.iter().map(|w| k1 * w).collect();

    let mut sigma1 = labels_a.clone();
    let mut sigma2 = labels_b.clone();
    for cycle in cycles {
        for (idx, &(wire, row)) in cycle.iter().enumerate() {
            let (next_wire, next_row) = cycle[(idx + 1) % cycle.len()];
            let label = match next_wire {
                Wire::A => labels_a[next_row],
                Wire::B => labels_b[next_row],
            };
            match wire {
                Wire::A => sigma1[row] = label,
                Wire::B => sigma2[row] = label,
            }
        }
    }
    (sigma1, sigma2)
}

/// Powers-of-τ table from a fixed dev seed, serialized uncompressed.
fn tau_section(count: usize) -> Vec<u8> {
    let mut rng = StdRng::from_seed([42u8; 32]);
    let tau = Fr::rand(&mut rng);
    let gen = G1Projective::generator();
    let mut out = Vec::new();
    let mut power = Fr::from(1u64);
    for _ in 0..count {
        let point = (gen * power).into_affine();
        point.serialize_uncompressed(&mut out).unwrap();
        power *= tau;
    }
    out
}

/// Assemble a complete Baby-Plonk proving key.
pub fn build_zkey(spec: &CircuitSpec) -> Vec<u8> {
    let domain = Domain::<Fr>::new(spec.power).unwrap();
    let n = domain.n;
    assert_eq!(spec.a_map.len(), n);
    assert_eq!(spec.b_map.len(), n);
    assert_eq!(spec.q1.len(), n);
    assert_eq!(spec.q2.len(), n);

    let mut out = Vec::new();
    out.extend_from_slice(b"zkey");
    push_u32(&mut out, ZKEY_VERSION);
    push_u32(&mut out, 11);

    // 1: protocol
    let mut protocol = Vec::new();
    push_u32(&mut protocol, PROTOCOL_BABY_PLONK);
    push_section(&mut out, sections::PROTOCOL, &protocol);

    // 2: header
    let mut header = Vec::new();
    push_u32(&mut header, scalar_byte_len::<Fq>() as u32);
    let mut q_bytes = <Fq as ark_ff::PrimeField>::MODULUS.to_bytes_le();
    q_bytes.truncate(scalar_byte_len::<Fq>());
    header.extend_from_slice(&q_bytes);
    push_u32(&mut header, scalar_byte_len::<Fr>() as u32);
    let mut r_bytes = <Fr as ark_ff::PrimeField>::MODULUS.to_bytes_le();
    r_bytes.truncate(scalar_byte_len::<Fr>());
    header.extend_from_slice(&r_bytes);
    push_u32(&mut header, spec.power);
    header.extend_from_slice(&scalar_to_bytes_le(&Fr::from(K1)));
    push_u32(&mut header, spec.n_vars);
    push_u32(&mut header, spec.n_public);
    push_u32(&mut header, spec.additions.len() as u32);
    push_u32(&mut header, n as u32);
    push_section(&mut out, sections::HEADER, &header);

    // 3: additions
    let mut additions = Vec::new();
    for &(s1, s2, f1, f2) in &spec.additions {
        push_u32(&mut additions, s1);
        push_u32(&mut additions, s2);
        additions.extend_from_slice(&scalar_to_bytes_le(&f1));
        additions.extend_from_slice(&scalar_to_bytes_le(&f2));
    }
    push_section(&mut out, sections::ADDITIONS, &additions);

    // 4, 5: wire maps
    let mut a_map = Vec::new();
    for &idx in &spec.a_map {
        push_u32(&mut a_map, idx);
    }
    push_section(&mut out, sections::A_MAP, &a_map);
    let mut b_map = Vec::new();
    for &idx in &spec.b_map {
        push_u32(&mut b_map, idx);
    }
    push_section(&mut out, sections::B_MAP, &b_map);

    // 6: additive correction (zero for these circuits)
    let mut k_corr = Vec::new();
    push_scalars(&mut k_corr, &vec![Fr::zero(); n]);
    push_section(&mut out, sections::K_CORRECTION, &k_corr);

    // 7, 8: selectors
    let mut q1 = Vec::new();
    push_poly_pair(&mut q1, &domain, &spec.q1);
    push_section(&mut out, sections::Q1, &q1);
    let mut q2 = Vec::new();
    push_poly_pair(&mut q2, &domain, &spec.q2);
    push_section(&mut out, sections::Q2, &q2);

    // 9: sigma
    let (sigma1, sigma2) = sigma_labels(&domain, &spec.cycles);
    let mut sigma = Vec::new();
    push_poly_pair(&mut sigma, &domain, &sigma1);
    push_poly_pair(&mut sigma, &domain, &sigma2);
    push_section(&mut out, sections::SIGMA, &sigma);

    // 10: lagrange bases for max(1, nPublic) positions
    let mut lagrange = Vec::new();
    for j in 0..(spec.n_public as usize).max(1) {
        let mut basis = vec![Fr::zero(); n];
        basis[j] = Fr::from(1u64);
        push_poly_pair(&mut lagrange, &domain, &basis);
    }
    push_section(&mut out, sections::LAGRANGE, &lagrange);

    // 11: powers of tau — the split quotient's high part can reach ~3n
    // coefficients, so the table covers the full 4n range.
    push_section(&mut out, sections::PTAU, &tau_section(4 * n));

    out
}

/// Assemble a `wtns` container for the BN254 scalar field.
pub fn build_witness(values: &[Fr]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"wtns");
    push_u32(&mut out, 2);
    push_u32(&mut out, 2);

    let mut header = Vec::new();
    push_u32(&mut header, scalar_byte_len::<Fr>() as u32);
    let mut r_bytes = <Fr as ark_ff::PrimeField>::MODULUS.to_bytes_le();
    r_bytes.truncate(scalar_byte_len::<Fr>());
    header.extend_from_slice(&r_bytes);
    push_u32(&mut header, values.len() as u32);
    push_section(&mut out, 1, &header);

    let mut payload = Vec::new();
    push_scalars(&mut payload, values);
    push_section(&mut out, 2, &payload);
    out
}

/// `x·x = y` with `y` public: pair 0 exposes the public input, pair 1
/// multiplies, and copy cycles tie the square to the public wire.
/// Witness layout: `[w0, y, x, t]` with `t` the computed square.
pub fn square_circuit() -> CircuitSpec {
    let n = 4usize;
    let one = Fr::from(1u64);
    let mut q1 = vec![Fr::zero(); n];
    q1[0] = one; // pair 0: read the public wire
    q1[3] = one; // pair 1: a·b product term
    CircuitSpec {
        power: 2,
        n_vars: 4,
        n_public: 1,
        additions: Vec::new(),
        a_map: vec![1, 0, 2, 3],
        b_map: vec![0, 0, 2, 3],
        q1,
        q2: vec![Fr::zero(); n],
        cycles: vec![
            vec![(Wire::A, 0), (Wire::A, 3)], // y == t
            vec![(Wire::A, 2), (Wire::B, 2)], // both multiplication inputs are x
        ],
    }
}

/// Three chained multiplications `x → x² → x³ → x⁴` with the result
/// public (or not, when `with_public` is false). Witness layout:
/// `[w0, out, x, t1, t2, t3]`.
pub fn chain_circuit(with_public: bool) -> CircuitSpec {
    let n = 8usize;
    let one = Fr::from(1u64);
    let mut q1 = vec![Fr::zero(); n];
    if with_public {
        q1[0] = one;
    }
    q1[3] = one;
    q1[5] = one;
    q1[7] = one;
    CircuitSpec {
        power: 3,
        n_vars: 6,
        n_public: if with_public { 1 } else { 0 },
        additions: Vec::new(),
        a_map: vec![1, 0, 2, 0, 3, 0, 4, 5],
        b_map: vec![0, 0, 2, 3, 2, 4, 2, 5],
        q1,
        q2: vec![Fr::zero(); n],
        cycles: vec![
            vec![(Wire::A, 0), (Wire::A, 7)], // out == t3
            vec![(Wire::A, 2), (Wire::B, 2), (Wire::B, 4), (Wire::B, 6)], // x fan-out
        ],
    }
}

/// Witness for [`chain_circuit`].
pub fn chain_witness(x: u64) -> Vec<Fr> {
    let x = Fr::from(x);
    let t1 = x * x;
    let t2 = t1 * x;
    let t3 = t2 * x;
    vec![Fr::zero(), t3, x, t1, t2, t3]
}

/// `s = u + 2v` enforced through the additions section: the internal wire
/// carries the combination and a copy cycle ties it to the public input.
/// Direct witness layout: `[w0, s, u, v]`; internal wire 4 is `u + 2v`.
pub fn additions_circuit() -> CircuitSpec {
    let n = 16usize;
    let mut q1 = vec![Fr::zero(); n];
    q1[0] = Fr::from(1u64);
    CircuitSpec {
        power: 4,
        n_vars: 5,
        n_public: 1,
        additions: vec![(2, 3, Fr::from(1u64), Fr::from(2u64))],
        a_map: {
            let mut m = vec![0u32; n];
            m[0] = 1; // public s
            m[2] = 4; // internal u + 2v
            m
        },
        b_map: vec![0u32; n],
        q1,
        q2: vec![Fr::zero(); n],
        cycles: vec![vec![(Wire::A, 0), (Wire::A, 2)]],
    }
}
