//! Five-round Baby-Plonk prover
//!
//! The prover's working set — witness buffers, polynomials, coset
//! evaluations, challenges, and the accumulating proof — lives in one
//! struct whose round methods take `&mut self` and run strictly in order.
//! The Fiat–Shamir schedule is a total order: every absorb happens exactly
//! where the protocol places it, with the two transcript resets (between
//! β/γ and between v₀/v′₀) preserved verbatim, because any deviation
//! changes every downstream challenge.
//!
//! Round shape:
//! 1. commit the blinded wire polynomials `[A]₁`, `[B]₁`;
//! 2. derive (β, γ), build the telescoping permutation accumulator `Z`
//!    (one batch inversion for all denominators), commit `[Z]₁`;
//! 3. derive α, evaluate the gate/permutation/boundary identities plus the
//!    public-input correction on the 4n coset, divide by `Z_H`, fold in the
//!    blinding perturbation, split, commit `[T_L]₁`, `[T_H]₁`;
//! 4. derive ζ, evaluate the openings at ζ and ζω;
//! 5. derive the aggregation challenges, build the linearisation
//!    polynomial and both opening quotients, commit `[W_ζ]₁`, `[W_ζω]₁`.
//!
//! Large zkey evaluation buffers (`Q1`, `Q2`, Lagrange) are read inside
//! round 3 and dropped when it returns, bounding peak memory to a few
//! `4n`-scalar buffers.

#![forbid(unsafe_code)]

use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::{Field, One, PrimeField, Zero};
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::domain::Domain;
use crate::error::{ProverError, Result};
use crate::evals::Evaluations;
use crate::field::{batch_inverse, sample};
use crate::msm::multi_exp;
use crate::poly::Polynomial;
use crate::proof::Proof;
use crate::transcript::Transcript;
use crate::witness::Witness;
use crate::zkey::{ProvingKey, PROTOCOL_BABY_PLONK};

/// Caller-tunable prover settings.
#[derive(Debug, Clone, Default)]
pub struct ProverOptions {
    /// Fixed seed for the blinding RNG. Proofs are byte-reproducible for a
    /// given seed, witness, and proving key; `None` draws from the OS.
    pub blinding_seed: Option<[u8; 32]>,
}

/// Fiat–Shamir challenges, filled as the rounds progress.
#[derive(Debug, Clone)]
struct Challenges<F: Field> {
    beta: F,
    gamma: F,
    alpha: F,
    alpha2: F,
    zeta: F,
    zetaw: F,
    /// Round-5 aggregation powers `v₀^{1..4}`.
    v: [F; 4],
    /// Shifted-opening aggregation powers `v′₀^{1..2}`.
    vp: [F; 2],
}

impl<F: Field> Default for Challenges<F> {
    fn default() -> Self {
        Self {
            beta: F::zero(),
            gamma: F::zero(),
            alpha: F::zero(),
            alpha2: F::zero(),
            zeta: F::zero(),
            zetaw: F::zero(),
            v: [F::zero(); 4],
            vp: [F::zero(); 2],
        }
    }
}

/// The prover's working set.
pub struct BabyPlonkProver<E: Pairing> {
    pk: ProvingKey<E>,
    domain: Domain<E::ScalarField>,
    tau: Vec<E::G1Affine>,
    transcript: Transcript<E::ScalarField>,
    challenges: Challenges<E::ScalarField>,
    /// Blinding factors `b1..b8`, in sampling order.
    blinding: [E::ScalarField; 8],

    /// Direct witness values (entry 0 zeroed).
    witness: Vec<E::ScalarField>,
    /// Internal witness entries computed from the additions section.
    internal: Vec<E::ScalarField>,

    /// Wire evaluations on the circuit subgroup; the first `nPublic`
    /// entries double as the public-input values.
    buf_a: Vec<E::ScalarField>,
    buf_b: Vec<E::ScalarField>,

    pol_a: Polynomial<E::ScalarField>,
    pol_b: Polynomial<E::ScalarField>,
    eval_a: Evaluations<E::ScalarField>,
    eval_b: Evaluations<E::ScalarField>,

    pol_z: Option<Polynomial<E::ScalarField>>,
    eval_z: Option<Evaluations<E::ScalarField>>,

    pol_t: Option<Polynomial<E::ScalarField>>,
    t_low: Option<Polynomial<E::ScalarField>>,
    t_high: Option<Polynomial<E::ScalarField>>,
    pol_s1: Option<Polynomial<E::ScalarField>>,

    proof: Proof<E>,
}

/// Blinded product of two factors against `zh = Z_H(ζᵢ)`:
/// `(a + aᵖ·Z_H)(b + bᵖ·Z_H) = e + Z_H·eᶻ`.
#[inline]
fn mul2<F: Field>(a: F, b: F, ap: F, bp: F, zh: F) -> (F, F) {
    let e = a * b;
    let ez = a * bp + ap * b + zh * ap * bp;
    (e, ez)
}

/// Blinded product of three factors: `e + Z_H·eᶻ` of
/// `(a + aᵖ·Z_H)(b + bᵖ·Z_H)(c + cᵖ·Z_H)`.
#[inline]
fn mul3<F: Field>(a: F, b: F, c: F, ap: F, bp: F, cp: F, zh: F) -> (F, F) {
    let e = a * b * c;
    let lin = a * b * cp + a * bp * c + ap * b * c;
    let quad = a * bp * cp + ap * b * cp + ap * bp * c;
    let cubic = ap * bp * cp;
    (e, lin + zh * (quad + zh * cubic))
}

impl<E: Pairing> BabyPlonkProver<E>
where
    <E::G1Affine as AffineRepr>::BaseField: PrimeField,
{
    /// Preflight: consistency checks, additions evaluation, wire buffers,
    /// wire interpolation, coset evaluations, and wire blinding.
    pub fn new(pk: ProvingKey<E>, witness: Witness<E::ScalarField>, options: &ProverOptions) -> Result<Self> {
        if pk.protocol_id != PROTOCOL_BABY_PLONK {
            return Err(ProverError::InvalidProvingKey(format!(
                "protocol id {} is not baby-plonk",
                pk.protocol_id
            )));
        }
        if pk.n_additions > pk.n_vars {
            return Err(ProverError::InvalidProvingKey(format!(
                "{} additions exceed {} signals",
                pk.n_additions, pk.n_vars
            )));
        }
        let direct_len = (pk.n_vars - pk.n_additions) as usize;
        if witness.len() != direct_len {
            return Err(ProverError::WitnessMismatch(format!(
                "witness has {} entries, circuit expects {}",
                witness.len(),
                direct_len
            )));
        }
        let domain = Domain::new(pk.power)?;
        let n = domain.n;
        if pk.n_constraints as usize > n {
            return Err(ProverError::InvalidProvingKey(format!(
                "{} constraint rows exceed the domain size {}",
                pk.n_constraints, n
            )));
        }
        if pk.n_public as usize > n {
            return Err(ProverError::InvalidProvingKey(format!(
                "{} public inputs exceed the domain size {}",
                pk.n_public, n
            )));
        }

        let tau = pk.tau_points()?;

        let mut direct = witness.values().to_vec();
        if let Some(first) = direct.first_mut() {
            // Entry 0 plays no role in the protocol.
            *first = E::ScalarField::zero();
        }

        // Evaluate the additions section; records may reference earlier
        // internal entries, unresolved indices read as zero.
        let mut internal: Vec<E::ScalarField> = Vec::with_capacity(pk.n_additions as usize);
        for add in pk.additions()? {
            let lookup = |idx: u32| -> E::ScalarField {
                let idx = idx as usize;
                if idx < direct.len() {
                    direct[idx]
                } else if idx - direct.len() < internal.len() {
                    internal[idx - direct.len()]
                } else {
                    E::ScalarField::zero()
                }
            };
            let value = add.factor1 * lookup(add.signal1) + add.factor2 * lookup(add.signal2);
            internal.push(value);
        }

        let mut rng = match options.blinding_seed {
            Some(seed) => StdRng::from_seed(seed),
            None => StdRng::from_entropy(),
        };
        let mut blinding = [E::ScalarField::zero(); 8];
        for slot in blinding.iter_mut() {
            *slot = sample(&mut rng);
        }

        let mut prover = Self {
            pk,
            domain,
            tau,
            transcript: Transcript::new(),
            challenges: Challenges::default(),
            blinding,
            witness: direct,
            internal,
            buf_a: Vec::new(),
            buf_b: Vec::new(),
            pol_a: Polynomial::zeros(0),
            pol_b: Polynomial::zeros(0),
            eval_a: Evaluations::new(Vec::new()),
            eval_b: Evaluations::new(Vec::new()),
            pol_z: None,
            eval_z: None,
            pol_t: None,
            t_low: None,
            t_high: None,
            pol_s1: None,
            proof: Proof::default(),
        };
        prover.build_wire_buffers()?;
        Ok(prover)
    }

    /// Resolve a signal index: direct buffer, then additions, then zero.
    fn get_witness(&self, idx: u32) -> E::ScalarField {
        let idx = idx as usize;
        if idx < self.witness.len() {
            self.witness[idx]
        } else if idx - self.witness.len() < self.internal.len() {
            self.internal[idx - self.witness.len()]
        } else {
            E::ScalarField::zero()
        }
    }

    fn build_wire_buffers(&mut self) -> Result<()> {
        let n = self.domain.n;
        let a_map = self.pk.a_map()?;
        let b_map = self.pk.b_map()?;
        let k_correction = self.pk.k_correction()?;

        let mut buf_a = vec![E::ScalarField::zero(); n];
        let mut buf_b = vec![E::ScalarField::zero(); n];
        for i in 0..self.pk.n_constraints as usize {
            buf_a[i] = self.get_witness(a_map[i]);
            let w = self.get_witness(b_map[i]);
            // Odd rows carry the pair's output slot: the witness value
            // enters negated, then the additive correction applies.
            buf_b[i] = if i % 2 == 1 {
                k_correction[i] - w
            } else {
                k_correction[i] + w
            };
        }

        let mut pol_a = Polynomial::from_evaluations(&self.domain, buf_a.clone())?;
        let mut pol_b = Polynomial::from_evaluations(&self.domain, buf_b.clone())?;
        self.eval_a = Evaluations::new(self.domain.coset_ntt_4n(pol_a.coeffs()));
        self.eval_b = Evaluations::new(self.domain.coset_ntt_4n(pol_b.coeffs()));
        pol_a.blind(&self.blinding[0..2]);
        pol_b.blind(&self.blinding[2..4]);

        self.buf_a = buf_a;
        self.buf_b = buf_b;
        self.pol_a = pol_a;
        self.pol_b = pol_b;
        Ok(())
    }

    /// Round 1: commit the blinded wire polynomials.
    fn round1(&mut self) -> Result<()> {
        self.proof.cm_a = multi_exp::<E>(&self.tau, self.pol_a.coeffs())?;
        self.proof.cm_b = multi_exp::<E>(&self.tau, self.pol_b.coeffs())?;
        debug!(target: "baby_plonk::prover", "round 1: wire commitments done");
        Ok(())
    }

    /// Round 2: derive (β, γ), build and commit the permutation
    /// accumulator `Z`.
    fn round2(&mut self) -> Result<()> {
        let n = self.domain.n;

        for public in &self.buf_a[..self.pk.n_public as usize] {
            self.transcript.absorb_scalar(public);
        }
        self.transcript.absorb_group(&self.proof.cm_a);
        self.transcript.absorb_group(&self.proof.cm_b);
        let beta = self.transcript.squeeze();
        self.transcript.reset();
        self.transcript.absorb_scalar(&beta);
        let gamma = self.transcript.squeeze();
        self.challenges.beta = beta;
        self.challenges.gamma = gamma;

        // σ evaluations on the circuit subgroup, from the coefficient
        // sections.
        let mut sigma1_h = self.pk.sigma1_coeffs()?;
        let mut sigma2_h = self.pk.sigma2_coeffs()?;
        self.domain.ntt(&mut sigma1_h);
        self.domain.ntt(&mut sigma2_h);

        let labels = self.domain.subgroup_powers();
        let k1 = self.pk.k1;

        let mut numerators = Vec::with_capacity(n);
        let mut denominators = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.buf_a[i];
            let b = self.buf_b[i];
            let w_i = labels[i];
            numerators.push(
                (a + beta * w_i + gamma) * (b + beta * k1 * w_i + gamma),
            );
            denominators.push(
                (a + beta * sigma1_h[i] + gamma) * (b + beta * sigma2_h[i] + gamma),
            );
        }
        batch_inverse(&mut denominators)?;

        let mut z = vec![E::ScalarField::one(); n];
        for i in 0..n - 1 {
            z[i + 1] = z[i] * numerators[i] * denominators[i];
        }
        // The product must telescope back to Z[0] = 1; anything else means
        // the witness breaks a copy-constraint cycle.
        let wraparound = z[n - 1] * numerators[n - 1] * denominators[n - 1];
        if !wraparound.is_one() {
            return Err(ProverError::CopyConstraintViolation);
        }

        let mut pol_z = Polynomial::from_evaluations(&self.domain, z)?;
        self.eval_z = Some(Evaluations::new(self.domain.coset_ntt_4n(pol_z.coeffs())));
        pol_z.blind(&self.blinding[4..7]);
        self.proof.cm_z = multi_exp::<E>(&self.tau, pol_z.coeffs())?;
        self.pol_z = Some(pol_z);
        debug!(target: "baby_plonk::prover", "round 2: permutation accumulator committed");
        Ok(())
    }

    /// Round 3: derive α, evaluate the quotient identities on the coset,
    /// divide by `Z_H`, fold in the blinding perturbation, split, commit.
    fn round3(&mut self) -> Result<()> {
        let n = self.domain.n;
        let m = 4 * n;

        self.transcript.absorb_group(&self.proof.cm_z);
        let alpha = self.transcript.squeeze();
        let alpha2 = alpha.square();
        self.challenges.alpha = alpha;
        self.challenges.alpha2 = alpha2;

        let eval_q1 = self.pk.q1_evals4()?;
        let eval_q2 = self.pk.q2_evals4()?;
        let sigma = self.pk.sigma_evals_8n()?;
        let lagrange = self.pk.lagrange_section()?;
        let eval_z = self
            .eval_z
            .as_ref()
            .expect("round 2 must run before round 3");

        let beta = self.challenges.beta;
        let gamma = self.challenges.gamma;
        let k1 = self.pk.k1;
        let [b1, b2, b3, b4, b5, b6, b7, _] = self.blinding;
        let zh_table = self.domain.zh_on_coset();
        let omega = self.domain.omega;

        let mut t = vec![E::ScalarField::zero(); m];
        let mut t_z = vec![E::ScalarField::zero(); m];

        // ζᵢ walks the 4n coset; the index shift by 4 is multiplication
        // by ω on the 4×-oversampled domain.
        let mut x = self.domain.coset;
        for i in 0..m {
            let i_w = (i + 4) % m;
            let xw = x * omega;
            let zh = zh_table[i % 4];

            let a = self.eval_a.get_wrapped(i);
            let b = self.eval_b.get_wrapped(i);
            let a_w = self.eval_a.get_wrapped(i_w);
            let b_w = self.eval_b.get_wrapped(i_w);
            let z = eval_z.get_wrapped(i);
            let z_w = eval_z.get_wrapped(i_w);
            let s1 = sigma.get_wrapped(i);
            let s2 = sigma.get_wrapped(m + i);

            // Blinding polynomials evaluated at ζᵢ and ζᵢ·ω.
            let ap = b1 + b2 * x;
            let bp = b3 + b4 * x;
            let ap_w = b1 + b2 * xw;
            let bp_w = b3 + b4 * xw;
            let zp = b5 + b6 * x + b7 * x * x;
            let zp_w = b5 + b6 * xw + b7 * xw * xw;

            // Gate identity, live on even rows only.
            let (gate, gate_z) = if i % 2 == 0 {
                let q1 = eval_q1.get(i)?;
                let q2 = eval_q2.get(i)?;
                let q1_w = eval_q1.get_wrapped(i_w);
                let q2_w = eval_q2.get_wrapped(i_w);
                let (ab, ab_z) = mul2(a, b, ap, bp, zh);
                let (aaw, aaw_z) = mul2(a, a_w, ap, ap_w, zh);
                (
                    a * q1 + b * q2 + ab * q1_w + aaw * q2_w + b_w,
                    ap * q1 + bp * q2 + ab_z * q1_w + aaw_z * q2_w + bp_w,
                )
            } else {
                (E::ScalarField::zero(), E::ScalarField::zero())
            };

            // Permutation identity.
            let (p1, p1_z) = mul3(
                a + beta * x + gamma,
                b + beta * k1 * x + gamma,
                z,
                ap,
                bp,
                zp,
                zh,
            );
            let (p2, p2_z) = mul3(
                a + beta * s1 + gamma,
                b + beta * s2 + gamma,
                z_w,
                ap,
                bp,
                zp_w,
                zh,
            );
            let perm = p1 - p2;
            let perm_z = p1_z - p2_z;

            // Boundary: (Z − 1)·L₁ on the coset.
            let l1 = lagrange[n + i];
            let boundary = (z - E::ScalarField::one()) * l1;
            let boundary_z = zp * l1;

            // Public-input correction.
            let mut publics = E::ScalarField::zero();
            for j in 0..self.pk.n_public as usize {
                publics -= lagrange[j * 5 * n + n + i] * self.buf_a[j];
            }

            t[i] = gate + alpha * perm + alpha2 * boundary + publics;
            t_z[i] = gate_z + alpha * perm_z + alpha2 * boundary_z;

            x *= self.domain.omega_4n;
        }

        let mut pol_t = Polynomial::from_coeffs(self.domain.coset_intt_4n(&t)?);
        pol_t.div_by_zh(n)?;
        let pol_tz = Polynomial::from_coeffs(self.domain.coset_intt_4n(&t_z)?);
        pol_t.add(&pol_tz, None)?;
        pol_t.truncate();

        let parts = pol_t.split(2, n + 1, &self.blinding[7..8]);
        let [t_low, t_high]: [Polynomial<E::ScalarField>; 2] =
            parts.try_into().expect("split produced two parts");
        self.proof.cm_t_low = multi_exp::<E>(&self.tau, t_low.coeffs())?;
        self.proof.cm_t_high = multi_exp::<E>(&self.tau, t_high.coeffs())?;
        self.pol_t = Some(pol_t);
        self.t_low = Some(t_low);
        self.t_high = Some(t_high);
        debug!(target: "baby_plonk::prover", "round 3: quotient committed");
        Ok(())
    }

    /// Round 4: derive ζ and evaluate the openings.
    fn round4(&mut self) -> Result<()> {
        self.transcript.absorb_group(&self.proof.cm_t_low);
        self.transcript.absorb_group(&self.proof.cm_t_high);
        let zeta = self.transcript.squeeze();
        let zetaw = zeta * self.domain.omega;
        self.challenges.zeta = zeta;
        self.challenges.zetaw = zetaw;

        let pol_s1 = Polynomial::from_coeffs(self.pk.sigma1_coeffs()?);
        let pol_t = self.pol_t.as_ref().expect("round 3 must run before round 4");
        let pol_z = self.pol_z.as_ref().expect("round 2 must run before round 4");

        self.proof.eval_a = self.pol_a.evaluate(&zeta);
        self.proof.eval_b = self.pol_b.evaluate(&zeta);
        self.proof.eval_s1 = pol_s1.evaluate(&zeta);
        self.proof.eval_t = pol_t.evaluate(&zeta);
        self.proof.eval_aw = self.pol_a.evaluate(&zetaw);
        self.proof.eval_bw = self.pol_b.evaluate(&zetaw);
        self.proof.eval_zw = pol_z.evaluate(&zetaw);

        self.pol_s1 = Some(pol_s1);
        debug!(target: "baby_plonk::prover", "round 4: openings evaluated");
        Ok(())
    }

    /// Round 5: aggregation challenges, linearisation polynomial, and the
    /// two opening quotients.
    fn round5(&mut self) -> Result<()> {
        let n = self.domain.n;

        self.transcript.absorb_scalar(&self.proof.eval_a);
        self.transcript.absorb_scalar(&self.proof.eval_b);
        self.transcript.absorb_scalar(&self.proof.eval_s1);
        self.transcript.absorb_scalar(&self.proof.eval_aw);
        self.transcript.absorb_scalar(&self.proof.eval_bw);
        self.transcript.absorb_scalar(&self.proof.eval_zw);
        let v0 = self.transcript.squeeze();
        self.challenges.v = [v0, v0.square(), v0.square() * v0, v0.square().square()];
        self.transcript.reset();
        self.transcript.absorb_scalar(&v0);
        let vp0 = self.transcript.squeeze();
        self.challenges.vp = [vp0, vp0.square()];
        let v = self.challenges.v;
        let vp = self.challenges.vp;

        let beta = self.challenges.beta;
        let gamma = self.challenges.gamma;
        let alpha = self.challenges.alpha;
        let alpha2 = self.challenges.alpha2;
        let zeta = self.challenges.zeta;
        let zetaw = self.challenges.zetaw;
        let a_ = self.proof.eval_a;
        let b_ = self.proof.eval_b;
        let s1_ = self.proof.eval_s1;
        let aw_ = self.proof.eval_aw;
        let zw_ = self.proof.eval_zw;

        // ζ^n by k squarings, then L₁(ζ) = (ζ^n − 1)/(n·(ζ − 1)).
        let mut zeta_n = zeta;
        for _ in 0..self.domain.k {
            zeta_n.square_in_place();
        }
        let l1_den = E::ScalarField::from(n as u64) * (zeta - E::ScalarField::one());
        let l1_at_zeta = (zeta_n - E::ScalarField::one())
            * l1_den
                .inverse()
                .ok_or(crate::error::FieldError::ZeroInversion)?;

        // Linearisation polynomial R.
        let q1 = self.pk.q1_coeffs()?;
        let q2 = self.pk.q2_coeffs()?;
        let sigma2 = self.pk.sigma2_coeffs()?;
        let pol_z = self.pol_z.take().expect("round 2 must run before round 5");

        let coef_z = alpha * (a_ + beta * zeta + gamma) * (b_ + beta * self.pk.k1 * zeta + gamma)
            + alpha2 * l1_at_zeta;
        let coef_s2 = (a_ + beta * s1_ + gamma) * beta * zw_ * alpha;

        let z_coeffs = pol_z.coeffs();
        let mut r_coeffs = vec![E::ScalarField::zero(); n + 3];
        for (i, slot) in r_coeffs.iter_mut().enumerate() {
            let mut value = coef_z * z_coeffs[i];
            if i < n {
                if i % 2 == 0 {
                    value += a_ * q1[i]
                        + b_ * q2[i]
                        + a_ * b_ * q1[(i + 1) % n]
                        + a_ * aw_ * q2[(i + 1) % n];
                }
                value -= coef_s2 * sigma2[i];
            }
            *slot = value;
        }
        let pol_r = Polynomial::from_coeffs(r_coeffs);
        let r_ = pol_r.evaluate(&zeta);
        self.proof.eval_r = r_;

        // W_ζ: aggregate everything opened at ζ and divide by (X − ζ).
        let t_low = self.t_low.take().expect("round 3 must run before round 5");
        let t_high = self.t_high.take().expect("round 3 must run before round 5");
        let pol_s1 = self.pol_s1.take().expect("round 4 must run before round 5");
        let zeta_n2 = zeta_n * zeta.square();

        // The high quotient part keeps whatever length the split left it
        // with; size the aggregate to the longest operand.
        let wxi_len = (n + 3).max(t_low.len()).max(t_high.len());
        let mut wxi = Polynomial::zeros(wxi_len);
        wxi.add(&t_low, None)?;
        wxi.add(&t_high, Some(zeta_n2))?;
        wxi.add(&pol_r, Some(v[0]))?;
        wxi.add(&self.pol_a, Some(v[1]))?;
        wxi.add(&self.pol_b, Some(v[2]))?;
        wxi.add(&pol_s1, Some(v[3]))?;
        let opened = self.proof.eval_t
            + v[0] * r_
            + v[1] * a_
            + v[2] * b_
            + v[3] * s1_;
        wxi.sub_scalar(&opened);
        wxi.div_by_x_minus(zeta)?;
        self.proof.cm_wxi = multi_exp::<E>(&self.tau, wxi.coeffs())?;

        // W_ζω: the shifted openings, divided by (X − ζω).
        let mut wxiw = Polynomial::zeros(n + 3);
        wxiw.add(&pol_z, None)?;
        wxiw.add(&self.pol_a, Some(vp[0]))?;
        wxiw.add(&self.pol_b, Some(vp[1]))?;
        let opened_w = self.proof.eval_zw + vp[0] * aw_ + vp[1] * self.proof.eval_bw;
        wxiw.sub_scalar(&opened_w);
        wxiw.div_by_x_minus(zetaw)?;
        self.proof.cm_wxiw = multi_exp::<E>(&self.tau, wxiw.coeffs())?;

        debug!(target: "baby_plonk::prover", "round 5: opening proofs committed");
        Ok(())
    }

    /// Run the five rounds and return the proof with the public inputs in
    /// circuit order.
    pub fn prove(mut self) -> Result<(Proof<E>, Vec<E::ScalarField>)> {
        self.round1()?;
        self.round2()?;
        self.round3()?;
        self.round4()?;
        self.round5()?;
        let publics = self.buf_a[..self.pk.n_public as usize].to_vec();
        Ok((self.proof, publics))
    }
}

/// Parse the key and witness, run preflight, and produce a proof.
pub fn prove<E: Pairing>(
    zkey_bytes: Vec<u8>,
    witness_bytes: &[u8],
    options: &ProverOptions,
) -> Result<(Proof<E>, Vec<E::ScalarField>)>
where
    <E::G1Affine as AffineRepr>::BaseField: PrimeField,
{
    let pk = ProvingKey::<E>::read(zkey_bytes)?;
    let witness = Witness::read(witness_bytes)?;
    let prover = BabyPlonkProver::new(pk, witness, options)?;
    prover.prove()
}
