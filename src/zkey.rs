//! Proving-key container
//!
//! The zkey is a sectioned binary file: magic `zkey`, a format version,
//! a section count, then `(u32 id, u64 size, payload)` records. The header
//! sections parse eagerly; the bulk sections (maps, selector and σ
//! polynomials, Lagrange bases, powers of τ) are recorded as byte ranges
//! and decoded on demand, so the prover can drop large evaluation buffers
//! as soon as a round no longer needs them.
//!
//! Scalars are canonical little-endian reduced integers, `sFr` wide.
//! G1 points are affine `x ‖ y`, each a canonical little-endian base-field
//! integer (`2·n8q` bytes per point); subgroup membership is trusted from
//! the key. Every malformed shape is `InvalidProvingKey`.

#![forbid(unsafe_code)]

use ark_ec::pairing::Pairing;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::CanonicalDeserialize;
use std::collections::BTreeMap;
use std::ops::Range;

use crate::container::ByteReader;
use crate::error::{ProverError, Result};
use crate::evals::Evaluations;
use crate::field::{read_scalar_le, read_scalars_le, scalar_byte_len};

/// Protocol id stamped into Baby-Plonk proving keys.
pub const PROTOCOL_BABY_PLONK: u32 = 3;

/// Container format version.
pub const ZKEY_VERSION: u32 = 1;

/// Section ids of the proving-key container.
pub mod sections {
    /// `u32 protocol_id`.
    pub const PROTOCOL: u32 = 1;
    /// Field sizes and primes, domain power, `k1`, circuit counts.
    pub const HEADER: u32 = 2;
    /// Packed `(u32, u32, Fr, Fr)` addition records.
    pub const ADDITIONS: u32 = 3;
    /// `u32[nConstraints]` wire-a witness map.
    pub const A_MAP: u32 = 4;
    /// `u32[nConstraints]` wire-b witness map.
    pub const B_MAP: u32 = 5;
    /// `Fr[nConstraints]` additive correction on wire b.
    pub const K_CORRECTION: u32 = 6;
    /// `Q1` coefficients (n) then coset evaluations (4n).
    pub const Q1: u32 = 7;
    /// `Q2` coefficients (n) then coset evaluations (4n).
    pub const Q2: u32 = 8;
    /// σ1 coeffs, σ1 evals, σ2 coeffs, σ2 evals.
    pub const SIGMA: u32 = 9;
    /// `max(1, nPublic)` Lagrange bases, each coeffs (n) then evals (4n).
    pub const LAGRANGE: u32 = 10;
    /// Affine G1 powers of τ.
    pub const PTAU: u32 = 11;
}

/// One record of the additions section: an internal witness entry
/// `factor1·w[signal1] + factor2·w[signal2]`.
#[derive(Debug, Clone, Copy)]
pub struct Addition<F> {
    /// First referenced signal.
    pub signal1: u32,
    /// Second referenced signal.
    pub signal2: u32,
    /// Coefficient on the first signal.
    pub factor1: F,
    /// Coefficient on the second signal.
    pub factor2: F,
}

/// Parsed proving key with on-demand section access.
pub struct ProvingKey<E: Pairing>
where
    E::BaseField: PrimeField,
{
    /// Protocol id from the PROTOCOL section.
    pub protocol_id: u32,
    /// Base-field byte width.
    pub n8q: u32,
    /// Base-field prime, canonical little-endian.
    pub q_bytes: Vec<u8>,
    /// Scalar-field byte width.
    pub n8r: u32,
    /// Scalar-field prime, canonical little-endian.
    pub r_bytes: Vec<u8>,
    /// Domain power `k` (`n = 2^k`).
    pub power: u32,
    /// Coset marker `k1 ∉ ⟨ω⟩` separating wire-b permutation labels.
    pub k1: E::ScalarField,
    /// Total signal count.
    pub n_vars: u32,
    /// Public-input count.
    pub n_public: u32,
    /// Count of addition records.
    pub n_additions: u32,
    /// Constraint-row count.
    pub n_constraints: u32,
    data: Vec<u8>,
    ranges: BTreeMap<u32, Range<usize>>,
}

fn bad(msg: impl Into<String>) -> ProverError {
    ProverError::InvalidProvingKey(msg.into())
}

impl<E: Pairing> ProvingKey<E>
where
    E::BaseField: PrimeField,
{
    /// Parse a proving key from raw bytes.
    pub fn read(data: Vec<u8>) -> Result<Self> {
        let ranges = scan_sections(&data)?;

        let protocol_id = {
            let range = ranges
                .get(&sections::PROTOCOL)
                .ok_or_else(|| bad("missing protocol section"))?;
            let mut r = ByteReader::new(&data[range.clone()]);
            r.u32_le("protocol id").map_err(|e| bad(e.what))?
        };

        let header_range = ranges
            .get(&sections::HEADER)
            .ok_or_else(|| bad("missing header section"))?
            .clone();
        let mut h = ByteReader::new(&data[header_range]);
        let n8q = h.u32_le("n8q").map_err(|e| bad(e.what))?;
        let q_bytes = h
            .take(n8q as usize, "base prime")
            .map_err(|e| bad(e.what))?
            .to_vec();
        let n8r = h.u32_le("n8r").map_err(|e| bad(e.what))?;
        let r_bytes = h
            .take(n8r as usize, "scalar prime")
            .map_err(|e| bad(e.what))?
            .to_vec();
        let power = h.u32_le("domain power").map_err(|e| bad(e.what))?;
        if power == 0 || power >= 32 {
            return Err(bad(format!("domain power {power} out of range")));
        }
        let k1_bytes = h
            .take(n8r as usize, "k1")
            .map_err(|e| bad(e.what))?
            .to_vec();
        let n_vars = h.u32_le("nVars").map_err(|e| bad(e.what))?;
        let n_public = h.u32_le("nPublic").map_err(|e| bad(e.what))?;
        let n_additions = h.u32_le("nAdditions").map_err(|e| bad(e.what))?;
        let n_constraints = h.u32_le("nConstraints").map_err(|e| bad(e.what))?;

        if n8r as usize != scalar_byte_len::<E::ScalarField>() {
            return Err(bad(format!("unexpected scalar width n8r = {n8r}")));
        }
        if n8q as usize != scalar_byte_len::<E::BaseField>() {
            return Err(bad(format!("unexpected base width n8q = {n8q}")));
        }
        if r_bytes != prime_bytes_le::<E::ScalarField>() {
            return Err(bad("scalar prime does not match the curve"));
        }
        if q_bytes != prime_bytes_le::<E::BaseField>() {
            return Err(bad("base prime does not match the curve"));
        }
        let k1: E::ScalarField = read_scalar_le(&k1_bytes)?;

        let key = Self {
            protocol_id,
            n8q,
            q_bytes,
            n8r,
            r_bytes,
            power,
            k1,
            n_vars,
            n_public,
            n_additions,
            n_constraints,
            data,
            ranges,
        };
        key.check_shapes()?;
        Ok(key)
    }

    /// Domain size `n = 2^k`.
    #[inline]
    pub fn domain_size(&self) -> usize {
        1usize << self.power
    }

    fn s_fr(&self) -> usize {
        self.n8r as usize
    }

    fn section(&self, id: u32, name: &str) -> Result<&[u8]> {
        let range = self
            .ranges
            .get(&id)
            .ok_or_else(|| bad(format!("missing section {name}")))?;
        Ok(&self.data[range.clone()])
    }

    /// Validate every bulk section's byte size against the header counts.
    fn check_shapes(&self) -> Result<()> {
        let n = self.domain_size();
        let s = self.s_fr();
        let checks: [(u32, &str, usize); 7] = [
            (
                sections::ADDITIONS,
                "additions",
                self.n_additions as usize * (8 + 2 * s),
            ),
            (sections::A_MAP, "a-map", self.n_constraints as usize * 4),
            (sections::B_MAP, "b-map", self.n_constraints as usize * 4),
            (
                sections::K_CORRECTION,
                "k-correction",
                self.n_constraints as usize * s,
            ),
            (sections::Q1, "q1", 5 * n * s),
            (sections::Q2, "q2", 5 * n * s),
            (sections::SIGMA, "sigma", 10 * n * s),
        ];
        for (id, name, expected) in checks {
            let got = self.section(id, name)?.len();
            if got != expected {
                return Err(bad(format!(
                    "section {name}: expected {expected} bytes, got {got}"
                )));
            }
        }

        let lagrange_entries = (self.n_public as usize).max(1);
        let lagrange = self.section(sections::LAGRANGE, "lagrange")?;
        if lagrange.len() != lagrange_entries * 5 * n * s {
            return Err(bad(format!(
                "lagrange section: expected {} entries of {} bytes",
                lagrange_entries,
                5 * n * s
            )));
        }

        let point_width = 2 * self.n8q as usize;
        let ptau = self.section(sections::PTAU, "ptau")?;
        if ptau.is_empty() || ptau.len() % point_width != 0 {
            return Err(bad("ptau section is not a whole number of points"));
        }
        Ok(())
    }

    /// Addition records in file order.
    pub fn additions(&self) -> Result<Vec<Addition<E::ScalarField>>> {
        let s = self.s_fr();
        let bytes = self.section(sections::ADDITIONS, "additions")?;
        let mut r = ByteReader::new(bytes);
        let mut out = Vec::with_capacity(self.n_additions as usize);
        for _ in 0..self.n_additions {
            let signal1 = r.u32_le("addition signal").map_err(|e| bad(e.what))?;
            let signal2 = r.u32_le("addition signal").map_err(|e| bad(e.what))?;
            let factor1 = read_scalar_le(r.take(s, "addition factor").map_err(|e| bad(e.what))?)?;
            let factor2 = read_scalar_le(r.take(s, "addition factor").map_err(|e| bad(e.what))?)?;
            out.push(Addition { signal1, signal2, factor1, factor2 });
        }
        Ok(out)
    }

    fn u32_section(&self, id: u32, name: &str) -> Result<Vec<u32>> {
        let bytes = self.section(id, name)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
            .collect())
    }

    /// Wire-a witness map.
    pub fn a_map(&self) -> Result<Vec<u32>> {
        self.u32_section(sections::A_MAP, "a-map")
    }

    /// Wire-b witness map.
    pub fn b_map(&self) -> Result<Vec<u32>> {
        self.u32_section(sections::B_MAP, "b-map")
    }

    /// Additive correction on wire b, one scalar per constraint row.
    pub fn k_correction(&self) -> Result<Vec<E::ScalarField>> {
        let bytes = self.section(sections::K_CORRECTION, "k-correction")?;
        read_scalars_le(bytes, self.n_constraints as usize)
    }

    fn selector_coeffs(&self, id: u32, name: &str) -> Result<Vec<E::ScalarField>> {
        let n = self.domain_size();
        read_scalars_le(self.section(id, name)?, n)
    }

    fn selector_evals(&self, id: u32, name: &str) -> Result<Evaluations<E::ScalarField>> {
        let n = self.domain_size();
        let s = self.s_fr();
        let bytes = self.section(id, name)?;
        Ok(Evaluations::new(read_scalars_le(&bytes[n * s..], 4 * n)?))
    }

    /// `Q1` coefficients (length n).
    pub fn q1_coeffs(&self) -> Result<Vec<E::ScalarField>> {
        self.selector_coeffs(sections::Q1, "q1")
    }

    /// `Q1` coset evaluations (length 4n).
    pub fn q1_evals4(&self) -> Result<Evaluations<E::ScalarField>> {
        self.selector_evals(sections::Q1, "q1")
    }

    /// `Q2` coefficients (length n).
    pub fn q2_coeffs(&self) -> Result<Vec<E::ScalarField>> {
        self.selector_coeffs(sections::Q2, "q2")
    }

    /// `Q2` coset evaluations (length 4n).
    pub fn q2_evals4(&self) -> Result<Evaluations<E::ScalarField>> {
        self.selector_evals(sections::Q2, "q2")
    }

    /// σ1 coefficients (length n).
    pub fn sigma1_coeffs(&self) -> Result<Vec<E::ScalarField>> {
        let bytes = self.section(sections::SIGMA, "sigma")?;
        read_scalars_le(bytes, self.domain_size())
    }

    /// σ2 coefficients (length n).
    pub fn sigma2_coeffs(&self) -> Result<Vec<E::ScalarField>> {
        let n = self.domain_size();
        let s = self.s_fr();
        let bytes = self.section(sections::SIGMA, "sigma")?;
        read_scalars_le(&bytes[5 * n * s..], n)
    }

    /// Paired coset evaluations `σ1 ‖ σ2` (length 8n).
    pub fn sigma_evals_8n(&self) -> Result<Evaluations<E::ScalarField>> {
        let n = self.domain_size();
        let s = self.s_fr();
        let bytes = self.section(sections::SIGMA, "sigma")?;
        let mut values = read_scalars_le::<E::ScalarField>(&bytes[n * s..], 4 * n)?;
        values.extend(read_scalars_le::<E::ScalarField>(&bytes[6 * n * s..], 4 * n)?);
        Ok(Evaluations::new(values))
    }

    /// The whole Lagrange section: `max(1, nPublic)` entries of `5n`
    /// scalars each (n coefficients, then 4n coset evaluations).
    pub fn lagrange_section(&self) -> Result<Vec<E::ScalarField>> {
        let n = self.domain_size();
        let entries = (self.n_public as usize).max(1);
        read_scalars_le(self.section(sections::LAGRANGE, "lagrange")?, entries * 5 * n)
    }

    /// The powers-of-τ table.
    pub fn tau_points(&self) -> Result<Vec<E::G1Affine>> {
        let width = 2 * self.n8q as usize;
        let bytes = self.section(sections::PTAU, "ptau")?;
        let mut out = Vec::with_capacity(bytes.len() / width);
        for chunk in bytes.chunks_exact(width) {
            let point = E::G1Affine::deserialize_uncompressed_unchecked(chunk)
                .map_err(|e| bad(format!("ptau point: {e}")))?;
            out.push(point);
        }
        Ok(out)
    }
}

/// Peek at a zkey's base prime without committing to a curve; used for
/// curve dispatch.
pub fn peek_base_prime(data: &[u8]) -> Result<Vec<u8>> {
    let ranges = scan_sections(data)?;
    let range = ranges
        .get(&sections::HEADER)
        .ok_or_else(|| bad("missing header section"))?;
    let mut r = ByteReader::new(&data[range.clone()]);
    let n8q = r.u32_le("n8q").map_err(|e| bad(e.what))?;
    Ok(r.take(n8q as usize, "base prime")
        .map_err(|e| bad(e.what))?
        .to_vec())
}

fn prime_bytes_le<F: PrimeField>() -> Vec<u8> {
    let mut bytes = F::MODULUS.to_bytes_le();
    bytes.truncate(scalar_byte_len::<F>());
    bytes
}

fn scan_sections(data: &[u8]) -> Result<BTreeMap<u32, Range<usize>>> {
    let mut r = ByteReader::new(data);
    r.expect_magic(b"zkey", "zkey magic").map_err(|e| bad(e.what))?;
    let version = r.u32_le("zkey version").map_err(|e| bad(e.what))?;
    if version != ZKEY_VERSION {
        return Err(bad(format!("unsupported zkey version {version}")));
    }
    let n_sections = r.u32_le("section count").map_err(|e| bad(e.what))?;

    let mut ranges = BTreeMap::new();
    for _ in 0..n_sections {
        let id = r.u32_le("section id").map_err(|e| bad(e.what))?;
        let size = r.u64_le("section size").map_err(|e| bad(e.what))? as usize;
        let start = r.offset();
        r.skip(size, "section payload").map_err(|e| bad(e.what))?;
        if ranges.insert(id, start..start + size).is_some() {
            return Err(bad(format!("duplicate section id {id}")));
        }
    }
    if r.remaining() != 0 {
        return Err(bad("trailing bytes after last section"));
    }
    Ok(ranges)
}
