//! Witness container
//!
//! The `wtns` file carries two sections: a header `(u32 n8, q, u32 count)`
//! and the packed scalar payload. The scalar prime in the header must equal
//! the curve's `r`; anything else is a `WitnessMismatch` — a witness
//! produced for a different field can never satisfy this circuit.

#![forbid(unsafe_code)]

use ark_ff::{BigInteger, PrimeField};

use crate::container::ByteReader;
use crate::error::{ProverError, Result};
use crate::field::{read_scalars_le, scalar_byte_len};

/// Container format version.
pub const WTNS_VERSION: u32 = 2;

/// Header section id.
pub const SECTION_HEADER: u32 = 1;
/// Payload section id.
pub const SECTION_VALUES: u32 = 2;

/// Parsed witness values in circuit order.
pub struct Witness<F: PrimeField> {
    /// Scalar byte width from the header.
    pub n8: u32,
    values: Vec<F>,
}

fn bad(msg: impl Into<String>) -> ProverError {
    ProverError::WitnessMismatch(msg.into())
}

impl<F: PrimeField> Witness<F> {
    /// Parse a witness file and check its field prime against `F`.
    pub fn read(data: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);
        r.expect_magic(b"wtns", "wtns magic").map_err(|e| bad(e.what))?;
        let version = r.u32_le("wtns version").map_err(|e| bad(e.what))?;
        if version != WTNS_VERSION {
            return Err(bad(format!("unsupported wtns version {version}")));
        }
        let n_sections = r.u32_le("section count").map_err(|e| bad(e.what))?;
        if n_sections != 2 {
            return Err(bad(format!("expected 2 sections, found {n_sections}")));
        }

        // Header section
        let id = r.u32_le("section id").map_err(|e| bad(e.what))?;
        let size = r.u64_le("section size").map_err(|e| bad(e.what))?;
        if id != SECTION_HEADER {
            return Err(bad(format!("expected header section, found id {id}")));
        }
        let header = r.take(size as usize, "header").map_err(|e| bad(e.what))?;
        let mut h = ByteReader::new(header);
        let n8 = h.u32_le("n8").map_err(|e| bad(e.what))?;
        let q_bytes = h.take(n8 as usize, "prime").map_err(|e| bad(e.what))?;
        let count = h.u32_le("witness count").map_err(|e| bad(e.what))?;

        if n8 as usize != scalar_byte_len::<F>() {
            return Err(bad(format!("scalar width {n8} does not match the curve")));
        }
        let mut modulus = F::MODULUS.to_bytes_le();
        modulus.truncate(scalar_byte_len::<F>());
        if q_bytes != modulus {
            return Err(bad("witness field prime does not match the proving key"));
        }

        // Payload section
        let id = r.u32_le("section id").map_err(|e| bad(e.what))?;
        let size = r.u64_le("section size").map_err(|e| bad(e.what))?;
        if id != SECTION_VALUES {
            return Err(bad(format!("expected values section, found id {id}")));
        }
        if size as usize != count as usize * n8 as usize {
            return Err(bad("values section size disagrees with witness count"));
        }
        let payload = r.take(size as usize, "values").map_err(|e| bad(e.what))?;
        let values = read_scalars_le(payload, count as usize)
            .map_err(|_| bad("non-canonical witness scalar"))?;

        Ok(Self { n8, values })
    }

    /// Number of witness entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the witness is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Witness entries in circuit order.
    #[inline]
    pub fn values(&self) -> &[F] {
        &self.values
    }
}
