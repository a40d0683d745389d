//! Little-endian cursor over a sectioned byte buffer.
//!
//! Both container formats (`zkey`, `wtns`) are a fixed magic + version
//! followed by `(u32 id, u64 size, payload)` records; this cursor does the
//! bounds-checked primitive reads and leaves kind-selection of the error
//! to the caller (proving-key parse failures and witness parse failures
//! surface as different `ProverError` variants).

#![forbid(unsafe_code)]

/// Raw parse failure, mapped to a typed error by the caller.
#[derive(Debug)]
pub(crate) struct TruncatedInput {
    pub what: &'static str,
}

pub(crate) type ReadResult<T> = std::result::Result<T, TruncatedInput>;

pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn take(&mut self, len: usize, what: &'static str) -> ReadResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(TruncatedInput { what });
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn u32_le(&mut self, what: &'static str) -> ReadResult<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn u64_le(&mut self, what: &'static str) -> ReadResult<u64> {
        let bytes = self.take(8, what)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn expect_magic(&mut self, magic: &[u8; 4], what: &'static str) -> ReadResult<()> {
        let bytes = self.take(4, what)?;
        if bytes != magic {
            return Err(TruncatedInput { what });
        }
        Ok(())
    }

    pub fn skip(&mut self, len: usize, what: &'static str) -> ReadResult<()> {
        self.take(len, what).map(|_| ())
    }
}
