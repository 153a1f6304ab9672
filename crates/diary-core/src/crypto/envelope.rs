//! Envelope binary layout.
//!
//! ```text
//! u32 iv_length            little-endian
//! bytes iv[iv_length]
//! u32 wrapped_key_length   little-endian
//! bytes wrapped_key[wrapped_key_length]
//! u32 ciphertext_length    little-endian
//! bytes ciphertext[ciphertext_length]
//! ```
//!
//! Older journals were written in host byte order. Files produced on
//! little-endian hosts parse unchanged.

use std::fmt;

use crate::error::{DiaryError, Result};

const LEN_PREFIX: usize = 4;

/// One sealed entry as stored on disk.
#[derive(Clone, PartialEq, Eq)]
pub struct Envelope {
    /// AES-CBC initialization vector
    pub iv: Vec<u8>,

    /// Entry key material encrypted under the RSA public key
    pub wrapped_key: Vec<u8>,

    /// AES-CBC ciphertext, followed by the HMAC tag on authenticated envelopes
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(iv: Vec<u8>, wrapped_key: Vec<u8>, ciphertext: Vec<u8>) -> Self {
        Self {
            iv,
            wrapped_key,
            ciphertext,
        }
    }

    /// Serialize to the on-disk layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(
            3 * LEN_PREFIX + self.iv.len() + self.wrapped_key.len() + self.ciphertext.len(),
        );
        for (name, field) in [
            ("iv", &self.iv),
            ("wrapped_key", &self.wrapped_key),
            ("ciphertext", &self.ciphertext),
        ] {
            let len = u32::try_from(field.len()).map_err(|_| {
                DiaryError::MalformedEnvelope(format!("{} exceeds u32 length", name))
            })?;
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(field);
        }
        Ok(out)
    }

    /// Parse the on-disk layout.
    ///
    /// Every declared length is checked against the bytes that remain, and
    /// trailing bytes after the ciphertext are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes);
        let iv = reader.field("iv")?;
        let wrapped_key = reader.field("wrapped_key")?;
        let ciphertext = reader.field("ciphertext")?;
        reader.finish()?;

        Ok(Self {
            iv: iv.to_vec(),
            wrapped_key: wrapped_key.to_vec(),
            ciphertext: ciphertext.to_vec(),
        })
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("iv_len", &self.iv.len())
            .field("wrapped_key_len", &self.wrapped_key.len())
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn field(&mut self, name: &str) -> Result<&'a [u8]> {
        if self.remaining() < LEN_PREFIX {
            return Err(DiaryError::MalformedEnvelope(format!(
                "truncated before {} length (offset {})",
                name, self.pos
            )));
        }
        let mut prefix = [0u8; LEN_PREFIX];
        prefix.copy_from_slice(&self.buf[self.pos..self.pos + LEN_PREFIX]);
        self.pos += LEN_PREFIX;

        let len = u32::from_le_bytes(prefix) as usize;
        if len > self.remaining() {
            return Err(DiaryError::MalformedEnvelope(format!(
                "{} declares {} bytes but only {} remain",
                name,
                len,
                self.remaining()
            )));
        }
        let value = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(value)
    }

    fn finish(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(DiaryError::MalformedEnvelope(format!(
                "{} trailing bytes after ciphertext",
                extra
            ))),
        }
    }
}
