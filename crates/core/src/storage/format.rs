use crate::errors::CoreError;

use super::encryption::{KdfParams, SealedPayload, NONCE_LEN, SALT_LEN};

/// Magic bytes at the start of every profile file.
pub const MAGIC: &[u8; 4] = b"FSCP";

pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + len(8)
pub const HEADER_SIZE: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Lay out a sealed payload as file bytes.
///
/// ```text
/// [FSCP] [version u16 LE] [memory_cost u32 LE] [time_cost u32 LE]
/// [parallelism u32 LE] [salt 16B] [nonce 12B] [ciphertext_len u64 LE]
/// [ciphertext]
/// ```
#[must_use]
pub fn encode(payload: &SealedPayload) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&CURRENT_VERSION.to_le_bytes());
    buf.extend_from_slice(&payload.kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&payload.kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&payload.kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(&payload.salt);
    buf.extend_from_slice(&payload.nonce);
    buf.extend_from_slice(&(payload.ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(&payload.ciphertext);
    buf
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], CoreError> {
        let end = self.offset.checked_add(n).filter(|end| *end <= self.data.len()).ok_or_else(|| {
            CoreError::InvalidFileFormat(format!("File truncated while reading {what}"))
        })?;
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], CoreError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn u16(&mut self, what: &str) -> Result<u16, CoreError> {
        Ok(u16::from_le_bytes(self.array(what)?))
    }

    fn u32(&mut self, what: &str) -> Result<u32, CoreError> {
        Ok(u32::from_le_bytes(self.array(what)?))
    }

    fn u64(&mut self, what: &str) -> Result<u64, CoreError> {
        Ok(u64::from_le_bytes(self.array(what)?))
    }
}

/// Parse file bytes back into a sealed payload. Validates magic, version
/// and KDF bounds before any key derivation happens.
pub fn decode(data: &[u8]) -> Result<SealedPayload, CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a FundScope profile".into(),
        ));
    }
    let mut r = Reader { data, offset: 0 };

    if r.take(MAGIC.len(), "magic")? != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes, not a FundScope profile".into(),
        ));
    }

    let version = r.u16("version")?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: r.u32("KDF memory cost")?,
        time_cost: r.u32("KDF time cost")?,
        parallelism: r.u32("KDF parallelism")?,
    };
    kdf_params.validate()?;

    let salt = r.array::<SALT_LEN>("salt")?;
    let nonce = r.array::<NONCE_LEN>("nonce")?;
    let len = usize::try_from(r.u64("ciphertext length")?)
        .map_err(|_| CoreError::InvalidFileFormat("Ciphertext length overflows".into()))?;
    let ciphertext = r.take(len, "ciphertext")?.to_vec();

    Ok(SealedPayload {
        kdf_params,
        salt,
        nonce,
        ciphertext,
    })
}
