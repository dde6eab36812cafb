use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters. Written into every file header so older
/// profiles stay readable if the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456, // 19 MiB, OWASP baseline for Argon2id
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Lowest accepted memory cost (Argon2 minimum is 8 KiB per lane).
    pub const MIN_MEMORY_COST: u32 = 8;
    /// Highest accepted memory cost, 1 GiB. Guards against crafted headers.
    pub const MAX_MEMORY_COST: u32 = 1_048_576;
    pub const MAX_TIME_COST: u32 = 64;
    pub const MAX_PARALLELISM: u32 = 16;

    /// Reject parameters that are invalid or would exhaust resources.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.parallelism == 0 || self.parallelism > Self::MAX_PARALLELISM {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF parallelism {} out of range 1..={}",
                self.parallelism,
                Self::MAX_PARALLELISM
            )));
        }
        if self.time_cost == 0 || self.time_cost > Self::MAX_TIME_COST {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF time cost {} out of range 1..={}",
                self.time_cost,
                Self::MAX_TIME_COST
            )));
        }
        let min_memory = Self::MIN_MEMORY_COST * self.parallelism;
        if self.memory_cost < min_memory || self.memory_cost > Self::MAX_MEMORY_COST {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF memory cost {} KiB out of range {}..={}",
                self.memory_cost,
                min_memory,
                Self::MAX_MEMORY_COST
            )));
        }
        Ok(())
    }
}

/// Output of [`seal`]: everything needed to decrypt besides the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// AES-256-GCM ciphertext with the 16-byte tag appended
    pub ciphertext: Vec<u8>,
}

/// Derive a 256-bit key from a password with Argon2id.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN], params: &KdfParams) -> Result<[u8; KEY_LEN], CoreError> {
    params.validate()?;
    let argon2_params = Params::new(params.memory_cost, params.time_cost, params.parallelism, Some(KEY_LEN))
        .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;

    let mut key = [0u8; KEY_LEN];
    Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params)
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| CoreError::Encryption(format!("Argon2 key derivation failed: {e}")))?;
    Ok(key)
}

fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Encryption(format!("System randomness unavailable: {e}")))?;
    Ok(buf)
}

/// Encrypt `plaintext` under `password` with a fresh salt and nonce.
pub fn seal(plaintext: &[u8], password: &str, kdf_params: KdfParams) -> Result<SealedPayload, CoreError> {
    if password.is_empty() {
        return Err(CoreError::Encryption("Password must not be empty".into()));
    }
    let salt = random_bytes::<SALT_LEN>()?;
    let nonce = random_bytes::<NONCE_LEN>()?;
    let key = derive_key(password, &salt, &kdf_params)?;

    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))?;

    Ok(SealedPayload {
        kdf_params,
        salt,
        nonce,
        ciphertext,
    })
}

/// Decrypt a payload. A wrong password and a tampered file both yield
/// [`CoreError::Decryption`]; the GCM tag cannot tell them apart.
pub fn open(payload: &SealedPayload, password: &str) -> Result<Vec<u8>, CoreError> {
    let key = derive_key(password, &payload.salt, &payload.kdf_params)?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;
    Ok(cipher.decrypt(Nonce::from_slice(&payload.nonce), payload.ciphertext.as_slice())?)
}
