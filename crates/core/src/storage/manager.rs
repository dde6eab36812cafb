use tracing::debug;

use crate::errors::CoreError;
use crate::models::profile::LocalProfile;

use super::encryption::{self, KdfParams};
use super::format;

/// Save/load the local profile as encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// LocalProfile → bincode → AES-256-GCM(Argon2id(password)) → FSCP bytes
    pub fn save_to_bytes(profile: &LocalProfile, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_to_bytes_with(profile, password, KdfParams::default())
    }

    /// Same as [`save_to_bytes`](Self::save_to_bytes) with explicit KDF cost.
    pub fn save_to_bytes_with(
        profile: &LocalProfile,
        password: &str,
        kdf_params: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(profile)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize profile: {e}")))?;
        let sealed = encryption::seal(&plaintext, password, kdf_params)?;
        let bytes = format::encode(&sealed);
        debug!("Profile sealed: {} goals, {} bytes", profile.goals.len(), bytes.len());
        Ok(bytes)
    }

    /// FSCP bytes → header → decrypt → bincode → LocalProfile
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<LocalProfile, CoreError> {
        let sealed = format::decode(data)?;
        let plaintext = encryption::open(&sealed, password)?;
        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize profile: {e}")))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(profile: &LocalProfile, path: &str, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(profile, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<LocalProfile, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
