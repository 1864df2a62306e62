//! API Key Obfuscation
//!
//! Keys are stored base64-encoded in the settings file. This is reversible
//! encoding, not encryption: it keeps credentials out of casual view in the
//! config file and nothing more. Anyone with read access to the file can
//! recover the key.

use crate::error::{RedraftError, RedraftResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encode a plaintext API key for storage.
pub fn obfuscate(key: &str) -> String {
    STANDARD.encode(key.as_bytes())
}

/// Decode a stored API key back to plaintext.
pub fn reveal(stored: &str) -> RedraftResult<String> {
    let bytes = STANDARD
        .decode(stored.as_bytes())
        .map_err(|e| RedraftError::Config(format!("stored API key is not valid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| RedraftError::Config(format!("stored API key is not valid UTF-8: {e}")))
}
