//! Session id generation

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::SessionError;

/// Default number of random bytes behind a session id.
pub const DEFAULT_ID_LENGTH: usize = 16;

/// Generate a session id from `length` bytes of OS randomness.
///
/// The bytes are URL-safe base64 encoded (padded), so 16 bytes yield a
/// 24-character id. Fails instead of returning a short id when the OS
/// source cannot be read.
pub fn generate_id(length: usize) -> Result<String, SessionError> {
    generate_id_with(&mut OsRng, length)
}

/// Same as [`generate_id`] over an arbitrary fallible random source.
pub fn generate_id_with<R>(rng: &mut R, length: usize) -> Result<String, SessionError>
where
    R: TryRngCore + ?Sized,
{
    if length == 0 {
        return Err(SessionError::InvalidIdLength);
    }

    let mut buf = vec![0u8; length];
    rng.try_fill_bytes(&mut buf)
        .map_err(|e| SessionError::Entropy(e.to_string()))?;

    Ok(URL_SAFE.encode(&buf))
}
