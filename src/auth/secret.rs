use anyhow::Context;
use rand::{rngs::OsRng, RngCore};

/// 64 random bytes, hex-encoded: 512 bits of entropy for HS256 signing.
const SECRET_BYTES: usize = 64;

/// Token lifetime when `TOKEN_TTL_HOURS` is not set.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 10;

/// Generates the process-wide signing secret. Called once at startup,
/// before any token is issued or verified; failure of the OS entropy
/// source aborts the process.
pub fn generate() -> anyhow::Result<String> {
    let mut buf = [0u8; SECRET_BYTES];
    OsRng
        .try_fill_bytes(&mut buf)
        .context("OS entropy source unavailable, cannot generate signing secret")?;
    Ok(hex::encode(buf))
}
