//! The CSPRNG is treated as an external collaborator: a source of uniformly
//! random bytes with no further contract. This module is the only place that
//! touches `rand`'s OS-backed generator.

use {
    crate::error::Error,
    rand::{rngs::OsRng, RngCore},
};

/// Fill `buf` with cryptographically secure random bytes.
pub fn fill(buf: &mut [u8]) -> Result<(), Error> {
    OsRng.try_fill_bytes(buf).map_err(|_| Error::RandomnessFailure)
}

/// Generate `N` cryptographically secure random bytes.
pub fn bytes<const N: usize>() -> Result<[u8; N], Error> {
    let mut buf = [0u8; N];
    fill(&mut buf)?;
    Ok(buf)
}
