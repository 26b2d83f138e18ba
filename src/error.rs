//! The error taxonomy shared by every layer of the crate.
//!
//! Errors are surfaced immediately to the caller; nothing here retries or
//! recovers locally. [`Error::WrongKey`] and [`Error::IntegrityFailure`] are
//! kept as distinct variants on purpose, so a caller can tell "wrong key" from
//! "file tampered with" instead of collapsing both into a generic failure.

use thiserror::Error;

/// Errors produced while generating keys, or encrypting/decrypting files.
#[derive(Debug, Error)]
pub enum Error {
    #[error("key length must be between 1024 and 1073741824 bytes, got {0}")]
    InvalidKeyLength(u64),

    #[error("input is empty")]
    InvalidInput,

    #[error("container is corrupt: {0}")]
    CorruptContainer(&'static str),

    #[error("wrong key: fingerprint does not match this container")]
    WrongKey,

    #[error("integrity check failed: container has been tampered with")]
    IntegrityFailure,

    #[error("failed to obtain random bytes from the system CSPRNG")]
    RandomnessFailure,

    #[error("I/O error: {0}")]
    IOFailure(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
