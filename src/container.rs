//! The ciphertext container: header framing, the authentication tag, and the
//! ordered checks a decrypting reader must run before trusting any byte of
//! plaintext it produces.

use crate::{cipher::QCipher, error::Error, expand, key::QuantumKey, mode, random};

const MAGIC: [u8; 6] = [0x51, 0x43, 0x52, 0x59, 0x50, 0x54];
const VERSION: u8 = 1;
const HEADER_LEN: usize = 143;
const TAG_LEN: usize = 64;
const MIN_CONTAINER_LEN: usize = HEADER_LEN + TAG_LEN;

/// Encrypt `plaintext` under `key`, producing a self-describing container:
///
/// | offset | size | field              |
/// |-------:|-----:|--------------------|
/// | 0      | 6    | magic              |
/// | 6      | 1    | version            |
/// | 7      | 32   | key fingerprint    |
/// | 39     | 32   | nonce              |
/// | 71     | 32   | salt (reserved)    |
/// | 103    | 32   | IV                 |
/// | 135    | 8    | original size      |
/// | 143    | N    | ciphertext         |
/// | 143+N  | 64   | auth tag           |
pub fn encrypt_file(key: &QuantumKey, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
    if plaintext.is_empty() {
        return Err(Error::InvalidInput);
    }

    let nonce = random::bytes::<32>()?;
    let salt = random::bytes::<32>()?;
    let iv = random::bytes::<32>()?;

    let cipher = QCipher::new(key);
    let ciphertext = mode::encrypt(&cipher, plaintext, &nonce, &iv);

    let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len() + TAG_LEN);
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&key.fingerprint());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&iv);
    out.extend_from_slice(&(plaintext.len() as u64).to_le_bytes());
    out.extend_from_slice(&ciphertext);
    out.extend_from_slice(&auth_tag(&ciphertext, key.checksum()));

    debug_assert_eq!(out.len(), HEADER_LEN + ciphertext.len() + TAG_LEN);
    Ok(out)
}

/// Validate and decrypt a container produced by [`encrypt_file`]. Checks run
/// in the order the format demands, so a caller can distinguish "this isn't
/// a container at all" from "wrong key" from "tampered with":
/// minimum size, magic, version, the size sanity bound, key fingerprint,
/// then the authentication tag. No plaintext is produced until every check
/// passes.
pub fn decrypt_file(key: &QuantumKey, container: &[u8]) -> Result<Vec<u8>, Error> {
    if container.len() < MIN_CONTAINER_LEN {
        return Err(Error::CorruptContainer("container shorter than the minimum container size"));
    }
    if container[0..6] != MAGIC {
        return Err(Error::CorruptContainer("bad magic bytes"));
    }
    if container[6] != VERSION {
        return Err(Error::CorruptContainer("unsupported container version"));
    }

    let original_size = u64::from_le_bytes(container[135..143].try_into().unwrap());
    if original_size > 2 * container.len() as u64 {
        return Err(Error::CorruptContainer("original size field is out of range for this file"));
    }

    let mut fingerprint = [0u8; 32];
    fingerprint.copy_from_slice(&container[7..39]);
    if fingerprint != key.fingerprint() {
        return Err(Error::WrongKey);
    }

    let mut nonce = [0u8; 32];
    nonce.copy_from_slice(&container[39..71]);
    let mut iv = [0u8; 32];
    iv.copy_from_slice(&container[103..135]);

    let ciphertext_end = container.len() - TAG_LEN;
    let ciphertext = &container[HEADER_LEN..ciphertext_end];
    let stored_tag = &container[ciphertext_end..];

    if auth_tag(ciphertext, key.checksum())[..] != *stored_tag {
        return Err(Error::IntegrityFailure);
    }

    let cipher = QCipher::new(key);
    Ok(mode::decrypt(&cipher, ciphertext, &nonce, &iv, original_size))
}

fn auth_tag(ciphertext: &[u8], checksum: &[u8; 64]) -> [u8; 64] {
    let mut buf = Vec::with_capacity(ciphertext.len() + 64);
    buf.extend_from_slice(ciphertext);
    buf.extend_from_slice(checksum);
    expand::sha512(&buf)
}
