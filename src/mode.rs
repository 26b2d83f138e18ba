//! CBC chaining over the [block transform](crate::cipher), with PKCS7-style
//! padding applied only to the final plaintext block. A full block is never
//! followed by an extra block of padding.

use crate::cipher::{QCipher, BLOCK_SIZE};

/// Pad the final block (if short) and CBC-encrypt `plaintext` against `iv`,
/// using `nonce` for every block's transform. Returns the raw ciphertext
/// region only; container framing happens one layer up.
pub fn encrypt(cipher: &QCipher, plaintext: &[u8], nonce: &[u8; 32], iv: &[u8; 32]) -> Vec<u8> {
    let padded = pad(plaintext);
    let mut ciphertext = Vec::with_capacity(padded.len());
    let mut prev: Vec<u8> = iv.to_vec();

    for (i, chunk) in padded.chunks(BLOCK_SIZE).enumerate() {
        let mut block = [0u8; BLOCK_SIZE];
        for j in 0..BLOCK_SIZE {
            block[j] = chunk[j] ^ prev[j % prev.len()];
        }
        let encrypted = cipher.encrypt_block(block, i as u64, nonce);
        ciphertext.extend_from_slice(&encrypted);
        prev = encrypted.to_vec();
    }
    ciphertext
}

/// CBC-decrypt `ciphertext` against `iv` and truncate the result to
/// `original_size`. No padding validity check is performed; truncation to
/// the stored original size is authoritative, per the container's
/// authenticated `original_size` field.
pub fn decrypt(cipher: &QCipher, ciphertext: &[u8], nonce: &[u8; 32], iv: &[u8; 32], original_size: u64) -> Vec<u8> {
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut prev: Vec<u8> = iv.to_vec();

    for (i, chunk) in ciphertext.chunks(BLOCK_SIZE).enumerate() {
        let mut block = [0u8; BLOCK_SIZE];
        block[..chunk.len()].copy_from_slice(chunk);

        let decrypted = cipher.decrypt_block(block, i as u64, nonce);
        let mut plain_block = [0u8; BLOCK_SIZE];
        for j in 0..BLOCK_SIZE {
            plain_block[j] = decrypted[j] ^ prev[j % prev.len()];
        }
        plaintext.extend_from_slice(&plain_block);
        // Chain against the ciphertext block, not the plaintext it decrypted to.
        prev = block.to_vec();
    }

    plaintext.truncate(original_size as usize);
    plaintext
}

/// Pad the final short block with bytes equal to the number of padding bytes
/// added. A plaintext that's already a multiple of the block size is left
/// untouched; no extra block of padding is appended.
fn pad(plaintext: &[u8]) -> Vec<u8> {
    let remainder = plaintext.len() % BLOCK_SIZE;
    if remainder == 0 {
        return plaintext.to_vec();
    }
    let pad_len = BLOCK_SIZE - remainder;
    let mut out = plaintext.to_vec();
    out.resize(out.len() + pad_len, pad_len as u8);
    out
}
