//! Deterministic expansion of a 64-byte master seed into every keyed table
//! the cipher needs: the superposition keystream, the (informational)
//! entanglement pairs, the lattice basis, the measurement bases, the 16 round
//! keys, and the substitution permutation.
//!
//! Every function here is a pure function of its inputs: regenerating from
//! the same `master_seed` (and, where relevant, `key_length`) always produces
//! byte-identical tables. The derivations chain through SHA-256/SHA-512 in a
//! fixed order (see [`crate::key::QuantumKey::generate`]); that order must
//! never change, or saved keys stop reloading bit-exact.

use sha2::{Digest, Sha256, Sha512};

pub const MASTER_SEED_LEN: usize = 64;
pub const ROUNDS: usize = 16;
pub const BLOCK_SIZE: usize = 64;
pub const SBOX_LEN: usize = 256;
pub const MAX_LATTICE_DIM: usize = 256;
pub const MAX_ENTANGLEMENT_PAIRS: u64 = 1024;
pub const CHECKSUM_PREFIX_MAX: usize = 1024;

pub const MIN_KEY_LENGTH: u64 = 1024;
pub const MAX_KEY_LENGTH: u64 = 1024 * 1024 * 1024;

pub(crate) fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub(crate) fn sha512(data: &[u8]) -> [u8; 64] {
    Sha512::digest(data).into()
}

/// A square integer matrix, row-major. Entries lie in `[1, 65536]`; only the
/// low byte of each entry is ever consumed by the block transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    dim: usize,
    data: Vec<i64>,
}

impl Lattice {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.dim + col]
    }

    pub fn low_byte(&self, row: usize, col: usize) -> u8 {
        (self.get(row, col) & 0xFF) as u8
    }
}

/// Step 1: the primary keystream material, `key_length` bytes expanded from
/// `master_seed` via chained SHA-512. Returns the keystream and the 64-byte
/// chaining seed left over for step 2 (entanglement pairs).
pub fn superposition_key(master_seed: &[u8; MASTER_SEED_LEN], key_length: u64) -> (Vec<u8>, [u8; 64]) {
    let mut out = Vec::with_capacity(key_length as usize);
    let mut seed = *master_seed;
    while (out.len() as u64) < key_length {
        let h = sha512(&seed);
        let remaining = key_length as usize - out.len();
        let take = remaining.min(h.len());
        out.extend_from_slice(&h[..take]);
        seed = h;
    }
    (out, seed)
}

/// Step 2: informational pairs, unused by the block transform. Chains through
/// SHA-256 starting from the seed [`superposition_key`] left behind. Returns
/// the pairs and the 32-byte chaining seed left over for step 4 (measurement
/// bases).
pub fn entanglement_pairs(seed_after_superposition: [u8; 64], key_length: u64) -> (Vec<[u8; 64]>, [u8; 32]) {
    let count = (key_length / 128).min(MAX_ENTANGLEMENT_PAIRS) as usize;
    let mut pairs = Vec::with_capacity(count);
    let mut current_seed: Vec<u8> = seed_after_superposition.to_vec();
    for _ in 0..count {
        let pair_seed = sha256(&current_seed);
        pairs.push(sha512(&pair_seed));
        current_seed = pair_seed.to_vec();
    }
    // `key_length >= MIN_KEY_LENGTH` guarantees `count >= 8`, so the loop above
    // always runs at least once and `current_seed` is always a 32-byte
    // SHA-256 output by the time we get here.
    let final_seed: [u8; 32] = current_seed
        .try_into()
        .expect("at least one entanglement iteration runs for any valid key_length");
    (pairs, final_seed)
}

/// Step 3: the lattice basis, independent of steps 1-2. It chains through
/// SHA-256 starting fresh from `master_seed`.
pub fn lattice_basis(master_seed: &[u8; MASTER_SEED_LEN], key_length: u64) -> Lattice {
    let dim = MAX_LATTICE_DIM.min((key_length / 8) as usize);
    let mut data = Vec::with_capacity(dim * dim);
    let mut seed: Vec<u8> = master_seed.to_vec();
    for _ in 0..dim * dim {
        let h = sha256(&seed);
        let v = u32::from_le_bytes([h[0], h[1], h[2], h[3]]);
        data.push((v % 65536) as i64 + 1);
        seed = h.to_vec();
    }
    Lattice { dim, data }
}

/// Step 4: one SHA-512 over the chaining seed left by step 2, repeated
/// (mod 64) to fill `max(1, key_length / 8)` bytes.
pub fn measurement_bases(seed_after_entanglement: [u8; 32], key_length: u64) -> Vec<u8> {
    let len = ((key_length / 8) as usize).max(1);
    let b = sha512(&seed_after_entanglement);
    (0..len).map(|i| b[i % 64]).collect()
}

/// The 16 round keys, chained through SHA-512 from `master_seed` alone.
pub fn round_keys(master_seed: &[u8; MASTER_SEED_LEN]) -> [[u8; 64]; ROUNDS] {
    let mut keys = [[0u8; 64]; ROUNDS];
    let mut r = *master_seed;
    for key in keys.iter_mut() {
        let h = sha512(&r);
        *key = h;
        r = h;
    }
    keys
}

/// The substitution permutation and its inverse, produced by a hash-driven
/// Fisher-Yates shuffle chained through SHA-256 from `master_seed` alone.
pub fn sbox(master_seed: &[u8; MASTER_SEED_LEN]) -> ([u8; SBOX_LEN], [u8; SBOX_LEN]) {
    let mut sbox: [u8; SBOX_LEN] = core::array::from_fn(|i| i as u8);
    let mut seed: Vec<u8> = master_seed.to_vec();
    for i in (1..SBOX_LEN).rev() {
        let h = sha256(&seed);
        let j = (h[0] as usize) % (i + 1);
        sbox.swap(i, j);
        seed = h.to_vec();
    }
    let mut inverse = [0u8; SBOX_LEN];
    for (i, &s) in sbox.iter().enumerate() {
        inverse[s as usize] = i as u8;
    }
    (sbox, inverse)
}

/// The key checksum: SHA-512 over `master_seed` followed by the first
/// `min(1024, superposition_key.len())` bytes of the keystream.
pub fn checksum(master_seed: &[u8; MASTER_SEED_LEN], superposition_key: &[u8]) -> [u8; 64] {
    let take = CHECKSUM_PREFIX_MAX.min(superposition_key.len());
    let mut buf = Vec::with_capacity(MASTER_SEED_LEN + take);
    buf.extend_from_slice(master_seed);
    buf.extend_from_slice(&superposition_key[..take]);
    sha512(&buf)
}
