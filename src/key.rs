//! The [`QuantumKey`] aggregate: generation from fresh entropy, the key
//! container byte format, and reload.

use {
    crate::{
        error::Error,
        expand::{self, Lattice},
        random,
    },
    std::time::{SystemTime, UNIX_EPOCH},
};

const KEY_MAGIC: [u8; 4] = [0x51, 0x4B, 0x45, 0x59]; // "QKEY"
const KEY_VERSION: u8 = 1;
const KEY_HEADER_LEN: usize = 153;

/// Every field needed to run the cipher, plus the metadata persisted in a key
/// file. Immutable after construction. All fields but `measurement_bases`
/// are a pure function of `master_seed` and `key_length`; `measurement_bases`
/// is stored verbatim rather than recomputed so `load` doesn't depend on
/// reproducing the internal chaining seed (see [`Self::load`]).
#[derive(Debug, Clone)]
pub struct QuantumKey {
    master_seed: [u8; 64],
    superposition_key: Vec<u8>,
    entanglement_pairs: Vec<[u8; 64]>,
    lattice_basis: Lattice,
    measurement_bases: Vec<u8>,
    key_length: u64,
    created_at: i64,
    checksum: [u8; 64],
}

/// The fields the `info` CLI command displays.
#[derive(Debug, Clone, Copy)]
pub struct KeyInfo {
    pub key_length: u64,
    pub pair_count: usize,
    pub lattice_dim: usize,
    pub bases_length: usize,
    pub created_at: i64,
    pub checksum_prefix: [u8; 16],
}

impl QuantumKey {
    /// Generate a new key of `key_length` bytes from fresh CSPRNG entropy.
    pub fn generate(key_length: u64) -> Result<Self, Error> {
        if !(expand::MIN_KEY_LENGTH..=expand::MAX_KEY_LENGTH).contains(&key_length) {
            return Err(Error::InvalidKeyLength(key_length));
        }
        let master_seed = random::bytes::<64>()?;
        Ok(Self::derive(master_seed, key_length, now()))
    }

    /// Rebuild every derived table from `master_seed` and `key_length`,
    /// following the ordering in [`crate::expand`]: superposition key, then
    /// entanglement pairs, then the (independent) lattice basis, then
    /// measurement bases, then the checksum.
    fn derive(master_seed: [u8; 64], key_length: u64, created_at: i64) -> Self {
        let (superposition_key, seed_after_sp) = expand::superposition_key(&master_seed, key_length);
        let (entanglement_pairs, seed_after_ep) = expand::entanglement_pairs(seed_after_sp, key_length);
        let lattice_basis = expand::lattice_basis(&master_seed, key_length);
        let measurement_bases = expand::measurement_bases(seed_after_ep, key_length);
        let checksum = expand::checksum(&master_seed, &superposition_key);
        Self {
            master_seed,
            superposition_key,
            entanglement_pairs,
            lattice_basis,
            measurement_bases,
            key_length,
            created_at,
            checksum,
        }
    }

    /// Construct a key directly from a known master seed, bypassing CSPRNG
    /// generation. Used by tests that need bit-exact, reproducible keys.
    #[cfg(test)]
    pub(crate) fn from_master_seed(master_seed: [u8; 64], key_length: u64) -> Result<Self, Error> {
        if !(expand::MIN_KEY_LENGTH..=expand::MAX_KEY_LENGTH).contains(&key_length) {
            return Err(Error::InvalidKeyLength(key_length));
        }
        Ok(Self::derive(master_seed, key_length, 0))
    }

    pub fn master_seed(&self) -> &[u8; 64] {
        &self.master_seed
    }

    pub fn superposition_key(&self) -> &[u8] {
        &self.superposition_key
    }

    pub fn entanglement_pairs(&self) -> &[[u8; 64]] {
        &self.entanglement_pairs
    }

    pub fn lattice_basis(&self) -> &Lattice {
        &self.lattice_basis
    }

    pub fn measurement_bases(&self) -> &[u8] {
        &self.measurement_bases
    }

    pub fn key_length(&self) -> u64 {
        self.key_length
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn checksum(&self) -> &[u8; 64] {
        &self.checksum
    }

    /// The 32-byte fingerprint ciphertext containers use to identify which
    /// key they expect: the first half of `SHA-512(master_seed)`.
    pub fn fingerprint(&self) -> [u8; 32] {
        let h = expand::sha512(&self.master_seed);
        let mut fp = [0u8; 32];
        fp.copy_from_slice(&h[..32]);
        fp
    }

    pub fn info(&self) -> KeyInfo {
        let mut checksum_prefix = [0u8; 16];
        checksum_prefix.copy_from_slice(&self.checksum[..16]);
        KeyInfo {
            key_length: self.key_length,
            pair_count: self.entanglement_pairs.len(),
            lattice_dim: self.lattice_basis.dim(),
            bases_length: self.measurement_bases.len(),
            created_at: self.created_at,
            checksum_prefix,
        }
    }

    /// Serialize the key container. Layout, offsets little-endian:
    ///
    /// | offset | size | field              |
    /// |-------:|-----:|--------------------|
    /// | 0      | 4    | magic `"QKEY"`     |
    /// | 4      | 1    | version            |
    /// | 5      | 8    | key_length         |
    /// | 13     | 8    | created_at         |
    /// | 21     | 64   | master_seed        |
    /// | 85     | 64   | checksum           |
    /// | 149    | 4    | bases_length       |
    /// | 153    | N    | measurement_bases  |
    pub fn save(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(KEY_HEADER_LEN + self.measurement_bases.len());
        buf.extend_from_slice(&KEY_MAGIC);
        buf.push(KEY_VERSION);
        buf.extend_from_slice(&self.key_length.to_le_bytes());
        buf.extend_from_slice(&(self.created_at as u64).to_le_bytes());
        buf.extend_from_slice(&self.master_seed);
        buf.extend_from_slice(&self.checksum);
        buf.extend_from_slice(&(self.measurement_bases.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.measurement_bases);
        debug_assert_eq!(buf.len(), KEY_HEADER_LEN + self.measurement_bases.len());
        buf
    }

    /// Reconstruct a key from a container produced by [`Self::save`],
    /// regenerating `superposition_key`, `entanglement_pairs`, and
    /// `lattice_basis` from `master_seed` and `key_length` and verifying the
    /// stored checksum still matches.
    ///
    /// The reference tool's reader skips a phantom byte before `key_length`
    /// that its own writer never inserts (see the spec's "known ambiguity").
    /// This reader uses the corrected, self-consistent offsets above instead
    /// of reproducing that drift.
    pub fn load(data: &[u8]) -> Result<Self, Error> {
        if data.len() < KEY_HEADER_LEN {
            return Err(Error::CorruptContainer("key file shorter than header"));
        }
        if data[0..4] != KEY_MAGIC {
            return Err(Error::CorruptContainer("bad key file magic"));
        }
        if data[4] != KEY_VERSION {
            return Err(Error::CorruptContainer("unsupported key file version"));
        }

        let key_length = u64::from_le_bytes(data[5..13].try_into().unwrap());
        let created_at = u64::from_le_bytes(data[13..21].try_into().unwrap()) as i64;
        let mut master_seed = [0u8; 64];
        master_seed.copy_from_slice(&data[21..85]);
        let mut stored_checksum = [0u8; 64];
        stored_checksum.copy_from_slice(&data[85..149]);
        let bases_length = u32::from_le_bytes(data[149..153].try_into().unwrap()) as usize;

        if data.len() < KEY_HEADER_LEN + bases_length {
            return Err(Error::CorruptContainer("key file truncated before measurement bases"));
        }
        let measurement_bases = data[KEY_HEADER_LEN..KEY_HEADER_LEN + bases_length].to_vec();

        if !(expand::MIN_KEY_LENGTH..=expand::MAX_KEY_LENGTH).contains(&key_length) {
            return Err(Error::CorruptContainer("key file has out-of-range key_length"));
        }

        let (superposition_key, seed_after_sp) = expand::superposition_key(&master_seed, key_length);
        let (entanglement_pairs, _) = expand::entanglement_pairs(seed_after_sp, key_length);
        let lattice_basis = expand::lattice_basis(&master_seed, key_length);
        let checksum = expand::checksum(&master_seed, &superposition_key);

        if checksum != stored_checksum {
            return Err(Error::CorruptContainer("key file checksum does not match its contents"));
        }

        Ok(Self {
            master_seed,
            superposition_key,
            entanglement_pairs,
            lattice_basis,
            measurement_bases,
            key_length,
            created_at,
            checksum,
        })
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
