use crate::key::QuantumKey;

#[test]
fn save_and_load_round_trips_every_field() {
    let key = QuantumKey::generate(1024).unwrap();
    let bytes = key.save();
    let loaded = QuantumKey::load(&bytes).unwrap();

    assert_eq!(loaded.master_seed(), key.master_seed());
    assert_eq!(loaded.checksum(), key.checksum());
    assert_eq!(loaded.key_length(), key.key_length());
    assert_eq!(loaded.fingerprint(), key.fingerprint());
    assert_eq!(loaded.measurement_bases(), key.measurement_bases());
}

#[test]
fn fingerprint_changes_when_the_master_seed_changes() {
    let seed_a = [3u8; 64];
    let mut seed_b = seed_a;
    seed_b[0] ^= 0x01;

    let key_a = QuantumKey::from_master_seed(seed_a, 1024).unwrap();
    let key_b = QuantumKey::from_master_seed(seed_b, 1024).unwrap();

    assert_ne!(key_a.fingerprint(), key_b.fingerprint());
}

#[test]
fn rejects_out_of_range_key_length() {
    assert!(QuantumKey::generate(1023).is_err());
    assert!(QuantumKey::generate(1024 * 1024 * 1024 + 1).is_err());
}

#[test]
fn load_rejects_bad_magic() {
    let key = QuantumKey::generate(1024).unwrap();
    let mut bytes = key.save();
    bytes[0] ^= 0xFF;
    assert!(QuantumKey::load(&bytes).is_err());
}

#[test]
fn load_rejects_a_tampered_master_seed() {
    let key = QuantumKey::generate(1024).unwrap();
    let mut bytes = key.save();
    bytes[21] ^= 0xFF;
    assert!(QuantumKey::load(&bytes).is_err());
}

#[test]
fn load_rejects_truncated_files() {
    let key = QuantumKey::generate(1024).unwrap();
    let bytes = key.save();
    assert!(QuantumKey::load(&bytes[..bytes.len() - 1]).is_err());
}

#[test]
fn info_reports_the_expected_shape() {
    let key = QuantumKey::generate(2048).unwrap();
    let info = key.info();
    assert_eq!(info.key_length, 2048);
    assert_eq!(info.pair_count, (2048 / 128) as usize);
    assert_eq!(info.lattice_dim, (2048 / 8) as usize);
}
