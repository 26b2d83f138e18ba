use crate::{container, error::Error, key::QuantumKey};

#[test]
fn round_trip_recovers_the_plaintext() {
    let key = QuantumKey::generate(1024).unwrap();
    let plaintext = b"the quick brown fox jumps over the lazy dog";

    let container = container::encrypt_file(&key, plaintext).unwrap();
    let recovered = container::decrypt_file(&key, &container).unwrap();

    assert_eq!(recovered, plaintext);
}

#[test]
fn empty_input_is_rejected() {
    let key = QuantumKey::generate(1024).unwrap();
    assert!(matches!(container::encrypt_file(&key, &[]), Err(Error::InvalidInput)));
}

#[test]
fn tampering_with_the_ciphertext_is_detected() {
    let key = QuantumKey::generate(1024).unwrap();
    let plaintext = vec![0xABu8; 200];
    let mut container = container::encrypt_file(&key, &plaintext).unwrap();

    container[150] ^= 0x01;

    assert!(matches!(container::decrypt_file(&key, &container), Err(Error::IntegrityFailure)));
}

#[test]
fn decrypting_with_the_wrong_key_fails_before_the_integrity_check() {
    let key_a = QuantumKey::generate(1024).unwrap();
    let key_b = QuantumKey::generate(1024).unwrap();
    let plaintext = b"same plaintext, different keys";

    let container = container::encrypt_file(&key_a, plaintext).unwrap();

    assert!(matches!(container::decrypt_file(&key_b, &container), Err(Error::WrongKey)));
}

#[test]
fn rejects_undersized_containers() {
    let key = QuantumKey::generate(1024).unwrap();
    assert!(matches!(container::decrypt_file(&key, &[0u8; 10]), Err(Error::CorruptContainer(_))));
}

#[test]
fn original_size_field_matches_the_input_length() {
    let key = QuantumKey::generate(1024).unwrap();
    let plaintext = vec![0x42u8; 513];

    let container = container::encrypt_file(&key, &plaintext).unwrap();
    let recovered = container::decrypt_file(&key, &container).unwrap();

    assert_eq!(recovered.len(), 513);
}
