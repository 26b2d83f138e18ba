use crate::{cipher::QCipher, key::QuantumKey, mode};

fn fixed_key(key_length: u64) -> QuantumKey {
    QuantumKey::from_master_seed([0u8; 64], key_length).unwrap()
}

#[test]
fn tiny_plaintext_pads_to_exactly_one_block() {
    let key = fixed_key(1024);
    let cipher = QCipher::new(&key);
    let nonce = [0u8; 32];
    let iv = [0u8; 32];
    let plaintext = b"Hello World";

    let ciphertext = mode::encrypt(&cipher, plaintext, &nonce, &iv);
    assert_eq!(ciphertext.len(), 64);

    let decrypted = mode::decrypt(&cipher, &ciphertext, &nonce, &iv, plaintext.len() as u64);
    assert_eq!(decrypted, plaintext);
}

#[test]
fn block_aligned_plaintext_gets_no_extra_padding_block() {
    let key = fixed_key(1024);
    let cipher = QCipher::new(&key);
    let nonce = [1u8; 32];
    let iv = [2u8; 32];
    let plaintext = [0u8; 64];

    let ciphertext = mode::encrypt(&cipher, &plaintext, &nonce, &iv);
    assert_eq!(ciphertext.len(), 64);

    let decrypted = mode::decrypt(&cipher, &ciphertext, &nonce, &iv, plaintext.len() as u64);
    assert_eq!(decrypted, plaintext);
}

#[test]
fn multi_block_plaintext_round_trips() {
    let key = fixed_key(1024);
    let cipher = QCipher::new(&key);
    let nonce = [3u8; 32];
    let iv = [4u8; 32];
    let plaintext = [0xABu8; 200];

    let ciphertext = mode::encrypt(&cipher, &plaintext, &nonce, &iv);
    assert_eq!(ciphertext.len(), 256);

    let decrypted = mode::decrypt(&cipher, &ciphertext, &nonce, &iv, plaintext.len() as u64);
    assert_eq!(decrypted, &plaintext[..]);
}

#[test]
fn decrypt_truncates_to_the_stored_original_size() {
    let key = fixed_key(1024);
    let cipher = QCipher::new(&key);
    let nonce = [5u8; 32];
    let iv = [6u8; 32];
    let plaintext = [0x11u8; 70];

    let ciphertext = mode::encrypt(&cipher, &plaintext, &nonce, &iv);
    assert_eq!(ciphertext.len(), 128);

    let decrypted = mode::decrypt(&cipher, &ciphertext, &nonce, &iv, plaintext.len() as u64);
    assert_eq!(decrypted.len(), 70);
    assert_eq!(decrypted, &plaintext[..]);
}
