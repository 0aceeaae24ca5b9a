//! AES-256-CBC encryption of the scrambled sample stream.
//!
//! CBC with PKCS#7 padding carries no authentication tag: the unpad check
//! after decryption is the only integrity signal, so corruption that happens
//! to leave valid padding goes undetected. A keyed MAC or an AEAD mode would
//! close that gap but changes the wire format and needs a version bump.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::VeilError;
use crate::result::Result;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub const KEY_LEN: usize = 32;
pub const BLOCK_LEN: usize = 16;

/// Normalizes caller-supplied key material to exactly [`KEY_LEN`] bytes:
/// truncated when longer, zero-padded when shorter.
///
/// This is a usability concession so any passphrase works as an AES-256 key.
/// It is not a key derivation function; it adds no stretching and no salt.
pub fn normalize_key(material: &str) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    let bytes = material.as_bytes();
    let take = bytes.len().min(KEY_LEN);
    key[..take].copy_from_slice(&bytes[..take]);

    key
}

/// Encrypts `plaintext` with a freshly generated random IV.
pub fn encrypt(plaintext: &[u8], key: &[u8; KEY_LEN]) -> ([u8; BLOCK_LEN], Vec<u8>) {
    let mut iv = [0u8; BLOCK_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext =
        Aes256CbcEnc::new(key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    (iv, ciphertext)
}

/// Decrypts and unpads. Fails with `InvalidKeyOrCorruptData` when the
/// padding check fails, which covers a wrong key, corrupted ciphertext and
/// truncated data alike.
pub fn decrypt(iv: &[u8; BLOCK_LEN], ciphertext: &[u8], key: &[u8; KEY_LEN]) -> Result<Vec<u8>> {
    Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| VeilError::InvalidKeyOrCorruptData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn key_material_is_truncated_or_zero_padded() {
        let short = normalize_key("abc");
        assert_eq!(&short[..3], b"abc");
        assert!(short[3..].iter().all(|&b| b == 0));

        let long = normalize_key("0123456789012345678901234567890123456789");
        assert_eq!(&long[..], "01234567890123456789012345678901".as_bytes());
    }

    #[test]
    fn encrypt_round_trips() {
        let key = normalize_key("correct horse battery staple");
        let plaintext = b"not a block size multiple".to_vec();

        let (iv, ciphertext) = encrypt(&plaintext, &key);
        assert_eq!(ciphertext.len() % BLOCK_LEN, 0);
        assert!(ciphertext.len() >= plaintext.len());

        let decrypted = decrypt(&iv, &ciphertext, &key).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn fresh_iv_per_call() {
        let key = normalize_key("k");
        let (iv_a, ct_a) = encrypt(b"same plaintext", &key);
        let (iv_b, ct_b) = encrypt(b"same plaintext", &key);

        assert_ne!(iv_a, iv_b);
        assert_ne!(ct_a, ct_b);
    }

    #[test]
    fn wrong_key_is_rejected() {
        let (iv, ciphertext) = encrypt(b"some secret bytes", &normalize_key("right key"));

        match decrypt(&iv, &ciphertext, &normalize_key("wrong key")) {
            Err(VeilError::InvalidKeyOrCorruptData) => (),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn truncated_ciphertext_is_rejected() {
        let key = normalize_key("key");
        let (iv, ciphertext) = encrypt(&[0u8; 64], &key);

        // dropping the last block leaves the zero plaintext unterminated,
        // and a zero byte is never valid PKCS#7 padding
        assert!(matches!(
            decrypt(&iv, &ciphertext[..ciphertext.len() - BLOCK_LEN], &key),
            Err(VeilError::InvalidKeyOrCorruptData)
        ));
    }

    #[test]
    fn matches_the_aes256_cbc_reference_vector() {
        // NIST SP 800-38A F.2.5 CBC-AES256.Encrypt, first block, no padding
        let key = hex!("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
        let iv = hex!("000102030405060708090a0b0c0d0e0f");
        let plaintext = hex!("6bc1bee22e409f96e93d7e117393172a");
        let expected = hex!("f58c4c04d6e5f1ba779eabfb5f7bfbd6");

        let ciphertext =
            Aes256CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(&plaintext);
        assert_eq!(&ciphertext[..BLOCK_LEN], expected);
    }
}
