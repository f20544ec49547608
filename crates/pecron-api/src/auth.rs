// Login crypto primitives
//
// The cloud login flow encrypts the account password client-side and signs
// the login form. Key and IV are derived from a fresh per-login nonce; the
// server re-derives both from the nonce echoed in the same form. All
// functions here are pure apart from the nonce draw, and none of them log
// or retain the plaintext password or derived key material.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use md5::Md5;
use rand::Rng as _;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

/// Generate the 16-character alphanumeric login nonce.
///
/// Drawn from the OS CSPRNG; a fresh nonce is required for every login
/// attempt because the password ciphertext and signature both bind to it.
pub fn generate_nonce() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Derive the AES key from the login nonce: `MD5(nonce)` hex, uppercased,
/// characters `[8..24)`.
///
/// The resulting 16 ASCII characters are used directly as the raw key bytes
/// for AES-128 -- they are not hex-decoded.
pub fn derive_key(nonce: &str) -> String {
    let digest = Md5::new_with_prefix(nonce.as_bytes()).finalize();
    let md5_hex = hex::encode(digest).to_uppercase();
    md5_hex[8..24].to_owned()
}

/// Encrypt the account password for the login form.
///
/// AES-128-CBC with PKCS#7 padding. The IV is the derived key with its two
/// 8-character halves swapped (`key[8..16] + key[0..8]`). Returns standard
/// base64. Deterministic for a fixed (password, nonce) pair.
pub fn encrypt_password(password: &str, nonce: &str) -> String {
    let key = derive_key(nonce);
    let iv = format!("{}{}", &key[8..16], &key[0..8]);

    let cipher = Aes128CbcEnc::new_from_slices(key.as_bytes(), iv.as_bytes())
        .expect("derived key and IV are always 16 bytes");
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(password.as_bytes());

    BASE64.encode(ciphertext)
}

/// Compute the login form signature:
/// `SHA-256(email || encrypted_password || nonce || secret)`, lowercase hex.
///
/// `secret` is the per-region user-domain secret shipped with the vendor
/// app. Concatenation order is part of the wire protocol.
pub fn compute_signature(
    email: &str,
    encrypted_password: &str,
    nonce: &str,
    secret: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(encrypted_password.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
