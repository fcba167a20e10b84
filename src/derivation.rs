//! HKDF-SHA256 key derivation chains for encrypted push records.
//!
//! Two derivations are in the wild: the legacy "aesgcm" draft scheme that
//! Mastodon-compatible servers deliver today, and the standardized
//! "aes128gcm" scheme used with self-describing envelopes. The info strings
//! are concatenated byte-for-byte; a single byte out of place produces keys
//! that fail only as an authentication-tag mismatch downstream.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::types::{
    AES128GCM_KEY_INFO, AESGCM_KEY_INFO, AUTH_INFO, CONTENT_KEY_SIZE, CURVE_LABEL, NONCE_INFO,
    NONCE_SIZE, PUBLIC_KEY_SIZE, WEBPUSH_INFO,
};

/// Content-encryption key and nonce for a single record.
///
/// Derived deterministically from (shared secret, auth secret, salt, both
/// public keys); never reused across messages since the salt differs per
/// message. Zeroized on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKeys {
    /// AES-128-GCM content-encryption key.
    pub cek: [u8; CONTENT_KEY_SIZE],
    /// AES-GCM nonce.
    pub nonce: [u8; NONCE_SIZE],
}

impl Drop for DerivedKeys {
    fn drop(&mut self) {
        self.cek.zeroize();
        self.nonce.zeroize();
    }
}

/// Derive the content-encryption key and nonce for the legacy "aesgcm"
/// encoding.
///
/// # Arguments
/// * `shared_secret` - Raw ECDH shared secret
/// * `auth_secret` - Subscription authentication secret
/// * `salt` - Per-message salt
/// * `receiver_public_key` - Receiver's uncompressed public key (65 bytes)
/// * `sender_public_key` - Sender's uncompressed public key (65 bytes)
pub fn derive_aesgcm_keys(
    shared_secret: &[u8],
    auth_secret: &[u8],
    salt: &[u8],
    receiver_public_key: &[u8; PUBLIC_KEY_SIZE],
    sender_public_key: &[u8; PUBLIC_KEY_SIZE],
) -> DerivedKeys {
    let mut ikm = [0u8; 32];
    Hkdf::<Sha256>::new(Some(auth_secret), shared_secret)
        .expand(AUTH_INFO, &mut ikm)
        .expect("32 bytes is a valid length for HKDF-SHA256");

    // context: "P-256" || 0x00 || len(receiver) || receiver || len(sender) || sender
    let mut context = Vec::with_capacity(CURVE_LABEL.len() + 4 + 2 * PUBLIC_KEY_SIZE);
    context.extend_from_slice(CURVE_LABEL);
    context.extend_from_slice(&(PUBLIC_KEY_SIZE as u16).to_be_bytes());
    context.extend_from_slice(receiver_public_key);
    context.extend_from_slice(&(PUBLIC_KEY_SIZE as u16).to_be_bytes());
    context.extend_from_slice(sender_public_key);

    let mut key_info = Vec::with_capacity(AESGCM_KEY_INFO.len() + context.len());
    key_info.extend_from_slice(AESGCM_KEY_INFO);
    key_info.extend_from_slice(&context);

    let mut nonce_info = Vec::with_capacity(NONCE_INFO.len() + context.len());
    nonce_info.extend_from_slice(NONCE_INFO);
    nonce_info.extend_from_slice(&context);

    let keys = expand_record_keys(salt, &ikm, &key_info, &nonce_info);
    ikm.zeroize();
    keys
}

/// Derive the content-encryption key and nonce for the "aes128gcm" encoding.
///
/// # Arguments
/// * `shared_secret` - Raw ECDH shared secret
/// * `auth_secret` - Subscription authentication secret
/// * `salt` - Per-message salt from the envelope
/// * `receiver_public_key` - Receiver's uncompressed public key (65 bytes)
/// * `sender_public_key` - Sender's uncompressed public key (65 bytes)
pub fn derive_aes128gcm_keys(
    shared_secret: &[u8],
    auth_secret: &[u8],
    salt: &[u8],
    receiver_public_key: &[u8; PUBLIC_KEY_SIZE],
    sender_public_key: &[u8; PUBLIC_KEY_SIZE],
) -> DerivedKeys {
    // ikm info: "WebPush: info" || 0x00 || receiver || sender
    let mut ikm_info = Vec::with_capacity(WEBPUSH_INFO.len() + 2 * PUBLIC_KEY_SIZE);
    ikm_info.extend_from_slice(WEBPUSH_INFO);
    ikm_info.extend_from_slice(receiver_public_key);
    ikm_info.extend_from_slice(sender_public_key);

    let mut ikm = [0u8; 32];
    Hkdf::<Sha256>::new(Some(auth_secret), shared_secret)
        .expand(&ikm_info, &mut ikm)
        .expect("32 bytes is a valid length for HKDF-SHA256");

    let keys = expand_record_keys(salt, &ikm, AES128GCM_KEY_INFO, NONCE_INFO);
    ikm.zeroize();
    keys
}

/// Second HKDF stage shared by both encodings: extract with the salt, then
/// expand the content-encryption key and nonce.
fn expand_record_keys(salt: &[u8], ikm: &[u8], key_info: &[u8], nonce_info: &[u8]) -> DerivedKeys {
    let hkdf = Hkdf::<Sha256>::new(Some(salt), ikm);

    let mut cek = [0u8; CONTENT_KEY_SIZE];
    hkdf.expand(key_info, &mut cek)
        .expect("16 bytes is a valid length for HKDF-SHA256");

    let mut nonce = [0u8; NONCE_SIZE];
    hkdf.expand(nonce_info, &mut nonce)
        .expect("12 bytes is a valid length for HKDF-SHA256");

    DerivedKeys { cek, nonce }
}
