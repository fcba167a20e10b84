//! Encryption and decryption pipelines for Web Push messages.
//!
//! Two content encodings are supported. The five-argument [`decrypt`] path
//! handles the legacy "aesgcm" encoding delivered by Mastodon-compatible
//! servers, where the salt and the sender's ephemeral key arrive alongside
//! the ciphertext rather than inside it. The [`decrypt_envelope`] path
//! handles the self-describing "aes128gcm" envelope. Each call is a single
//! pass over immutable inputs; the first failure propagates unwrapped.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes128Gcm, Key, Nonce,
};
use p256::{PublicKey, SecretKey};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::derivation::{derive_aes128gcm_keys, derive_aesgcm_keys};
use crate::envelope::{
    pad_aes128gcm_record, pad_aesgcm_record, strip_aes128gcm_padding, strip_aesgcm_padding,
    PushEnvelope,
};
use crate::keys::{decode_public_key, generate_ephemeral_keypair, p256_ecdh, public_key_bytes};
use crate::models::PushNotification;
use crate::types::{
    Result, WebPushError, CONTENT_KEY_SIZE, DEFAULT_RECORD_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE,
};

/// Decrypt a single AES-128-GCM record.
///
/// The final 16 bytes of `ciphertext` are the authentication tag.
///
/// # Errors
/// `AuthenticationFailed` if tag verification fails; no partial plaintext
/// is ever returned.
pub fn aead_decrypt(
    ciphertext: &[u8],
    key: &[u8; CONTENT_KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
) -> Result<Vec<u8>> {
    let cipher = Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| WebPushError::AuthenticationFailed)
}

/// Encrypt a single AES-128-GCM record, appending the 16-byte tag.
pub fn aead_encrypt(
    plaintext: &[u8],
    key: &[u8; CONTENT_KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
) -> Vec<u8> {
    let cipher = Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(key));
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .expect("record fits within the AES-GCM length bound")
}

/// Decrypt an encrypted push message (legacy "aesgcm" encoding).
///
/// # Arguments
/// * `encrypted_message` - Ciphertext including the authentication tag
/// * `private_key` - Receiver's P-256 private key
/// * `server_public_key` - Push server's ephemeral public key
/// * `auth` - Subscription authentication secret
/// * `salt` - Per-message salt
///
/// # Returns
/// The plaintext payload with record padding removed.
pub fn decrypt(
    encrypted_message: &[u8],
    private_key: &SecretKey,
    server_public_key: &PublicKey,
    auth: &[u8],
    salt: &[u8],
) -> Result<Vec<u8>> {
    let mut shared_secret = p256_ecdh(private_key, server_public_key);
    let receiver_public = public_key_bytes(&private_key.public_key());
    let sender_public = public_key_bytes(server_public_key);

    let keys = derive_aesgcm_keys(&shared_secret, auth, salt, &receiver_public, &sender_public);
    shared_secret.zeroize();

    let record = aead_decrypt(encrypted_message, &keys.cek, &keys.nonce)?;
    let payload = strip_aesgcm_padding(&record)?;
    Ok(payload.to_vec())
}

/// Encrypt a payload into a legacy "aesgcm" record (counterpart of
/// [`decrypt`], used by the sending side and for round-trip testing).
pub fn encrypt(
    message: &[u8],
    server_private_key: &SecretKey,
    client_public_key: &PublicKey,
    auth: &[u8],
    salt: &[u8],
) -> Vec<u8> {
    let mut shared_secret = p256_ecdh(server_private_key, client_public_key);
    let receiver_public = public_key_bytes(client_public_key);
    let sender_public = public_key_bytes(&server_private_key.public_key());

    let keys = derive_aesgcm_keys(&shared_secret, auth, salt, &receiver_public, &sender_public);
    shared_secret.zeroize();

    let record = pad_aesgcm_record(message, 0);
    aead_encrypt(&record, &keys.cek, &keys.nonce)
}

/// Decrypt a self-describing "aes128gcm" envelope.
///
/// The salt and the sender's ephemeral public key are read from the
/// envelope header; see [`PushEnvelope`] for the wire layout.
pub fn decrypt_envelope(
    envelope: &[u8],
    private_key: &SecretKey,
    auth: &[u8],
) -> Result<Vec<u8>> {
    let envelope = PushEnvelope::decode(envelope)?;
    let server_public_key = decode_public_key(&envelope.sender_public_key)?;

    let mut shared_secret = p256_ecdh(private_key, &server_public_key);
    let receiver_public = public_key_bytes(&private_key.public_key());

    let keys = derive_aes128gcm_keys(
        &shared_secret,
        auth,
        &envelope.salt,
        &receiver_public,
        &envelope.sender_public_key,
    );
    shared_secret.zeroize();

    let record = aead_decrypt(&envelope.ciphertext, &keys.cek, &keys.nonce)?;
    let payload = strip_aes128gcm_padding(&record)?;
    Ok(payload.to_vec())
}

/// Encrypt a payload into a self-describing "aes128gcm" envelope, generating
/// the ephemeral sender key pair and salt from `rng`.
///
/// # Errors
/// `MessageTooLarge` if the padded record does not fit in a single record.
pub fn encrypt_envelope<R: CryptoRng + RngCore>(
    message: &[u8],
    client_public_key: &PublicKey,
    auth: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    if message.len() + 1 + TAG_SIZE > DEFAULT_RECORD_SIZE as usize {
        return Err(WebPushError::MessageTooLarge(message.len()));
    }

    let (server_private_key, server_public_key) = generate_ephemeral_keypair(rng);
    let mut salt = [0u8; SALT_SIZE];
    rng.fill_bytes(&mut salt);

    let mut shared_secret = p256_ecdh(&server_private_key, client_public_key);
    let receiver_public = public_key_bytes(client_public_key);
    let sender_public = public_key_bytes(&server_public_key);

    let keys = derive_aes128gcm_keys(&shared_secret, auth, &salt, &receiver_public, &sender_public);
    shared_secret.zeroize();

    let record = pad_aes128gcm_record(message);
    let ciphertext = aead_encrypt(&record, &keys.cek, &keys.nonce);

    let envelope = PushEnvelope {
        salt,
        record_size: DEFAULT_RECORD_SIZE,
        sender_public_key: sender_public,
        ciphertext,
    };
    Ok(envelope.encode())
}

/// Decrypt an encrypted push message and decode it as a push notification.
///
/// # Errors
/// Any failure from [`decrypt`], or `DecodeFailed` if the plaintext is not
/// a valid notification payload.
pub fn decrypt_and_decode_push(
    encrypted_message: &[u8],
    private_key: &SecretKey,
    server_public_key: &PublicKey,
    auth: &[u8],
    salt: &[u8],
) -> Result<PushNotification> {
    let plaintext = decrypt(encrypted_message, private_key, server_public_key, auth, salt)?;
    PushNotification::from_bytes(&plaintext)
}
