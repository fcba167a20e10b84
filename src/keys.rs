//! Key agreement and key material handling for Web Push.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};
use rand::{CryptoRng, RngCore};

use crate::types::{Result, WebPushError, AUTH_SECRET_SIZE, PUBLIC_KEY_SIZE, SHARED_SECRET_SIZE};

/// Parse an uncompressed SEC1 point (0x04 || X || Y) into a P-256 public key.
///
/// # Errors
/// `InvalidKey` if the bytes are malformed or the point is not on the curve
/// (validated by the curve library).
pub fn decode_public_key(bytes: &[u8]) -> Result<PublicKey> {
    PublicKey::from_sec1_bytes(bytes)
        .map_err(|e| WebPushError::InvalidKey(format!("public key: {}", e)))
}

/// Parse a raw 32-byte scalar into a P-256 private key.
///
/// # Errors
/// `InvalidKey` if the bytes are not a valid non-zero scalar.
pub fn decode_private_key(bytes: &[u8]) -> Result<SecretKey> {
    SecretKey::from_slice(bytes)
        .map_err(|e| WebPushError::InvalidKey(format!("private key: {}", e)))
}

/// Encode a P-256 public key as an uncompressed SEC1 point (65 bytes).
pub fn public_key_bytes(public_key: &PublicKey) -> [u8; PUBLIC_KEY_SIZE] {
    let point = public_key.to_encoded_point(false);
    let mut bytes = [0u8; PUBLIC_KEY_SIZE];
    bytes.copy_from_slice(point.as_bytes());
    bytes
}

/// Perform P-256 ECDH key exchange.
///
/// # Arguments
/// * `private_key` - Our private key
/// * `public_key` - Their public key
///
/// # Returns
/// The 32-byte shared x-coordinate.
pub fn p256_ecdh(private_key: &SecretKey, public_key: &PublicKey) -> [u8; SHARED_SECRET_SIZE] {
    let shared =
        p256::ecdh::diffie_hellman(private_key.to_nonzero_scalar(), public_key.as_affine());
    let mut bytes = [0u8; SHARED_SECRET_SIZE];
    bytes.copy_from_slice(shared.raw_secret_bytes());
    bytes
}

/// Generate a fresh 16-byte subscription authentication secret.
///
/// Every call returns an independent value; callers must not reuse a secret
/// across subscriptions.
pub fn new_auth_secret<R: CryptoRng + RngCore>(rng: &mut R) -> [u8; AUTH_SECRET_SIZE] {
    let mut secret = [0u8; AUTH_SECRET_SIZE];
    rng.fill_bytes(&mut secret);
    secret
}

/// Generate a random ephemeral P-256 key pair for subscription setup.
///
/// # Returns
/// Tuple of (private_key, public_key)
pub fn generate_ephemeral_keypair<R: CryptoRng + RngCore>(
    rng: &mut R,
) -> (SecretKey, PublicKey) {
    let private_key = SecretKey::random(rng);
    let public_key = private_key.public_key();
    (private_key, public_key)
}
