//! Type definitions and protocol constants for Web Push decryption.

use thiserror::Error;

/// Size of the per-message salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Size of the subscription authentication secret in bytes.
pub const AUTH_SECRET_SIZE: usize = 16;

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Size of the content-encryption key in bytes.
pub const CONTENT_KEY_SIZE: usize = 16;

/// Size of an uncompressed P-256 public key in bytes (0x04 || X || Y).
pub const PUBLIC_KEY_SIZE: usize = 65;

/// Size of the raw ECDH shared secret in bytes.
pub const SHARED_SECRET_SIZE: usize = 32;

/// Size of the envelope header before the sender public key
/// (salt + record size + key id length).
pub const ENVELOPE_HEADER_SIZE: usize = SALT_SIZE + 4 + 1;

/// Smallest record size a conforming envelope may declare: the tag plus
/// one padding-delimiter byte.
pub const MIN_RECORD_SIZE: u32 = (TAG_SIZE + 1) as u32;

/// Record size declared by envelopes this crate produces.
pub const DEFAULT_RECORD_SIZE: u32 = 4096;

/// Padding delimiter marking the final record.
pub const PADDING_DELIMITER: u8 = 0x02;

/// HKDF info for the intermediate key material (legacy "aesgcm" encoding).
pub const AUTH_INFO: &[u8] = b"Content-Encoding: auth\0";

/// HKDF info prefix for the intermediate key material ("aes128gcm" encoding).
pub const WEBPUSH_INFO: &[u8] = b"WebPush: info\0";

/// HKDF info prefix for the content-encryption key (legacy "aesgcm").
pub const AESGCM_KEY_INFO: &[u8] = b"Content-Encoding: aesgcm\0";

/// HKDF info for the content-encryption key ("aes128gcm").
pub const AES128GCM_KEY_INFO: &[u8] = b"Content-Encoding: aes128gcm\0";

/// HKDF info prefix for the nonce (both encodings).
pub const NONCE_INFO: &[u8] = b"Content-Encoding: nonce\0";

/// Curve label opening the legacy key-derivation context.
pub const CURVE_LABEL: &[u8] = b"P-256\0";

/// Errors that can occur while decrypting or decoding a push message.
#[derive(Error, Debug)]
pub enum WebPushError {
    /// Key bytes are malformed or not a point on the curve.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The envelope is inconsistent with the wire format.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// AEAD tag verification failed: wrong key material, tampering, or
    /// transport corruption. Carries no detail and no partial plaintext.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The decrypted record's padding does not match the expected framing.
    #[error("invalid padding: {0}")]
    InvalidPadding(String),

    /// Plaintext was recovered but does not parse as a push notification.
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    /// Message does not fit in a single record.
    #[error("message too large: {0} bytes")]
    MessageTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, WebPushError>;
