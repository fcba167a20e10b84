//! Envelope encoding and decoding for encrypted push messages.
//!
//! The self-describing envelope carries everything the receiver needs apart
//! from its own key material: the per-message salt, the declared record
//! size, the sender's ephemeral public key, and the ciphertext. Record
//! padding for both content encodings also lives here.

use crate::types::{
    Result, WebPushError, ENVELOPE_HEADER_SIZE, MIN_RECORD_SIZE, PADDING_DELIMITER,
    PUBLIC_KEY_SIZE, SALT_SIZE, TAG_SIZE,
};

/// Encrypted push message envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEnvelope {
    /// Per-message salt (16 bytes).
    pub salt: [u8; SALT_SIZE],
    /// Declared upper bound on a single record's ciphertext length.
    pub record_size: u32,
    /// Sender's ephemeral P-256 public key, uncompressed (65 bytes).
    pub sender_public_key: [u8; PUBLIC_KEY_SIZE],
    /// Ciphertext including the 16-byte authentication tag.
    pub ciphertext: Vec<u8>,
}

impl PushEnvelope {
    /// Encode the envelope to bytes.
    ///
    /// Format (86-byte header + ciphertext):
    /// - [0-15]  salt (16 bytes)
    /// - [16-19] record size (4 bytes, big-endian)
    /// - [20]    key id length (must be 65)
    /// - [21-85] sender public key (65 bytes, uncompressed EC point)
    /// - [86+]   ciphertext (variable)
    pub fn encode(&self) -> Vec<u8> {
        let mut data =
            Vec::with_capacity(ENVELOPE_HEADER_SIZE + PUBLIC_KEY_SIZE + self.ciphertext.len());
        data.extend_from_slice(&self.salt);
        data.extend_from_slice(&self.record_size.to_be_bytes());
        data.push(PUBLIC_KEY_SIZE as u8);
        data.extend_from_slice(&self.sender_public_key);
        data.extend_from_slice(&self.ciphertext);
        data
    }

    /// Decode bytes into an envelope.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < ENVELOPE_HEADER_SIZE {
            return Err(WebPushError::MalformedEnvelope(format!(
                "data too short: {} bytes (minimum {})",
                data.len(),
                ENVELOPE_HEADER_SIZE
            )));
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&data[..SALT_SIZE]);

        let record_size = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
        if record_size < MIN_RECORD_SIZE {
            return Err(WebPushError::MalformedEnvelope(format!(
                "record size {} below minimum {}",
                record_size, MIN_RECORD_SIZE
            )));
        }

        let key_id_length = data[20] as usize;
        if key_id_length != PUBLIC_KEY_SIZE {
            return Err(WebPushError::MalformedEnvelope(format!(
                "key id length {} (expected {})",
                key_id_length, PUBLIC_KEY_SIZE
            )));
        }
        if data.len() < ENVELOPE_HEADER_SIZE + PUBLIC_KEY_SIZE {
            return Err(WebPushError::MalformedEnvelope(format!(
                "truncated sender key: {} bytes",
                data.len() - ENVELOPE_HEADER_SIZE
            )));
        }

        let mut sender_public_key = [0u8; PUBLIC_KEY_SIZE];
        sender_public_key
            .copy_from_slice(&data[ENVELOPE_HEADER_SIZE..ENVELOPE_HEADER_SIZE + PUBLIC_KEY_SIZE]);

        let ciphertext = data[ENVELOPE_HEADER_SIZE + PUBLIC_KEY_SIZE..].to_vec();
        if ciphertext.len() <= TAG_SIZE {
            return Err(WebPushError::MalformedEnvelope(format!(
                "ciphertext too short: {} bytes",
                ciphertext.len()
            )));
        }
        if ciphertext.len() > record_size as usize {
            return Err(WebPushError::MalformedEnvelope(format!(
                "ciphertext of {} bytes exceeds record size {}",
                ciphertext.len(),
                record_size
            )));
        }

        Ok(Self {
            salt,
            record_size,
            sender_public_key,
            ciphertext,
        })
    }
}

/// Check if data looks like a valid push message envelope.
pub fn is_push_envelope(data: &[u8]) -> bool {
    if data.len() <= ENVELOPE_HEADER_SIZE + PUBLIC_KEY_SIZE {
        return false;
    }
    data[20] as usize == PUBLIC_KEY_SIZE && data[ENVELOPE_HEADER_SIZE] == 0x04
}

/// Strip the padding delimiter from an "aes128gcm" plaintext record.
///
/// The first byte must be the final-record delimiter (0x02); exactly one
/// delimiter byte is consumed and everything after it is payload.
pub fn strip_aes128gcm_padding(record: &[u8]) -> Result<&[u8]> {
    let Some((&delimiter, payload)) = record.split_first() else {
        return Err(WebPushError::InvalidPadding("empty record".into()));
    };
    if delimiter != PADDING_DELIMITER {
        return Err(WebPushError::InvalidPadding(format!(
            "unexpected delimiter byte {:#04x}",
            delimiter
        )));
    }
    Ok(payload)
}

/// Build a delimiter-prefixed "aes128gcm" record around a payload.
pub fn pad_aes128gcm_record(payload: &[u8]) -> Vec<u8> {
    let mut record = Vec::with_capacity(1 + payload.len());
    record.push(PADDING_DELIMITER);
    record.extend_from_slice(payload);
    record
}

/// Strip the length-prefixed padding from a legacy "aesgcm" plaintext record.
///
/// The record opens with a 2-byte big-endian pad length followed by that
/// many zero bytes; the rest is payload.
pub fn strip_aesgcm_padding(record: &[u8]) -> Result<&[u8]> {
    if record.len() < 2 {
        return Err(WebPushError::InvalidPadding(format!(
            "record of {} bytes is shorter than the pad length prefix",
            record.len()
        )));
    }
    let pad_len = u16::from_be_bytes([record[0], record[1]]) as usize;
    let body = &record[2..];
    if pad_len > body.len() {
        return Err(WebPushError::InvalidPadding(format!(
            "pad length {} exceeds record body of {} bytes",
            pad_len,
            body.len()
        )));
    }
    if body[..pad_len].iter().any(|&b| b != 0) {
        return Err(WebPushError::InvalidPadding("non-zero padding byte".into()));
    }
    Ok(&body[pad_len..])
}

/// Build a length-prefixed legacy "aesgcm" record around a payload.
pub fn pad_aesgcm_record(payload: &[u8], pad_len: u16) -> Vec<u8> {
    let mut record = Vec::with_capacity(2 + pad_len as usize + payload.len());
    record.extend_from_slice(&pad_len.to_be_bytes());
    record.resize(2 + pad_len as usize, 0);
    record.extend_from_slice(payload);
    record
}
