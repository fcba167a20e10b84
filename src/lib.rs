//! FediPush - Web Push message decryption for Mastodon-compatible servers
//!
//! Rust implementation of the Web Push receiving pipeline using P-256 ECDH,
//! HKDF-SHA256 and AES-128-GCM.

mod types;
mod keys;
mod derivation;
mod envelope;
mod crypto;
mod models;

pub use types::*;
pub use keys::*;
pub use derivation::*;
pub use envelope::*;
pub use crypto::*;
pub use models::*;
