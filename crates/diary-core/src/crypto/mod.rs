//! Cryptographic operations for Diary.
//!
//! Every entry is sealed on its own with hybrid encryption:
//! - **AES-256-CBC + HMAC-SHA256**: encrypt-then-MAC of the entry text under
//!   fresh per-entry keys
//! - **RSA (OAEP or PKCS#1 v1.5)**: wraps the per-entry keys under the
//!   journal's public key
//!
//! ## Security Model
//!
//! - Writing needs only the public key; reading needs the private key and
//!   its passphrase
//! - Compromise of one entry's keys reveals nothing about other entries
//! - Key material and passphrases are zeroized on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the entry directory
//! - Tampering with individual envelope files
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to the live process memory

pub mod codec;
pub mod envelope;
pub mod keys;

pub use codec::{open, open_file, open_with_key, seal, seal_to_file};
pub use envelope::Envelope;
pub use keys::{decrypt_private_key_pem, load_private_key, load_public_key, Passphrase};
