//! Error types for Diary core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer will map these
//! to user-friendly messages.
//!
//! Messages never carry key material, passphrases, or plaintext.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Diary operations.
pub type Result<T> = std::result::Result<T, DiaryError>;

/// Core error type for Diary operations.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// The OS random source could not supply key or IV material
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// The symmetric cipher could not be initialized with the given key/IV
    #[error("Cipher initialization failed: {0}")]
    CipherInit(String),

    /// Public key file does not exist or cannot be read
    #[error("Public key not found: {}", .0.display())]
    PublicKeyNotFound(PathBuf),

    /// Public key file is not a valid SPKI PEM RSA key
    #[error("Invalid public key: {0}")]
    PublicKeyParse(String),

    /// Private key file does not exist or cannot be read
    #[error("Private key not found: {}", .0.display())]
    PrivateKeyNotFound(PathBuf),

    /// Private key file is not an encrypted PKCS#8 RSA key
    #[error("Invalid private key: {0}")]
    PrivateKeyParse(String),

    /// Passphrase did not decrypt the private key (or the key container is corrupt)
    #[error("Incorrect passphrase")]
    IncorrectPassphrase,

    /// Asymmetric encryption of the entry key failed
    #[error("Key wrap failed: {0}")]
    KeyWrap(String),

    /// Asymmetric decryption of the entry key failed
    #[error("Key unwrap failed: {0}")]
    KeyUnwrap(String),

    /// Envelope bytes do not follow the length-prefixed layout
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Payload failed authentication, padding validation, or decryption
    #[error("Cannot decrypt entry: {0}")]
    PayloadDecrypt(String),

    /// Envelope file does not exist
    #[error("Envelope not found: {}", .0.display())]
    EnvelopeNotFound(PathBuf),

    /// Envelope could not be written to its target path
    #[error("Cannot write envelope {}: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An envelope already exists at the target path
    #[error("Entry already exists: {}", .0.display())]
    EntryExists(PathBuf),

    /// Entry directory does not exist
    #[error("Entry directory not found: {}", .0.display())]
    EntryDirNotFound(PathBuf),

    /// Decrypted plaintext is not a valid entry
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Operation requires a loaded journal
    #[error("Journal is not loaded")]
    NotLoaded,

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiaryError {
    /// Errors that describe a damaged or foreign envelope rather than a key problem.
    pub fn is_envelope_damage(&self) -> bool {
        matches!(
            self,
            DiaryError::MalformedEnvelope(_)
                | DiaryError::KeyUnwrap(_)
                | DiaryError::PayloadDecrypt(_)
                | DiaryError::InvalidEntry(_)
        )
    }
}
