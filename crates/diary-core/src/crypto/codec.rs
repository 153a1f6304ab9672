//! Hybrid seal/open for single entries.
//!
//! Each entry gets fresh key material: a 256-bit AES key and a 256-bit HMAC
//! key. The plaintext is encrypted with AES-256-CBC/PKCS#7, the IV and
//! ciphertext are authenticated with HMAC-SHA256 (encrypt-then-MAC), and the
//! key material is wrapped under the journal's RSA public key.
//!
//! Envelopes whose unwrapped key material is a bare 32-byte AES key are
//! legacy envelopes without a tag; they are opened with padding validation
//! only.

use std::fs;
use std::io;
use std::path::Path;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::envelope::Envelope;
use super::keys::{load_private_key, load_public_key, Passphrase};
use crate::config::KeyWrap;
use crate::error::{DiaryError, Result};
use crate::fs::write_new_atomically;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// AES block and IV size in bytes.
pub const IV_LEN: usize = 16;

/// AES-256 key length in bytes.
pub const AES_KEY_LEN: usize = 32;

/// HMAC-SHA256 key length in bytes.
pub const MAC_KEY_LEN: usize = 32;

/// HMAC-SHA256 tag length in bytes.
pub const TAG_LEN: usize = 32;

/// Wrapped key material of an authenticated envelope: AES key then MAC key.
const KEY_MATERIAL_LEN: usize = AES_KEY_LEN + MAC_KEY_LEN;

/// Encrypt `plaintext` into envelope bytes for `public_key`.
///
/// # Errors
///
/// - `DiaryError::Entropy` if the OS random source fails
/// - `DiaryError::CipherInit` if the cipher rejects the generated key/IV
/// - `DiaryError::KeyWrap` if RSA encryption of the key material fails
pub fn seal(plaintext: &[u8], public_key: &RsaPublicKey, wrap: KeyWrap) -> Result<Vec<u8>> {
    let mut material = Zeroizing::new([0u8; KEY_MATERIAL_LEN]);
    fill_random(&mut material[..])?;
    let mut iv = [0u8; IV_LEN];
    fill_random(&mut iv)?;

    let (aes_key, mac_key) = material.split_at(AES_KEY_LEN);
    let cipher = Aes256CbcEnc::new_from_slices(aes_key, &iv)
        .map_err(|e| DiaryError::CipherInit(e.to_string()))?;
    let mut ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let tag = payload_tag(mac_key, &iv, &ciphertext)?;
    ciphertext.extend_from_slice(&tag);

    let wrapped_key = wrap_key(public_key, wrap, &material[..])?;

    Envelope::new(iv.to_vec(), wrapped_key, ciphertext).to_bytes()
}

/// Seal `plaintext` with the public key at `public_key_path` and write the
/// envelope to `output`.
///
/// The file appears atomically and is never written over an existing file.
/// On failure nothing is left at `output`.
///
/// # Errors
///
/// Everything [`seal`] returns, plus:
/// - `DiaryError::PublicKeyNotFound` / `DiaryError::PublicKeyParse`
/// - `DiaryError::EntryExists` if `output` already exists
/// - `DiaryError::OutputUnwritable` for any other write failure
pub fn seal_to_file(
    plaintext: &[u8],
    output: &Path,
    public_key_path: &Path,
    wrap: KeyWrap,
) -> Result<()> {
    let public_key = load_public_key(public_key_path)?;
    let envelope = seal(plaintext, &public_key, wrap)?;

    write_new_atomically(output, &envelope).map_err(|err| match err.kind() {
        io::ErrorKind::AlreadyExists => DiaryError::EntryExists(output.to_path_buf()),
        _ => DiaryError::OutputUnwritable {
            path: output.to_path_buf(),
            source: err,
        },
    })?;

    tracing::debug!(
        path = %output.display(),
        bytes = envelope.len(),
        "sealed envelope"
    );
    Ok(())
}

/// Decrypt envelope bytes with the private key at `private_key_path`.
///
/// The private key is decrypted for this call only and dropped before
/// returning.
///
/// # Errors
///
/// - `DiaryError::MalformedEnvelope` for bad length prefixes or IV size
/// - `DiaryError::PrivateKeyNotFound` / `DiaryError::PrivateKeyParse`
/// - `DiaryError::IncorrectPassphrase` if the passphrase is wrong
/// - `DiaryError::KeyUnwrap` if the key material cannot be recovered
/// - `DiaryError::PayloadDecrypt` on tag mismatch, bad padding, or corruption
pub fn open(
    envelope: &[u8],
    private_key_path: &Path,
    passphrase: &Passphrase,
    wrap: KeyWrap,
) -> Result<Vec<u8>> {
    // Parse first so a damaged file is reported without touching the key.
    let envelope = Envelope::from_bytes(envelope)?;
    let private_key = load_private_key(private_key_path, passphrase)?;
    open_envelope(&envelope, &private_key, wrap)
}

/// Decrypt envelope bytes with an already unlocked private key.
pub fn open_with_key(
    envelope: &[u8],
    private_key: &RsaPrivateKey,
    wrap: KeyWrap,
) -> Result<Vec<u8>> {
    let envelope = Envelope::from_bytes(envelope)?;
    open_envelope(&envelope, private_key, wrap)
}

/// Read and decrypt the envelope file at `path`.
///
/// # Errors
///
/// `DiaryError::EnvelopeNotFound` if the file does not exist, otherwise
/// everything [`open_with_key`] returns.
pub fn open_file(path: &Path, private_key: &RsaPrivateKey, wrap: KeyWrap) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DiaryError::EnvelopeNotFound(path.to_path_buf()),
        _ => DiaryError::from(err),
    })?;
    let plaintext = open_with_key(&bytes, private_key, wrap)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "opened envelope");
    Ok(plaintext)
}

fn open_envelope(
    envelope: &Envelope,
    private_key: &RsaPrivateKey,
    wrap: KeyWrap,
) -> Result<Vec<u8>> {
    if envelope.iv.len() != IV_LEN {
        return Err(DiaryError::MalformedEnvelope(format!(
            "IV is {} bytes, expected {}",
            envelope.iv.len(),
            IV_LEN
        )));
    }
    if envelope.wrapped_key.len() != private_key.size() {
        return Err(DiaryError::KeyUnwrap(format!(
            "wrapped key is {} bytes, private key expects {}",
            envelope.wrapped_key.len(),
            private_key.size()
        )));
    }

    let material = Zeroizing::new(unwrap_key(private_key, wrap, &envelope.wrapped_key)?);

    match material.len() {
        KEY_MATERIAL_LEN => {
            let (aes_key, mac_key) = material.split_at(AES_KEY_LEN);
            if envelope.ciphertext.len() < TAG_LEN {
                return Err(DiaryError::PayloadDecrypt(
                    "ciphertext shorter than authentication tag".to_string(),
                ));
            }
            let (body, tag) = envelope
                .ciphertext
                .split_at(envelope.ciphertext.len() - TAG_LEN);
            verify_tag(mac_key, &envelope.iv, body, tag)?;
            decrypt_payload(aes_key, &envelope.iv, body)
        }
        AES_KEY_LEN => decrypt_payload(&material[..], &envelope.iv, &envelope.ciphertext),
        other => Err(DiaryError::KeyUnwrap(format!(
            "unexpected key material length {}",
            other
        ))),
    }
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf).map_err(|e| DiaryError::Entropy(e.to_string()))
}

fn wrap_key(public_key: &RsaPublicKey, wrap: KeyWrap, material: &[u8]) -> Result<Vec<u8>> {
    let mut rng = OsRng;
    let wrapped = match wrap {
        KeyWrap::Oaep => public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), material),
        KeyWrap::Pkcs1v15 => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, material),
    };
    wrapped.map_err(|e| DiaryError::KeyWrap(e.to_string()))
}

fn unwrap_key(private_key: &RsaPrivateKey, wrap: KeyWrap, wrapped: &[u8]) -> Result<Vec<u8>> {
    let unwrapped = match wrap {
        KeyWrap::Oaep => private_key.decrypt(Oaep::new::<Sha256>(), wrapped),
        KeyWrap::Pkcs1v15 => private_key.decrypt(Pkcs1v15Encrypt, wrapped),
    };
    unwrapped.map_err(|e| DiaryError::KeyUnwrap(e.to_string()))
}

fn payload_mac(mac_key: &[u8], iv: &[u8], body: &[u8]) -> Result<HmacSha256> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key)
        .map_err(|e| DiaryError::CipherInit(e.to_string()))?;
    mac.update(iv);
    mac.update(body);
    Ok(mac)
}

fn payload_tag(mac_key: &[u8], iv: &[u8], body: &[u8]) -> Result<[u8; TAG_LEN]> {
    let digest = payload_mac(mac_key, iv, body)?.finalize().into_bytes();
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&digest);
    Ok(tag)
}

fn verify_tag(mac_key: &[u8], iv: &[u8], body: &[u8], tag: &[u8]) -> Result<()> {
    payload_mac(mac_key, iv, body)?
        .verify_slice(tag)
        .map_err(|_| DiaryError::PayloadDecrypt("authentication tag mismatch".to_string()))
}

fn decrypt_payload(aes_key: &[u8], iv: &[u8], body: &[u8]) -> Result<Vec<u8>> {
    if body.is_empty() || body.len() % IV_LEN != 0 {
        return Err(DiaryError::PayloadDecrypt(format!(
            "ciphertext length {} is not a positive multiple of {}",
            body.len(),
            IV_LEN
        )));
    }
    let cipher = Aes256CbcDec::new_from_slices(aes_key, iv)
        .map_err(|e| DiaryError::CipherInit(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(body)
        .map_err(|_| DiaryError::PayloadDecrypt("invalid padding".to_string()))
}
