//! Shared fixtures for diary-core integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use diary_core::crypto::Passphrase;
use diary_core::JournalConfig;
use pkcs8::pkcs5::pbes2;
use pkcs8::PrivateKeyInfo;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use secrecy::SecretString;

pub const PASSPHRASE: &str = "test-passphrase-secure-123";
pub const WRONG_PASSPHRASE: &str = "wrong-passphrase-456";

/// Generated once per test binary.
const TEST_KEY_BITS: usize = 2048;

/// PBKDF2 rounds for the test key's PKCS#8 container.
const TEST_PBKDF2_ROUNDS: u32 = 1_000;

pub struct KeyFixture {
    pub private_key: RsaPrivateKey,
    pub public_key: RsaPublicKey,
    pub private_pem: String,
    pub public_pem: String,
}

pub fn keys() -> &'static KeyFixture {
    static KEYS: OnceLock<KeyFixture> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut rng = rand::rngs::OsRng;
        let private_key =
            RsaPrivateKey::new(&mut rng, TEST_KEY_BITS).expect("key generation should succeed");
        let public_key = RsaPublicKey::from(&private_key);

        let der = private_key
            .to_pkcs8_der()
            .expect("PKCS#8 encoding should succeed");
        let info = PrivateKeyInfo::try_from(der.as_bytes()).expect("PKCS#8 should parse");
        let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(
            TEST_PBKDF2_ROUNDS,
            b"diary-test-salt!",
            b"diary-test-iv-16",
        )
        .expect("PBES2 parameters should be valid");
        let encrypted = info
            .encrypt_with_params(params, PASSPHRASE)
            .expect("PKCS#8 encryption should succeed");
        let private_pem = encrypted
            .to_pem("ENCRYPTED PRIVATE KEY", LineEnding::LF)
            .expect("PEM encoding should succeed")
            .to_string();
        let public_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .expect("public key PEM should encode");

        KeyFixture {
            private_key,
            public_key,
            private_pem,
            public_pem,
        }
    })
}

pub fn passphrase(value: &str) -> Passphrase {
    SecretString::from(value.to_string())
}

/// Write the fixture keys into `root` and return a config with an existing,
/// empty entry directory.
pub fn journal_config(root: &Path) -> JournalConfig {
    let fixture = keys();
    let public_key = root.join("public.pem");
    let private_key = root.join("private.pem");
    fs::write(&public_key, &fixture.public_pem).expect("write public key");
    fs::write(&private_key, &fixture.private_pem).expect("write private key");

    let entry_dir = root.join("entries");
    fs::create_dir_all(&entry_dir).expect("create entry dir");
    JournalConfig::new(entry_dir, public_key, private_key)
}

/// Seal `plaintext` straight into `entry_dir/<name>`, bypassing the date line.
pub fn write_envelope(config: &JournalConfig, name: &str, plaintext: &str) -> PathBuf {
    let path = config.entry_dir.join(name);
    diary_core::crypto::seal_to_file(
        plaintext.as_bytes(),
        &path,
        &config.public_key,
        config.key_wrap,
    )
    .expect("seal should succeed");
    path
}
