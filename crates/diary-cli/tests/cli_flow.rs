use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;

use diary_core::crypto::seal_to_file;
use diary_core::KeyWrap;
use pkcs8::pkcs5::pbes2;
use pkcs8::PrivateKeyInfo;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tempfile::TempDir;

const PASSPHRASE: &str = "test-passphrase-secure-123";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_diary"))
}

/// (public PEM, encrypted private PEM), generated once per test binary.
fn key_pems() -> &'static (String, String) {
    static PEMS: OnceLock<(String, String)> = OnceLock::new();
    PEMS.get_or_init(|| {
        let private_key =
            RsaPrivateKey::new(&mut rand::rngs::OsRng, 2048).expect("generate key");
        let public_pem = RsaPublicKey::from(&private_key)
            .to_public_key_pem(LineEnding::LF)
            .expect("public key PEM");

        let der = private_key.to_pkcs8_der().expect("PKCS#8 DER");
        let info = PrivateKeyInfo::try_from(der.as_bytes()).expect("PKCS#8 parse");
        let params =
            pbes2::Parameters::pbkdf2_sha256_aes256cbc(1_000, b"diary-cli-salt!!", b"diary-cli-iv-16!")
                .expect("PBES2 params");
        let private_pem = info
            .encrypt_with_params(params, PASSPHRASE)
            .expect("encrypt private key")
            .to_pem("ENCRYPTED PRIVATE KEY", LineEnding::LF)
            .expect("private key PEM")
            .to_string();
        (public_pem, private_pem)
    })
}

/// A throwaway home with keys written and an isolated XDG environment.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let (public_pem, private_pem) = key_pems();
        std::fs::write(root.path().join("public.pem"), public_pem).expect("write public key");
        std::fs::write(root.path().join("private.pem"), private_pem).expect("write private key");
        std::fs::create_dir_all(root.path().join("entries")).expect("create entries");
        Self { root }
    }

    fn entries(&self) -> PathBuf {
        self.root.path().join("entries")
    }

    fn public_key(&self) -> PathBuf {
        self.root.path().join("public.pem")
    }

    fn private_key(&self) -> PathBuf {
        self.root.path().join("private.pem")
    }

    fn config_home(&self) -> PathBuf {
        self.root.path().join("config")
    }

    /// Command with XDG dirs inside the sandbox and no inherited DIARY_* vars.
    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        for var in [
            "DIARY_CONFIG",
            "DIARY_DIR",
            "DIARY_PUBLIC_KEY",
            "DIARY_PRIVATE_KEY",
            "DIARY_PASSPHRASE",
            "RUST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.root.path().join("data"))
            .env("NO_COLOR", "1")
            .stdin(Stdio::null());
        cmd
    }

    /// Command with every journal path passed as a flag.
    fn journal_command(&self, args: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.args(args)
            .arg("--dir")
            .arg(self.entries())
            .arg("--public-key")
            .arg(self.public_key())
            .arg("--private-key")
            .arg(self.private_key());
        cmd
    }

    fn seal(&self, name: &str, plaintext: &str) {
        seal_to_file(
            plaintext.as_bytes(),
            &self.entries().join(name),
            &self.public_key(),
            KeyWrap::Oaep,
        )
        .expect("seal fixture entry");
    }
}

fn run(mut cmd: Command) -> Output {
    cmd.output().expect("run diary")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: stdout={}, stderr={}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn read_json(sandbox: &Sandbox) -> serde_json::Value {
    let mut read = sandbox.journal_command(&["read", "--json"]);
    read.env("DIARY_PASSPHRASE", PASSPHRASE);
    let read = run(read);
    assert_success(&read);
    serde_json::from_slice(&read.stdout).expect("parse read json")
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("read dir").count()
}

#[test]
fn test_cli_write_then_read() {
    let sandbox = Sandbox::new();

    let write = run(sandbox.journal_command(&["write", "Hello from CLI"]));
    assert_success(&write);
    assert!(String::from_utf8_lossy(&write.stdout).contains("Wrote entry for"));
    assert_eq!(file_count(&sandbox.entries()), 1);

    let value = read_json(&sandbox);
    let array = value.as_array().expect("read output array");
    assert_eq!(array.len(), 1);
    assert_eq!(
        array[0].get("content").and_then(|v| v.as_str()),
        Some("Hello from CLI\n")
    );
}

#[test]
fn test_cli_write_needs_no_private_key() {
    let sandbox = Sandbox::new();
    std::fs::remove_file(sandbox.private_key()).expect("remove private key");

    let write = run(sandbox.journal_command(&["write", "public key only"]));
    assert_success(&write);
    assert_eq!(file_count(&sandbox.entries()), 1);
}

#[test]
fn test_cli_write_from_stdin() {
    let sandbox = Sandbox::new();

    let mut cmd = sandbox.journal_command(&["write"]);
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn diary write");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"piped line one\npiped line two\n")
        .expect("write stdin");
    let write = child.wait_with_output().expect("wait for write");
    assert_success(&write);

    let value = read_json(&sandbox);
    assert_eq!(
        value[0].get("content").and_then(|v| v.as_str()),
        Some("piped line one\npiped line two\n")
    );
}

#[test]
fn test_cli_write_empty_refused() {
    let sandbox = Sandbox::new();

    let write = run(sandbox.journal_command(&["write", "   "]));
    assert_eq!(write.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&write.stderr).contains("empty"));
    assert_eq!(file_count(&sandbox.entries()), 0);
}

#[test]
fn test_cli_read_orders_newest_first() {
    let sandbox = Sandbox::new();
    sandbox.seal("1.txt", "2024-01-10 08:00:00\nmiddle\n");
    sandbox.seal("2.txt", "2024-09-01 08:00:00\nnewest\n");
    sandbox.seal("3.txt", "2024-01-02 08:00:00\noldest\n");

    let mut read = sandbox.journal_command(&["read"]);
    read.env("DIARY_PASSPHRASE", PASSPHRASE);
    let read = run(read);
    assert_success(&read);

    let stdout = String::from_utf8_lossy(&read.stdout);
    let newest = stdout.find("newest").expect("newest shown");
    let middle = stdout.find("middle").expect("middle shown");
    let oldest = stdout.find("oldest").expect("oldest shown");
    assert!(newest < middle && middle < oldest);
    assert!(stdout.starts_with("2024-09-01 08:00:00\n"));
}

#[test]
fn test_cli_read_limit() {
    let sandbox = Sandbox::new();
    sandbox.seal("1.txt", "2024-01-01 00:00:00\none\n");
    sandbox.seal("2.txt", "2024-01-02 00:00:00\ntwo\n");

    let mut read = sandbox.journal_command(&["read", "--json", "--limit", "1"]);
    read.env("DIARY_PASSPHRASE", PASSPHRASE);
    let read = run(read);
    assert_success(&read);

    let value: serde_json::Value = serde_json::from_slice(&read.stdout).expect("parse json");
    let array = value.as_array().expect("array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["date"], "2024-01-02 00:00:00");
}

#[test]
fn test_cli_read_wrong_passphrase() {
    let sandbox = Sandbox::new();
    sandbox.seal("1.txt", "2024-01-01 00:00:00\nsecret\n");

    let mut read = sandbox.journal_command(&["read"]);
    read.env("DIARY_PASSPHRASE", "wrong-passphrase-456");
    let read = run(read);

    assert_eq!(read.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&read.stderr).contains("Incorrect passphrase"));
    assert!(!String::from_utf8_lossy(&read.stdout).contains("secret"));
}

#[test]
fn test_cli_read_without_passphrase_or_tty() {
    let sandbox = Sandbox::new();

    let read = run(sandbox.journal_command(&["read"]));
    assert!(!read.status.success());
    assert!(String::from_utf8_lossy(&read.stderr).contains("DIARY_PASSPHRASE"));
}

#[test]
fn test_cli_missing_journal_message() {
    let sandbox = Sandbox::new();
    let missing = sandbox.root.path().join("nowhere");

    let mut read = sandbox.command();
    read.arg("read")
        .arg("--dir")
        .arg(&missing)
        .env("DIARY_PASSPHRASE", PASSPHRASE);
    let read = run(read);

    assert_eq!(read.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&read.stderr);
    assert!(stderr.contains("No journal found at"));
    assert!(stderr.contains(&*missing.to_string_lossy()));
}

#[test]
fn test_cli_corrupt_entry_fails_read_and_check() {
    let sandbox = Sandbox::new();
    sandbox.seal("1.txt", "2024-01-01 00:00:00\none\n");
    sandbox.seal("2.txt", "2024-01-02 00:00:00\ntwo\n");
    std::fs::write(sandbox.entries().join("3.txt"), b"garbage").expect("write garbage");

    let mut read = sandbox.journal_command(&["read"]);
    read.env("DIARY_PASSPHRASE", PASSPHRASE);
    let read = run(read);
    assert_eq!(read.status.code(), Some(6));
    assert!(read.stdout.is_empty());

    let mut check = sandbox.journal_command(&["check"]);
    check.env("DIARY_PASSPHRASE", PASSPHRASE);
    let check = run(check);
    assert_eq!(check.status.code(), Some(6));
    assert!(String::from_utf8_lossy(&check.stderr).contains("Integrity check: FAILED"));
}

#[test]
fn test_cli_best_effort_policy_from_config() {
    let sandbox = Sandbox::new();
    sandbox.seal("1.txt", "2024-01-01 00:00:00\none\n");
    std::fs::write(sandbox.entries().join("2.txt"), b"garbage").expect("write garbage");

    let config_dir = sandbox.config_home().join("diary");
    std::fs::create_dir_all(&config_dir).expect("create config dir");
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "[journal]\nentry_dir = \"{}\"\n\n[keys]\npublic_key = \"{}\"\nprivate_key = \"{}\"\n\n[load]\npolicy = \"best_effort\"\n",
            sandbox.entries().display(),
            sandbox.public_key().display(),
            sandbox.private_key().display()
        ),
    )
    .expect("write config");

    let mut list = sandbox.command();
    list.arg("list").env("DIARY_PASSPHRASE", PASSPHRASE);
    let list = run(list);
    assert_success(&list);

    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.contains("2024-01-01 00:00:00"));
    assert!(stdout.contains("one"));
}

#[test]
fn test_cli_check_ok() {
    let sandbox = Sandbox::new();
    sandbox.seal("1.txt", "2024-01-01 00:00:00\none\n");

    let mut check = sandbox.journal_command(&["check"]);
    check.env("DIARY_PASSPHRASE", PASSPHRASE);
    let check = run(check);
    assert_success(&check);

    let stdout = String::from_utf8_lossy(&check.stdout);
    assert!(stdout.contains("Integrity check: OK"));
    assert!(stdout.contains("- entries: 1"));
}

#[test]
fn test_cli_export_jsonl() {
    let sandbox = Sandbox::new();
    sandbox.seal("1.txt", "2024-01-01 00:00:00\none\n");
    sandbox.seal("2.txt", "2024-01-02 00:00:00\ntwo\n");

    let mut export = sandbox.journal_command(&["export", "--format", "jsonl"]);
    export.env("DIARY_PASSPHRASE", PASSPHRASE);
    let export = run(export);
    assert_success(&export);

    let stdout = String::from_utf8_lossy(&export.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("jsonl line"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["content"], "two\n");
    assert_eq!(lines[1]["date"], "2024-01-01 00:00:00");
}

#[test]
fn test_cli_list_empty_message() {
    let sandbox = Sandbox::new();

    let mut list = sandbox.journal_command(&["list"]);
    list.env("DIARY_PASSPHRASE", PASSPHRASE);
    let list = run(list);
    assert_success(&list);
    assert!(String::from_utf8_lossy(&list.stdout).contains("No entries."));
}

#[test]
fn test_cli_explicit_missing_config() {
    let sandbox = Sandbox::new();
    let missing = sandbox.root.path().join("missing.toml");

    let mut list = sandbox.command();
    list.arg("list").env("DIARY_CONFIG", &missing);
    let list = run(list);

    assert_eq!(list.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&list.stderr).contains("No config found at"));
}

#[test]
fn test_cli_completions() {
    let sandbox = Sandbox::new();
    let mut completions = sandbox.command();
    completions.arg("completions").arg("bash");
    let completions = run(completions);
    assert_success(&completions);
    assert!(String::from_utf8_lossy(&completions.stdout).contains("diary"));
}
