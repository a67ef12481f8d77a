mod common;

use common::RecordingRunner;
use odoo_tools::runner::OutputMode;
use odoo_tools::secrets::{
    build_gpg_decrypt_command, build_lastpass_command, get_from_lastpass, gpg_decrypt_to_file,
};
use std::path::Path;

#[test]
fn test_gpg_command_interactive() {
    assert_eq!(
        build_gpg_decrypt_command(Path::new("odoo/data/secret.gpg"), None),
        "gpg --yes 'odoo/data/secret.gpg'"
    );
}

#[test]
fn test_gpg_command_with_password() {
    assert_eq!(
        build_gpg_decrypt_command(Path::new("secret.gpg"), Some("p4ss")),
        "gpg --yes --pinentry-mode loopback --batch --passphrase 'p4ss' --no-tty --quiet 'secret.gpg'"
    );
}

#[test]
fn test_gpg_decrypt_to_file() {
    let runner = RecordingRunner::new();
    gpg_decrypt_to_file(&runner, "secret.gpg", None).unwrap();

    assert_eq!(runner.commands(), vec!["gpg --yes 'secret.gpg'"]);
    assert_eq!(runner.modes(), vec![OutputMode::Inherit]);
}

#[test]
fn test_gpg_decrypt_failure() {
    let runner = RecordingRunner::new().fail("gpg: decryption failed: Bad passphrase");
    assert!(gpg_decrypt_to_file(&runner, "secret.gpg", Some("wrong")).is_err());
}

#[test]
fn test_lastpass_command() {
    assert_eq!(build_lastpass_command("1234567890", "--password"), "lpass show --password 1234567890");
}

#[test]
fn test_get_from_lastpass() {
    let runner = RecordingRunner::new().respond("s3cr3t\n");

    let value = get_from_lastpass(&runner, "1234567890", "--field=token");

    assert_eq!(value.as_deref(), Some("s3cr3t"));
    assert_eq!(runner.commands(), vec!["lpass show --field=token 1234567890"]);
    assert_eq!(runner.modes(), vec![OutputMode::Hide]);
}

#[test_log::test]
fn test_get_from_lastpass_failure() {
    let runner = RecordingRunner::new().fail("Error: Could not find specified account(s).");
    assert_eq!(get_from_lastpass(&runner, "missing", "--password"), None);
}
