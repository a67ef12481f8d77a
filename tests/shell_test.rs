use odoo_tools::error::{Error, Result};
use odoo_tools::shell::{cd, has_exec, make_dir, search_replace, with_cd, with_tempdir};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_cd_restores_directory() {
    let before = std::env::current_dir().unwrap();
    let temp_dir = TempDir::new().unwrap();
    {
        let guard = cd(temp_dir.path()).unwrap();
        assert_eq!(guard.previous(), before);
        assert_eq!(
            std::env::current_dir().unwrap().canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
#[serial]
fn test_with_cd_restores_directory_on_error() {
    let before = std::env::current_dir().unwrap();
    let temp_dir = TempDir::new().unwrap();

    let result: Result<()> = with_cd(temp_dir.path(), || Err(Error::aborted("boom")));

    assert!(result.is_err());
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
#[serial]
fn test_cd_restores_directory_on_panic() {
    let before = std::env::current_dir().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().to_path_buf();

    let outcome = std::panic::catch_unwind(move || {
        let _guard = cd(&target).unwrap();
        panic!("boom");
    });

    assert!(outcome.is_err());
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
#[serial]
fn test_cd_missing_directory() {
    let before = std::env::current_dir().unwrap();
    assert!(cd("/definitely/not/a/directory").is_err());
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
#[serial]
fn test_with_cd_returns_value() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("marker"), "").unwrap();

    let found = with_cd(temp_dir.path(), || Ok(PathBuf::from("marker").exists())).unwrap();
    assert!(found);
}

#[test]
fn test_with_tempdir_cleans_up() {
    let mut kept = PathBuf::new();
    let value = with_tempdir(|dir| {
        assert!(dir.is_dir());
        fs::write(dir.join("file.txt"), "content")?;
        kept = dir.to_path_buf();
        Ok(42)
    })
    .unwrap();

    assert_eq!(value, 42);
    assert!(!kept.exists());
}

#[test]
fn test_with_tempdir_cleans_up_on_error() {
    let mut kept = PathBuf::new();
    let result: Result<()> = with_tempdir(|dir| {
        kept = dir.to_path_buf();
        Err(Error::aborted("boom"))
    });

    assert!(matches!(result, Err(Error::Aborted(_))));
    assert!(!kept.exists());
}

#[test]
fn test_with_tempdir_already_removed() {
    let result = with_tempdir(|dir| {
        fs::remove_dir_all(dir)?;
        Ok(())
    });
    assert!(result.is_ok());
}

#[test]
fn test_search_replace() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("setup.py");
    let original = "version='13.0'\nname='acme'\nodoo_version = '13.0'";
    fs::write(&path, original).unwrap();

    search_replace(&path, "13.0", "14.0").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "version='14.0'\nname='acme'\nodoo_version = '14.0'"
    );
    assert_eq!(fs::read_to_string(temp_dir.path().join("setup.py.bak")).unwrap(), original);
}

#[test]
fn test_search_replace_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(search_replace(temp_dir.path().join("missing"), "a", "b").is_err());
}

#[test]
fn test_make_dir_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pending-merges.d/nested");

    make_dir(&path).unwrap();
    make_dir(&path).unwrap();
    assert!(path.is_dir());
}

#[test]
fn test_make_dir_on_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("file");
    fs::write(&path, "").unwrap();

    let err = make_dir(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Directory does not exist and could not be created: {}", path.display())
    );
}

#[test]
fn test_has_exec() {
    assert!(has_exec("true"));
    assert!(has_exec("false"));
    assert!(!has_exec("odoo-tools-no-such-executable"));
}
