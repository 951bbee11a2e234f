use super::*;

#[test]
fn allocated_paths_are_unique_and_keep_extension() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = TempFileLedger::with_run_token(dir.path(), "run").unwrap();

    let a = ledger.allocate(1, "chart.png").unwrap();
    let b = ledger.allocate(1, "chart.png").unwrap();
    let c = ledger.allocate(2, "chart.png").unwrap();

    assert_ne!(a.path(), b.path());
    assert_ne!(b.path(), c.path());
    for p in [a.path(), b.path(), c.path()] {
        assert_eq!(p.parent().unwrap(), dir.path());
        assert_eq!(p.extension().unwrap(), "png");
    }
    assert!(
        c.path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .contains("-run-2-")
    );
}

#[test]
fn allocation_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = TempFileLedger::with_run_token(dir.path(), "run").unwrap();

    let a = ledger.allocate(0, "chart.png").unwrap();
    assert!(a.path().is_file());
    assert_eq!(std::fs::metadata(a.path()).unwrap().len(), 0);
}

#[test]
fn ledgers_sharing_directory_and_token_never_collide() {
    let dir = tempfile::tempdir().unwrap();
    let token = "20261017120000000-42";
    let first = TempFileLedger::with_run_token(dir.path(), token).unwrap();
    let second = TempFileLedger::with_run_token(dir.path(), token).unwrap();

    let a = first.allocate(0, "chart.png").unwrap();
    let b = second.allocate(0, "chart.png").unwrap();
    assert_ne!(a.path(), b.path());

    std::fs::write(a.path(), b"job-a").unwrap();
    std::fs::write(b.path(), b"job-b").unwrap();
    assert_eq!(std::fs::read(a.path()).unwrap(), b"job-a");
    assert_eq!(std::fs::read(b.path()).unwrap(), b"job-b");
}

#[test]
fn release_twice_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.png");
    std::fs::write(&path, b"data").unwrap();

    TempFileLedger::release(&path).unwrap();
    assert!(!path.exists());
    TempFileLedger::release(&path).unwrap();
    TempFileLedger::release(&dir.path().join("never-created")).unwrap();
}

#[test]
fn artifact_is_removed_on_drop_and_on_explicit_release() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = TempFileLedger::with_run_token(dir.path(), "run").unwrap();

    let dropped = {
        let a = ledger.allocate(3, "chart.png").unwrap();
        std::fs::write(a.path(), b"data").unwrap();
        a.path().to_path_buf()
    };
    assert!(!dropped.exists());

    let b = ledger.allocate(3, "chart.png").unwrap();
    std::fs::write(b.path(), b"data").unwrap();
    let path = b.path().to_path_buf();
    b.release().unwrap();
    assert!(!path.exists());
}

#[test]
fn explicit_release_tolerates_an_already_removed_file() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = TempFileLedger::with_run_token(dir.path(), "run").unwrap();

    let a = ledger.allocate(4, "chart.png").unwrap();
    TempFileLedger::release(a.path()).unwrap();
    a.release().unwrap();
}

#[test]
fn missing_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        TempFileLedger::new(dir.path().join("absent")),
        Err(GazerError::Config(_))
    ));
}
