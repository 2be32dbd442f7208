use predicates::prelude::*;

/// package validation fails before readelf is ever consulted, so any
/// executable path works as a placeholder here.
#[test]
fn rejects_a_missing_package() {
    let dir = tempfile::tempdir().unwrap();
    assert_cmd::cargo::cargo_bin_cmd!("align-audit")
        .arg("--package")
        .arg(dir.path().join("missing.apk"))
        .arg("--readelf")
        .arg("/bin/sh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must point to an existing .apk, .aab, or .so"));
}

#[test]
fn rejects_an_unsupported_package_extension() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "hello").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("align-audit")
        .arg("--package")
        .arg(&notes)
        .arg("--readelf")
        .arg("/bin/sh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must point to an existing .apk, .aab, or .so"));
}

#[cfg(unix)]
#[test]
fn rejects_a_non_executable_readelf() {
    let dir = tempfile::tempdir().unwrap();
    let so = dir.path().join("libfoo.so");
    std::fs::write(&so, "stub").unwrap();
    let readelf = dir.path().join("readelf.txt");
    std::fs::write(&readelf, "not a tool").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("align-audit")
        .arg("--package")
        .arg(&so)
        .arg("--readelf")
        .arg(&readelf)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--readelf must point to an executable readelf/llvm-readelf",
        ));
}
