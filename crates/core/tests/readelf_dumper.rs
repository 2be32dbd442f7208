use std::path::Path;

use align_core::services::audit::HeaderDumper;
use align_core::services::readelf::{ReadelfDumper, FAKE_PHDRS_ENV};

/// The env override feeds fixture text from a file, so no readelf needs to
/// be installed for this test.
#[test]
fn env_fake_replaces_the_program_header_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = dir.path().join("phdrs.txt");
    std::fs::write(&fixture, "  Type Align\n  LOAD 0x4000\n").unwrap();
    std::env::set_var(FAKE_PHDRS_ENV, &fixture);

    let dumper = ReadelfDumper::new("/does/not/exist/readelf");
    let text = dumper.program_headers(Path::new("whatever.so")).unwrap();
    assert!(text.contains("LOAD 0x4000"));

    std::env::remove_var(FAKE_PHDRS_ENV);
}

#[test]
fn an_unspawnable_tool_surfaces_as_an_error() {
    let dumper = ReadelfDumper::new("/does/not/exist/readelf");
    let err = dumper.elf_header(Path::new("whatever.so")).unwrap_err();
    assert!(format!("{err}").contains("failed to run"));
}
