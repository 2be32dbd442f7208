use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use align_core::model::ComplianceVerdict;
use align_core::report::ReportAggregator;
use align_core::services::audit::{Auditor, DumpError, HeaderDumper};

const TABULAR_PHDRS: &str = "\
Program Headers:
  Type           Offset   VirtAddr           PhysAddr           FileSiz  MemSiz   Flg Align
  LOAD           0x000000 0x0000000000000000 0x0000000000000000 0x074e28 0x074e28 R E 0x1000
  LOAD           0x075000 0x0000000000076000 0x0000000000076000 0x001200 0x001400 RW  0x4000
";

const ELF64_HEADER: &str = "\
  Class:                             ELF64
  Machine:                           AArch64
";

/// Canned dump source that also counts ELF-header requests, so tests can
/// verify the path-hint short circuit.
struct FixtureDumper {
    phdrs: String,
    ehdr: String,
    elf_header_calls: AtomicUsize,
}

impl FixtureDumper {
    fn new(phdrs: &str, ehdr: &str) -> Self {
        Self {
            phdrs: phdrs.to_string(),
            ehdr: ehdr.to_string(),
            elf_header_calls: AtomicUsize::new(0),
        }
    }
}

impl HeaderDumper for FixtureDumper {
    fn program_headers(&self, _binary: &Path) -> Result<String, DumpError> {
        Ok(self.phdrs.clone())
    }

    fn elf_header(&self, _binary: &Path) -> Result<String, DumpError> {
        self.elf_header_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ehdr.clone())
    }
}

#[test]
fn auditing_a_missing_binary_is_an_error() {
    let dumper = FixtureDumper::new(TABULAR_PHDRS, ELF64_HEADER);
    let auditor = Auditor { dumper: &dumper };
    let mut agg = ReportAggregator::new();

    let err = auditor.audit_binary(Path::new("does_not_exist.so"), &mut agg).unwrap_err();
    assert!(matches!(err, DumpError::MissingBinary(_)));
}

#[test]
fn audit_records_segments_and_architecture() {
    let dir = tempfile::tempdir().unwrap();
    let so = dir.path().join("libdemo.so");
    std::fs::write(&so, b"stub").unwrap();

    let dumper = FixtureDumper::new(TABULAR_PHDRS, ELF64_HEADER);
    let auditor = Auditor { dumper: &dumper };
    let mut agg = ReportAggregator::new();
    auditor.audit_binary(&so, &mut agg).unwrap();

    assert_eq!(agg.rows().len(), 2);
    let summary = agg.summary();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].align, Some(16384));
    assert_eq!(summary[0].verdict, ComplianceVerdict::Compliant16k);
    assert_eq!(dumper.elf_header_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn abi_directory_hint_skips_the_elf_header_dump() {
    let dir = tempfile::tempdir().unwrap();
    let abi_dir = dir.path().join("arm64-v8a");
    std::fs::create_dir(&abi_dir).unwrap();
    let so = abi_dir.join("libdemo.so");
    std::fs::write(&so, b"stub").unwrap();

    // A 32-bit header would misclassify if it were consulted.
    let dumper = FixtureDumper::new(TABULAR_PHDRS, "  Class:  ELF32\n");
    let auditor = Auditor { dumper: &dumper };
    let mut agg = ReportAggregator::new();
    auditor.audit_binary(&so, &mut agg).unwrap();

    assert_eq!(dumper.elf_header_calls.load(Ordering::SeqCst), 0);
    assert_eq!(agg.summary().len(), 1);
}

#[test]
fn empty_dump_text_yields_no_rows_and_no_summary_entry() {
    let dir = tempfile::tempdir().unwrap();
    let so = dir.path().join("libweird.so");
    std::fs::write(&so, b"stub").unwrap();

    let dumper = FixtureDumper::new("", ELF64_HEADER);
    let auditor = Auditor { dumper: &dumper };
    let mut agg = ReportAggregator::new();
    auditor.audit_binary(&so, &mut agg).unwrap();

    assert!(agg.rows().is_empty());
    assert!(agg.summary().is_empty());
}
