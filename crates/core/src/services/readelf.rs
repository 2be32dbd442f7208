use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::services::audit::{DumpError, HeaderDumper};

/// Env var naming a file whose contents replace the program-header dump.
pub const FAKE_PHDRS_ENV: &str = "ALIGN_AUDIT_FAKE_PHDRS";
/// Env var naming a file whose contents replace the ELF-header dump.
pub const FAKE_EHDR_ENV: &str = "ALIGN_AUDIT_FAKE_EHDR";

/// Dump source that shells out to readelf/llvm-readelf.
///
/// Output is captured best-effort: stdout and stderr are merged and returned
/// even when the tool exits non-zero, since partial header output printed
/// alongside warnings is still worth parsing.
pub struct ReadelfDumper {
    readelf: PathBuf,
}

impl ReadelfDumper {
    pub fn new(readelf: impl Into<PathBuf>) -> Self {
        Self { readelf: readelf.into() }
    }

    fn run(&self, flag: &str, binary: &Path) -> Result<String, DumpError> {
        log::debug!("running {} {} {}", self.readelf.display(), flag, binary.display());
        let output = Command::new(&self.readelf).arg(flag).arg(binary).output().map_err(
            |source| DumpError::Spawn { tool: self.readelf.display().to_string(), source },
        )?;
        if !output.status.success() {
            log::warn!(
                "{} {} exited with {}; keeping captured output",
                self.readelf.display(),
                flag,
                output.status
            );
        }
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

impl HeaderDumper for ReadelfDumper {
    fn program_headers(&self, binary: &Path) -> Result<String, DumpError> {
        // Allow tests to feed fixture dumps via env to avoid needing readelf
        // installed.
        if let Some(fake) = env::var_os(FAKE_PHDRS_ENV) {
            return read_fake(&fake);
        }
        self.run("-lW", binary)
    }

    fn elf_header(&self, binary: &Path) -> Result<String, DumpError> {
        if let Some(fake) = env::var_os(FAKE_EHDR_ENV) {
            return read_fake(&fake);
        }
        self.run("-hW", binary)
    }
}

fn read_fake(path: &OsStr) -> Result<String, DumpError> {
    fs::read_to_string(path)
        .map_err(|source| DumpError::Spawn { tool: path.to_string_lossy().into_owned(), source })
}
