//! Package input handling: supported-input detection, archive extraction,
//! and native-library enumeration.

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Error type for package unpacking and enumeration.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Inputs the auditor accepts: a packaged app or a bare shared library.
pub fn is_supported_input(path: &Path) -> bool {
    matches!(lowercase_extension(path).as_deref(), Some("apk" | "aab" | "so"))
}

/// True when the input is an archive that needs unpacking first.
pub fn is_archive_input(path: &Path) -> bool {
    matches!(lowercase_extension(path).as_deref(), Some("apk" | "aab"))
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension().map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Unpack an apk/aab archive into `dest`.
pub fn extract_package(package: &Path, dest: &Path) -> Result<(), PackageError> {
    let file = File::open(package)?;
    let mut archive = zip::ZipArchive::new(file)?;
    archive.extract(dest)?;
    log::debug!("unpacked {} entries from {}", archive.len(), package.display());
    Ok(())
}

/// All `.so` files under `root`, walked with file-name-sorted siblings so
/// reruns audit binaries in a stable order.
pub fn collect_so_files(root: &Path) -> Result<Vec<PathBuf>, PackageError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| PackageError::Io(e.into()))?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "so") {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}
