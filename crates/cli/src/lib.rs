use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Resolve a user-supplied path to an absolute one, canonicalizing when the
/// file exists and falling back to joining with the current directory.
pub fn resolve_input_path(raw: &str) -> Result<PathBuf> {
    let path = Path::new(raw);
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(path))
        }
    }
}

/// Validate that `package` exists and is a supported input kind.
pub fn validate_package(package: &Path) -> Result<()> {
    if !package.exists() || !align_core::package::is_supported_input(package) {
        bail!("--package must point to an existing .apk, .aab, or .so");
    }
    Ok(())
}

/// Validate that `readelf` exists and is executable.
pub fn validate_readelf(readelf: &Path) -> Result<()> {
    if !readelf.is_file() || !is_executable(readelf) {
        bail!("--readelf must point to an executable readelf/llvm-readelf");
    }
    Ok(())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).map(|m| m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}
