//! Atomic PNG file writing for exported signatures.

use super::types::ExportError;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
///
/// # Returns
/// Generated filename with extension
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }
    Ok(())
}

/// Write PNG bytes to `destination` without ever exposing a partial file.
///
/// The data goes to a hidden sibling first, is synced, and is then renamed
/// over the destination. The temporary file is removed on any failure.
///
/// # Returns
/// Path to the saved file
pub fn save_png(png: &[u8], destination: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        ensure_directory_exists(parent)?;
    }

    let tmp_path = temp_path(destination)?;
    log::debug!(
        "Writing {} bytes to temporary file {}",
        png.len(),
        tmp_path.display()
    );

    if let Err(err) = write_and_rename(png, &tmp_path, destination) {
        if tmp_path.exists() {
            fs::remove_file(&tmp_path).unwrap_or_else(|remove_err| {
                log::warn!(
                    "failed to remove temporary file {}: {}",
                    tmp_path.display(),
                    remove_err
                )
            });
        }
        return Err(err.into());
    }

    log::info!(
        "Signature saved: {} ({} bytes)",
        destination.display(),
        png.len()
    );
    Ok(destination.to_path_buf())
}

fn write_and_rename(png: &[u8], tmp_path: &Path, destination: &Path) -> io::Result<()> {
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(tmp_path)?;
        tmp_file.write_all(png)?;
        tmp_file.sync_all()?;
    }

    // Signatures are personal data: user read/write only.
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp_path, Permissions::from_mode(0o600))?;
    }

    fs::rename(tmp_path, destination)
}

/// Hidden, unused sibling of `target` for the pending write.
fn temp_path(target: &Path) -> Result<PathBuf, ExportError> {
    let name = target.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("export destination {} has no file name", target.display()),
        )
    })?;
    let base = format!(
        ".{}.{}.tmp",
        name.to_string_lossy(),
        std::process::id()
    );

    let mut candidate = target.with_file_name(&base);
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!("{base}{counter}"));
    }
    Ok(candidate)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
