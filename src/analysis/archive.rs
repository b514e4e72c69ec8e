use std::fs::{self, File};
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::debug;
use zip::ZipArchive;

/// Extract every entry of a zip archive under `dest`.
///
/// Relative paths are preserved and Unix permission bits are applied when
/// the archive records them. Entries that would land outside `dest` are
/// rejected.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file =
        File::open(archive).with_context(|| format!("failed to open {}", archive.display()))?;
    let mut zip = ZipArchive::new(file)
        .with_context(|| format!("failed to read zip archive {}", archive.display()))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            bail!("refusing to extract unsafe path {:?}", entry.name());
        };
        let path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut out =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract {}", entry.name()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(mode & 0o7777))?;
        }
    }

    debug!("extracted {} entries from {}", zip.len(), archive.display());
    Ok(())
}
