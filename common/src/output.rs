//! Helpers for the output and publish directory trees. None of these are
//! transactional, a failure part way through leaves a partial tree behind.

use std::{
    fs::{self, File},
    io::ErrorKind,
    path::Path,
};

use anyhow::{Context, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Name of the folder for a layer, also used in file names: `00050`.
pub fn layer_folder(layer: u32) -> String {
    format!("{layer:05}")
}

/// Deletes `dir` along with everything in it, then creates it again empty.
pub fn reset_dir(dir: &Path) -> Result<()> {
    remove_dir(dir)?;
    fs::create_dir_all(dir).with_context(|| format!("Failed to create `{}`", dir.display()))?;
    debug!("Reset `{}`", dir.display());
    Ok(())
}

/// Drops an empty `.gitkeep` into `dir`.
pub fn touch_gitkeep(dir: &Path) -> Result<()> {
    File::create(dir.join(".gitkeep"))?;
    Ok(())
}

/// Replaces `to` with a copy of the directory tree at `from`.
pub fn mirror_dir(from: &Path, to: &Path) -> Result<()> {
    remove_dir(to)?;

    let mut files = 0;
    for entry in WalkDir::new(from) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from)?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create `{}`", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy into `{}`", target.display()))?;
            files += 1;
        }
    }

    info!(
        "Published {files} files from `{}` to `{}`",
        from.display(),
        to.display()
    );
    Ok(())
}

fn remove_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Err(err) if err.kind() != ErrorKind::NotFound => {
            Err(err).with_context(|| format!("Failed to remove `{}`", dir.display()))
        }
        _ => Ok(()),
    }
}
