//! Output directory preparation.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::EmojiError;

/// Permission bits for a newly created output directory.
#[cfg(unix)]
const OUTPUT_DIR_MODE: u32 = 0o755;

/// Ensures `path` exists and is a directory.
///
/// A missing path is created as a single directory; parents are not
/// created. An existing directory is left untouched.
///
/// # Errors
///
/// - [`EmojiError::InvalidOutputTarget`] when something other than a directory
///   already occupies `path`
/// - [`EmojiError::Io`] when the path cannot be inspected or created
pub fn ensure_output_dir(path: &Path) -> Result<(), EmojiError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %path.display(), "output directory exists");
            Ok(())
        }
        Ok(_) => Err(EmojiError::invalid_output_target(path)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            create_dir(path).map_err(|e| EmojiError::io(path, e))?;
            info!(path = %path.display(), "created output directory");
            Ok(())
        }
        Err(err) => Err(EmojiError::io(path, err)),
    }
}

#[cfg(unix)]
fn create_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().mode(OUTPUT_DIR_MODE).create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> io::Result<()> {
    fs::DirBuilder::new().create(path)
}
