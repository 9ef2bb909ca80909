use crate::errors::{Lit2mdError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` all at once.
///
/// The bytes go to a temp file next to the target which is renamed over it only after a
/// successful flush, so readers never see a half-written document.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Lit2mdError::from_write(path, e))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.flush())
        .map_err(|e| Lit2mdError::from_write(path, e))?;
    tmp.persist(path)
        .map_err(|e| Lit2mdError::from_write(path, e.error))?;
    Ok(())
}
