use std::io::Cursor;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::errors::Error;

/// Extracts every member of the ZIP archive in `bytes` into `dir` and returns
/// the path of `member`, which must be among the extracted files.
pub fn extract_member(bytes: Vec<u8>, dir: &Path, member: &str) -> Result<PathBuf, Error> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    tracing::debug!(files = archive.len(), dir = %dir.display(), "extracting archive");
    archive.extract(dir)?;

    let path = dir.join(member);
    if !path.is_file() {
        return Err(Error::MissingArchiveMember(path));
    }
    Ok(path)
}
