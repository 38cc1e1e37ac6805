use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Largest file the scanner will read; anything bigger is treated as empty.
pub const MAX_TEXT_BYTES: u64 = 1_000_000;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting report files.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
///
/// The existence check and the create are one `create_new` open, so a file
/// that appears between the two can never be clobbered.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    file.write_all(data)?;
    Ok(true)
}

/// Read a UTF-8 text file, returning an empty string when the file is
/// missing, not a regular file, larger than [`MAX_TEXT_BYTES`], or not valid
/// UTF-8. Scanning never fails on a single bad file.
pub fn read_text_or_empty(path: &Path) -> String {
    let Ok(meta) = std::fs::metadata(path) else {
        return String::new();
    };
    if !meta.is_file() || meta.len() > MAX_TEXT_BYTES {
        return String::new();
    }
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        atomic_write(&path, b"{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c/report.md");
        atomic_write(&path, b"data").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("existing.txt");
        std::fs::write(&path, b"original").unwrap();
        let written = write_if_missing(&path, b"new").unwrap();
        assert!(!written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn write_if_missing_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".github/workflows/ci.yml");
        assert!(write_if_missing(&path, b"name: CI\n").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "name: CI\n");
    }

    #[test]
    fn read_text_or_empty_returns_empty_for_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert_eq!(read_text_or_empty(&path), "");
    }

    #[test]
    fn read_text_or_empty_returns_empty_for_oversized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.txt");
        std::fs::write(&path, vec![b'a'; (MAX_TEXT_BYTES + 1) as usize]).unwrap();
        assert_eq!(read_text_or_empty(&path), "");
    }

    #[test]
    fn read_text_or_empty_returns_empty_for_missing_and_dirs() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_text_or_empty(&dir.path().join("nope.md")), "");
        assert_eq!(read_text_or_empty(dir.path()), "");
    }
}
