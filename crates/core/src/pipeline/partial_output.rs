use std::fs;
use std::path::{Path, PathBuf};

/// Output file that only survives if the producing step reports success.
///
/// Dropping an uncommitted guard removes whatever the tool left at the path,
/// so a failed remux never exposes a truncated artifact for download.
/// That includes a file an earlier request left under the same name: a
/// failure before the tool writes anything still removes it.
#[derive(Debug)]
pub struct PartialOutput {
    path: PathBuf,
    committed: bool,
}

impl PartialOutput {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => log::warn!("Removed partial output {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove partial output {}: {e}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_uncommitted_output_is_removed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip_with_captions.mkv");
        {
            let guard = PartialOutput::new(path.clone());
            fs::write(guard.path(), b"half a container").unwrap();
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_committed_output_is_kept() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip_with_captions.mkv");
        let guard = PartialOutput::new(path.clone());
        fs::write(guard.path(), b"container").unwrap();

        let kept = guard.commit();
        assert_eq!(kept, path);
        assert!(path.is_file());
    }

    #[test]
    fn test_never_written_output_drops_quietly() {
        let tmp = TempDir::new().unwrap();
        drop(PartialOutput::new(tmp.path().join("missing.mkv")));
    }

    #[test]
    fn test_uncommitted_guard_removes_earlier_file_with_same_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip_with_captions.mkv");
        fs::write(&path, b"previous success").unwrap();

        drop(PartialOutput::new(path.clone()));
        assert!(!path.exists());
    }
}
