//! Output directory handling.
//!
//! Each payload is written to `<stem>.json.part` and renamed over
//! `<stem>.json`, so an existing file is replaced in one step and a crash never
//! leaves a truncated `.json` behind.

mod sanitize;

pub use sanitize::file_stem_for_index;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default output directory; never created, since it is the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./";

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Destination directory for item payloads.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Creates `root` (and parents) unless it is the default `./` or already exists.
    pub fn prepare(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if root != Path::new(DEFAULT_OUTPUT_DIR) && !root.exists() {
            fs::create_dir_all(&root)?;
            tracing::info!("created output directory {}", root.display());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<stem>.json`
    pub fn item_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{stem}.json"))
    }

    /// Writes `body` verbatim to `<root>/<stem>.json`, replacing any existing file.
    pub fn write_item(&self, stem: &str, body: &[u8]) -> io::Result<PathBuf> {
        let final_path = self.item_path(stem);
        let temp = temp_path(&final_path);
        fs::write(&temp, body)?;
        if let Err(e) = fs::rename(&temp, &final_path) {
            let _ = fs::remove_file(&temp);
            return Err(e);
        }
        Ok(final_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("out/aaa.json"));
        assert_eq!(p, Path::new("out/aaa.json.part"));
    }

    #[test]
    fn prepare_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let out = OutputDir::prepare(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(out.root(), nested.as_path());
        // second call on an existing directory is a no-op
        OutputDir::prepare(&nested).unwrap();
    }

    #[test]
    fn default_sentinel_is_not_created() {
        let out = OutputDir::prepare(DEFAULT_OUTPUT_DIR).unwrap();
        assert_eq!(out.item_path("aaa"), Path::new("./aaa.json"));
    }

    #[test]
    fn write_item_overwrites_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::prepare(dir.path()).unwrap();
        let path = out.write_item("aaa", b"{\"v\": 1}").unwrap();
        assert_eq!(path, dir.path().join("aaa.json"));
        out.write_item("aaa", b"{\"v\": 2}").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{\"v\": 2}");
        assert!(!temp_path(&path).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
