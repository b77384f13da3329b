//! Listing of audio files and folders below a music library root.
//!
//! The whole tree is walked with `walkdir`. Entries that cannot be read are
//! logged and skipped, so a single unreadable folder never aborts a scan.

use crate::foundation::utils::matches_suffix;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Suffix used when the caller does not ask for another one.
pub const DEFAULT_AUDIO_SUFFIX: &str = ".mp3";

/// Walks a library root and lists what it finds.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    /// Creates a scanner for the tree below `root`.
    ///
    /// Nothing is read until one of the listing methods runs, so a missing
    /// root only shows up as empty results.
    ///
    /// # Arguments
    ///
    /// * `root` - Folder the walk starts from. It is never listed itself.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Folder the walk starts from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists every non-directory entry whose file name ends with `suffix`.
    ///
    /// Matching goes through [`matches_suffix`], so it is case-insensitive and
    /// purely character based. Paths are returned in walk order, siblings
    /// sorted by name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use artistore::DirectoryScanner;
    ///
    /// let scanner = DirectoryScanner::new("/srv/music");
    /// for path in scanner.list_files(".flac") {
    ///     println!("{}", path.display());
    /// }
    /// ```
    pub fn list_files(&self, suffix: &str) -> Vec<PathBuf> {
        let files: Vec<PathBuf> = self
            .entries()
            .filter(|entry| !is_directory(entry))
            .filter(|entry| matches_suffix(&entry.file_name().to_string_lossy(), suffix))
            .map(DirEntry::into_path)
            .collect();

        debug!(
            "Found {} files ending with '{}' under {}",
            files.len(),
            suffix,
            self.root.display()
        );
        files
    }

    /// Lists every directory below the root, the root itself excluded.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        let directories: Vec<PathBuf> = self
            .entries()
            .filter(is_directory)
            .map(DirEntry::into_path)
            .collect();

        debug!(
            "Found {} directories under {}",
            directories.len(),
            self.root.display()
        );
        directories
    }

    fn entries(&self) -> impl Iterator<Item = DirEntry> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
    }
}

/// Symlinks are not followed during the walk, but a link pointing at a
/// directory still counts as one.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn create_library(structure: &[(&str, &[&str])]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (folder, files) in structure {
            let folder_path = temp_dir.path().join(folder);
            fs::create_dir_all(&folder_path).unwrap();
            for file in *files {
                File::create(folder_path.join(file)).unwrap();
            }
        }
        temp_dir
    }

    #[test]
    fn test_list_files_default_suffix() {
        let temp_dir = create_library(&[
            ("Artist1/Album1", &["01.mp3", "02.MP3", "cover.jpg"]),
            ("Artist2/Album2", &["01.flac"]),
        ]);
        let scanner = DirectoryScanner::new(temp_dir.path());

        let files = scanner.list_files(DEFAULT_AUDIO_SUFFIX);

        assert_eq!(
            files,
            vec![
                temp_dir.path().join("Artist1/Album1/01.mp3"),
                temp_dir.path().join("Artist1/Album1/02.MP3"),
            ]
        );
    }

    #[test]
    fn test_list_files_includes_root_level_files() {
        let temp_dir = create_library(&[("Album", &["b.flac"])]);
        File::create(temp_dir.path().join("a.flac")).unwrap();
        let scanner = DirectoryScanner::new(temp_dir.path());

        let files = scanner.list_files(".flac");

        assert_eq!(
            files,
            vec![
                temp_dir.path().join("Album/b.flac"),
                temp_dir.path().join("a.flac"),
            ]
        );
    }

    #[test]
    fn test_list_files_uses_plain_suffix_match() {
        let temp_dir = create_library(&[("Mixes", &["live_mp3", "set.mp3x", "track.mp3"])]);
        let scanner = DirectoryScanner::new(temp_dir.path());

        let files = scanner.list_files("mp3");

        assert_eq!(
            files,
            vec![
                temp_dir.path().join("Mixes/live_mp3"),
                temp_dir.path().join("Mixes/track.mp3"),
            ]
        );
    }

    #[test]
    fn test_list_files_skips_directories_named_like_audio() {
        let temp_dir = create_library(&[("Folder.mp3", &["inner.mp3"])]);
        let scanner = DirectoryScanner::new(temp_dir.path());

        assert_eq!(
            scanner.list_files(".mp3"),
            vec![temp_dir.path().join("Folder.mp3/inner.mp3")]
        );
    }

    #[test]
    fn test_list_files_empty_suffix_matches_nothing() {
        let temp_dir = create_library(&[("Album", &["01.mp3"])]);
        let scanner = DirectoryScanner::new(temp_dir.path());

        assert!(scanner.list_files("").is_empty());
    }

    #[test]
    fn test_list_directories() {
        let temp_dir = create_library(&[
            ("Artist1/Album1", &["01.mp3"]),
            ("Artist1/Album2", &[]),
            ("Artist2", &["notes.txt"]),
        ]);
        let scanner = DirectoryScanner::new(temp_dir.path());

        assert_eq!(
            scanner.list_directories(),
            vec![
                temp_dir.path().join("Artist1"),
                temp_dir.path().join("Artist1/Album1"),
                temp_dir.path().join("Artist1/Album2"),
                temp_dir.path().join("Artist2"),
            ]
        );
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = DirectoryScanner::new(temp_dir.path().join("missing"));

        assert!(scanner.list_files(".mp3").is_empty());
        assert!(scanner.list_directories().is_empty());
    }
}
