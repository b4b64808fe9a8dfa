// src/ignore_list.rs

use crate::error::AppError;
use std::{
    collections::HashSet,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Videos that previously failed probing, one path per line on disk.
///
/// The file is only ever appended to, never rewritten.
#[derive(Debug)]
pub struct IgnoreList {
    path: PathBuf,
    entries: HashSet<String>,
}

impl IgnoreList {
    /// Loads the ignore list from `path`.
    /// If the file doesn't exist, the list starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error other than `NotFound` occurs while reading.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let mut entries = HashSet::new();

        match fs::read(path) {
            Ok(bytes) => {
                // Lines written by other tools may not be UTF-8; decode them
                // the same lossy way entries are written.
                for line in bytes.split(|b| *b == b'\n') {
                    let line = String::from_utf8_lossy(line);
                    // Tolerate files edited on Windows.
                    let entry = line.trim_end_matches('\r');
                    if !entry.is_empty() {
                        entries.insert(entry.to_string());
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::Io(e)),
        }

        Ok(IgnoreList {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, video: &Path) -> bool {
        self.entries.contains(video.to_string_lossy().as_ref())
    }

    /// Drops every candidate that is on the list.
    pub fn filter_candidates(&self, candidates: Vec<PathBuf>) -> Vec<PathBuf> {
        candidates.into_iter().filter(|c| !self.contains(c)).collect()
    }

    /// Records `video` in memory and appends it to the file, creating the
    /// file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::IgnoreFileWrite`] naming the file if it cannot be
    /// opened or written.
    pub fn append(&mut self, video: &Path) -> Result<(), AppError> {
        let entry = video.to_string_lossy().into_owned(); // Handle potentially non-UTF8 paths.

        let write_result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", entry));

        write_result.map_err(|source| AppError::IgnoreFileWrite {
            path: self.path.clone(),
            source,
        })?;

        self.entries.insert(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let non_existent_path = temp_dir.path().join("IgnoreVideos.txt");

        let list = IgnoreList::load(&non_existent_path).unwrap();
        assert_eq!(list.len(), 0);
        // Loading must not create the file.
        assert!(!non_existent_path.exists());
    }

    #[test]
    fn test_append_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let list_path = temp_dir.path().join("IgnoreVideos.txt");

        let mut list = IgnoreList::load(&list_path).unwrap();
        list.append(Path::new("/videos/broken.mkv")).unwrap();
        assert!(list.contains(Path::new("/videos/broken.mkv")));

        let reloaded = IgnoreList::load(&list_path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains(Path::new("/videos/broken.mkv")));
    }

    #[test]
    fn test_append_does_not_rewrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let list_path = temp_dir.path().join("IgnoreVideos.txt");
        fs::write(&list_path, "/old/one.avi\r\n").unwrap();

        let mut list = IgnoreList::load(&list_path).unwrap();
        assert!(list.contains(Path::new("/old/one.avi")));
        list.append(Path::new("/new/two.avi")).unwrap();

        let contents = fs::read_to_string(&list_path).unwrap();
        assert!(contents.starts_with("/old/one.avi\r\n"));
        assert!(contents.ends_with("/new/two.avi\n"));
    }

    #[test]
    fn test_load_tolerates_non_utf8_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let list_path = temp_dir.path().join("IgnoreVideos.txt");
        // Latin-1 "café.mp4", as saved by an ANSI code page editor.
        fs::write(&list_path, b"/v/caf\xe9.mp4\n/v/b.mkv\n").unwrap();

        let list = IgnoreList::load(&list_path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(Path::new("/v/b.mkv")));
        assert!(list.contains(Path::new("/v/caf\u{FFFD}.mp4")));
    }

    #[test]
    fn test_filter_candidates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let list_path = temp_dir.path().join("IgnoreVideos.txt");
        fs::write(&list_path, "/v/b.mkv\n/v/not-in-catalog.mp4\n").unwrap();

        let list = IgnoreList::load(&list_path).unwrap();
        let remaining = list.filter_candidates(vec![
            PathBuf::from("/v/a.mp4"),
            PathBuf::from("/v/b.mkv"),
            PathBuf::from("/v/c.mov"),
        ]);
        assert_eq!(
            remaining,
            vec![PathBuf::from("/v/a.mp4"), PathBuf::from("/v/c.mov")]
        );
    }

    #[test]
    fn test_append_failure_names_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let list_path = temp_dir.path().to_path_buf();

        let mut list = IgnoreList {
            path: list_path.clone(),
            entries: HashSet::new(),
        };
        let err = list.append(Path::new("/v/x.mp4")).unwrap_err();
        match err {
            AppError::IgnoreFileWrite { path, .. } => assert_eq!(path, list_path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
