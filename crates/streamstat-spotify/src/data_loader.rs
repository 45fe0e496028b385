//! Data loader for Spotify streaming history exports
//!
//! A Spotify "Account data" export unpacks into a folder holding
//! `StreamingHistory_music_0.json`, `StreamingHistory_music_1.json`, ...
//! Each file is a JSON array of records:
//!
//! ```json
//! [
//!   {"endTime": "2024-08-01 21:13", "artistName": "Burial", "trackName": "Archangel", "msPlayed": 238000}
//! ]
//! ```
//!
//! Files are read one at a time: a file is opened, read completely and
//! closed before its records are decoded and handed out, and only then is
//! the next file opened.
//!
//! # Examples
//!
//! ```no_run
//! use streamstat_core::provider::HistorySource;
//! use streamstat_spotify::DataLoader;
//!
//! # fn example() -> streamstat_core::Result<()> {
//! let loader = DataLoader::from_dir("my_spotify_data", DataLoader::DEFAULT_PREFIX)?;
//! let tracks = loader.load_tracks()?;
//! println!("{} distinct tracks", tracks.len());
//! # Ok(())
//! # }
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use streamstat_core::error::{Result, StreamstatError};
use streamstat_core::provider::HistorySource;
use streamstat_core::types::ListenEvent;
use tracing::{debug, info};

/// Data loader for discovering and reading streaming history files
pub struct DataLoader {
    /// History files in load order
    files: Vec<PathBuf>,
    /// Whether to show a progress bar while loading
    show_progress: bool,
}

impl DataLoader {
    /// File name prefix of music history files in a Spotify export
    pub const DEFAULT_PREFIX: &'static str = "StreamingHistory_music_";

    /// Create a loader for every history file directly inside `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` does not exist or holds no matching files
    pub fn from_dir(dir: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StreamstatError::DataDirectoryNotFound(dir.to_path_buf()));
        }

        let files = Self::find_history_files(dir, prefix)?;
        if files.is_empty() {
            return Err(StreamstatError::NoHistoryFiles(dir.to_path_buf()));
        }

        Ok(Self::from_files(files))
    }

    /// Create a loader for an explicit list of files, kept in the given order
    pub fn from_files(files: Vec<PathBuf>) -> Self {
        debug!("Loading from {} history files", files.len());
        Self {
            files,
            show_progress: false,
        }
    }

    /// Find `<prefix>*.json` files directly inside `dir`
    ///
    /// Files whose name is `<prefix><number>.json` come first, in numeric
    /// order, so `_2` is read before `_10`. Any other matching file follows,
    /// sorted by name.
    pub fn find_history_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                StreamstatError::Io(std::io::Error::other(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                debug!(
                    "Skipping {}: file name is not valid UTF-8",
                    entry.path().display()
                );
                continue;
            };
            if name.starts_with(prefix) && name.ends_with(".json") {
                files.push(entry.into_path());
            }
        }

        files.sort_by_cached_key(|path| history_file_order(path, prefix));
        info!(
            "Found {} history files in {}",
            files.len(),
            dir.display()
        );
        Ok(files)
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Files this loader reads, in order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Iterate over every listen event of every file
    ///
    /// The iterator ends after yielding the first error.
    pub fn listen_events(&self) -> ListenEvents<'_> {
        let progress = self.show_progress.then(|| {
            let pb = ProgressBar::new(self.files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files")
                    .map(|style| style.progress_chars("#>-"))
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            pb.set_message("Loading streaming history");
            pb
        });

        ListenEvents {
            files: self.files.iter(),
            current: Vec::new().into_iter(),
            progress,
            failed: false,
        }
    }

    /// Read and decode one history file
    pub fn parse_history_file(path: &Path) -> Result<Vec<ListenEvent>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StreamstatError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        Self::parse_history_str(path, &content)
    }

    /// Decode the contents of one history file
    ///
    /// `path` is only used to label errors.
    pub fn parse_history_str(path: &Path, content: &str) -> Result<Vec<ListenEvent>> {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(content).map_err(|e| StreamstatError::Parse {
                file: path.to_path_buf(),
                error: e.to_string(),
            })?;

        let events = records
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                ListenEvent::decode(value).map_err(|source| StreamstatError::MalformedRecord {
                    file: path.to_path_buf(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Decoded {} records from {}", events.len(), path.display());
        Ok(events)
    }
}

impl HistorySource for DataLoader {
    fn events(&self) -> Box<dyn Iterator<Item = Result<ListenEvent>> + '_> {
        Box::new(self.listen_events())
    }
}

/// Iterator over the listen events of a [`DataLoader`]
pub struct ListenEvents<'a> {
    files: std::slice::Iter<'a, PathBuf>,
    current: std::vec::IntoIter<ListenEvent>,
    progress: Option<ProgressBar>,
    failed: bool,
}

impl Iterator for ListenEvents<'_> {
    type Item = Result<ListenEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(event) = self.current.next() {
                return Some(Ok(event));
            }

            let Some(path) = self.files.next() else {
                if let Some(pb) = self.progress.take() {
                    pb.finish_and_clear();
                }
                return None;
            };

            match DataLoader::parse_history_file(path) {
                Ok(events) => {
                    self.current = events.into_iter();
                    if let Some(pb) = &self.progress {
                        pb.inc(1);
                    }
                }
                Err(e) => {
                    self.failed = true;
                    if let Some(pb) = self.progress.take() {
                        pb.abandon();
                    }
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Sort key placing numbered pages first, by page number, then by name
fn history_file_order(path: &Path, prefix: &str) -> (bool, u64, String) {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let page = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".json"))
        .and_then(|number| number.parse::<u64>().ok());
    (page.is_none(), page.unwrap_or(0), name)
}
