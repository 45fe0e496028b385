//! Common test utilities and helpers for streamstat tests
//!
//! This module provides a builder for on-disk streaming history exports and
//! helpers to make testing easier and more consistent.

#![allow(dead_code)]

use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use streamstat::types::ListenEvent;
use tempfile::TempDir;

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Build one raw export record
pub fn record(title: &str, artist: &str, ms_played: u64, end_time: &str) -> Value {
    json!({
        "endTime": end_time,
        "artistName": artist,
        "trackName": title,
        "msPlayed": ms_played,
    })
}

/// Decode a record built with [`record`]
pub fn listen(title: &str, artist: &str, ms_played: u64, end_time: &str) -> ListenEvent {
    ListenEvent::decode(record(title, artist, ms_played, end_time)).unwrap()
}

/// Builder for a temporary export folder
pub struct ExportBuilder {
    dir: TempDir,
    pages: usize,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            pages: 0,
        }
    }

    /// Write the next `StreamingHistory_music_<n>.json` page
    pub fn page(mut self, records: Vec<Value>) -> Self {
        let name = format!("StreamingHistory_music_{}.json", self.pages);
        self.write(&name, &Value::Array(records).to_string());
        self.pages += 1;
        self
    }

    /// Write an arbitrary file into the export folder
    pub fn raw(self, name: &str, content: &str) -> Self {
        self.write(name, content);
        self
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join(name), content).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Keep the folder alive for as long as the returned guard lives
    pub fn build(self) -> TempDir {
        self.dir
    }
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A year of listens spread over two pages, with a few repeated titles
pub fn year_export() -> TempDir {
    let mut first = Vec::new();
    let mut second = Vec::new();
    for month in 1..=12u32 {
        let end = format!("2023-{month:02}-15 20:00");
        let page = if month <= 6 { &mut first } else { &mut second };
        page.push(record("Archangel", "Burial", 200_000 + u64::from(month), &end));
        page.push(record(
            &format!("Track {month}"),
            "Various",
            100_000 * u64::from(month),
            &end,
        ));
    }
    ExportBuilder::new().page(first).page(second).build()
}
