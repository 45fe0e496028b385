//! Spotify provider for streamstat
//!
//! This crate discovers `StreamingHistory_music_*.json` files in an
//! exported data folder and decodes their records into listen events.

pub mod data_loader;

pub use data_loader::{DataLoader, ListenEvents};
