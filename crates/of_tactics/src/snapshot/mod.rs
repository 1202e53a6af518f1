//! Snapshot and restore of tactic profiles
//!
//! - `format`: snapshot types plus JSON and binary codecs
//! - `store`: atomic file persistence
//! - `error`: persistence errors

pub mod error;
pub mod format;
pub mod store;

pub use error::SnapshotError;
pub use format::{
    decode_binary, encode_binary, from_json, to_json, ChoiceSetSnapshot, ChoiceSetsSnapshot,
    GroupSnapshot, SlotSnapshot, TacticSnapshot, SNAPSHOT_VERSION,
};
pub use store::{format_for_path, read_snapshot_file, write_snapshot_file, TacticStore};
