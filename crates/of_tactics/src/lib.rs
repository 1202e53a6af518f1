//! # of_tactics - Tactical Instruction Constraint Engine
//!
//! Tactical parameters for a team or a single player, each held in a slot
//! that is Available, Unavailable or Required, plus multi-select choice sets
//! whose options exclude each other.
//!
//! ## Features
//! - Typed instruction groups with per-slot availability
//! - Role templates that lock or pre-fill player instructions
//! - Choice sets (play focus, chance creation) with exclusion rules
//! - Snapshots as JSON or MessagePack+LZ4 with checksum
//! - JSON command API for UI integration

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::should_implement_trait)]

pub mod api;
pub mod choice;
pub mod config;
pub mod error;
pub mod instruction;
pub mod player;
pub mod snapshot;
pub mod tactics;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main API functions
pub use api::{apply_command, apply_command_json, EditCommand, EditOutcome};
pub use error::{Result, TacticError};

// Re-export core types
pub use choice::{ChanceCreation, ChoiceDelta, ChoiceOption, ChoiceSet, ChoiceSetId, PlayFocus};
pub use config::{SnapshotConfig, SnapshotFormat, TacticsConfig};
pub use instruction::{
    Availability, GroupId, InstructionGroup, OptionKind, OptionSlot, OptionValue, RequiredPolicy,
};
pub use player::{PlayerRole, Position, RoleTemplate};
pub use tactics::{ProfileScope, SharedTacticProfile, TacticProfile, TacticalPreset};

// Re-export snapshot system
pub use snapshot::{SnapshotError, TacticSnapshot, TacticStore};
