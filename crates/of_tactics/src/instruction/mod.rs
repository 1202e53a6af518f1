//! Instruction slots and groups
//!
//! - `slot`: tri-state availability for a single parameter
//! - `kinds`: option kinds and their tagged values
//! - `schema`: static tables describing each tactical context
//! - `group`: schema-driven slot collections

pub mod group;
pub mod kinds;
pub mod schema;
pub mod slot;

pub use group::InstructionGroup;
pub use kinds::{InstructionValue, OptionKind, OptionValue};
pub use schema::{GroupId, GroupSchema, SchemaEntry};
pub use slot::{Availability, OptionSlot, RequiredPolicy, SlotRejection};
