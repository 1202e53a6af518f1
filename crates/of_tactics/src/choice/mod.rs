//! Multi-select instruction sets governed by exclusion rules

pub mod focus;
pub mod rules;
pub mod set;

pub use focus::{ChanceCreation, ChoiceSets, PlayFocus};
pub use rules::{ExclusionRuleBuilder, ExclusionRuleTable};
pub use set::{ChoiceDelta, ChoiceOption, ChoiceSet, ChoiceSetId};
