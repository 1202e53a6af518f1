//! Choice Set
//!
//! Multi-select group of option values. `chosen` is edited through `add` and
//! `remove`; `unavailable` is always recomputed from `chosen` by the rule table.

use super::focus::ChoiceSets;
use super::rules::ExclusionRuleTable;
use crate::error::{Result, TacticError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceSetId {
    PlayFocus,
    ChanceCreation,
}

impl ChoiceSetId {
    pub const ALL: [ChoiceSetId; 2] = [ChoiceSetId::PlayFocus, ChoiceSetId::ChanceCreation];

    pub fn name(&self) -> &'static str {
        match self {
            ChoiceSetId::PlayFocus => "play_focus",
            ChoiceSetId::ChanceCreation => "chance_creation",
        }
    }
}

impl fmt::Display for ChoiceSetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ChoiceSetId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ChoiceSetId::ALL
            .iter()
            .find(|id| id.name() == s)
            .copied()
            .ok_or_else(|| format!("Invalid ChoiceSetId: {}", s))
    }
}

/// A value domain usable in a `ChoiceSet`
pub trait ChoiceOption:
    Copy + Ord + Hash + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const SET: ChoiceSetId;

    /// Whole domain, in declaration order
    fn all() -> &'static [Self];

    fn rules() -> &'static ExclusionRuleTable<Self>;

    fn name(&self) -> &'static str;

    fn select(sets: &ChoiceSets) -> Option<&ChoiceSet<Self>>;

    fn select_mut(sets: &mut ChoiceSets) -> Option<&mut ChoiceSet<Self>>;
}

/// What an `add`/`remove` changed besides the option itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceDelta<C> {
    /// Dropped from `chosen` by clearing or by a direct opposite
    pub displaced: Vec<C>,
    pub became_unavailable: Vec<C>,
    pub became_available: Vec<C>,
}

impl<C> ChoiceDelta<C> {
    pub fn is_empty(&self) -> bool {
        self.displaced.is_empty()
            && self.became_unavailable.is_empty()
            && self.became_available.is_empty()
    }
}

impl<C> Default for ChoiceDelta<C> {
    fn default() -> Self {
        Self { displaced: Vec::new(), became_unavailable: Vec::new(), became_available: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSet<C: ChoiceOption> {
    chosen: BTreeSet<C>,
    unavailable: BTreeSet<C>,
}

impl<C: ChoiceOption> Default for ChoiceSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ChoiceOption> ChoiceSet<C> {
    pub fn new() -> Self {
        Self { chosen: BTreeSet::new(), unavailable: BTreeSet::new() }
    }

    /// Rebuild from stored sets, rejecting anything `add`/`remove` could not
    /// have produced.
    pub fn from_parts(chosen: BTreeSet<C>, unavailable: BTreeSet<C>) -> Result<Self> {
        let set = Self { chosen, unavailable };
        set.check_invariants().map_err(TacticError::InvalidSnapshot)?;
        Ok(set)
    }

    pub fn id(&self) -> ChoiceSetId {
        C::SET
    }

    pub fn chosen(&self) -> &BTreeSet<C> {
        &self.chosen
    }

    pub fn unavailable(&self) -> &BTreeSet<C> {
        &self.unavailable
    }

    pub fn is_chosen(&self, option: C) -> bool {
        self.chosen.contains(&option)
    }

    pub fn is_available(&self, option: C) -> bool {
        !self.unavailable.contains(&option)
    }

    pub fn add(&mut self, option: C) -> Result<ChoiceDelta<C>> {
        if self.unavailable.contains(&option) {
            return Err(TacticError::OptionUnavailable { set: C::SET, option: option.name() });
        }
        if self.chosen.contains(&option) {
            return Ok(ChoiceDelta::default());
        }

        let rules = C::rules();
        let mut chosen = self.chosen.clone();
        let displaced: Vec<C> = if rules.clears_all_others(option) {
            std::mem::take(&mut chosen).into_iter().collect()
        } else {
            rules.opposites_of(option).filter(|opposite| chosen.remove(opposite)).collect()
        };
        chosen.insert(option);

        let mut delta = self.commit(chosen);
        delta.displaced = displaced;
        Ok(delta)
    }

    /// Absent options are a no-op
    pub fn remove(&mut self, option: C) -> ChoiceDelta<C> {
        if !self.chosen.contains(&option) {
            return ChoiceDelta::default();
        }
        let mut chosen = self.chosen.clone();
        chosen.remove(&option);
        self.commit(chosen)
    }

    /// `remove` applied to every chosen option
    pub fn clear(&mut self) -> ChoiceDelta<C> {
        let displaced: Vec<C> = self.chosen.iter().copied().collect();
        let mut delta = self.commit(BTreeSet::new());
        delta.displaced = displaced;
        delta
    }

    fn commit(&mut self, chosen: BTreeSet<C>) -> ChoiceDelta<C> {
        let unavailable = C::rules().compute_unavailable(C::all(), &chosen);
        let delta = ChoiceDelta {
            displaced: Vec::new(),
            became_unavailable: unavailable.difference(&self.unavailable).copied().collect(),
            became_available: self.unavailable.difference(&unavailable).copied().collect(),
        };
        self.chosen = chosen;
        self.unavailable = unavailable;

        debug_assert!(self.check_invariants().is_ok(), "{:?}", self.check_invariants());
        #[cfg(feature = "strict_contracts")]
        if let Err(reason) = self.check_invariants() {
            panic!("STRICT: {} choice set broken: {}", C::SET, reason);
        }

        delta
    }

    fn check_invariants(&self) -> std::result::Result<(), String> {
        if let Some(both) = self.chosen.intersection(&self.unavailable).next() {
            return Err(format!("{} is both chosen and unavailable", both.name()));
        }
        let rules = C::rules();
        for a in &self.chosen {
            if let Some(b) = rules.opposites_of(*a).find(|b| self.chosen.contains(b)) {
                return Err(format!("opposites {} and {} both chosen", a.name(), b.name()));
            }
        }
        if rules.compute_unavailable(C::all(), &self.chosen) != self.unavailable {
            return Err(format!("{} unavailable set does not follow its rules", C::SET));
        }
        Ok(())
    }
}
