//! Tactic Profile
//!
//! 팀 또는 선수 한 명의 전체 전술 설정.
//! Owns every instruction group and choice set of one team or player; all
//! edits go through here. Each operation either applies fully or returns an
//! error with the profile untouched.

use crate::choice::{ChanceCreation, ChoiceDelta, ChoiceOption, ChoiceSet, ChoiceSets, PlayFocus};
use crate::config::TacticsConfig;
use crate::error::{Result, TacticError};
use crate::instruction::{
    Availability, GroupId, InstructionGroup, InstructionValue, OptionKind, OptionSlot,
    OptionValue, RequiredPolicy,
};
use crate::player::{PlayerRole, Position, RoleTemplate};
use crate::snapshot::format::{
    ChoiceSetSnapshot, ChoiceSetsSnapshot, GroupSnapshot, SlotSnapshot, TacticSnapshot,
    SNAPSHOT_VERSION,
};
use crate::tactics::team_instructions::TacticalPreset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const TEAM_GROUPS: [GroupId; 3] =
    [GroupId::InPossession, GroupId::InTransition, GroupId::OutOfPossession];

pub const PLAYER_GROUPS: [GroupId; 3] =
    [GroupId::OnPlayerHasBall, GroupId::OnTeamHasBall, GroupId::OnOppositionHasBall];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileScope {
    Team,
    Player { position: Position },
}

impl ProfileScope {
    pub fn group_ids(&self) -> &'static [GroupId] {
        match self {
            ProfileScope::Team => &TEAM_GROUPS,
            ProfileScope::Player { .. } => &PLAYER_GROUPS,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            ProfileScope::Team => None,
            ProfileScope::Player { position } => Some(*position),
        }
    }

    fn excluded_kinds(&self) -> &'static [OptionKind] {
        match self.position() {
            Some(position) => position.excluded_kinds(),
            None => &[],
        }
    }
}

impl fmt::Display for ProfileScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProfileScope::Team => write!(f, "team"),
            ProfileScope::Player { position } => write!(f, "player ({})", position),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TacticProfile {
    id: Uuid,
    name: String,
    scope: ProfileScope,
    role: Option<PlayerRole>,
    config: TacticsConfig,
    groups: BTreeMap<GroupId, InstructionGroup>,
    choices: ChoiceSets,
}

impl TacticProfile {
    /// Team profile: possession / transition / out-of-possession groups plus
    /// the play focus and chance creation choice sets.
    pub fn team(name: impl Into<String>, config: TacticsConfig) -> Result<Self> {
        let groups = Self::build_groups(ProfileScope::Team, &config)?;
        let profile = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            scope: ProfileScope::Team,
            role: None,
            config,
            groups,
            choices: ChoiceSets::team(),
        };
        debug!("Created team profile: {} (ID: {})", profile.name, profile.id);
        Ok(profile)
    }

    /// Player profile. Kinds the position can never use start Unavailable.
    pub fn player(name: impl Into<String>, position: Position, config: TacticsConfig) -> Result<Self> {
        let scope = ProfileScope::Player { position };
        let groups = Self::build_groups(scope, &config)?;
        let profile = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            scope,
            role: None,
            config,
            groups,
            choices: ChoiceSets::none(),
        };
        debug!("Created player profile: {} [{}] (ID: {})", profile.name, position, profile.id);
        Ok(profile)
    }

    fn build_groups(
        scope: ProfileScope,
        config: &TacticsConfig,
    ) -> Result<BTreeMap<GroupId, InstructionGroup>> {
        let mut groups = BTreeMap::new();
        for id in scope.group_ids() {
            let mut group = InstructionGroup::from_schema(id.schema(), config.required_policy)?;
            for kind in scope.excluded_kinds() {
                if group.contains(*kind) {
                    group.make_unavailable(*kind)?;
                }
            }
            groups.insert(*id, group);
        }
        Ok(groups)
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> ProfileScope {
        self.scope
    }

    pub fn position(&self) -> Option<Position> {
        self.scope.position()
    }

    pub fn role(&self) -> Option<PlayerRole> {
        self.role
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    pub fn group(&self, id: GroupId) -> Option<&InstructionGroup> {
        self.groups.get(&id)
    }

    /// Groups in `GroupId` order
    pub fn groups(&self) -> impl Iterator<Item = &InstructionGroup> + '_ {
        self.groups.values()
    }

    pub fn choice_set<C: ChoiceOption>(&self) -> Option<&ChoiceSet<C>> {
        C::select(&self.choices)
    }

    pub fn choice_sets(&self) -> &ChoiceSets {
        &self.choices
    }

    /// The group holding `kind`. A kind appears in at most one group per profile.
    pub fn group_of(&self, kind: OptionKind) -> Option<GroupId> {
        self.groups.values().find(|g| g.contains(kind)).map(|g| g.id())
    }

    /// Typed read from whichever group holds `T`
    pub fn get<T: InstructionValue>(&self) -> Option<T> {
        self.group_of(T::KIND).and_then(|id| self.groups.get(&id)).and_then(|g| g.get::<T>())
    }

    // ========================================================================
    // Slot edits
    // ========================================================================

    pub fn set_value(&mut self, group: GroupId, value: OptionValue) -> Result<bool> {
        let result = self.group_mut(group).and_then(|g| g.set_value(value));
        self.trace_edit("set_value", group, value.kind(), &result);
        result
    }

    /// Typed write routed to whichever group holds `T`
    pub fn set<T: InstructionValue>(&mut self, value: T) -> Result<bool> {
        let group = self.group_of(T::KIND).ok_or(TacticError::NoMatchingSlot { kind: T::KIND })?;
        self.set_value(group, value.into())
    }

    pub fn make_available(&mut self, group: GroupId, kind: OptionKind) -> Result<bool> {
        let result = if self.scope.excluded_kinds().contains(&kind) {
            Err(TacticError::NotAvailable { kind })
        } else {
            self.check_role_lock(group, Some(kind))
                .and_then(|_| self.group_mut(group))
                .and_then(|g| g.make_available(kind))
        };
        self.trace_edit("make_available", group, kind, &result);
        result
    }

    pub fn make_unavailable(&mut self, group: GroupId, kind: OptionKind) -> Result<bool> {
        let result = self
            .check_role_lock(group, Some(kind))
            .and_then(|_| self.group_mut(group))
            .and_then(|g| g.make_unavailable(kind));
        self.trace_edit("make_unavailable", group, kind, &result);
        result
    }

    /// Every slot of `group` Available with its default, except kinds the
    /// position excludes. Returns the kinds whose availability changed.
    /// Fails with `Locked` if the group holds a locked role requirement.
    pub fn make_group_available(&mut self, group: GroupId) -> Result<Vec<OptionKind>> {
        self.check_role_lock(group, None)?;
        let excluded = self.scope.excluded_kinds();
        let target = self.group_mut(group)?;

        let mut staged = target.clone();
        let mut changed = staged.make_all_available();
        for kind in excluded {
            if staged.contains(*kind) {
                staged.make_unavailable(*kind)?;
            }
        }
        changed.retain(|kind| !excluded.contains(kind));
        *target = staged;

        debug!("{}: {} made available ({} changed)", self.name, group, changed.len());
        Ok(changed)
    }

    pub fn make_group_unavailable(&mut self, group: GroupId) -> Result<Vec<OptionKind>> {
        self.check_role_lock(group, None)?;
        let changed = self.group_mut(group)?.make_all_unavailable();
        debug!("{}: {} made unavailable ({} changed)", self.name, group, changed.len());
        Ok(changed)
    }

    // ========================================================================
    // Choice edits
    // ========================================================================

    pub fn add_choice<C: ChoiceOption>(&mut self, option: C) -> Result<ChoiceDelta<C>> {
        let set = C::select_mut(&mut self.choices).ok_or(TacticError::MissingChoiceSet(C::SET))?;
        match set.add(option) {
            Ok(delta) => {
                debug!("{}: {} += {}", self.name, C::SET, option.name());
                Ok(delta)
            }
            Err(err) => {
                warn!("{}: rejected {} += {}: {}", self.name, C::SET, option.name(), err);
                Err(err)
            }
        }
    }

    pub fn remove_choice<C: ChoiceOption>(&mut self, option: C) -> Result<ChoiceDelta<C>> {
        let set = C::select_mut(&mut self.choices).ok_or(TacticError::MissingChoiceSet(C::SET))?;
        let delta = set.remove(option);
        debug!("{}: {} -= {}", self.name, C::SET, option.name());
        Ok(delta)
    }

    pub fn clear_choices<C: ChoiceOption>(&mut self) -> Result<ChoiceDelta<C>> {
        let set = C::select_mut(&mut self.choices).ok_or(TacticError::MissingChoiceSet(C::SET))?;
        Ok(set.clear())
    }

    // ========================================================================
    // Roles and presets
    // ========================================================================

    /// Mark every templated kind Required with the template's value.
    /// Returns the kinds whose slot changed.
    pub fn apply_role_template(&mut self, template: &RoleTemplate) -> Result<Vec<OptionKind>> {
        let mut staged = self.groups.clone();
        let changed = self.apply_template_to(&mut staged, template)?;
        self.groups = staged;
        info!("{}: applied role template ({} slots changed)", self.name, changed.len());
        Ok(changed)
    }

    /// Replace the player's role: release the old role's Required slots, then
    /// apply the new role's template.
    pub fn assign_role(&mut self, role: PlayerRole) -> Result<Vec<OptionKind>> {
        let position = self.position().ok_or(TacticError::WrongScope { expected: "player" })?;
        if !role.is_suitable_for(position) {
            warn!("{}: role {} rejected for {}", self.name, role, position);
            return Err(TacticError::RoleNotSuitable { role, position });
        }

        let mut staged = self.groups.clone();
        let mut changed: BTreeSet<OptionKind> = BTreeSet::new();
        for group in staged.values_mut() {
            changed.extend(group.release_required_all());
        }
        changed.extend(self.apply_template_to(&mut staged, &role.template())?);

        self.groups = staged;
        self.role = Some(role);
        info!("{}: assigned role {} ({})", self.name, role, role.display_name_ko());
        Ok(changed.into_iter().collect())
    }

    /// Drop the current role, releasing its Required slots
    pub fn clear_role(&mut self) -> Vec<OptionKind> {
        let released: Vec<OptionKind> =
            self.groups.values_mut().flat_map(|g| g.release_required_all()).collect();
        if let Some(role) = self.role.take() {
            info!("{}: cleared role {}", self.name, role);
        }
        released
    }

    /// Write every preset value; any rejected write leaves the profile untouched
    pub fn apply_preset(&mut self, preset: TacticalPreset) -> Result<Vec<OptionKind>> {
        if self.scope != ProfileScope::Team {
            return Err(TacticError::WrongScope { expected: "team" });
        }

        let mut staged = self.groups.clone();
        let mut changed = Vec::new();
        for (id, value) in preset.values() {
            let group = staged.get_mut(&id).ok_or(TacticError::MissingGroup(id))?;
            match group.set_value(value) {
                Ok(true) => changed.push(value.kind()),
                Ok(false) => {}
                Err(err) => {
                    warn!("{}: preset {:?} rejected: {}", self.name, preset, err);
                    return Err(err);
                }
            }
        }

        self.groups = staged;
        info!("{}: applied preset {} ({} values changed)", self.name, preset.display_name_en(), changed.len());
        Ok(changed)
    }

    /// Groups with an unmet Required slot
    pub fn validate(&self) -> Vec<GroupId> {
        self.groups.values().filter(|g| !g.is_complete()).map(|g| g.id()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_empty()
    }

    fn apply_template_to(
        &self,
        groups: &mut BTreeMap<GroupId, InstructionGroup>,
        template: &RoleTemplate,
    ) -> Result<Vec<OptionKind>> {
        let mut changed = Vec::new();
        for entry in &template.entries {
            let kind = entry.value.kind();
            if self.scope.excluded_kinds().contains(&kind) {
                return Err(TacticError::NotAvailable { kind });
            }
            let group = groups
                .values_mut()
                .find(|g| g.contains(kind))
                .ok_or(TacticError::NoMatchingSlot { kind })?;
            let policy = entry.policy.unwrap_or(self.config.required_policy);
            if group.make_required_with(entry.value, policy)? {
                changed.push(kind);
            }
        }
        Ok(changed)
    }

    // Locked Required 슬롯은 역할 교체/해제로만 풀림
    fn check_role_lock(&self, group: GroupId, kind: Option<OptionKind>) -> Result<()> {
        let target = self.groups.get(&group).ok_or(TacticError::MissingGroup(group))?;
        let locked = target.slots().find(|(k, slot)| {
            kind.map_or(true, |wanted| *k == wanted)
                && slot.availability() == Availability::Required
                && slot.policy() == RequiredPolicy::Locked
        });
        match locked {
            Some((kind, _)) => {
                warn!("{}: {}.{} is locked by role", self.name, group, kind);
                Err(TacticError::Locked { kind })
            }
            None => Ok(()),
        }
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut InstructionGroup> {
        self.groups.get_mut(&id).ok_or(TacticError::MissingGroup(id))
    }

    fn trace_edit<T: fmt::Debug>(&self, op: &str, group: GroupId, kind: OptionKind, result: &Result<T>) {
        match result {
            Ok(outcome) => debug!("{}: {} {}.{} -> {:?}", self.name, op, group, kind, outcome),
            Err(err) => warn!("{}: rejected {} {}.{}: {}", self.name, op, group, kind, err),
        }
    }

    // ========================================================================
    // Snapshot / restore
    // ========================================================================

    pub fn snapshot(&self) -> TacticSnapshot {
        let groups = self
            .groups
            .values()
            .map(|group| GroupSnapshot {
                id: group.id(),
                slots: group
                    .slots()
                    .map(|(kind, slot)| SlotSnapshot {
                        kind,
                        availability: slot.availability(),
                        policy: slot.policy(),
                        value: slot.value().copied(),
                    })
                    .collect(),
            })
            .collect();

        TacticSnapshot {
            version: SNAPSHOT_VERSION,
            timestamp: crate::snapshot::format::current_timestamp(),
            id: self.id,
            name: self.name.clone(),
            scope: self.scope,
            role: self.role,
            groups,
            choice_sets: ChoiceSetsSnapshot {
                play_focus: self.choices.play_focus.as_ref().map(ChoiceSetSnapshot::from_set),
                chance_creation: self
                    .choices
                    .chance_creation
                    .as_ref()
                    .map(ChoiceSetSnapshot::from_set),
            },
        }
    }

    /// Rebuild a profile exactly as snapshotted. Anything the edit operations
    /// could not have produced is rejected with `InvalidSnapshot`, never repaired.
    pub fn restore(snapshot: &TacticSnapshot, config: TacticsConfig) -> Result<Self> {
        let result = Self::restore_inner(snapshot, config);
        if let Err(err) = &result {
            warn!("Failed to restore profile '{}': {}", snapshot.name, err);
        }
        result
    }

    fn restore_inner(snapshot: &TacticSnapshot, config: TacticsConfig) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(invalid(format!(
                "format version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        let scope = snapshot.scope;
        match (scope, snapshot.role) {
            (ProfileScope::Team, Some(role)) => {
                return Err(invalid(format!("team profile carries role {}", role)));
            }
            (ProfileScope::Player { position }, Some(role)) if !role.is_suitable_for(position) => {
                return Err(invalid(format!("role {} does not fit {}", role, position)));
            }
            _ => {}
        }

        let expected: BTreeSet<GroupId> = scope.group_ids().iter().copied().collect();
        let mut groups = BTreeMap::new();
        for stored in &snapshot.groups {
            if !expected.contains(&stored.id) {
                return Err(invalid(format!("group {} does not belong to a {} profile", stored.id, scope)));
            }
            let mut slots = Vec::with_capacity(stored.slots.len());
            for slot in &stored.slots {
                let restored = OptionSlot::from_parts(slot.value, slot.availability, slot.policy)
                    .ok_or_else(|| {
                        invalid(format!(
                            "{}.{} is {} with value {:?}",
                            stored.id, slot.kind, slot.availability, slot.value
                        ))
                    })?;
                if scope.excluded_kinds().contains(&slot.kind)
                    && slot.availability != Availability::Unavailable
                {
                    return Err(invalid(format!("{}.{} must be unavailable for {}", stored.id, slot.kind, scope)));
                }
                slots.push((slot.kind, restored));
            }
            let group = InstructionGroup::from_slots(stored.id.schema(), slots).map_err(|err| {
                if matches!(err, TacticError::InvalidSnapshot(_)) {
                    err
                } else {
                    invalid(err.to_string())
                }
            })?;
            if groups.insert(stored.id, group).is_some() {
                return Err(invalid(format!("group {} listed twice", stored.id)));
            }
        }
        if let Some(missing) = expected.iter().find(|id| !groups.contains_key(id)) {
            return Err(invalid(format!("group {} is missing", missing)));
        }

        let stored = &snapshot.choice_sets;
        let choices = match scope {
            ProfileScope::Team => ChoiceSets {
                play_focus: Some(restore_choice_set::<PlayFocus>(stored.play_focus.as_ref())?),
                chance_creation: Some(restore_choice_set::<ChanceCreation>(
                    stored.chance_creation.as_ref(),
                )?),
            },
            ProfileScope::Player { .. } => {
                if stored.play_focus.is_some() || stored.chance_creation.is_some() {
                    return Err(invalid("player profile carries choice sets".to_string()));
                }
                ChoiceSets::none()
            }
        };

        let profile = Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            scope,
            role: snapshot.role,
            config,
            groups,
            choices,
        };
        debug!("Restored profile: {} (ID: {})", profile.name, profile.id);
        Ok(profile)
    }
}

fn invalid(reason: String) -> TacticError {
    TacticError::InvalidSnapshot(reason)
}

fn restore_choice_set<C: ChoiceOption>(stored: Option<&ChoiceSetSnapshot<C>>) -> Result<ChoiceSet<C>> {
    let stored = stored.ok_or_else(|| invalid(format!("choice set {} is missing", C::SET)))?;
    let chosen: BTreeSet<C> = stored.chosen.iter().copied().collect();
    let unavailable: BTreeSet<C> = stored.unavailable.iter().copied().collect();
    if chosen.len() != stored.chosen.len() || unavailable.len() != stored.unavailable.len() {
        return Err(invalid(format!("choice set {} repeats an option", C::SET)));
    }
    ChoiceSet::from_parts(chosen, unavailable)
}
