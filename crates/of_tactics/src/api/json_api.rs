//! JSON API for tactic edits
//!
//! Every profile mutation as a serde command, so a UI layer can drive a
//! profile with JSON strings and read back what changed.

use crate::choice::{ChanceCreation, ChoiceDelta, ChoiceOption, ChoiceSetId, PlayFocus};
use crate::error::{Result, TacticError};
use crate::instruction::{GroupId, OptionKind, OptionValue};
use crate::player::{PlayerRole, RoleTemplate};
use crate::snapshot::format::current_timestamp;
use crate::tactics::{TacticProfile, TacticalPreset};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// One choice-set option, addressed by set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "set", content = "option", rename_all = "snake_case")]
pub enum ChoiceRef {
    PlayFocus(PlayFocus),
    ChanceCreation(ChanceCreation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    SetValue { group: GroupId, value: OptionValue },
    MakeAvailable { group: GroupId, kind: OptionKind },
    MakeUnavailable { group: GroupId, kind: OptionKind },
    MakeGroupAvailable { group: GroupId },
    MakeGroupUnavailable { group: GroupId },
    AddChoice { choice: ChoiceRef },
    RemoveChoice { choice: ChoiceRef },
    ClearChoices { set: ChoiceSetId },
    AssignRole { role: PlayerRole },
    ClearRole,
    ApplyRoleTemplate { template: RoleTemplate },
    ApplyPreset { preset: TacticalPreset },
}

/// Choice-set side effects of one edit, by option name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceChange {
    pub set: Option<ChoiceSetId>,
    pub displaced: Vec<String>,
    pub became_unavailable: Vec<String>,
    pub became_available: Vec<String>,
    pub chosen: Vec<String>,
    pub unavailable: Vec<String>,
}

impl ChoiceChange {
    fn from_delta<C: ChoiceOption>(profile: &TacticProfile, delta: ChoiceDelta<C>) -> Self {
        let (chosen, unavailable) = match profile.choice_set::<C>() {
            Some(set) => (option_names(set.chosen().iter().copied()), option_names(set.unavailable().iter().copied())),
            None => (Vec::new(), Vec::new()),
        };
        Self {
            set: Some(C::SET),
            displaced: option_names(delta.displaced),
            became_unavailable: option_names(delta.became_unavailable),
            became_available: option_names(delta.became_available),
            chosen,
            unavailable,
        }
    }
}

fn option_names<C: ChoiceOption>(options: impl IntoIterator<Item = C>) -> Vec<String> {
    options.into_iter().map(|c| c.name().to_string()).collect()
}

/// What an accepted command changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub changed: bool,
    /// Slots whose value or availability changed
    pub changed_kinds: Vec<OptionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<ChoiceChange>,
    /// Groups with unmet Required slots after the edit
    pub incomplete_groups: Vec<GroupId>,
}

impl EditOutcome {
    fn slots(profile: &TacticProfile, changed_kinds: Vec<OptionKind>) -> Self {
        Self {
            changed: !changed_kinds.is_empty(),
            changed_kinds,
            choice: None,
            incomplete_groups: profile.validate(),
        }
    }

    fn slot(profile: &TacticProfile, kind: OptionKind, changed: bool) -> Self {
        Self::slots(profile, if changed { vec![kind] } else { Vec::new() })
    }

    fn choice<C: ChoiceOption>(profile: &TacticProfile, changed: bool, delta: ChoiceDelta<C>) -> Self {
        Self {
            changed,
            changed_kinds: Vec::new(),
            choice: Some(ChoiceChange::from_delta(profile, delta)),
            incomplete_groups: profile.validate(),
        }
    }
}

/// Route one command to the profile
pub fn apply_command(profile: &mut TacticProfile, command: EditCommand) -> Result<EditOutcome> {
    debug!("Applying command to {}: {:?}", profile.name(), command);

    let outcome = match command {
        EditCommand::SetValue { group, value } => {
            let changed = profile.set_value(group, value)?;
            EditOutcome::slot(profile, value.kind(), changed)
        }
        EditCommand::MakeAvailable { group, kind } => {
            let changed = profile.make_available(group, kind)?;
            EditOutcome::slot(profile, kind, changed)
        }
        EditCommand::MakeUnavailable { group, kind } => {
            let changed = profile.make_unavailable(group, kind)?;
            EditOutcome::slot(profile, kind, changed)
        }
        EditCommand::MakeGroupAvailable { group } => {
            let changed = profile.make_group_available(group)?;
            EditOutcome::slots(profile, changed)
        }
        EditCommand::MakeGroupUnavailable { group } => {
            let changed = profile.make_group_unavailable(group)?;
            EditOutcome::slots(profile, changed)
        }
        EditCommand::AddChoice { choice } => match choice {
            ChoiceRef::PlayFocus(option) => add_choice(profile, option)?,
            ChoiceRef::ChanceCreation(option) => add_choice(profile, option)?,
        },
        EditCommand::RemoveChoice { choice } => match choice {
            ChoiceRef::PlayFocus(option) => remove_choice(profile, option)?,
            ChoiceRef::ChanceCreation(option) => remove_choice(profile, option)?,
        },
        EditCommand::ClearChoices { set } => match set {
            ChoiceSetId::PlayFocus => clear_choices::<PlayFocus>(profile)?,
            ChoiceSetId::ChanceCreation => clear_choices::<ChanceCreation>(profile)?,
        },
        EditCommand::AssignRole { role } => {
            let changed = profile.assign_role(role)?;
            EditOutcome::slots(profile, changed)
        }
        EditCommand::ClearRole => {
            let changed = profile.clear_role();
            EditOutcome::slots(profile, changed)
        }
        EditCommand::ApplyRoleTemplate { template } => {
            let changed = profile.apply_role_template(&template)?;
            EditOutcome::slots(profile, changed)
        }
        EditCommand::ApplyPreset { preset } => {
            let changed = profile.apply_preset(preset)?;
            EditOutcome::slots(profile, changed)
        }
    };

    Ok(outcome)
}

fn add_choice<C: ChoiceOption>(profile: &mut TacticProfile, option: C) -> Result<EditOutcome> {
    let was_chosen = profile.choice_set::<C>().map_or(false, |s| s.is_chosen(option));
    let delta = profile.add_choice(option)?;
    Ok(EditOutcome::choice(profile, !was_chosen, delta))
}

fn remove_choice<C: ChoiceOption>(profile: &mut TacticProfile, option: C) -> Result<EditOutcome> {
    let was_chosen = profile.choice_set::<C>().map_or(false, |s| s.is_chosen(option));
    let delta = profile.remove_choice(option)?;
    Ok(EditOutcome::choice(profile, was_chosen, delta))
}

fn clear_choices<C: ChoiceOption>(profile: &mut TacticProfile) -> Result<EditOutcome> {
    let delta = profile.clear_choices::<C>()?;
    let changed = !delta.displaced.is_empty();
    Ok(EditOutcome::choice(profile, changed, delta))
}

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    /// Unix milliseconds
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn from_tactic_error(error: &TacticError) -> Self {
        let code = match error {
            TacticError::NotAvailable { .. } => "NOT_AVAILABLE",
            TacticError::Locked { .. } => "LOCKED",
            TacticError::OptionUnavailable { .. } => "OPTION_UNAVAILABLE",
            TacticError::InvalidSnapshot(_) => "INVALID_SNAPSHOT",
            TacticError::UnknownOption { .. } => "UNKNOWN_OPTION",
            TacticError::NoMatchingSlot { .. } => "NO_MATCHING_SLOT",
            TacticError::MissingGroup(_) => "MISSING_GROUP",
            TacticError::MissingChoiceSet(_) => "MISSING_CHOICE_SET",
            TacticError::RoleNotSuitable { .. } => "ROLE_NOT_SUITABLE",
            TacticError::InvalidSchema(_) => "INVALID_SCHEMA",
            TacticError::WrongScope { .. } => "WRONG_SCOPE",
        };
        let error_kind = if error.is_user_rejection() { "rejected" } else { "invalid" };
        Self::new(code, &error.to_string()).with_details(error_kind)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: current_timestamp(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: current_timestamp(),
        }
    }
}

/// Apply a command given as JSON
///
/// # Returns
/// JSON string containing ApiResponse<EditOutcome>
pub fn apply_command_json(profile: &mut TacticProfile, command_json: &str) -> String {
    let command: EditCommand = match serde_json::from_str(command_json) {
        Ok(command) => command,
        Err(e) => {
            error!("Failed to parse EditCommand: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            let response: ApiResponse<EditOutcome> = ApiResponse::error(error);
            return serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        }
    };

    let response = match apply_command(profile, command) {
        Ok(outcome) => ApiResponse::success(outcome),
        Err(err) => {
            warn!("Command rejected for {}: {}", profile.name(), err);
            ApiResponse::error(ApiError::from_tactic_error(&err))
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TacticsConfig;
    use crate::player::{Position, TacklingStyle};
    use crate::tactics::{TeamPressing, TeamTempo};

    fn team() -> TacticProfile {
        TacticProfile::team("Test FC", TacticsConfig::default()).unwrap()
    }

    #[test]
    fn test_command_wire_format() {
        let command: EditCommand = serde_json::from_str(
            r#"{"op":"add_choice","choice":{"set":"chance_creation","option":"work_into_box"}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            EditCommand::AddChoice { choice: ChoiceRef::ChanceCreation(ChanceCreation::WorkIntoBox) }
        );

        let command: EditCommand = serde_json::from_str(
            r#"{"op":"set_value","group":"in_possession","value":{"kind":"team_tempo","value":"fast"}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            EditCommand::SetValue { group: GroupId::InPossession, value: TeamTempo::Fast.into() }
        );
    }

    #[test]
    fn test_apply_choice_command_reports_side_effects() {
        let mut profile = team();
        let outcome = apply_command(
            &mut profile,
            EditCommand::AddChoice { choice: ChoiceRef::ChanceCreation(ChanceCreation::WorkIntoBox) },
        )
        .unwrap();

        assert!(outcome.changed);
        let choice = outcome.choice.unwrap();
        assert_eq!(choice.set, Some(ChoiceSetId::ChanceCreation));
        assert_eq!(choice.chosen, vec!["work_into_box"]);
        assert_eq!(choice.became_unavailable, vec!["shoot_on_sight", "hit_early_crosses"]);
    }

    #[test]
    fn test_repeated_commands_report_no_change() {
        let mut profile = team();
        let add = EditCommand::AddChoice { choice: ChoiceRef::PlayFocus(PlayFocus::LeftFlank) };
        assert!(apply_command(&mut profile, add.clone()).unwrap().changed);
        assert!(!apply_command(&mut profile, add).unwrap().changed);

        let remove = EditCommand::RemoveChoice { choice: ChoiceRef::PlayFocus(PlayFocus::RightFlank) };
        assert!(!apply_command(&mut profile, remove).unwrap().changed);

        let set = EditCommand::SetValue { group: GroupId::InPossession, value: TeamTempo::Normal.into() };
        assert!(!apply_command(&mut profile, set).unwrap().changed);
    }

    #[test]
    fn test_json_round_trip_success() {
        let mut player = TacticProfile::player("Kim", Position::CB, TacticsConfig::default()).unwrap();

        let response = apply_command_json(&mut player, r#"{"op":"assign_role","role":"stopper"}"#);
        let response: ApiResponse<EditOutcome> = serde_json::from_str(&response).unwrap();
        assert!(response.success);
        let outcome = response.data.unwrap();
        assert!(outcome.changed_kinds.contains(&OptionKind::Tackling));
        assert!(outcome.incomplete_groups.is_empty());
        assert_eq!(player.get::<TacklingStyle>(), Some(TacklingStyle::TackleHarder));
    }

    #[test]
    fn test_preset_command_by_name() {
        let command: EditCommand =
            serde_json::from_str(r#"{"op":"apply_preset","preset":"high_pressing"}"#).unwrap();
        assert_eq!(command, EditCommand::ApplyPreset { preset: TacticalPreset::HighPressing });

        let mut profile = team();
        let response = apply_command_json(&mut profile, r#"{"op":"apply_preset","preset":"high_pressing"}"#);
        let response: ApiResponse<EditOutcome> = serde_json::from_str(&response).unwrap();
        assert!(response.success);
        assert!(response.data.unwrap().changed_kinds.contains(&OptionKind::TeamPressing));
        assert_eq!(profile.get::<TeamPressing>(), Some(TeamPressing::VeryHigh));
    }

    #[test]
    fn test_availability_command_on_locked_slot() {
        let mut player = TacticProfile::player("Kim", Position::CB, TacticsConfig::default()).unwrap();
        player.assign_role(PlayerRole::Stopper).unwrap();
        let before = player.clone();

        for command in [
            r#"{"op":"make_available","group":"on_opposition_has_ball","kind":"tackling"}"#,
            r#"{"op":"make_unavailable","group":"on_opposition_has_ball","kind":"tackling"}"#,
        ] {
            let response = apply_command_json(&mut player, command);
            let response: ApiResponse<EditOutcome> = serde_json::from_str(&response).unwrap();
            assert!(!response.success);
            assert_eq!(response.error.unwrap().code, "LOCKED");
        }
        assert_eq!(player, before);
    }

    #[test]
    fn test_json_errors() {
        let mut player = TacticProfile::player("Kim", Position::CB, TacticsConfig::default()).unwrap();
        player.assign_role(PlayerRole::Stopper).unwrap();

        let response = apply_command_json(
            &mut player,
            r#"{"op":"set_value","group":"on_opposition_has_ball","value":{"kind":"tackling","value":"stay_on_feet"}}"#,
        );
        let response: ApiResponse<EditOutcome> = serde_json::from_str(&response).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.unwrap().code, "LOCKED");

        let response = apply_command_json(&mut player, "not json");
        let response: ApiResponse<EditOutcome> = serde_json::from_str(&response).unwrap();
        assert_eq!(response.error.unwrap().code, "INVALID_JSON");

        let response = apply_command_json(&mut player, r#"{"op":"apply_preset","preset":"balanced"}"#);
        let response: ApiResponse<EditOutcome> = serde_json::from_str(&response).unwrap();
        assert_eq!(response.error.unwrap().code, "WRONG_SCOPE");
    }
}
