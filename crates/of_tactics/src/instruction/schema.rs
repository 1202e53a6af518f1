//! Instruction group schemas
//!
//! Each tactical context is a static table: the ordered option kinds it holds,
//! each with a default value and the availability a fresh group starts in.

use super::kinds::{OptionKind, OptionValue};
use super::slot::Availability;
use crate::player::{
    DefensiveWork, Depth, DribblingFrequency, Mentality, PassingStyle, PressingIntensity,
    ShootingTendency, TacklingStyle, Width,
};
use crate::tactics::team_instructions::{
    BuildUpStyle, DefensiveLine, GoalkeeperDistribution, OffsideTrap, OnLosingBall,
    OnWinningBall, TeamPressing, TeamTempo, TeamWidth,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one tactical context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupId {
    // 개인
    OnPlayerHasBall,
    OnTeamHasBall,
    OnOppositionHasBall,
    // 팀
    InPossession,
    InTransition,
    OutOfPossession,
}

impl GroupId {
    pub const ALL: [GroupId; 6] = [
        GroupId::OnPlayerHasBall,
        GroupId::OnTeamHasBall,
        GroupId::OnOppositionHasBall,
        GroupId::InPossession,
        GroupId::InTransition,
        GroupId::OutOfPossession,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GroupId::OnPlayerHasBall => "on_player_has_ball",
            GroupId::OnTeamHasBall => "on_team_has_ball",
            GroupId::OnOppositionHasBall => "on_opposition_has_ball",
            GroupId::InPossession => "in_possession",
            GroupId::InTransition => "in_transition",
            GroupId::OutOfPossession => "out_of_possession",
        }
    }

    /// Built-in schema for this context
    pub fn schema(&self) -> &'static GroupSchema {
        match self {
            GroupId::OnPlayerHasBall => &ON_PLAYER_HAS_BALL,
            GroupId::OnTeamHasBall => &ON_TEAM_HAS_BALL,
            GroupId::OnOppositionHasBall => &ON_OPPOSITION_HAS_BALL,
            GroupId::InPossession => &IN_POSSESSION,
            GroupId::InTransition => &IN_TRANSITION,
            GroupId::OutOfPossession => &OUT_OF_POSSESSION,
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for GroupId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupId::ALL
            .iter()
            .find(|id| id.name() == s)
            .copied()
            .ok_or_else(|| format!("Invalid GroupId: {}", s))
    }
}

/// One option kind inside a schema. The kind is the default value's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEntry {
    pub default: OptionValue,
    pub initial: Availability,
}

impl SchemaEntry {
    pub const fn available(default: OptionValue) -> Self {
        Self { default, initial: Availability::Available }
    }

    pub const fn unavailable(default: OptionValue) -> Self {
        Self { default, initial: Availability::Unavailable }
    }

    pub const fn required(default: OptionValue) -> Self {
        Self { default, initial: Availability::Required }
    }

    pub fn kind(&self) -> OptionKind {
        self.default.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSchema {
    pub id: GroupId,
    pub entries: &'static [SchemaEntry],
}

impl GroupSchema {
    pub fn kinds(&self) -> impl Iterator<Item = OptionKind> + '_ {
        self.entries.iter().map(SchemaEntry::kind)
    }

    pub fn contains(&self, kind: OptionKind) -> bool {
        self.kinds().any(|k| k == kind)
    }

    pub fn entry(&self, kind: OptionKind) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.kind() == kind)
    }

    /// First kind listed twice, if any
    pub fn duplicate_kind(&self) -> Option<OptionKind> {
        self.entries.iter().enumerate().find_map(|(i, entry)| {
            self.entries[..i].iter().any(|earlier| earlier.kind() == entry.kind()).then(|| entry.kind())
        })
    }
}

// ============================================================================
// Player schemas
// ============================================================================

pub static ON_PLAYER_HAS_BALL: GroupSchema = GroupSchema {
    id: GroupId::OnPlayerHasBall,
    entries: &[
        SchemaEntry::available(OptionValue::Passing(PassingStyle::Mixed)),
        SchemaEntry::available(OptionValue::Dribbling(DribblingFrequency::Normal)),
        SchemaEntry::available(OptionValue::Shooting(ShootingTendency::Normal)),
    ],
};

pub static ON_TEAM_HAS_BALL: GroupSchema = GroupSchema {
    id: GroupId::OnTeamHasBall,
    entries: &[
        SchemaEntry::available(OptionValue::Mentality(Mentality::Balanced)),
        SchemaEntry::available(OptionValue::Width(Width::Normal)),
        SchemaEntry::available(OptionValue::Depth(Depth::Balanced)),
    ],
};

pub static ON_OPPOSITION_HAS_BALL: GroupSchema = GroupSchema {
    id: GroupId::OnOppositionHasBall,
    entries: &[
        SchemaEntry::available(OptionValue::DefensiveWork(DefensiveWork::Normal)),
        SchemaEntry::available(OptionValue::Pressing(PressingIntensity::Medium)),
        SchemaEntry::available(OptionValue::Tackling(TacklingStyle::Balanced)),
    ],
};

// ============================================================================
// Team schemas
// ============================================================================

pub static IN_POSSESSION: GroupSchema = GroupSchema {
    id: GroupId::InPossession,
    entries: &[
        SchemaEntry::available(OptionValue::TeamWidth(TeamWidth::Normal)),
        SchemaEntry::available(OptionValue::TeamTempo(TeamTempo::Normal)),
        SchemaEntry::available(OptionValue::BuildUp(BuildUpStyle::Mixed)),
    ],
};

pub static IN_TRANSITION: GroupSchema = GroupSchema {
    id: GroupId::InTransition,
    entries: &[
        SchemaEntry::available(OptionValue::OnWinningBall(OnWinningBall::Balanced)),
        SchemaEntry::available(OptionValue::OnLosingBall(OnLosingBall::Balanced)),
        SchemaEntry::available(OptionValue::GoalkeeperDistribution(
            GoalkeeperDistribution::Balanced,
        )),
    ],
};

pub static OUT_OF_POSSESSION: GroupSchema = GroupSchema {
    id: GroupId::OutOfPossession,
    entries: &[
        SchemaEntry::available(OptionValue::DefensiveLine(DefensiveLine::Normal)),
        SchemaEntry::available(OptionValue::TeamPressing(TeamPressing::Medium)),
        SchemaEntry::available(OptionValue::OffsideTrap(OffsideTrap::DontUse)),
        SchemaEntry::available(OptionValue::Tackling(TacklingStyle::Balanced)),
    ],
};
