//! Tactic profiles and team-wide instruction values

pub mod profile;
pub mod shared;
pub mod team_instructions;

pub use profile::{ProfileScope, TacticProfile, PLAYER_GROUPS, TEAM_GROUPS};
pub use shared::SharedTacticProfile;
pub use team_instructions::{
    BuildUpStyle, DefensiveLine, GoalkeeperDistribution, OffsideTrap, OnLosingBall,
    OnWinningBall, TacticalPreset, TeamPressing, TeamTempo, TeamWidth,
};
