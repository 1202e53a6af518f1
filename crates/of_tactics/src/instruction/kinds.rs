//! Option kinds and the tagged union of their values
//!
//! Every tactical parameter is one `OptionKind` variant and carries one value
//! type. `OptionValue` is the sum type over all of them, so a value always knows
//! which slot it belongs to. `InstructionValue` resolves a concrete value type to
//! its kind at compile time, which is what the typed `get`/`set` accessors use.

use crate::player::{
    Depth, DefensiveWork, DribblingFrequency, Mentality, PassingStyle, PressingIntensity,
    ShootingTendency, TacklingStyle, Width,
};
use crate::tactics::team_instructions::{
    BuildUpStyle, DefensiveLine, GoalkeeperDistribution, OffsideTrap, OnLosingBall,
    OnWinningBall, TeamPressing, TeamTempo, TeamWidth,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A concrete value type bound to exactly one option kind
pub trait InstructionValue: Copy + Into<OptionValue> {
    const KIND: OptionKind;

    fn from_value(value: OptionValue) -> Option<Self>;
}

/// Generate `OptionKind`, `OptionValue` and the per-type glue from one table.
macro_rules! option_kinds {
    ($( $kind:ident($ty:ty) => $name:literal, default $default:expr; )+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum OptionKind {
            $( $kind, )+
        }

        impl OptionKind {
            pub const ALL: &'static [OptionKind] = &[ $( OptionKind::$kind, )+ ];

            pub fn name(&self) -> &'static str {
                match self {
                    $( OptionKind::$kind => $name, )+
                }
            }

            /// Value a slot of this kind takes when made available without one
            pub fn canonical_default(&self) -> OptionValue {
                match self {
                    $( OptionKind::$kind => OptionValue::$kind($default), )+
                }
            }
        }

        impl FromStr for OptionKind {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(OptionKind::$kind), )+
                    _ => Err(format!("Invalid OptionKind: {}", s)),
                }
            }
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(tag = "kind", content = "value", rename_all = "snake_case")]
        pub enum OptionValue {
            $( $kind($ty), )+
        }

        impl OptionValue {
            pub fn kind(&self) -> OptionKind {
                match self {
                    $( OptionValue::$kind(_) => OptionKind::$kind, )+
                }
            }

            pub fn display_name_en(&self) -> &'static str {
                match self {
                    $( OptionValue::$kind(v) => v.display_name_en(), )+
                }
            }

            pub fn display_name_ko(&self) -> &'static str {
                match self {
                    $( OptionValue::$kind(v) => v.display_name_ko(), )+
                }
            }
        }

        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    OptionValue::$kind(value)
                }
            }

            impl InstructionValue for $ty {
                const KIND: OptionKind = OptionKind::$kind;

                fn from_value(value: OptionValue) -> Option<Self> {
                    match value {
                        OptionValue::$kind(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )+
    };
}

option_kinds! {
    // 개인 - 볼 소유 시
    Passing(PassingStyle) => "passing", default PassingStyle::Mixed;
    Dribbling(DribblingFrequency) => "dribbling", default DribblingFrequency::Normal;
    Shooting(ShootingTendency) => "shooting", default ShootingTendency::Normal;
    // 개인 - 팀 볼 소유 시
    Mentality(Mentality) => "mentality", default Mentality::Balanced;
    Width(Width) => "width", default Width::Normal;
    Depth(Depth) => "depth", default Depth::Balanced;
    // 개인 - 상대 볼 소유 시
    DefensiveWork(DefensiveWork) => "defensive_work", default DefensiveWork::Normal;
    Pressing(PressingIntensity) => "pressing", default PressingIntensity::Medium;
    Tackling(TacklingStyle) => "tackling", default TacklingStyle::Balanced;
    // 팀 - 볼 소유
    TeamWidth(TeamWidth) => "team_width", default TeamWidth::Normal;
    TeamTempo(TeamTempo) => "team_tempo", default TeamTempo::Normal;
    BuildUp(BuildUpStyle) => "build_up", default BuildUpStyle::Mixed;
    // 팀 - 전환
    OnWinningBall(OnWinningBall) => "on_winning_ball", default OnWinningBall::Balanced;
    OnLosingBall(OnLosingBall) => "on_losing_ball", default OnLosingBall::Balanced;
    GoalkeeperDistribution(GoalkeeperDistribution) => "goalkeeper_distribution", default GoalkeeperDistribution::Balanced;
    // 팀 - 상대 볼 소유
    DefensiveLine(DefensiveLine) => "defensive_line", default DefensiveLine::Normal;
    TeamPressing(TeamPressing) => "team_pressing", default TeamPressing::Medium;
    OffsideTrap(OffsideTrap) => "offside_trap", default OffsideTrap::DontUse;
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.kind(), self.display_name_en())
    }
}

impl OptionValue {
    /// Parse a value from its kind and snake_case/serde name, e.g. ("tackling", "tackle_harder")
    pub fn parse(kind: OptionKind, value: &str) -> Result<OptionValue, String> {
        let tagged = serde_json::json!({ "kind": kind.name(), "value": value });
        serde_json::from_value(tagged)
            .map_err(|e| format!("Invalid value '{}' for {}: {}", value, kind, e))
    }
}
