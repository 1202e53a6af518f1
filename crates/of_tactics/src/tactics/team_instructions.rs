//! Team-wide Instruction Values
//!
//! Value types for the three team instruction groups (in possession, in
//! transition, out of possession) plus quick-setup presets.

use crate::instruction::{GroupId, OptionValue};
use crate::player::TacklingStyle;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Defensive line height - affects offside trap potential and space behind defense
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DefensiveLine {
    /// Very high line - constant offside trap, aggressive pressing
    VeryHigh,
    /// High line - proactive positioning, good for pressing
    High,
    /// Normal line - balanced positioning
    Normal,
    /// Deep line - conservative, more space in front
    Deep,
    /// Very deep line - extreme counter-attack setup
    VeryDeep,
}

impl DefensiveLine {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::VeryHigh => "매우 높음",
            Self::High => "높음",
            Self::Normal => "보통",
            Self::Deep => "낮음",
            Self::VeryDeep => "매우 낮음",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Deep => "Deep",
            Self::VeryDeep => "Very Deep",
        }
    }
}

/// Team width - affects spacing between players and pitch coverage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamWidth {
    VeryWide,
    Wide,
    Normal,
    Narrow,
    VeryNarrow,
}

impl TeamWidth {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::VeryWide => "매우 넓음",
            Self::Wide => "넓음",
            Self::Normal => "보통",
            Self::Narrow => "좁음",
            Self::VeryNarrow => "매우 좁음",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::VeryWide => "Very Wide",
            Self::Wide => "Wide",
            Self::Normal => "Normal",
            Self::Narrow => "Narrow",
            Self::VeryNarrow => "Very Narrow",
        }
    }
}

/// Team tempo - affects speed of transitions and build-up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamTempo {
    VeryFast,
    Fast,
    Normal,
    Slow,
    VerySlow,
}

impl TeamTempo {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::VeryFast => "매우 빠름",
            Self::Fast => "빠름",
            Self::Normal => "보통",
            Self::Slow => "느림",
            Self::VerySlow => "매우 느림",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::VeryFast => "Very Fast",
            Self::Fast => "Fast",
            Self::Normal => "Normal",
            Self::Slow => "Slow",
            Self::VerySlow => "Very Slow",
        }
    }
}

/// Team-wide pressing intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamPressing {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl TeamPressing {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::VeryHigh => "매우 강함",
            Self::High => "강함",
            Self::Medium => "보통",
            Self::Low => "약함",
            Self::VeryLow => "매우 약함",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

/// Build-up style from defense
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuildUpStyle {
    /// Short passing from back
    Short,
    /// Mixed approach
    Mixed,
    /// Direct/long balls
    Direct,
}

impl BuildUpStyle {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Short => "짧은 패스",
            Self::Mixed => "혼합",
            Self::Direct => "직접",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Short => "Short Passing",
            Self::Mixed => "Mixed",
            Self::Direct => "Direct",
        }
    }
}

/// What the team does the moment it wins the ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OnWinningBall {
    Counter,
    Balanced,
    HoldShape,
}

impl OnWinningBall {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Counter => "역습",
            Self::Balanced => "균형",
            Self::HoldShape => "대형 유지",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Counter => "Counter",
            Self::Balanced => "Balanced",
            Self::HoldShape => "Hold Shape",
        }
    }
}

/// What the team does the moment it loses the ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OnLosingBall {
    CounterPress,
    Balanced,
    Regroup,
}

impl OnLosingBall {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::CounterPress => "즉시 압박",
            Self::Balanced => "균형",
            Self::Regroup => "재정비",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::CounterPress => "Counter-Press",
            Self::Balanced => "Balanced",
            Self::Regroup => "Regroup",
        }
    }
}

/// Goalkeeper restarts after claiming the ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalkeeperDistribution {
    DistributeQuickly,
    Balanced,
    SlowPaceDown,
}

impl GoalkeeperDistribution {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::DistributeQuickly => "빠른 배급",
            Self::Balanced => "균형",
            Self::SlowPaceDown => "템포 조절",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::DistributeQuickly => "Distribute Quickly",
            Self::Balanced => "Balanced",
            Self::SlowPaceDown => "Slow Pace Down",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OffsideTrap {
    Use,
    DontUse,
}

impl OffsideTrap {
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Use => "사용",
            Self::DontUse => "사용 안함",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Use => "Use Offside Trap",
            Self::DontUse => "No Offside Trap",
        }
    }
}

/// Tactical presets for quick setup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TacticalPreset {
    /// High defensive line, intense pressing, fast tempo
    HighPressing,
    /// Deep line, direct play, counter-attacks
    Counterattack,
    /// High line, slow tempo, short passing
    Possession,
    /// Balanced approach
    Balanced,
    /// Very deep, low pressing, direct
    Defensive,
}

impl TacticalPreset {
    pub const ALL: [TacticalPreset; 5] = [
        Self::HighPressing,
        Self::Counterattack,
        Self::Possession,
        Self::Balanced,
        Self::Defensive,
    ];

    /// Values this preset writes into a team profile, grouped by target group
    pub fn values(&self) -> Vec<(GroupId, OptionValue)> {
        use GroupId::{InPossession, InTransition, OutOfPossession};

        let (line, width, tempo, pressing, build_up, trap, on_win, on_loss) = match self {
            Self::HighPressing => (
                DefensiveLine::VeryHigh,
                TeamWidth::Wide,
                TeamTempo::VeryFast,
                TeamPressing::VeryHigh,
                BuildUpStyle::Short,
                OffsideTrap::Use, // 높은 라인 + 트랩
                OnWinningBall::Counter,
                OnLosingBall::CounterPress,
            ),
            Self::Counterattack => (
                DefensiveLine::Deep,
                TeamWidth::Narrow,
                TeamTempo::Fast,
                TeamPressing::Low,
                BuildUpStyle::Direct,
                OffsideTrap::DontUse, // 낮은 라인은 트랩 안함
                OnWinningBall::Counter,
                OnLosingBall::Regroup,
            ),
            Self::Possession => (
                DefensiveLine::High,
                TeamWidth::Wide,
                TeamTempo::Slow,
                TeamPressing::Medium,
                BuildUpStyle::Short,
                OffsideTrap::Use,
                OnWinningBall::HoldShape,
                OnLosingBall::CounterPress,
            ),
            Self::Balanced => (
                DefensiveLine::Normal,
                TeamWidth::Normal,
                TeamTempo::Normal,
                TeamPressing::Medium,
                BuildUpStyle::Mixed,
                OffsideTrap::DontUse,
                OnWinningBall::Balanced,
                OnLosingBall::Balanced,
            ),
            Self::Defensive => (
                DefensiveLine::VeryDeep,
                TeamWidth::Narrow,
                TeamTempo::Normal,
                TeamPressing::Low,
                BuildUpStyle::Direct,
                OffsideTrap::DontUse,
                OnWinningBall::HoldShape,
                OnLosingBall::Regroup,
            ),
        };

        let tackling = match self {
            Self::HighPressing => TacklingStyle::TackleHarder,
            Self::Defensive => TacklingStyle::StayOnFeet,
            _ => TacklingStyle::Balanced,
        };

        vec![
            (InPossession, width.into()),
            (InPossession, tempo.into()),
            (InPossession, build_up.into()),
            (InTransition, on_win.into()),
            (InTransition, on_loss.into()),
            (OutOfPossession, line.into()),
            (OutOfPossession, pressing.into()),
            (OutOfPossession, trap.into()),
            (OutOfPossession, tackling.into()),
        ]
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::HighPressing => "높은 압박",
            Self::Counterattack => "역습",
            Self::Possession => "점유율",
            Self::Balanced => "균형",
            Self::Defensive => "수비적",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::HighPressing => "high_pressing",
            Self::Counterattack => "counterattack",
            Self::Possession => "possession",
            Self::Balanced => "balanced",
            Self::Defensive => "defensive",
        }
    }

    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::HighPressing => "High Pressing",
            Self::Counterattack => "Counterattack",
            Self::Possession => "Possession",
            Self::Balanced => "Balanced",
            Self::Defensive => "Defensive",
        }
    }
}

// FromStr over the serde (snake_case) names

impl FromStr for DefensiveLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very_high" => Ok(DefensiveLine::VeryHigh),
            "high" => Ok(DefensiveLine::High),
            "normal" => Ok(DefensiveLine::Normal),
            "deep" => Ok(DefensiveLine::Deep),
            "very_deep" => Ok(DefensiveLine::VeryDeep),
            _ => Err(format!("Invalid DefensiveLine: {}", s)),
        }
    }
}

impl FromStr for TeamWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very_wide" => Ok(TeamWidth::VeryWide),
            "wide" => Ok(TeamWidth::Wide),
            "normal" => Ok(TeamWidth::Normal),
            "narrow" => Ok(TeamWidth::Narrow),
            "very_narrow" => Ok(TeamWidth::VeryNarrow),
            _ => Err(format!("Invalid TeamWidth: {}", s)),
        }
    }
}

impl FromStr for TeamTempo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very_fast" => Ok(TeamTempo::VeryFast),
            "fast" => Ok(TeamTempo::Fast),
            "normal" => Ok(TeamTempo::Normal),
            "slow" => Ok(TeamTempo::Slow),
            "very_slow" => Ok(TeamTempo::VerySlow),
            _ => Err(format!("Invalid TeamTempo: {}", s)),
        }
    }
}

impl FromStr for TeamPressing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very_high" => Ok(TeamPressing::VeryHigh),
            "high" => Ok(TeamPressing::High),
            "medium" => Ok(TeamPressing::Medium),
            "low" => Ok(TeamPressing::Low),
            "very_low" => Ok(TeamPressing::VeryLow),
            _ => Err(format!("Invalid TeamPressing: {}", s)),
        }
    }
}

impl FromStr for BuildUpStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(BuildUpStyle::Short),
            "mixed" => Ok(BuildUpStyle::Mixed),
            "direct" => Ok(BuildUpStyle::Direct),
            _ => Err(format!("Invalid BuildUpStyle: {}", s)),
        }
    }
}

impl FromStr for OnWinningBall {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter" => Ok(OnWinningBall::Counter),
            "balanced" => Ok(OnWinningBall::Balanced),
            "hold_shape" => Ok(OnWinningBall::HoldShape),
            _ => Err(format!("Invalid OnWinningBall: {}", s)),
        }
    }
}

impl FromStr for OnLosingBall {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter_press" => Ok(OnLosingBall::CounterPress),
            "balanced" => Ok(OnLosingBall::Balanced),
            "regroup" => Ok(OnLosingBall::Regroup),
            _ => Err(format!("Invalid OnLosingBall: {}", s)),
        }
    }
}

impl FromStr for GoalkeeperDistribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distribute_quickly" => Ok(GoalkeeperDistribution::DistributeQuickly),
            "balanced" => Ok(GoalkeeperDistribution::Balanced),
            "slow_pace_down" => Ok(GoalkeeperDistribution::SlowPaceDown),
            _ => Err(format!("Invalid GoalkeeperDistribution: {}", s)),
        }
    }
}

impl FromStr for OffsideTrap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "use" => Ok(OffsideTrap::Use),
            "dont_use" => Ok(OffsideTrap::DontUse),
            _ => Err(format!("Invalid OffsideTrap: {}", s)),
        }
    }
}

impl FromStr for TacticalPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TacticalPreset::ALL
            .iter()
            .find(|preset| preset.name() == s)
            .copied()
            .ok_or_else(|| format!("Invalid TacticalPreset: {}", s))
    }
}
