//! Positions, player roles and the instructions each role mandates

use crate::instruction::{OptionKind, OptionValue, RequiredPolicy};
use crate::player::{
    DefensiveWork, Depth, DribblingFrequency, Mentality, PassingStyle, PressingIntensity,
    ShootingTendency, TacklingStyle,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    LB,
    CB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
    // Generic positions
    DF,
    MF,
    FW,
}

impl Position {
    pub const ALL: [Position; 18] = [
        Position::GK,
        Position::LB,
        Position::CB,
        Position::RB,
        Position::LWB,
        Position::RWB,
        Position::CDM,
        Position::CM,
        Position::CAM,
        Position::LM,
        Position::RM,
        Position::LW,
        Position::RW,
        Position::CF,
        Position::ST,
        Position::DF,
        Position::MF,
        Position::FW,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::RB => "RB",
            Position::LWB => "LWB",
            Position::RWB => "RWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::LM => "LM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(
            self,
            Position::LB
                | Position::CB
                | Position::RB
                | Position::LWB
                | Position::RWB
                | Position::DF
        )
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(
            self,
            Position::CDM
                | Position::CM
                | Position::CAM
                | Position::LM
                | Position::RM
                | Position::MF
        )
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::LW | Position::RW | Position::CF | Position::ST | Position::FW)
    }

    /// Option kinds a player in this position can never be given
    pub fn excluded_kinds(&self) -> &'static [OptionKind] {
        match self {
            // 골키퍼는 드리블/슈팅/전진/압박 불가
            Position::GK => &[
                OptionKind::Dribbling,
                OptionKind::Shooting,
                OptionKind::Mentality,
                OptionKind::Width,
                OptionKind::Depth,
                OptionKind::Pressing,
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Position::ALL
            .iter()
            .find(|p| p.code() == upper)
            .copied()
            .ok_or_else(|| format!("Invalid Position: {}", s))
    }
}

/// Role = 필수 지시의 Preset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    // ===== Forward Roles =====
    TargetMan,       // 타겟맨: 강력한 피지컬, 헤딩 중심
    Poacher,         // 포처: 골만 노리는 순수 스트라이커
    CompleteForward, // 컴플리트 포워드: 균형잡힌 공격수

    // ===== Midfielder Roles =====
    Playmaker,   // 플레이메이커: 패싱과 빌드업 중심
    BoxToBox,    // 박스투박스: 공수 균형형 미드필더
    BallWinning, // 볼 위닝: 수비형 미드필더

    // ===== Defender Roles =====
    BallPlayingDefender, // 빌드업형 수비수
    Stopper,             // 태클 중심 수비수
    CoveringDefender,    // 커버링 중심 수비수
}

/// One mandated value. `policy: None` uses the profile's configured policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub value: OptionValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<RequiredPolicy>,
}

/// Values a role marks Required on a player profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTemplate {
    pub entries: Vec<TemplateEntry>,
}

impl RoleTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, value: impl Into<OptionValue>) -> Self {
        self.entries.push(TemplateEntry { value: value.into(), policy: None });
        self
    }

    /// Required, but the coach may still pick a different value
    pub fn require_editable(mut self, value: impl Into<OptionValue>) -> Self {
        self.entries
            .push(TemplateEntry { value: value.into(), policy: Some(RequiredPolicy::Editable) });
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = OptionKind> + '_ {
        self.entries.iter().map(|e| e.value.kind())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PlayerRole {
    pub const ALL: [PlayerRole; 9] = [
        PlayerRole::TargetMan,
        PlayerRole::Poacher,
        PlayerRole::CompleteForward,
        PlayerRole::Playmaker,
        PlayerRole::BoxToBox,
        PlayerRole::BallWinning,
        PlayerRole::BallPlayingDefender,
        PlayerRole::Stopper,
        PlayerRole::CoveringDefender,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlayerRole::TargetMan => "target_man",
            PlayerRole::Poacher => "poacher",
            PlayerRole::CompleteForward => "complete_forward",
            PlayerRole::Playmaker => "playmaker",
            PlayerRole::BoxToBox => "box_to_box",
            PlayerRole::BallWinning => "ball_winning",
            PlayerRole::BallPlayingDefender => "ball_playing_defender",
            PlayerRole::Stopper => "stopper",
            PlayerRole::CoveringDefender => "covering_defender",
        }
    }

    /// Role이 강제하는 지시 (Required)
    pub fn template(&self) -> RoleTemplate {
        match self {
            // ===== Forward Roles =====
            PlayerRole::TargetMan => RoleTemplate::new()
                .require(DribblingFrequency::Rarely)
                .require(Depth::GetForward),
            PlayerRole::Poacher => RoleTemplate::new()
                .require(DefensiveWork::Minimal)
                .require(Depth::GetForward)
                .require(ShootingTendency::ShootOnSight),
            PlayerRole::CompleteForward => RoleTemplate::new().require(Mentality::Aggressive),

            // ===== Midfielder Roles =====
            // 패스 방식은 필수지만 감독이 선택
            PlayerRole::Playmaker => RoleTemplate::new().require_editable(PassingStyle::Mixed),
            PlayerRole::BoxToBox => RoleTemplate::new()
                .require(DefensiveWork::High)
                .require(Depth::Balanced),
            PlayerRole::BallWinning => RoleTemplate::new()
                .require(TacklingStyle::TackleHarder)
                .require(PressingIntensity::High),

            // ===== Defender Roles =====
            PlayerRole::BallPlayingDefender => RoleTemplate::new()
                .require_editable(PassingStyle::Mixed)
                .require(Depth::StayBack),
            PlayerRole::Stopper => RoleTemplate::new()
                .require(TacklingStyle::TackleHarder)
                .require(Depth::StayBack),
            PlayerRole::CoveringDefender => RoleTemplate::new()
                .require(TacklingStyle::StayOnFeet)
                .require(PressingIntensity::Low)
                .require(Depth::StayBack),
        }
    }

    /// Role 이름 (한글)
    pub fn display_name_ko(&self) -> &'static str {
        match self {
            PlayerRole::TargetMan => "타겟맨",
            PlayerRole::Poacher => "포처",
            PlayerRole::CompleteForward => "컴플리트 포워드",
            PlayerRole::Playmaker => "플레이메이커",
            PlayerRole::BoxToBox => "박스투박스",
            PlayerRole::BallWinning => "볼위닝 미드필더",
            PlayerRole::BallPlayingDefender => "빌드업형 수비수",
            PlayerRole::Stopper => "스토퍼",
            PlayerRole::CoveringDefender => "커버링 수비수",
        }
    }

    /// Role 설명 (한글)
    pub fn description_ko(&self) -> &'static str {
        match self {
            PlayerRole::TargetMan => "강력한 피지컬과 헤딩으로 공을 받아 연결하는 타겟맨",
            PlayerRole::Poacher => "골 결정력에 집중하는 순수 스트라이커",
            PlayerRole::CompleteForward => "공격의 모든 면에서 균형잡힌 포워드",
            PlayerRole::Playmaker => "패싱과 비전으로 공격을 조율하는 플레이메이커",
            PlayerRole::BoxToBox => "공수 양쪽에서 활약하는 만능 미드필더",
            PlayerRole::BallWinning => "수비에 집중하며 볼을 탈취하는 미드필더",
            PlayerRole::BallPlayingDefender => "패싱으로 빌드업을 시작하는 수비수",
            PlayerRole::Stopper => "적극적인 태클로 공격을 차단하는 수비수",
            PlayerRole::CoveringDefender => "포지셔닝으로 공간을 커버하는 수비수",
        }
    }

    /// 이 Role이 적합한 포지션들 반환
    pub fn suitable_positions(&self) -> &'static [Position] {
        match self {
            // Forward roles - 공격수 전용
            PlayerRole::TargetMan | PlayerRole::Poacher | PlayerRole::CompleteForward => {
                &[Position::ST, Position::CF, Position::FW]
            }

            // Midfielder roles - 미드필더용
            PlayerRole::Playmaker => &[Position::CAM, Position::CM, Position::RM, Position::LM],
            PlayerRole::BoxToBox => &[Position::CM, Position::CDM, Position::MF],
            PlayerRole::BallWinning => &[Position::CDM, Position::CM, Position::MF],

            // Defender roles - 수비수용
            PlayerRole::BallPlayingDefender
            | PlayerRole::Stopper
            | PlayerRole::CoveringDefender => &[
                Position::CB,
                Position::LB,
                Position::RB,
                Position::LWB,
                Position::RWB,
                Position::DF,
            ],
        }
    }

    /// 주어진 포지션에 적합한지 확인
    pub fn is_suitable_for(&self, position: Position) -> bool {
        self.suitable_positions().contains(&position)
    }

    /// 특정 포지션에 사용 가능한 모든 Role 반환
    pub fn available_for_position(position: Position) -> Vec<PlayerRole> {
        PlayerRole::ALL.into_iter().filter(|role| role.is_suitable_for(position)).collect()
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerRole::ALL
            .iter()
            .find(|role| role.name() == s)
            .copied()
            .ok_or_else(|| format!("Invalid PlayerRole: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_suitability() {
        assert!(PlayerRole::Stopper.is_suitable_for(Position::CB));
        assert!(!PlayerRole::Stopper.is_suitable_for(Position::ST));
        assert!(PlayerRole::available_for_position(Position::GK).is_empty());

        let midfield = PlayerRole::available_for_position(Position::CM);
        assert!(midfield.contains(&PlayerRole::Playmaker));
        assert!(midfield.contains(&PlayerRole::BoxToBox));
        assert!(midfield.contains(&PlayerRole::BallWinning));
    }

    #[test]
    fn test_templates_never_repeat_a_kind() {
        for role in PlayerRole::ALL {
            let mut kinds: Vec<OptionKind> = role.template().kinds().collect();
            let total = kinds.len();
            kinds.sort();
            kinds.dedup();
            assert_eq!(kinds.len(), total, "{} repeats a kind", role);
            assert!(!role.template().is_empty());
        }
    }

    #[test]
    fn test_templates_avoid_kinds_excluded_by_position() {
        for role in PlayerRole::ALL {
            for position in role.suitable_positions() {
                let excluded = position.excluded_kinds();
                assert!(role.template().kinds().all(|k| !excluded.contains(&k)));
            }
        }
    }

    #[test]
    fn test_playmaker_passing_is_editable() {
        let template = PlayerRole::Playmaker.template();
        assert_eq!(template.entries[0].policy, Some(RequiredPolicy::Editable));
        assert_eq!(PlayerRole::Stopper.template().entries[0].policy, None);
    }

    #[test]
    fn test_names_and_serde_agree() {
        for role in PlayerRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.name()));
            assert_eq!(role.name().parse::<PlayerRole>(), Ok(role));
        }
        assert_eq!("cdm".parse::<Position>(), Ok(Position::CDM));
        assert_eq!(serde_json::to_string(&Position::LWB).unwrap(), "\"LWB\"");
    }
}
