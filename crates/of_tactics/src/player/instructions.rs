//! Player Instruction Values
//!
//! 개인 선수 전술 지시 항목 - 각 enum이 하나의 Option Kind 값 타입
//! - OnPlayerHasBall: passing / dribbling / shooting
//! - OnTeamHasBall: mentality / width / depth
//! - OnOppositionHasBall: defensive_work / pressing / tackling

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 공격 성향 (전진 빈도)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mentality {
    #[serde(rename = "conservative")]
    Conservative, // 수비 중시
    #[serde(rename = "balanced")]
    Balanced, // 균형
    #[serde(rename = "aggressive")]
    Aggressive, // 공격 중시
}

/// 좌우 포지셔닝
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Width {
    #[serde(rename = "stay_wide")]
    StayWide, // 측면 유지
    #[serde(rename = "normal")]
    Normal, // 보통
    #[serde(rename = "cut_inside")]
    CutInside, // 중앙으로 이동
    #[serde(rename = "roam")]
    Roam, // 자유롭게
}

/// 전후 포지셔닝
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Depth {
    #[serde(rename = "stay_back")]
    StayBack, // 후방 유지
    #[serde(rename = "balanced")]
    Balanced, // 균형
    #[serde(rename = "get_forward")]
    GetForward, // 전방 이동
}

/// 패싱 스타일
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PassingStyle {
    #[serde(rename = "short")]
    Short, // 짧은 패스 위주
    #[serde(rename = "mixed")]
    Mixed, // 혼합
    #[serde(rename = "direct")]
    Direct, // 직접적인 롱패스
}

/// 드리블 빈도
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DribblingFrequency {
    #[serde(rename = "rarely")]
    Rarely, // 거의 안함
    #[serde(rename = "normal")]
    Normal, // 보통
    #[serde(rename = "often")]
    Often, // 자주
}

/// 슈팅 성향
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ShootingTendency {
    #[serde(rename = "conservative")]
    Conservative, // 신중하게
    #[serde(rename = "normal")]
    Normal, // 보통
    #[serde(rename = "shoot_on_sight")]
    ShootOnSight, // 보이면 쏜다
}

/// 수비 기여도
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DefensiveWork {
    #[serde(rename = "minimal")]
    Minimal, // 최소한
    #[serde(rename = "normal")]
    Normal, // 보통
    #[serde(rename = "high")]
    High, // 적극적
}

/// 압박 강도
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PressingIntensity {
    #[serde(rename = "low")]
    Low, // 낮음
    #[serde(rename = "medium")]
    Medium, // 중간
    #[serde(rename = "high")]
    High, // 높음
}

/// 태클 스타일 (선수/팀 공용)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TacklingStyle {
    #[serde(rename = "stay_on_feet")]
    StayOnFeet, // 서서 수비
    #[serde(rename = "balanced")]
    Balanced, // 균형
    #[serde(rename = "tackle_harder")]
    TackleHarder, // 강하게 태클
}

impl Mentality {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Balanced => "Balanced",
            Self::Aggressive => "Aggressive",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Conservative => "신중함",
            Self::Balanced => "균형",
            Self::Aggressive => "공격적",
        }
    }
}

impl Width {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::StayWide => "Stay Wide",
            Self::Normal => "Normal",
            Self::CutInside => "Cut Inside",
            Self::Roam => "Roam",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::StayWide => "측면 유지",
            Self::Normal => "보통",
            Self::CutInside => "중앙 침투",
            Self::Roam => "자유 이동",
        }
    }
}

impl Depth {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::StayBack => "Stay Back",
            Self::Balanced => "Balanced",
            Self::GetForward => "Get Forward",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::StayBack => "후방 유지",
            Self::Balanced => "균형",
            Self::GetForward => "전진",
        }
    }
}

impl PassingStyle {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Short => "Shorter Passes",
            Self::Mixed => "Mixed",
            Self::Direct => "More Direct Passes",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Short => "짧은 패스",
            Self::Mixed => "혼합",
            Self::Direct => "직접 패스",
        }
    }
}

impl DribblingFrequency {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Rarely => "Dribble Less",
            Self::Normal => "Normal",
            Self::Often => "Dribble More",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Rarely => "드리블 자제",
            Self::Normal => "보통",
            Self::Often => "드리블 자주",
        }
    }
}

impl ShootingTendency {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Conservative => "Shoot Less Often",
            Self::Normal => "Normal",
            Self::ShootOnSight => "Shoot On Sight",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Conservative => "슈팅 자제",
            Self::Normal => "보통",
            Self::ShootOnSight => "보이면 슈팅",
        }
    }
}

impl DefensiveWork {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Minimal => "최소한",
            Self::Normal => "보통",
            Self::High => "적극적",
        }
    }
}

impl PressingIntensity {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::Low => "Press Less",
            Self::Medium => "Normal",
            Self::High => "Press More",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::Low => "낮음",
            Self::Medium => "중간",
            Self::High => "높음",
        }
    }
}

impl TacklingStyle {
    pub fn display_name_en(&self) -> &'static str {
        match self {
            Self::StayOnFeet => "Stay On Feet",
            Self::Balanced => "Balanced",
            Self::TackleHarder => "Tackle Harder",
        }
    }

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            Self::StayOnFeet => "서서 수비",
            Self::Balanced => "균형",
            Self::TackleHarder => "강한 태클",
        }
    }
}

// FromStr implementations for all enums

impl FromStr for Mentality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(Mentality::Conservative),
            "balanced" => Ok(Mentality::Balanced),
            "aggressive" => Ok(Mentality::Aggressive),
            _ => Err(format!("Invalid Mentality: {}", s)),
        }
    }
}

impl FromStr for Width {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stay_wide" => Ok(Width::StayWide),
            "normal" => Ok(Width::Normal),
            "cut_inside" => Ok(Width::CutInside),
            "roam" => Ok(Width::Roam),
            _ => Err(format!("Invalid Width: {}", s)),
        }
    }
}

impl FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stay_back" => Ok(Depth::StayBack),
            "balanced" => Ok(Depth::Balanced),
            "get_forward" => Ok(Depth::GetForward),
            _ => Err(format!("Invalid Depth: {}", s)),
        }
    }
}

impl FromStr for PassingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(PassingStyle::Short),
            "mixed" => Ok(PassingStyle::Mixed),
            "direct" => Ok(PassingStyle::Direct),
            _ => Err(format!("Invalid PassingStyle: {}", s)),
        }
    }
}

impl FromStr for DribblingFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rarely" => Ok(DribblingFrequency::Rarely),
            "normal" => Ok(DribblingFrequency::Normal),
            "often" => Ok(DribblingFrequency::Often),
            _ => Err(format!("Invalid DribblingFrequency: {}", s)),
        }
    }
}

impl FromStr for ShootingTendency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(ShootingTendency::Conservative),
            "normal" => Ok(ShootingTendency::Normal),
            "shoot_on_sight" => Ok(ShootingTendency::ShootOnSight),
            _ => Err(format!("Invalid ShootingTendency: {}", s)),
        }
    }
}

impl FromStr for DefensiveWork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(DefensiveWork::Minimal),
            "normal" => Ok(DefensiveWork::Normal),
            "high" => Ok(DefensiveWork::High),
            _ => Err(format!("Invalid DefensiveWork: {}", s)),
        }
    }
}

impl FromStr for PressingIntensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(PressingIntensity::Low),
            "medium" => Ok(PressingIntensity::Medium),
            "high" => Ok(PressingIntensity::High),
            _ => Err(format!("Invalid PressingIntensity: {}", s)),
        }
    }
}

impl FromStr for TacklingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stay_on_feet" => Ok(TacklingStyle::StayOnFeet),
            "balanced" => Ok(TacklingStyle::Balanced),
            "tackle_harder" => Ok(TacklingStyle::TackleHarder),
            _ => Err(format!("Invalid TacklingStyle: {}", s)),
        }
    }
}
