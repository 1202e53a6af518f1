//! # Tactics Engine Configuration
//!
//! 전술 엔진 설정.
//!
//! ## 사용법
//! ```rust
//! use of_tactics::config::TacticsConfig;
//!
//! let config = TacticsConfig::default();
//! let relaxed = TacticsConfig::relaxed();
//! assert!(config.validate().is_ok());
//! ```

use crate::instruction::RequiredPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "OF_TACTICS_CONFIG_PATH";

/// Binary snapshots larger than this are refused on decode
pub const DEFAULT_MAX_SNAPSHOT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotFormat {
    Json,
    #[default]
    Binary,
}

impl SnapshotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Binary => "oftx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub format: SnapshotFormat,
    pub verify_checksum: bool,
    pub max_bytes: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            format: SnapshotFormat::Binary,
            verify_checksum: true,
            max_bytes: DEFAULT_MAX_SNAPSHOT_BYTES,
        }
    }
}

/// 전체 설정
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticsConfig {
    /// Write policy for Required slots that do not name their own
    pub required_policy: RequiredPolicy,
    pub snapshot: SnapshotConfig,
}

impl TacticsConfig {
    /// 역할 지시 고정 (기본)
    pub fn strict() -> Self {
        Self::default()
    }

    /// 역할 지시도 감독이 변경 가능
    pub fn relaxed() -> Self {
        Self { required_policy: RequiredPolicy::Editable, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.snapshot.max_bytes == 0 {
            return Err("snapshot.max_bytes must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load by extension: `.yaml`/`.yml` as YAML, anything else as JSON
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read tactics config '{}': {e}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml { Self::from_yaml(&content) } else { Self::from_json(&content) }
            .map_err(|e| format!("Failed to parse tactics config '{}': {e}", path.display()))?;

        config
            .validate()
            .map_err(|e| format!("Invalid tactics config '{}': {e}", path.display()))?;
        Ok(config)
    }

    /// Read the path from `OF_TACTICS_CONFIG_PATH`; unset or blank gives defaults
    pub fn from_env() -> Result<Self, String> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_path(path).map_err(|e| format!("{CONFIG_PATH_ENV}='{path}': {e}"))
    }
}
