use super::error::SnapshotError;
use crate::choice::{ChanceCreation, ChoiceOption, ChoiceSet, PlayFocus};
use crate::config::SnapshotConfig;
use crate::instruction::{Availability, GroupId, OptionKind, OptionValue, RequiredPolicy};
use crate::player::PlayerRole;
use crate::tactics::ProfileScope;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

pub const SNAPSHOT_VERSION: u32 = 1;

const SIZE_PREFIX_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

/// Serialized form of one `TacticProfile`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TacticSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Snapshot timestamp (unix milliseconds)
    pub timestamp: u64,

    pub id: Uuid,
    pub name: String,
    pub scope: ProfileScope,

    #[serde(default)]
    pub role: Option<PlayerRole>,

    pub groups: Vec<GroupSnapshot>,

    #[serde(default)]
    pub choice_sets: ChoiceSetsSnapshot,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub id: GroupId,
    pub slots: Vec<SlotSnapshot>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub kind: OptionKind,
    pub availability: Availability,
    pub policy: RequiredPolicy,
    #[serde(default)]
    pub value: Option<OptionValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSetSnapshot<C> {
    pub chosen: Vec<C>,
    pub unavailable: Vec<C>,
}

impl<C: ChoiceOption> ChoiceSetSnapshot<C> {
    pub fn from_set(set: &ChoiceSet<C>) -> Self {
        Self {
            chosen: set.chosen().iter().copied().collect(),
            unavailable: set.unavailable().iter().copied().collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSetsSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_focus: Option<ChoiceSetSnapshot<PlayFocus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance_creation: Option<ChoiceSetSnapshot<ChanceCreation>>,
}

impl TacticSnapshot {
    pub fn format_timestamp(&self) -> String {
        use time::format_description::well_known::Rfc3339;

        let timestamp =
            OffsetDateTime::from_unix_timestamp_nanos((self.timestamp as i128) * 1_000_000)
                .unwrap_or_else(|_| OffsetDateTime::now_utc());

        timestamp.format(&Rfc3339).unwrap_or_else(|_| "Unknown".to_string())
    }
}

pub fn to_json(snapshot: &TacticSnapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(json: &str) -> Result<TacticSnapshot, SnapshotError> {
    let snapshot: TacticSnapshot = serde_json::from_str(json)?;
    check_version(snapshot.version)?;
    Ok(snapshot)
}

/// MessagePack (named fields) -> LZ4 (size prepended) -> SHA-256 appended
pub fn encode_binary(snapshot: &TacticSnapshot) -> Result<Vec<u8>, SnapshotError> {
    let msgpack = to_vec_named(snapshot)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

pub fn decode_binary(bytes: &[u8], config: &SnapshotConfig) -> Result<TacticSnapshot, SnapshotError> {
    if bytes.len() < SIZE_PREFIX_LEN + CHECKSUM_LEN {
        return Err(SnapshotError::Corrupted);
    }
    if bytes.len() > config.max_bytes {
        return Err(SnapshotError::DataTooLarge { size: bytes.len(), limit: config.max_bytes });
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    if config.verify_checksum {
        let mut hasher = Sha256::new();
        hasher.update(payload);
        let calculated_checksum = hasher.finalize();

        if &calculated_checksum[..] != checksum_bytes {
            return Err(SnapshotError::ChecksumMismatch);
        }
    }

    // 압축 해제 전에 선언된 크기 확인
    let mut prefix = [0u8; SIZE_PREFIX_LEN];
    prefix.copy_from_slice(&payload[..SIZE_PREFIX_LEN]);
    let declared = u32::from_le_bytes(prefix) as usize;
    if declared > config.max_bytes {
        return Err(SnapshotError::DataTooLarge { size: declared, limit: config.max_bytes });
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SnapshotError::Decompression)?;
    let snapshot: TacticSnapshot = from_slice(&msgpack)?;
    check_version(snapshot.version)?;

    Ok(snapshot)
}

fn check_version(found: u32) -> Result<(), SnapshotError> {
    if found > SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch { found, expected: SNAPSHOT_VERSION });
    }
    Ok(())
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TacticsConfig;
    use crate::tactics::{TacticProfile, TacticalPreset};

    fn sample() -> TacticSnapshot {
        let mut profile = TacticProfile::team("Test FC", TacticsConfig::default()).unwrap();
        profile.apply_preset(TacticalPreset::Possession).unwrap();
        profile.add_choice(ChanceCreation::ShootOnSight).unwrap();
        profile.add_choice(PlayFocus::OverlapLeft).unwrap();
        profile.snapshot()
    }

    #[test]
    fn test_binary_roundtrip() {
        let snapshot = sample();
        let bytes = encode_binary(&snapshot).unwrap();
        let decoded = decode_binary(&bytes, &SnapshotConfig::default()).unwrap();
        assert_eq!(decoded, snapshot);

        let restored = TacticProfile::restore(&decoded, TacticsConfig::default()).unwrap();
        assert_eq!(restored.snapshot().groups, snapshot.groups);
    }

    #[test]
    fn test_json_roundtrip() {
        let snapshot = sample();
        let json = to_json(&snapshot).unwrap();
        assert!(json.contains("\"kind\": \"team_tempo\""));
        assert_eq!(from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_checksum_validation() {
        let mut bytes = encode_binary(&sample()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decode_binary(&bytes, &SnapshotConfig::default());
        assert!(matches!(result, Err(SnapshotError::ChecksumMismatch)));

        // 체크섬 검증을 끄면 페이로드는 정상
        let lenient = SnapshotConfig { verify_checksum: false, ..SnapshotConfig::default() };
        assert!(decode_binary(&bytes, &lenient).is_ok());
    }

    #[test]
    fn test_size_limit() {
        let bytes = encode_binary(&sample()).unwrap();
        let tight = SnapshotConfig { max_bytes: 16, ..SnapshotConfig::default() };
        assert!(matches!(decode_binary(&bytes, &tight), Err(SnapshotError::DataTooLarge { .. })));
        assert!(matches!(
            decode_binary(&[0u8; 8], &SnapshotConfig::default()),
            Err(SnapshotError::Corrupted)
        ));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut snapshot = sample();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let bytes = encode_binary(&snapshot).unwrap();

        let result = decode_binary(&bytes, &SnapshotConfig::default());
        assert!(matches!(result, Err(SnapshotError::VersionMismatch { found: 2, expected: 1 })));
    }

    #[test]
    fn test_timestamp_formatting() {
        let mut snapshot = sample();
        snapshot.timestamp = 0;
        assert_eq!(snapshot.format_timestamp(), "1970-01-01T00:00:00Z");
    }
}
