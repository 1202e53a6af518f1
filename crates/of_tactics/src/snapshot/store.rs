use super::error::SnapshotError;
use super::format::{decode_binary, encode_binary, from_json, to_json, TacticSnapshot};
use crate::config::{SnapshotConfig, SnapshotFormat, TacticsConfig};
use crate::tactics::TacticProfile;

use std::fs::{self, remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Directory of profile snapshots, one file per profile name
pub struct TacticStore {
    dir: PathBuf,
    config: SnapshotConfig,
}

impl TacticStore {
    pub fn new(dir: impl Into<PathBuf>, config: SnapshotConfig) -> Self {
        Self { dir: dir.into(), config }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a profile under its own name
    pub fn save(&self, profile: &TacticProfile) -> Result<PathBuf, SnapshotError> {
        self.save_snapshot(&profile.snapshot())
    }

    pub fn save_snapshot(&self, snapshot: &TacticSnapshot) -> Result<PathBuf, SnapshotError> {
        let path = self.path_for(&snapshot.name)?;
        write_snapshot_file(&path, snapshot, self.config.format)?;
        log::info!("Tactic '{}' saved to {:?}", snapshot.name, path);
        Ok(path)
    }

    pub fn load_snapshot(&self, name: &str) -> Result<TacticSnapshot, SnapshotError> {
        let path = self.path_for(name)?;
        read_snapshot_file(&path, &self.config)
    }

    /// Load and restore a profile. Invalid snapshots are rejected, not repaired.
    pub fn load(&self, name: &str, config: TacticsConfig) -> Result<TacticProfile, SnapshotError> {
        let snapshot = self.load_snapshot(name)?;
        let profile = TacticProfile::restore(&snapshot, config)?;
        log::info!("Tactic '{}' loaded", name);
        Ok(profile)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|path| path.exists()).unwrap_or(false)
    }

    pub fn delete(&self, name: &str) -> Result<(), SnapshotError> {
        let path = self.path_for(name)?;
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted tactic '{}'", name);
        }
        Ok(())
    }

    /// Stored profile names, sorted
    pub fn list(&self) -> Result<Vec<String>, SnapshotError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let extension = self.config.format.extension();
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SnapshotError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, self.config.format.extension())))
    }
}

fn validate_name(name: &str) -> Result<(), SnapshotError> {
    let valid = !name.trim().is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '));
    if !valid {
        return Err(SnapshotError::InvalidName { name: name.to_string() });
    }
    Ok(())
}

/// Format chosen by extension: `.json` is JSON, anything else binary
pub fn format_for_path(path: &Path) -> SnapshotFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => SnapshotFormat::Json,
        _ => SnapshotFormat::Binary,
    }
}

pub fn write_snapshot_file(
    path: &Path,
    snapshot: &TacticSnapshot,
    format: SnapshotFormat,
) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = match format {
        SnapshotFormat::Json => to_json(snapshot)?.into_bytes(),
        SnapshotFormat::Binary => encode_binary(snapshot)?,
    };

    // Atomic save: write to temp file, then rename
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.flush()?;
        file.sync_all()?;
    }
    rename(&temp_path, path)?;

    log::debug!("Saved {} bytes to {:?}", data.len(), path);
    Ok(())
}

pub fn read_snapshot_file(path: &Path, config: &SnapshotConfig) -> Result<TacticSnapshot, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::FileNotFound { path: path.display().to_string() });
    }

    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;

    let snapshot = match format_for_path(path) {
        SnapshotFormat::Json => {
            if data.len() > config.max_bytes {
                return Err(SnapshotError::DataTooLarge { size: data.len(), limit: config.max_bytes });
            }
            let text = std::str::from_utf8(&data).map_err(|_| SnapshotError::Corrupted)?;
            from_json(text)?
        }
        SnapshotFormat::Binary => decode_binary(&data, config)?,
    };

    log::debug!("Loaded {} bytes from {:?}", data.len(), path);
    Ok(snapshot)
}
