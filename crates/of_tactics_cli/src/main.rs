//! Tactics CLI
//!
//! 전술 스냅샷 생성/조회/편집 도구
//! JSON ↔ MessagePack+LZ4 변환

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use of_tactics::snapshot::{format_for_path, read_snapshot_file, write_snapshot_file};
#[cfg(feature = "cli")]
use of_tactics::{
    apply_command, ChanceCreation, ChoiceOption, EditCommand, PlayFocus, PlayerRole, Position,
    SnapshotFormat, TacticProfile, TacticalPreset, TacticsConfig,
};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing::{info, Level};
#[cfg(feature = "cli")]
use tracing_subscriber::FmtSubscriber;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "of_tactics")]
#[command(about = "Author and inspect tactic snapshots", long_about = None)]
struct Cli {
    /// Log library decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Create a new team or player profile
    New {
        /// Profile name
        name: String,

        /// Player position (e.g., "CB"); omit for a team profile
        #[arg(long)]
        position: Option<Position>,

        /// Player role (e.g., "stopper")
        #[arg(long)]
        role: Option<PlayerRole>,

        /// Team preset (e.g., "high_pressing")
        #[arg(long)]
        preset: Option<TacticalPreset>,

        /// Output snapshot path (.json or .oftx)
        #[arg(long)]
        out: PathBuf,
    },

    /// Print a profile
    Show {
        path: PathBuf,
    },

    /// Apply one JSON edit command
    Edit {
        path: PathBuf,

        /// e.g. '{"op":"add_choice","choice":{"set":"play_focus","option":"left_flank"}}'
        command: String,

        /// Write the result here instead of overwriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a snapshot restores and every Required slot holds a value
    Validate {
        path: PathBuf,
    },

    /// Convert a JSON snapshot to binary
    Pack {
        #[arg(long)]
        r#in: PathBuf,

        #[arg(long)]
        out: PathBuf,
    },

    /// Convert a binary snapshot to JSON
    Unpack {
        #[arg(long)]
        r#in: PathBuf,

        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    let config = TacticsConfig::from_env().map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::New { name, position, role, preset, out } => {
            let mut profile = match position {
                Some(position) => TacticProfile::player(name, position, config)?,
                None => TacticProfile::team(name, config)?,
            };
            if let Some(role) = role {
                profile.assign_role(role)?;
            }
            if let Some(preset) = preset {
                profile.apply_preset(preset)?;
            }

            save_profile(&profile, &out)?;
            println!("✅ Created {} ({})", profile.name(), profile.scope());
            println!("   Output: {}", out.display());
        }

        Commands::Show { path } => {
            let profile = load_profile(&path, &config)?;
            print_profile(&profile);
        }

        Commands::Edit { path, command, out } => {
            let mut profile = load_profile(&path, &config)?;
            let command: EditCommand =
                serde_json::from_str(&command).context("Invalid edit command JSON")?;

            let outcome = apply_command(&mut profile, command)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);

            if outcome.changed {
                let target = out.unwrap_or(path);
                save_profile(&profile, &target)?;
                info!("Saved edited profile to {}", target.display());
            }
        }

        Commands::Validate { path } => {
            let profile = load_profile(&path, &config)?;
            let incomplete = profile.validate();
            if !incomplete.is_empty() {
                let names: Vec<&str> = incomplete.iter().map(|g| g.name()).collect();
                anyhow::bail!("❌ Required slots without value in: {}", names.join(", "));
            }
            println!("✅ {} is valid", profile.name());
        }

        Commands::Pack { r#in, out } => {
            convert(&r#in, &out, SnapshotFormat::Json, SnapshotFormat::Binary, &config)?;
        }

        Commands::Unpack { r#in, out } => {
            convert(&r#in, &out, SnapshotFormat::Binary, SnapshotFormat::Json, &config)?;
        }
    }

    Ok(())
}

/// Read and restore; restore rejects anything inconsistent
#[cfg(feature = "cli")]
fn load_profile(path: &Path, config: &TacticsConfig) -> Result<TacticProfile> {
    let snapshot = read_snapshot_file(path, &config.snapshot)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let profile = TacticProfile::restore(&snapshot, config.clone())?;
    Ok(profile)
}

#[cfg(feature = "cli")]
fn save_profile(profile: &TacticProfile, path: &Path) -> Result<()> {
    write_snapshot_file(path, &profile.snapshot(), format_for_path(path))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// 확장자로 포맷 판별 (.json 외에는 바이너리)
#[cfg(feature = "cli")]
fn expect_format(path: &Path, expected: SnapshotFormat, what: &str) -> Result<()> {
    let actual = format_for_path(path);
    if actual != expected {
        anyhow::bail!(
            "{} must be a .{} snapshot, got {} ({:?})",
            what,
            expected.extension(),
            path.display(),
            actual
        );
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn convert(
    input: &Path,
    output: &Path,
    from: SnapshotFormat,
    to: SnapshotFormat,
    config: &TacticsConfig,
) -> Result<()> {
    expect_format(input, from, "Input")?;
    expect_format(output, to, "Output")?;

    println!("🔨 Converting snapshot...");
    println!("   Input:  {}", input.display());
    println!("   Output: {}", output.display());

    let profile = load_profile(input, config)?;
    save_profile(&profile, output)?;

    let original = std::fs::metadata(input)?.len();
    let converted = std::fs::metadata(output)?.len();
    println!("\n✅ Converted {}", profile.name());
    println!("   Size: {} → {} bytes", original, converted);
    Ok(())
}

#[cfg(feature = "cli")]
fn print_profile(profile: &TacticProfile) {
    println!("📋 {} ({})", profile.name(), profile.scope());
    println!("   Id:   {}", profile.id());
    if let Some(role) = profile.role() {
        println!("   Role: {} ({})", role, role.display_name_ko());
        println!("         {}", role.description_ko());
    }

    for group in profile.groups() {
        println!("\n   [{}]", group.id());
        for (kind, slot) in group.slots() {
            match slot.value() {
                Some(value) => println!(
                    "   {:<24} {:<12} {} ({})",
                    kind.name(),
                    slot.availability(),
                    value,
                    value.display_name_ko()
                ),
                None => println!("   {:<24} {:<12} -", kind.name(), slot.availability()),
            }
        }
    }

    if let Some(set) = profile.choice_set::<PlayFocus>() {
        print_choices(PlayFocus::SET.name(), set.chosen().iter().copied(), set.unavailable().iter().copied());
    }
    if let Some(set) = profile.choice_set::<ChanceCreation>() {
        print_choices(
            ChanceCreation::SET.name(),
            set.chosen().iter().copied(),
            set.unavailable().iter().copied(),
        );
    }
}

#[cfg(feature = "cli")]
fn print_choices<C: ChoiceOption>(
    set: &str,
    chosen: impl Iterator<Item = C>,
    unavailable: impl Iterator<Item = C>,
) {
    let chosen: Vec<&str> = chosen.map(|c| c.name()).collect();
    let unavailable: Vec<&str> = unavailable.map(|c| c.name()).collect();
    println!("\n   [{}]", set);
    println!("   chosen:      {}", chosen.join(", "));
    println!("   unavailable: {}", unavailable.join(", "));
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("of_tactics CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_expect_format_by_extension() {
        assert!(expect_format(Path::new("team.json"), SnapshotFormat::Json, "Input").is_ok());
        assert!(expect_format(Path::new("team.oftx"), SnapshotFormat::Binary, "Output").is_ok());
        assert!(expect_format(Path::new("team.json"), SnapshotFormat::Binary, "Output").is_err());
        assert!(expect_format(Path::new("team.oftx"), SnapshotFormat::Json, "Input").is_err());
    }

    #[test]
    fn test_pack_rejects_swapped_paths() {
        let config = TacticsConfig::default();
        let err = convert(
            Path::new("team.oftx"),
            Path::new("team.json"),
            SnapshotFormat::Json,
            SnapshotFormat::Binary,
            &config,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Input must be a .json snapshot"));
    }

    #[test]
    fn test_pack_then_unpack() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("team.json");
        let packed = dir.path().join("team.oftx");
        let unpacked = dir.path().join("copy.json");
        let config = TacticsConfig::default();

        let mut profile = TacticProfile::team("Test FC", config.clone()).unwrap();
        profile.apply_preset(TacticalPreset::HighPressing).unwrap();
        save_profile(&profile, &json).unwrap();

        convert(&json, &packed, SnapshotFormat::Json, SnapshotFormat::Binary, &config).unwrap();
        convert(&packed, &unpacked, SnapshotFormat::Binary, SnapshotFormat::Json, &config).unwrap();
        assert_eq!(load_profile(&unpacked, &config).unwrap(), profile);
    }
}
