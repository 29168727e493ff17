//! Run configuration loaded from an optional TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::run_count::RunCountLimits;
use crate::io::payload::PayloadKind;

/// Run configuration (TOML).
///
/// Every field has a default, so an empty or missing file is valid. CLI flags
/// override the loaded values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    /// Executions when no count is given or the count is unparsable.
    pub default_runs: u32,

    /// Lower clamp for the requested count.
    pub min_runs: u32,

    /// Upper clamp for the requested count.
    pub max_runs: u32,

    /// When the run controller reseeds the random sources.
    pub reseed: ReseedPolicy,

    /// Wait for Enter between executions.
    pub pause_between_runs: bool,

    pub stack: StackConfig,

    pub payload: PayloadConfig,
}

/// Reseeding policy applied by the run controller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReseedPolicy {
    /// Seed once at startup.
    Never,
    /// Reseed before every execution with `base + seq * 1000`.
    PerExecution,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StackConfig {
    /// Capture a diagnostic stack snapshot for each execution.
    pub enabled: bool,

    /// Where in the execution the snapshot is taken.
    pub point: CapturePoint,

    /// Stop walking after this many frames.
    pub max_frames: usize,

    /// Render at most this many frames of each snapshot.
    pub shown_frames: usize,
}

/// Capture point for the diagnostic snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CapturePoint {
    /// In the driver, just before the path entry is invoked.
    BeforeEntry,
    /// Inside the path, just before the payload is delivered.
    AtPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PayloadConfig {
    pub kind: PayloadKind,
    pub title: String,
    pub message: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            point: CapturePoint::BeforeEntry,
            max_frames: 64,
            shown_frames: 15,
        }
    }
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            kind: PayloadKind::Console,
            title: "Payload executed".to_string(),
            message: "The call stack leading here was randomized.".to_string(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            default_runs: 3,
            min_runs: 1,
            max_runs: 10,
            reseed: ReseedPolicy::Never,
            pause_between_runs: false,
            stack: StackConfig::default(),
            payload: PayloadConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_runs == 0 {
            return Err(anyhow!("min_runs must be > 0"));
        }
        if self.min_runs > self.max_runs {
            return Err(anyhow!("min_runs must be <= max_runs"));
        }
        if !self.run_limits().range().contains(&self.default_runs) {
            return Err(anyhow!("default_runs must lie within min_runs..=max_runs"));
        }
        if self.stack.max_frames == 0 {
            return Err(anyhow!("stack.max_frames must be > 0"));
        }
        if self.stack.shown_frames > self.stack.max_frames {
            return Err(anyhow!("stack.shown_frames must be <= stack.max_frames"));
        }
        Ok(())
    }

    pub fn run_limits(&self) -> RunCountLimits {
        RunCountLimits {
            default: self.default_runs,
            min: self.min_runs,
            max: self.max_runs,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RunConfig::default()`.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    if !path.exists() {
        let cfg = RunConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RunConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn serialized_config_loads_back() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("callpath.toml");
        let cfg = RunConfig {
            reseed: ReseedPolicy::PerExecution,
            stack: StackConfig {
                point: CapturePoint::AtPayload,
                ..StackConfig::default()
            },
            ..RunConfig::default()
        };
        let contents = toml::to_string_pretty(&cfg).expect("serialize");
        assert!(contents.contains("reseed = \"per-execution\""));
        assert!(contents.contains("point = \"at-payload\""));
        fs::write(&path, contents).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn default_runs_must_lie_within_limits() {
        let below = RunConfig {
            min_runs: 4,
            ..RunConfig::default()
        };
        let err = below.validate().expect_err("default below min");
        assert!(err.to_string().contains("default_runs"));
        let edge = RunConfig {
            default_runs: 10,
            ..RunConfig::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("callpath.toml");
        fs::write(&path, "max_runs = 20\n\n[stack]\nenabled = false\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.max_runs, 20);
        assert!(!cfg.stack.enabled);
        assert_eq!(cfg.stack.max_frames, 64);
        assert_eq!(cfg.default_runs, 3);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("callpath.toml");
        fs::write(&path, "default_runs = 12\n").expect("write");
        let err = load_config(&path).expect_err("default outside range");
        assert!(format!("{err:#}").contains("default_runs"));
    }

    #[test]
    fn shown_frames_cannot_exceed_max_frames() {
        let cfg = RunConfig {
            stack: StackConfig {
                max_frames: 8,
                shown_frames: 9,
                ..StackConfig::default()
            },
            ..RunConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
