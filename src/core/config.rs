use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::{AttendanceError, Result};

/// Where a run reads its inputs and writes its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub config_path: PathBuf,
    pub records_path: PathBuf,
    pub reports_dir: PathBuf,
    pub report_file: PathBuf,
}

impl Paths {
    /// Conventional layout under an installation directory:
    /// `Helpers/config.json`, `Helpers/assets.csv` and `reports/reports.log`.
    pub fn from_install_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        let helpers = base_dir.join("Helpers");
        let reports_dir = base_dir.join("reports");
        Self {
            config_path: helpers.join("config.json"),
            records_path: helpers.join("assets.csv"),
            report_file: reports_dir.join("reports.log"),
            reports_dir,
        }
    }
}

/// Whether alerts are durably logged or only previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Live,
    #[serde(alias = "dry-run", alias = "dry")]
    DryRun,
}

/// Percentage cut-offs. A record is flagged when strictly below one.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    pub warning: f64,
    pub failure: f64,
}

/// Run parameters, loaded once per run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    pub total_sessions: u32,
    pub thresholds: Thresholds,
    pub run_mode: RunMode,
}

impl RunConfig {
    /// Reject values the classifier cannot work with.
    /// Inverted thresholds are allowed (they only suppress WARNING alerts).
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.total_sessions == 0 {
            return Err("total_sessions must be greater than zero".to_string());
        }
        for (key, value) in [
            ("thresholds.warning", self.thresholds.warning),
            ("thresholds.failure", self.thresholds.failure),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 100.0 {
                return Err(format!("{key} must be in (0, 100], got {value}"));
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Read and validate the run configuration. Nothing is defaulted.
    pub fn load(&self) -> Result<RunConfig> {
        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| AttendanceError::config(&self.config_path, e.to_string()))?;
        let config: RunConfig = serde_json::from_str(&content)
            .map_err(|e| AttendanceError::config(&self.config_path, e.to_string()))?;
        config
            .validate()
            .map_err(|reason| AttendanceError::config(&self.config_path, reason))?;

        if config.thresholds.failure > config.thresholds.warning {
            log::warn!(
                "failure threshold {} is above warning threshold {}; no WARNING alerts will be raised",
                config.thresholds.failure,
                config.thresholds.warning
            );
        }
        log::debug!("Loaded config from {:?}: {:?}", self.config_path, config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(dir: &Path, body: &str) -> ConfigManager {
        let path = dir.join("config.json");
        fs::write(&path, body).unwrap();
        ConfigManager::new(path)
    }

    #[test]
    fn test_load_valid_config() {
        let dir = tempdir().unwrap();
        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 10, "thresholds": {"warning": 80, "failure": 60}, "run_mode": "live"}"#,
        );

        let config = manager.load().unwrap();
        assert_eq!(config.total_sessions, 10);
        assert_eq!(config.thresholds.warning, 80.0);
        assert_eq!(config.thresholds.failure, 60.0);
        assert_eq!(config.run_mode, RunMode::Live);
    }

    #[test]
    fn test_dry_run_spellings() {
        let dir = tempdir().unwrap();
        for mode in ["dry_run", "dry-run", "dry"] {
            let manager = write_config(
                dir.path(),
                &format!(
                    r#"{{"total_sessions": 5, "thresholds": {{"warning": 75.5, "failure": 50}}, "run_mode": "{mode}"}}"#
                ),
            );
            assert_eq!(manager.load().unwrap().run_mode, RunMode::DryRun, "{mode}");
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let dir = tempdir().unwrap();
        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 10, "thresholds": {"warning": 80, "failure": 60}, "run_mode": "lvie"}"#,
        );
        assert!(matches!(manager.load(), Err(AttendanceError::Config { .. })));
    }

    #[test]
    fn test_missing_fields_are_fatal() {
        let dir = tempdir().unwrap();
        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 10, "thresholds": {"warning": 80, "failure": 60}}"#,
        );
        assert!(matches!(manager.load(), Err(AttendanceError::Config { .. })));

        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 10, "thresholds": {"warning": "high", "failure": 60}, "run_mode": "live"}"#,
        );
        assert!(matches!(manager.load(), Err(AttendanceError::Config { .. })));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("absent.json"));
        assert!(matches!(manager.load(), Err(AttendanceError::Config { .. })));
    }

    #[test]
    fn test_zero_sessions_rejected() {
        let dir = tempdir().unwrap();
        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 0, "thresholds": {"warning": 80, "failure": 60}, "run_mode": "live"}"#,
        );
        let err = manager.load().unwrap_err();
        assert!(err.to_string().contains("total_sessions"));
    }

    #[test]
    fn test_threshold_range() {
        let dir = tempdir().unwrap();
        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 10, "thresholds": {"warning": 120, "failure": 60}, "run_mode": "live"}"#,
        );
        assert!(manager.load().is_err());

        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 10, "thresholds": {"warning": 100, "failure": 0}, "run_mode": "live"}"#,
        );
        assert!(manager.load().is_err());
    }

    #[test]
    fn test_inverted_thresholds_load() {
        let dir = tempdir().unwrap();
        let manager = write_config(
            dir.path(),
            r#"{"total_sessions": 10, "thresholds": {"warning": 50, "failure": 70}, "run_mode": "dry_run"}"#,
        );
        assert!(manager.load().is_ok());
    }

    #[test]
    fn test_install_layout() {
        let paths = Paths::from_install_dir("/opt/attendance");
        assert_eq!(paths.config_path, PathBuf::from("/opt/attendance/Helpers/config.json"));
        assert_eq!(paths.records_path, PathBuf::from("/opt/attendance/Helpers/assets.csv"));
        assert_eq!(paths.reports_dir, PathBuf::from("/opt/attendance/reports"));
        assert_eq!(paths.report_file, PathBuf::from("/opt/attendance/reports/reports.log"));
    }
}
