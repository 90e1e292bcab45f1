//! Runtime configuration
//!
//! Settings come from the environment with built-in defaults; the CLI
//! overrides them with flags.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::analysis::DEFAULT_ANALYSIS_DELAY;
use crate::error::DashboardError;

/// Overrides the data directory
pub const DATA_DIR_ENV: &str = "BLOOM_DATA_DIR";
/// Overrides the artificial analysis delay (milliseconds)
pub const DELAY_ENV: &str = "BLOOM_ANALYSIS_DELAY_MS";

const APP_DIR_NAME: &str = "blooming-health";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Directory holding the persisted entries
    pub data_dir: PathBuf,
    /// Artificial delay before an analysis result is produced
    pub analysis_delay: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            analysis_delay: DEFAULT_ANALYSIS_DELAY,
        }
    }
}

impl DashboardConfig {
    /// Defaults overlaid with `BLOOM_*` environment variables
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_vars(env::var(DATA_DIR_ENV).ok(), env::var(DELAY_ENV).ok())
    }

    fn from_vars(
        data_dir: Option<String>,
        delay_ms: Option<String>,
    ) -> Result<Self, DashboardError> {
        let mut config = Self::default();

        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = delay_ms {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                DashboardError::Config(format!(
                    "{DELAY_ENV} must be a whole number of milliseconds, got {raw:?}"
                ))
            })?;
            config.analysis_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

/// Platform data directory, or `./.blooming-health` when none is known
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR_NAME}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_vars(None, None).unwrap();
        assert_eq!(config.analysis_delay, Duration::from_millis(2000));
        assert!(config.data_dir.to_string_lossy().ends_with("blooming-health"));
    }

    #[test]
    fn test_overrides() {
        let config =
            DashboardConfig::from_vars(Some("/tmp/bloom".to_string()), Some(" 250 ".to_string()))
                .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/bloom"));
        assert_eq!(config.analysis_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_bad_delay_is_rejected() {
        let result = DashboardConfig::from_vars(None, Some("soon".to_string()));
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
