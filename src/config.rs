/// Application configuration
///
/// There is no configuration file. The only tunable is where the
/// history is stored, which can be redirected with an environment
/// variable (useful for demos and tests).

use std::path::PathBuf;
use std::time::Duration;

/// Largest accepted upload, 5 MiB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Number of analyses kept in the history
pub const HISTORY_CAPACITY: usize = 5;

/// Fixed key of the persisted history
pub const STORAGE_KEY: &str = "plantDiseaseHistory";

/// Simulated processing time of one analysis
pub const ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

/// Overrides the data directory when set
pub const DATA_DIR_ENV: &str = "LEAF_DOCTOR_DATA_DIR";

const APP_DIR_NAME: &str = "leaf-doctor";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the persisted history
    pub data_dir: PathBuf,
    pub analysis_delay: Duration,
}

impl AppConfig {
    /// Resolve the configuration from the environment.
    ///
    /// The data directory is:
    /// - `$LEAF_DOCTOR_DATA_DIR` when set and non-empty
    /// - Linux: ~/.local/share/leaf-doctor
    /// - macOS: ~/Library/Application Support/leaf-doctor
    /// - Windows: %APPDATA%\leaf-doctor
    pub fn from_env() -> Self {
        let override_dir = std::env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty());
        Self::resolve(override_dir.map(PathBuf::from))
    }

    fn resolve(override_dir: Option<PathBuf>) -> Self {
        let data_dir = override_dir.unwrap_or_else(default_data_dir);

        Self {
            data_dir,
            analysis_delay: ANALYSIS_DELAY,
        }
    }

    /// File backing the history under the fixed storage key
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(format!("{STORAGE_KEY}.json"))
    }
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    path.push(APP_DIR_NAME);
    path
}
