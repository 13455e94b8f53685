use directories::ProjectDirs;
use std::path::PathBuf;

const LOG_FILE: &str = "sketchy.log";

/// Where the game keeps its log
pub struct AppDirs;

impl AppDirs {
    /// `--log-file` wins; otherwise the platform state dir, falling back to
    /// the local data dir on platforms without one (macOS, Windows).
    pub fn log_path(override_path: Option<PathBuf>) -> Option<PathBuf> {
        if override_path.is_some() {
            return override_path;
        }
        let dirs = ProjectDirs::from("", "", "sketchy")?;
        let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
        Some(dir.join(LOG_FILE))
    }
}
