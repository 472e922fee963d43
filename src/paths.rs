use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files that mark a directory as a portable install root.
const LOCAL_MARKERS: &[&str] = &["phonica.json", "phonica.log"];

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (PHONICA_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("PHONICA_CONFIG_DIR")
                .ok()
                .map(PathBuf::from)
        });

        Self { config_dir }
    }

    /// Path to a configuration file (settings, session state).
    ///
    /// Resolution order: custom dir (CLI/ENV) → portable local dir (if any
    /// marker file exists next to the binary's cwd) → platform config dir
    /// (`~/.config/phonica` on Linux, `%APPDATA%\phonica` on Windows).
    pub fn config_file(&self, name: &str) -> PathBuf {
        self.resolve(dirs_next::config_dir()).join(name)
    }

    /// Path to a data file (logs, editor exports). Same resolution order as
    /// [`PathConfig::config_file`] against the platform data dir.
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.resolve(dirs_next::data_dir()).join(name)
    }

    /// Ensure config and data directories exist, creating them if needed.
    pub fn ensure_dirs(&self) -> Result<()> {
        let config_dir = self.resolve(dirs_next::config_dir());
        let data_dir = self.resolve(dirs_next::data_dir());

        for dir in [&config_dir, &data_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }

        Ok(())
    }

    fn resolve(&self, platform_dir: Option<PathBuf>) -> PathBuf {
        // Priority 1: Custom directory from CLI or ENV
        if let Some(dir) = &self.config_dir {
            return dir.clone();
        }

        // Priority 2: Local folder IF marker files exist there (portable mode)
        if let Ok(cwd) = std::env::current_dir() {
            if has_local_markers(&cwd) {
                return cwd;
            }
        }

        // Priority 3: Platform directory, "." if the platform has none
        platform_dir
            .map(|d| d.join("phonica"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn has_local_markers(dir: &Path) -> bool {
    LOCAL_MARKERS.iter().any(|f| dir.join(f).exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_dir_wins() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        assert_eq!(config.config_file("test.json"), PathBuf::from("/custom/test.json"));
        assert_eq!(config.data_file("phonica.log"), PathBuf::from("/custom/phonica.log"));
    }

    #[test]
    fn test_cli_dir_beats_env() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/cli-dir")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/cli-dir")));
    }

    #[test]
    fn test_platform_default_contains_app_name() {
        let config = PathConfig::default();
        let path = config.config_file("phonica.json");
        // Either the platform dir with our app folder, or the "." fallback
        let s = path.to_string_lossy().to_string();
        assert!(s.contains("phonica"));
    }
}
