use std::path::{Path, PathBuf};

const APP_DIR: &str = "namewheel";

pub fn data_dir() -> PathBuf {
    // Stick to ~/.local/share on macOS too so every unix box looks the same
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        // Portable install: a data/ folder next to the executable wins
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let portable_data = exe_dir.join("data");
                if portable_data.exists() {
                    return portable_data;
                }
            }
        }

        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return PathBuf::from(xdg).join(APP_DIR);
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                if exe_dir.join("config.toml").exists() {
                    return exe_dir.to_path_buf();
                }
            }
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

/// Default location of the persisted name pool.
pub fn pool_file() -> PathBuf {
    data_dir().join("pool.json")
}

/// Resolve a leading `~` against the user's home directory.
///
/// Paths without one, or a missing home directory, come back unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Default location of the TUI log file.
pub fn log_file() -> PathBuf {
    data_dir().join("namewheel.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_live_under_app_dir() {
        assert!(pool_file().ends_with("namewheel/pool.json"));
        assert!(log_file().ends_with("namewheel/namewheel.log"));
        assert!(config_dir().ends_with(APP_DIR));
    }

    #[test]
    fn test_expand_home_resolves_tilde() {
        let Some(home) = dirs::home_dir() else { return };
        assert_eq!(expand_home(Path::new("~/names.csv")), home.join("names.csv"));
        assert_eq!(expand_home(Path::new("~")), home);
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home(Path::new("/srv/pool.json")), PathBuf::from("/srv/pool.json"));
        assert_eq!(expand_home(Path::new("names.csv")), PathBuf::from("names.csv"));
        assert_eq!(expand_home(Path::new("~bob/x")), PathBuf::from("~bob/x"));
    }
}
