pub mod init;
mod schema;

pub use schema::{Config, MockConfig, SourceMode, DEFAULT_BACKEND_URL};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding `backend_url`
pub const ENV_BACKEND_URL: &str = "SKILLSYNC_BACKEND_URL";

/// Get the config directory path (~/.config/skillsync/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("skillsync"))
}

/// Get the default config file path (~/.config/skillsync/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/skillsync/config.yaml), falling back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            read_config(&explicit)?
        }
        None => {
            let default_path = get_config_path()?;
            if default_path.exists() {
                read_config(&default_path)?
            } else {
                tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                Config::default()
            }
        }
    };

    if let Some(url) = backend_url_from_env() {
        tracing::debug!(%url, "backend URL overridden from {}", ENV_BACKEND_URL);
        config.backend_url = url;
    }

    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

/// Returns Some(url) if the env var is set and non-empty, None otherwise.
pub fn backend_url_from_env() -> Option<String> {
    std::env::var(ENV_BACKEND_URL)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Save configuration atomically, creating parent directories as needed.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(e) = crate::source::live::normalize_base_url(&config.backend_url) {
        errors.push(format!("backend_url: {}", e));
    }

    match config.timeout_duration() {
        Ok(d) if d.is_zero() => errors.push("timeout: must be greater than zero".to_string()),
        Ok(_) => {}
        Err(e) => errors.push(format!("timeout: {:#}", e)),
    }

    if let Err(e) = config.mock_delay() {
        errors.push(format!("mock.delay: {:#}", e));
    }

    if let Err(matching_errors) = crate::matching::validate_matching(&config.matching) {
        errors.extend(matching_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchConfig;

    #[test]
    fn test_load_explicit_missing_file() {
        let err = load_config(Some(PathBuf::from("/nonexistent/skillsync.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "source: mock\nmatching:\n  limit: 2\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.source, SourceMode::Mock);
        assert_eq!(config.matching.limit, Some(2));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "matching: [oops").unwrap();

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            backend_url: "https://api.example.com".to_string(),
            source: SourceMode::Mock,
            ..Config::default()
        };

        save_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_valid_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            backend_url: "nope".to_string(),     // Error 1
            timeout: "0s".to_string(),           // Error 2
            matching: MatchConfig::with_limit(0), // Error 3
            mock: MockConfig {
                delay: "later".to_string(), // Error 4
            },
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].starts_with("backend_url"));
        assert!(errors[1].contains("greater than zero"));
        assert!(errors[2].starts_with("mock.delay"));
        assert!(errors[3].starts_with("matching.limit"));
    }
}
