mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./filesweep.toml",
        "~/.config/filesweep/config.toml",
        "/etc/filesweep/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.trash_dir.trim().is_empty() {
        anyhow::bail!("trash_dir cannot be empty");
    }

    if let Some(ref path) = config.tools.ffmpeg_path {
        if !path.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", path);
        }
    }

    for (name, extensions) in &config.organize.categories {
        if extensions.is_empty() {
            anyhow::bail!("Organize category '{}' has no extensions", name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.trash_dir, "~/.Trash");
        assert!(config.tools.ffmpeg_path.is_none());
    }

    #[test]
    fn trash_path_expands_tilde() {
        let config = Config::default();
        let path = config.trash_path();
        assert!(!path.to_string_lossy().contains('~'));
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
trash_dir = "/tmp/filesweep-trash"

[tools]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"

[organize]
categories = { Music = ["ogg", "opus"] }
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.trash_dir, "/tmp/filesweep-trash");
        assert_eq!(
            config.tools.ffmpeg_path.as_deref(),
            Some(std::path::Path::new("/opt/ffmpeg/bin/ffmpeg"))
        );
        assert_eq!(config.organize.category_for("ogg"), Some("Music"));
        // Overridden map replaces the defaults entirely.
        assert_eq!(config.organize.category_for("jpg"), None);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.trash_dir, "~/.Trash");
        assert_eq!(config.organize.category_for("jpg"), Some("Images"));
        assert_eq!(config.organize.category_for("epub"), Some("Books"));
    }

    #[test]
    fn load_rejects_empty_trash_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filesweep.toml");
        std::fs::write(&path, "trash_dir = \"  \"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn category_lookup_is_case_exact() {
        let config = OrganizeConfig::default();
        assert_eq!(config.category_for("flac"), Some("Audio"));
        // Callers lowercase extensions before lookup.
        assert_eq!(config.category_for("FLAC"), None);
    }
}
