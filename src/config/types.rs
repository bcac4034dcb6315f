use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Directory that successfully-converted originals are moved into.
    #[serde(default = "default_trash_dir")]
    pub trash_dir: String,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub organize: OrganizeConfig,
}

fn default_trash_dir() -> String {
    "~/.Trash".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trash_dir: default_trash_dir(),
            tools: ToolsConfig::default(),
            organize: OrganizeConfig::default(),
        }
    }
}

impl Config {
    /// The trash directory with `~` expanded.
    pub fn trash_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.trash_dir).as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrganizeConfig {
    /// Category folder name -> file extensions (lowercase, without the dot).
    #[serde(default = "default_categories")]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

impl OrganizeConfig {
    /// Find the category folder for a lowercase extension, if any.
    pub fn category_for(&self, extension: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, exts)| exts.iter().any(|e| e == extension))
            .map(|(name, _)| name.as_str())
    }
}

fn default_categories() -> BTreeMap<String, Vec<String>> {
    let entries: &[(&str, &[&str])] = &[
        ("Images", &["jpg", "jpeg", "png", "gif", "bmp", "svg"]),
        ("Documents", &["pdf", "docx", "txt", "xlsx", "pptx"]),
        ("Videos", &["mp4", "avi", "mkv", "mov"]),
        ("Audio", &["mp3", "wav", "flac"]),
        ("Archives", &["zip", "tar", "gz", "rar"]),
        ("Scripts", &["py", "sh", "js", "html", "css"]),
        ("Books", &["epub"]),
    ];

    entries
        .iter()
        .map(|(name, exts)| {
            (
                name.to_string(),
                exts.iter().map(|e| e.to_string()).collect(),
            )
        })
        .collect()
}
