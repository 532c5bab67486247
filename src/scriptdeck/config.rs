use crate::error::{Result, ScriptError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "project.json";

/// Per-project settings, stored in `<root>/project.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Screenplay title, used for Fountain metadata and export filenames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author credited in the Fountain title page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ProjectConfig {
    /// Load config from the project root, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&config_path).map_err(|e| ScriptError::storage(&config_path, e))?;
        let config: ProjectConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the project root
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let root = root.as_ref();

        if !root.exists() {
            fs::create_dir_all(root).map_err(|e| ScriptError::storage(root, e))?;
        }

        let config_path = root.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content).map_err(|e| ScriptError::storage(&config_path, e))?;
        Ok(())
    }

    /// The configured title, falling back to the project directory name.
    pub fn title_or_dir_name(&self, root: &Path) -> Option<String> {
        non_blank(self.title.as_deref()).or_else(|| {
            root.file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| non_blank(Some(n)))
        })
    }

    pub fn author(&self) -> Option<String> {
        non_blank(self.author.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
