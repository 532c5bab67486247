//! # Project Registry
//!
//! A small per-user index of known projects, stored as `projects.json` in
//! the OS config directory (via `directories`). The registry only remembers
//! where projects live and which one was opened last; card data always stays
//! in the project directory itself.
//!
//! Forgetting a project removes the entry, never the files.

use crate::error::{Result, ScriptError};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const REGISTRY_FILENAME: &str = "projects.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub path: PathBuf,
    pub last_opened: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectRegistry {
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectEntry>,
    #[serde(default)]
    pub last_project: Option<String>,
}

/// Default registry location, `None` when the OS gives us no home.
pub fn default_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "scriptdeck", "scriptdeck").map(|d| d.config_dir().to_path_buf())
}

/// Registry key for a project name: lowercase, spaces and underscores as dashes.
pub fn project_id(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split([' ', '_'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

impl ProjectRegistry {
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(REGISTRY_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| ScriptError::storage(&path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| ScriptError::storage(dir, e))?;
        }
        let path = dir.join(REGISTRY_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|e| ScriptError::storage(&path, e))?;
        Ok(())
    }

    /// Adds or refreshes a project and makes it the last opened one.
    pub fn register(&mut self, name: &str, path: &Path) -> String {
        let id = project_id(name);
        self.projects.insert(
            id.clone(),
            ProjectEntry {
                name: name.trim().to_string(),
                path: path.to_path_buf(),
                last_opened: Utc::now(),
            },
        );
        self.last_project = Some(id.clone());
        id
    }

    /// Drops a project from the registry. The files are left alone.
    pub fn forget(&mut self, id: &str) -> Result<ProjectEntry> {
        let entry = self
            .projects
            .remove(id)
            .ok_or_else(|| ScriptError::Api(format!("Project '{}' not found", id)))?;

        if self.last_project.as_deref() == Some(id) {
            self.last_project = self.most_recent().map(|(id, _)| id.clone());
        }
        Ok(entry)
    }

    /// Removes the project directory from disk, then forgets the entry.
    /// The entry stays when the files can't be removed.
    pub fn delete_permanently(&mut self, id: &str) -> Result<ProjectEntry> {
        let path = self
            .projects
            .get(id)
            .map(|entry| entry.path.clone())
            .ok_or_else(|| ScriptError::Api(format!("Project '{}' not found", id)))?;

        if path.exists() {
            fs::remove_dir_all(&path).map_err(|e| ScriptError::storage(&path, e))?;
        }
        tracing::info!(project = id, path = %path.display(), "deleted project");
        self.forget(id)
    }

    /// Marks the project at `path` as opened now. Returns false for unknown paths.
    pub fn touch_path(&mut self, path: &Path) -> bool {
        let found = self
            .projects
            .iter_mut()
            .find(|(_, entry)| entry.path == path);
        match found {
            Some((id, entry)) => {
                entry.last_opened = Utc::now();
                self.last_project = Some(id.clone());
                true
            }
            None => false,
        }
    }

    pub fn last(&self) -> Option<&ProjectEntry> {
        self.last_project
            .as_deref()
            .and_then(|id| self.projects.get(id))
    }

    /// Entries, most recently opened first.
    pub fn entries(&self) -> Vec<(&String, &ProjectEntry)> {
        let mut entries: Vec<_> = self.projects.iter().collect();
        entries.sort_by(|a, b| b.1.last_opened.cmp(&a.1.last_opened));
        entries
    }

    fn most_recent(&self) -> Option<(&String, &ProjectEntry)> {
        self.projects
            .iter()
            .max_by_key(|(_, entry)| entry.last_opened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_project_id() {
        assert_eq!(project_id("Night Train"), "night-train");
        assert_eq!(project_id("my_script  draft"), "my-script-draft");
    }

    #[test]
    fn test_register_sets_last() {
        let mut registry = ProjectRegistry::default();
        let id = registry.register("Night Train", Path::new("/scripts/night"));
        assert_eq!(id, "night-train");
        assert_eq!(registry.last().unwrap().path, PathBuf::from("/scripts/night"));
    }

    #[test]
    fn test_forget_moves_last_to_most_recent() {
        let mut registry = ProjectRegistry::default();
        registry.register("Old", Path::new("/old"));
        registry.register("Newer", Path::new("/newer"));
        registry.register("Current", Path::new("/current"));
        registry.projects.get_mut("old").unwrap().last_opened = Utc::now() - Duration::days(2);
        registry.projects.get_mut("newer").unwrap().last_opened = Utc::now() - Duration::days(1);

        let removed = registry.forget("current").unwrap();
        assert_eq!(removed.name, "Current");
        assert_eq!(registry.last_project.as_deref(), Some("newer"));
    }

    #[test]
    fn test_forget_unknown_is_error() {
        let mut registry = ProjectRegistry::default();
        assert!(matches!(registry.forget("nope"), Err(ScriptError::Api(_))));
    }

    #[test]
    fn test_forget_last_remaining_clears_last() {
        let mut registry = ProjectRegistry::default();
        registry.register("Only", Path::new("/only"));
        registry.forget("only").unwrap();
        assert!(registry.last_project.is_none());
        assert!(registry.last().is_none());
    }

    #[test]
    fn test_delete_permanently_removes_files_and_entry() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("night");
        fs::create_dir_all(project.join("cards")).unwrap();
        fs::write(project.join("cards").join("01.md"), "# Opening Image\n\n").unwrap();

        let mut registry = ProjectRegistry::default();
        registry.register("Night", &project);
        registry.register("Other", Path::new("/other"));

        let removed = registry.delete_permanently("night").unwrap();
        assert_eq!(removed.path, project);
        assert!(!project.exists());
        assert!(!registry.projects.contains_key("night"));
        assert!(registry.projects.contains_key("other"));
    }

    #[test]
    fn test_delete_permanently_unknown_is_error() {
        let mut registry = ProjectRegistry::default();
        assert!(matches!(
            registry.delete_permanently("nope"),
            Err(ScriptError::Api(_))
        ));
    }

    #[test]
    fn test_delete_permanently_missing_dir_still_forgets() {
        let dir = TempDir::new().unwrap();
        let mut registry = ProjectRegistry::default();
        registry.register("Gone", &dir.path().join("gone"));

        registry.delete_permanently("gone").unwrap();
        assert!(registry.projects.is_empty());
    }

    #[test]
    fn test_touch_path() {
        let mut registry = ProjectRegistry::default();
        registry.register("A", Path::new("/a"));
        registry.register("B", Path::new("/b"));

        assert!(registry.touch_path(Path::new("/a")));
        assert_eq!(registry.last_project.as_deref(), Some("a"));
        assert!(!registry.touch_path(Path::new("/unknown")));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut registry = ProjectRegistry::default();
        registry.register("Night Train", Path::new("/scripts/night"));
        registry.save(dir.path()).unwrap();

        let loaded = ProjectRegistry::load(dir.path()).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = ProjectRegistry::load(dir.path().join("nothing")).unwrap();
        assert!(loaded.projects.is_empty());
    }

    #[test]
    fn test_entries_most_recent_first() {
        let mut registry = ProjectRegistry::default();
        registry.register("A", Path::new("/a"));
        registry.register("B", Path::new("/b"));
        registry.projects.get_mut("a").unwrap().last_opened = Utc::now() + Duration::hours(1);

        let ids: Vec<&str> = registry.entries().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
