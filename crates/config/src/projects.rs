//! Project registry: an append-only list of projects.
//!
//! The whole list lives in one slot and is rewritten on every change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::SlotStore;

/// Slot holding the project list
pub const PROJECTS_SLOT: &str = "projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "active" => Some(ProjectStatus::Active),
            "completed" => Some(ProjectStatus::Completed),
            "on-hold" | "onhold" | "on_hold" => Some(ProjectStatus::OnHold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// A project needs a non-empty name.
    NameRequired,
    Store(StoreError),
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "project name is required"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<StoreError> for ProjectError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[derive(Debug)]
pub struct ProjectRegistry {
    store: SlotStore,
    projects: Vec<Project>,
}

impl ProjectRegistry {
    /// Open the registry. An unreadable list starts empty.
    pub fn open(store: SlotStore) -> Self {
        let projects = match store.read_slot::<Vec<Project>>(PROJECTS_SLOT) {
            Ok(projects) => projects.unwrap_or_default(),
            Err(e) => {
                log::warn!("ignoring saved projects: {e}");
                Vec::new()
            }
        };
        Self { store, projects }
    }

    /// Projects in creation order.
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    /// Append a new project and persist the whole list.
    ///
    /// On a failed save the in-memory list is left as it was.
    pub fn create(
        &mut self,
        name: &str,
        description: &str,
        status: ProjectStatus,
    ) -> Result<Project, ProjectError> {
        if name.is_empty() {
            return Err(ProjectError::NameRequired);
        }

        let mut id = Uuid::new_v4().to_string();
        while self.projects.iter().any(|p| p.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let project = Project {
            id,
            name: name.to_string(),
            description: description.to_string(),
            status,
            created_at: Utc::now(),
        };

        let mut next = self.projects.clone();
        next.push(project.clone());
        self.store.write_slot(PROJECTS_SLOT, &next)?;
        self.projects = next;

        log::info!("created project {} ({})", project.name, project.id);
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_and_reopen() {
        let dir = tempdir().unwrap();
        let mut registry = ProjectRegistry::open(SlotStore::new(dir.path()));
        assert!(registry.list().is_empty());

        let first = registry.create("Hall A", "ground floor", ProjectStatus::Active).unwrap();
        assert_eq!(registry.list(), std::slice::from_ref(&first));
        let second = registry.create("Hall B", "", ProjectStatus::OnHold).unwrap();
        assert_eq!(registry.list().last(), Some(&second));
        assert_ne!(first.id, second.id);

        let reopened = ProjectRegistry::open(SlotStore::new(dir.path()));
        let names: Vec<&str> = reopened.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hall A", "Hall B"]);
        assert_eq!(reopened.list()[0], first);
        assert_eq!(reopened.list()[1].status, ProjectStatus::OnHold);
    }

    #[test]
    fn test_empty_name_rejected() {
        let dir = tempdir().unwrap();
        let mut registry = ProjectRegistry::open(SlotStore::new(dir.path()));
        assert_eq!(
            registry.create("", "x", ProjectStatus::Active).unwrap_err(),
            ProjectError::NameRequired
        );
        assert!(registry.list().is_empty());
        assert!(!dir.path().join("projects.json").exists());
    }

    #[test]
    fn test_json_shape() {
        let dir = tempdir().unwrap();
        let mut registry = ProjectRegistry::open(SlotStore::new(dir.path()));
        registry.create("Roof", "", ProjectStatus::Completed).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("projects.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["status"], "completed");
        assert!(json[0]["createdAt"].is_string());
        assert!(json[0]["id"].is_string());
    }

    #[test]
    fn test_malformed_list_starts_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("projects.json"), "[{\"oops\":1}]").unwrap();
        let registry = ProjectRegistry::open(SlotStore::new(dir.path()));
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_status_names() {
        for status in [ProjectStatus::Active, ProjectStatus::Completed, ProjectStatus::OnHold] {
            assert_eq!(ProjectStatus::from_name(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::from_name("paused"), None);
    }

    #[test]
    fn test_failed_save_keeps_list() {
        let dir = tempdir().unwrap();
        let blocked = dir.path().join("not-a-dir");
        std::fs::write(&blocked, "").unwrap();
        let mut registry = ProjectRegistry::open(SlotStore::new(&blocked));

        let err = registry.create("Hall A", "", ProjectStatus::Active).unwrap_err();
        assert!(matches!(err, ProjectError::Store(StoreError::Io(_))));
        assert!(registry.list().is_empty());
    }
}
