//! Work items associated with the next commit.
//!
//! Stored as JSON in `<git dir>/autocomment/work_items.json` so the association
//! never shows up in the working tree. Each linked worktree has its own list.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::host::git::git_dir;
use crate::policy::WorkItemRef;

/// A work item plus the time it was associated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedWorkItem {
    #[serde(flatten)]
    pub item: WorkItemRef,
    pub associated_at: String,
}

/// Association list for one repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkItemStore {
    #[serde(default)]
    pub items: Vec<AssociatedWorkItem>,
}

impl WorkItemStore {
    /// Path to the store inside a checkout's git directory.
    pub fn path(repo_root: &Path) -> Result<PathBuf, Error> {
        Ok(git_dir(repo_root)?
            .join("autocomment")
            .join("work_items.json"))
    }

    pub fn load(repo_root: &Path) -> Result<Self, Error> {
        let path = Self::path(repo_root)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let store: WorkItemStore = serde_json::from_str(&content)?;
        Ok(store)
    }

    pub fn save(&self, repo_root: &Path) -> Result<(), Error> {
        let path = Self::path(repo_root)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Associate a work item. An item with the same id is replaced in place.
    pub fn associate(&mut self, item: WorkItemRef) {
        let entry = AssociatedWorkItem {
            item,
            associated_at: Utc::now().to_rfc3339(),
        };
        match self.items.iter_mut().find(|e| e.item.id == entry.item.id) {
            Some(existing) => {
                debug!(id = entry.item.id, "Replacing associated work item");
                *existing = entry;
            }
            None => self.items.push(entry),
        }
    }

    /// Remove a work item. Returns false if it was not associated.
    pub fn dissociate(&mut self, id: i32) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Associated work items in association order.
    pub fn work_items(&self) -> Vec<WorkItemRef> {
        self.items.iter().map(|e| e.item.clone()).collect()
    }
}
