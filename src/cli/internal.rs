//! Hidden internal commands for git hooks.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::host::git::find_repo_root;
use crate::host::work_items::WorkItemStore;

/// Clear associations after a commit (called by post-commit hook).
pub fn post_commit() -> Result<(), Error> {
    let repo_root = find_repo_root(&std::env::current_dir()?)?;
    let config = Config::load()?;
    post_commit_in(&repo_root, &config)
}

pub fn post_commit_in(repo_root: &Path, config: &Config) -> Result<(), Error> {
    if !config.hooks.clear_after_commit {
        return Ok(());
    }

    let mut store = WorkItemStore::load(repo_root)?;
    if store.is_empty() {
        return Ok(());
    }

    store.clear();
    store.save(repo_root)?;
    info!("Cleared work item associations");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::WorkItemRef;
    use tempfile::TempDir;

    fn repo_with_item() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let mut store = WorkItemStore::default();
        store.associate(WorkItemRef::new(1, "Task", "A"));
        store.save(dir.path()).unwrap();
        dir
    }

    #[test]
    fn test_post_commit_clears() {
        let dir = repo_with_item();
        post_commit_in(dir.path(), &Config::default()).unwrap();
        assert!(WorkItemStore::load(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_post_commit_keeps_when_disabled() {
        let dir = repo_with_item();
        let mut config = Config::default();
        config.hooks.clear_after_commit = false;

        post_commit_in(dir.path(), &config).unwrap();
        assert_eq!(WorkItemStore::load(dir.path()).unwrap().work_items().len(), 1);
    }
}
