//! Manage work items associated with the next commit.

use std::path::Path;

use crate::error::Error;
use crate::host::git::find_repo_root;
use crate::host::work_items::WorkItemStore;
use crate::policy::WorkItemRef;

fn repo_root() -> Result<std::path::PathBuf, Error> {
    find_repo_root(&std::env::current_dir()?)
}

/// Run associate command.
pub fn associate(id: i32, type_name: &str, title: &str) -> Result<(), Error> {
    let root = repo_root()?;
    let count = associate_in(&root, WorkItemRef::new(id, type_name, title))?;
    println!("Associated {}#{} ({} total).", type_name, id, count);
    Ok(())
}

/// Associate a work item and return how many are now associated.
pub fn associate_in(repo_root: &Path, item: WorkItemRef) -> Result<usize, Error> {
    let mut store = WorkItemStore::load(repo_root)?;
    store.associate(item);
    store.save(repo_root)?;
    Ok(store.items.len())
}

/// Run dissociate command.
pub fn dissociate(id: i32) -> Result<(), Error> {
    let root = repo_root()?;
    if dissociate_in(&root, id)? {
        println!("Removed work item {}.", id);
    } else {
        println!("Work item {} is not associated.", id);
    }
    Ok(())
}

pub fn dissociate_in(repo_root: &Path, id: i32) -> Result<bool, Error> {
    let mut store = WorkItemStore::load(repo_root)?;
    let removed = store.dissociate(id);
    if removed {
        store.save(repo_root)?;
    }
    Ok(removed)
}

/// Run items command.
pub fn list(json: bool) -> Result<(), Error> {
    let store = WorkItemStore::load(&repo_root()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&store.items)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No work items associated.");
        println!("Associate one with: autocomment associate <ID> --type <TYPE> --title <TITLE>");
        return Ok(());
    }

    for entry in &store.items {
        println!(
            "{}#{}  {}  (since {})",
            entry.item.type_name, entry.item.id, entry.item.title, entry.associated_at
        );
    }
    Ok(())
}
