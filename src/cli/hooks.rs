//! Install and remove the git hooks.

use std::path::Path;

use crate::error::Error;
use crate::host::git;
use crate::policy::AUTO_COMMENT_POLICY;

/// Run install command.
pub fn install() -> Result<(), Error> {
    let repo_root = git::find_repo_root(&std::env::current_dir()?)?;
    install_in(&repo_root)?;

    println!("Git hooks installed.");
    println!("{}", AUTO_COMMENT_POLICY.long_description);
    Ok(())
}

/// Install hooks in a repository. Returns false if they were already there.
pub fn install_in(repo_root: &Path) -> Result<bool, Error> {
    if git::hooks_installed(repo_root) {
        return Ok(false);
    }
    git::install_hooks(repo_root)?;
    Ok(true)
}

/// Run uninstall command.
pub fn uninstall() -> Result<(), Error> {
    let repo_root = git::find_repo_root(&std::env::current_dir()?)?;

    if !git::hooks_installed(&repo_root) {
        println!("No autocomment hooks found.");
        return Ok(());
    }

    git::uninstall_hooks(&repo_root)?;
    println!("Git hooks removed.");
    Ok(())
}
