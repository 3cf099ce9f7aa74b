//! Git hook installation and repository discovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;

/// Marker identifying lines we own inside hook scripts.
const HOOK_MARKER: &str = "autocomment";

/// Commit-msg hook: runs the policies against the final message.
const COMMIT_MSG_HOOK: &str = r#"#!/bin/sh
# autocomment check-in policy (auto-installed)
autocomment check "$1" || exit 1
"#;

/// Post-commit hook: drops associations used by the commit.
const POST_COMMIT_HOOK: &str = r#"#!/bin/sh
# autocomment work item cleanup (auto-installed)
autocomment _internal post-commit 2>/dev/null || true
"#;

const HOOKS: [(&str, &str); 2] = [
    ("commit-msg", COMMIT_MSG_HOOK),
    ("post-commit", POST_COMMIT_HOOK),
];

/// Find the repository root containing `start`.
///
/// `.git` may be a directory or, in linked worktrees and submodules, a file
/// pointing at the real git directory.
pub fn find_repo_root(start: &Path) -> Result<PathBuf, Error> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::NotAGitRepo(start.to_path_buf()))
}

/// Resolve the git directory of a checkout, following a `gitdir:` file.
pub fn git_dir(repo_root: &Path) -> Result<PathBuf, Error> {
    let dot_git = repo_root.join(".git");
    if dot_git.is_dir() {
        return Ok(dot_git);
    }
    if !dot_git.is_file() {
        return Err(Error::NotAGitRepo(repo_root.to_path_buf()));
    }

    let content = fs::read_to_string(&dot_git)?;
    let target = content
        .lines()
        .find_map(|line| line.strip_prefix("gitdir:"))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::NotAGitRepo(repo_root.to_path_buf()))?;

    // Relative targets are relative to the checkout
    Ok(repo_root.join(target))
}

/// Directory shared by all worktrees of a repository; hooks live here.
fn common_dir(git_dir: &Path) -> Result<PathBuf, Error> {
    let commondir = git_dir.join("commondir");
    if !commondir.is_file() {
        return Ok(git_dir.to_path_buf());
    }
    let target = fs::read_to_string(commondir)?;
    Ok(git_dir.join(target.trim()))
}

fn hooks_dir(repo_root: &Path) -> Result<PathBuf, Error> {
    Ok(common_dir(&git_dir(repo_root)?)?.join("hooks"))
}

/// Check if both of our hooks are installed.
pub fn hooks_installed(repo_root: &Path) -> bool {
    let Ok(hooks_dir) = hooks_dir(repo_root) else {
        return false;
    };

    HOOKS.iter().all(|(name, _)| {
        fs::read_to_string(hooks_dir.join(name))
            .map(|content| content.contains(HOOK_MARKER))
            .unwrap_or(false)
    })
}

/// Install the commit-msg and post-commit hooks.
pub fn install_hooks(repo_root: &Path) -> Result<(), Error> {
    let hooks_dir = hooks_dir(repo_root)?;
    fs::create_dir_all(&hooks_dir)?;

    for (name, content) in HOOKS {
        install_hook(&hooks_dir.join(name), content)?;
        info!(hook = name, "Installed hook");
    }

    Ok(())
}

/// Install a single hook, preserving existing hooks.
fn install_hook(path: &Path, content: &str) -> Result<(), Error> {
    let final_content = if path.exists() {
        let existing = fs::read_to_string(path)?;

        if existing.contains(HOOK_MARKER) {
            return Ok(());
        }

        // Append to the foreign hook, minus our shebang
        let body = content.strip_prefix("#!/bin/sh\n").unwrap_or(content);
        format!("{}\n\n{}", existing.trim_end(), body)
    } else {
        content.to_string()
    };

    fs::write(path, &final_content)?;
    make_executable(path)?;

    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}

/// Remove our hooks, keeping any foreign hook content.
pub fn uninstall_hooks(repo_root: &Path) -> Result<(), Error> {
    let hooks_dir = hooks_dir(repo_root)?;
    if !hooks_dir.exists() {
        return Ok(());
    }

    for (name, _) in HOOKS {
        let hook_path = hooks_dir.join(name);
        if !hook_path.exists() {
            continue;
        }
        let content = fs::read_to_string(&hook_path)?;
        if !content.contains(HOOK_MARKER) {
            continue;
        }

        let cleaned = remove_our_lines(&content);
        if cleaned.trim().is_empty() || cleaned.trim() == "#!/bin/sh" {
            fs::remove_file(&hook_path)?;
        } else {
            fs::write(&hook_path, format!("{}\n", cleaned.trim_end()))?;
        }
        info!(hook = name, "Removed hook");
    }

    Ok(())
}

fn remove_our_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.contains(HOOK_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}
