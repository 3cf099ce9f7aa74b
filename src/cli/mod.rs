//! CLI commands for autocomment.

pub mod check;
pub mod hooks;
pub mod internal;
pub mod items;
pub mod policy;

use clap::{Parser, Subcommand};

/// autocomment - check-in comments generated from associated work items
#[derive(Parser)]
#[command(name = "autocomment")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the git hooks in this repository
    Install,

    /// Remove the git hooks from this repository
    Uninstall,

    /// Associate a work item with the next commit
    Associate {
        /// Work item ID
        id: i32,

        /// Work item type (Bug, Task, ...)
        #[arg(long = "type")]
        type_name: String,

        /// Work item title
        #[arg(long)]
        title: String,
    },

    /// Remove a work item association
    Dissociate {
        /// Work item ID
        id: i32,
    },

    /// List associated work items
    Items {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the comment the next commit would get
    Preview,

    /// List registered policies
    Policies,

    /// Enable a policy
    Enable {
        /// Policy unique ID
        id: String,
    },

    /// Disable a policy
    Disable {
        /// Policy unique ID
        id: String,
    },

    /// Evaluate policies against a commit message file (used by commit-msg hook)
    Check {
        /// Path to the commit message file
        message_file: std::path::PathBuf,
    },

    /// Internal commands run by git hooks
    #[command(name = "_internal", hide = true)]
    Internal {
        #[command(subcommand)]
        command: InternalCommands,
    },
}

#[derive(Subcommand)]
pub enum InternalCommands {
    /// Clear associations after a successful commit
    PostCommit,
}
