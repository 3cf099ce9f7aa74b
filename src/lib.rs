//! autocomment library.
//!
//! Check-in policy that lets a commit go through without a comment when work
//! items are associated, generating the comment from them.

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod policy;

pub use error::Error;
