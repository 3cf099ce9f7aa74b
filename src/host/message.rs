//! Commit message file handling for the `commit-msg` hook.

use std::path::Path;

use crate::error::Error;

/// Marker line used by `git commit --verbose`; everything below it is dropped.
const SCISSORS: &str = " ------------------------ >8 ------------------------";

/// Extract the check-in comment from a raw commit message.
///
/// Comment lines and everything from the scissors line on are removed. A
/// message that is then blank is reported as `None`, which is how git itself
/// treats it. Otherwise the remaining text is returned as written.
pub fn comment_from_message(raw: &str, comment_char: char) -> Option<String> {
    let mut kept = String::with_capacity(raw.len());

    for line in raw.split_inclusive('\n') {
        if let Some(rest) = line.strip_prefix(comment_char) {
            if rest.trim_end_matches(['\r', '\n']) == SCISSORS {
                break;
            }
            continue;
        }
        kept.push_str(line);
    }

    if kept.trim().is_empty() {
        None
    } else {
        Some(kept)
    }
}

pub fn read_comment(path: &Path, comment_char: char) -> Result<Option<String>, Error> {
    let raw = std::fs::read_to_string(path)?;
    Ok(comment_from_message(&raw, comment_char))
}

/// Replace the message file with a generated comment.
pub fn write_comment(path: &Path, comment: &str) -> Result<(), Error> {
    std::fs::write(path, comment)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_message_is_kept_verbatim() {
        assert_eq!(
            comment_from_message("Fix parser\n\nDetails\n", '#'),
            Some("Fix parser\n\nDetails\n".to_string())
        );
    }

    #[test]
    fn test_template_only_is_empty() {
        let raw = "\n# Please enter the commit message for your changes.\n#\n# On branch main\n";
        assert_eq!(comment_from_message(raw, '#'), None);
        assert_eq!(comment_from_message("", '#'), None);
        assert_eq!(comment_from_message("  \n\t\n", '#'), None);
    }

    #[test]
    fn test_comment_lines_are_dropped() {
        let raw = "Subject\n# comment\nBody\n";
        assert_eq!(
            comment_from_message(raw, '#'),
            Some("Subject\nBody\n".to_string())
        );
    }

    #[test]
    fn test_custom_comment_char() {
        let raw = "; note\n#1 is the issue\n";
        assert_eq!(
            comment_from_message(raw, ';'),
            Some("#1 is the issue\n".to_string())
        );
    }

    #[test]
    fn test_scissors_truncates() {
        let raw = "Subject\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        assert_eq!(comment_from_message(raw, '#'), Some("Subject\n".to_string()));
    }

    #[test]
    fn test_read_and_write_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "# only a comment\n").unwrap();

        assert_eq!(read_comment(&path, '#').unwrap(), None);

        write_comment(&path, "Bug#42, Fix crash\n").unwrap();
        assert_eq!(
            read_comment(&path, '#').unwrap(),
            Some("Bug#42, Fix crash\n".to_string())
        );
    }
}
