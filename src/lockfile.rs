//! yarn.lock rebasing
//!
//! Local dependencies are recorded in the lockfile with paths relative to
//! the project (`"pkg@file:../local-dep":`). When the lockfile is copied to
//! another directory those paths are prefixed with the way back to the
//! original root.

use regex::Regex;
use std::sync::LazyLock;

/// File name of the yarn lockfile
pub const LOCKFILE_NAME: &str = "yarn.lock";

// `<name>@[file:]./path` or `../path`, ended by `"`, `:` or `,`
static FILE_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^"/]@(?:file:)?((?:\./|\.\./).*?)[":,]"#).unwrap());

/// A single relative path and what it becomes after rebasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Path as found in the lockfile
    pub old_ref: String,
    /// Path prefixed with the way back to the root
    pub new_ref: String,
}

/// Rewrites relative file references inside lockfile text
#[derive(Debug, Clone, Copy, Default)]
pub struct LockfileRebaser;

impl LockfileRebaser {
    /// Create a new rebaser
    pub fn new() -> Self {
        Self
    }

    /// Collect the distinct references in order of first appearance
    pub fn replacements(&self, lockfile: &str, path_to_root: &str) -> Vec<Replacement> {
        let root = path_to_root.trim_end_matches(['/', '\\']);
        if root.is_empty() {
            return Vec::new();
        }

        let mut replacements: Vec<Replacement> = Vec::new();
        for caps in FILE_REFERENCE_RE.captures_iter(lockfile) {
            let Some(path) = caps.get(1) else {
                continue;
            };
            let old_ref = path.as_str();
            if replacements.iter().any(|r| r.old_ref == old_ref) {
                continue;
            }
            replacements.push(Replacement {
                old_ref: old_ref.to_string(),
                new_ref: format!("{}/{}", root, old_ref).replace('\\', "/"),
            });
        }
        replacements
    }

    /// Rebase every relative file reference onto `path_to_root`
    ///
    /// Each occurrence of a found path is rewritten exactly once, in a single
    /// scan over the original text; the output of one replacement is never
    /// matched again. Text without references is returned unchanged.
    pub fn rebase(&self, lockfile: &str, path_to_root: &str) -> String {
        let mut replacements = self.replacements(lockfile, path_to_root);
        if replacements.is_empty() {
            return lockfile.to_string();
        }

        // Longest first so that `../a/b` wins over `../a` at the same position
        replacements.sort_by(|a, b| b.old_ref.len().cmp(&a.old_ref.len()));

        let mut output = String::with_capacity(lockfile.len());
        let mut rest = lockfile;
        // Every reference starts with `.`
        while let Some(pos) = rest.find('.') {
            output.push_str(&rest[..pos]);
            rest = &rest[pos..];

            match replacements
                .iter()
                .find(|r| rest.starts_with(r.old_ref.as_str()))
            {
                Some(replacement) => {
                    output.push_str(&replacement.new_ref);
                    rest = &rest[replacement.old_ref.len()..];
                }
                None => {
                    output.push('.');
                    rest = &rest[1..];
                }
            }
        }
        output.push_str(rest);
        output
    }
}
