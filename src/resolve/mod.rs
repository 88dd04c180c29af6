//! Coverage report file resolution.
//!
//! The configured `path` input does double duty: it is a glob pattern for
//! filesystem expansion and, read verbatim, a regular expression whose named
//! capture groups parameterize each file's title and identity templates.
//!
//! Resolution derives a glob-safe pattern (named capture groups become `*`,
//! regex escapes are unwrapped), expands it under the workspace root, then
//! re-matches every candidate's workspace-relative path against the original
//! pattern as a regex. Candidates the regex rejects are skipped with a trace;
//! an expansion that yields no candidates at all is a configuration error.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One resolved coverage report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// Path relative to the workspace root.
    pub path: PathBuf,
    /// Values captured by the pattern's named groups; empty when the pattern
    /// has none.
    pub named_groups: BTreeMap<String, String>,
}

/// Errors that can occur while resolving report files.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("path pattern `{pattern}` is not a valid regular expression: {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("path pattern `{pattern}` expands to an invalid glob: {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to read a path matched by the glob: {0}")]
    Walk(#[from] glob::GlobError),

    /// The filesystem expansion matched nothing. Treated as a configuration
    /// error: publishing zero comments silently would hide a broken path
    /// input.
    #[error("no coverage report files matched pattern `{pattern}`")]
    NoMatches { pattern: String },
}

/// Expands `pattern` under `workspace` and returns every file that also
/// satisfies the pattern as a regex, with its named captures extracted.
pub fn resolve_files(workspace: &Path, pattern: &str) -> Result<Vec<FileMatch>, ResolveError> {
    let regex = Regex::new(pattern).map_err(|source| ResolveError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })?;

    let glob_pattern = glob_safe_pattern(pattern);
    let expanded = workspace.join(&glob_pattern).to_string_lossy().into_owned();
    tracing::debug!(pattern, glob = %glob_pattern, "expanding report path pattern");

    let mut matches = Vec::new();
    let mut candidates = 0usize;
    for entry in glob::glob(&expanded).map_err(|source| ResolveError::InvalidGlob {
        pattern: glob_pattern.clone(),
        source,
    })? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        candidates += 1;

        let relative = path.strip_prefix(workspace).unwrap_or(&path);
        let Some(relative_str) = relative.to_str() else {
            tracing::warn!(path = %relative.display(), "skipping non-UTF-8 path");
            continue;
        };

        match capture_named_groups(&regex, relative_str) {
            Some(named_groups) => matches.push(FileMatch {
                path: relative.to_path_buf(),
                named_groups,
            }),
            None => {
                tracing::debug!(
                    path = relative_str,
                    pattern,
                    "path matched the glob but not the pattern regex; skipping"
                );
            }
        }
    }

    if candidates == 0 {
        return Err(ResolveError::NoMatches {
            pattern: pattern.to_string(),
        });
    }

    Ok(matches)
}

/// Derives a glob pattern from a combined glob/regex path pattern.
///
/// Every named capture group (`(?<name>...)` or `(?P<name>...)`) is replaced
/// with `*`, and regex escapes outside groups are unwrapped (`\.` becomes
/// `.`), so the filesystem walk does not choke on regex-only syntax.
/// Everything else passes through unchanged.
pub fn glob_safe_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while !rest.is_empty() {
        if let Some(group_len) = named_group_len(rest) {
            out.push('*');
            rest = &rest[group_len..];
            continue;
        }
        let mut chars = rest.chars();
        let c = chars.next().unwrap();
        if c == '\\' {
            // Regex escape of a literal character; the glob wants it bare.
            if let Some(escaped) = chars.next() {
                out.push(escaped);
                rest = &rest[1 + escaped.len_utf8()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// If `s` starts with a named capture group, returns the byte length of the
/// whole group including its closing parenthesis.
///
/// Both `(?<name>...)` and `(?P<name>...)` spellings are recognized, matching
/// what the regex engine accepts. `(?<=` / `(?<!` lookbehind syntax is not a
/// named group and is left alone. Returns `None` for unbalanced input; regex
/// compilation reports that case with a proper error.
fn named_group_len(s: &str) -> Option<usize> {
    let is_named = (s.starts_with("(?<") && !s.starts_with("(?<=") && !s.starts_with("(?<!"))
        || s.starts_with("(?P<");
    if !is_named {
        return None;
    }

    let mut depth = 0usize;
    let mut in_class = false;
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Runs the pattern regex against one candidate path, extracting named
/// captures. Returns `None` when the path does not match.
fn capture_named_groups(regex: &Regex, path: &str) -> Option<BTreeMap<String, String>> {
    let captures = regex.captures(path)?;
    let mut groups = BTreeMap::new();
    for name in regex.capture_names().flatten() {
        if let Some(value) = captures.name(name) {
            groups.insert(name.to_string(), value.as_str().to_string());
        }
    }
    Some(groups)
}
