//! `${name}` placeholder substitution for title and identity templates.
//!
//! Titles and identities are configured as templates over the named capture
//! groups extracted by path resolution. Substitution is global and total: a
//! placeholder naming a group the pattern did not capture fails the
//! expansion outright rather than letting literal `${...}` syntax leak into
//! a published comment.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Placeholder syntax: `${name}` where name is a regex group identifier.
/// Anything else, including `${}` or `${1bad}`, is literal text.
fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

/// Errors that can occur when expanding a template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template names a group the path pattern did not capture.
    #[error("template `{template}` references `${{{name}}}`, which the path pattern did not capture")]
    UnboundPlaceholder { template: String, name: String },
}

/// Replaces every `${name}` occurrence in `template` with the captured value.
///
/// All placeholders are checked before any substitution happens, so a
/// failed expansion never produces partial output. The same (template,
/// groups) pair always yields the same string.
pub fn expand(
    template: &str,
    named_groups: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    for captures in placeholder_regex().captures_iter(template) {
        let name = &captures[1];
        if !named_groups.contains_key(name) {
            return Err(TemplateError::UnboundPlaceholder {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
    }

    let expanded = placeholder_regex()
        .replace_all(template, |captures: &Captures<'_>| {
            named_groups[&captures[1]].clone()
        });
    Ok(expanded.into_owned())
}
