//! Selecting the entry a message invokes.

use super::entry::{CommandEntry, Entry, effective_case_sensitive, full_invocation};
use super::registry::Registry;
use crate::error::DispatchError;

/// The entry a message matched, and the command it resolves to.
///
/// For a command both fields point at the same entry.
#[derive(Debug, Clone, Copy)]
pub struct Match<'r> {
    pub entry: &'r Entry,
    pub command: &'r CommandEntry,
}

/// Find the best entry for `text`.
///
/// An entry is a candidate when the text equals its full invocation or
/// continues with a space after it. Candidates must be allowed by their
/// (resolved) visibility; the longest name wins and ties keep the first
/// registered. Aliases take case sensitivity and visibility from their
/// target, and a broken alias aborts the scan.
pub fn find_match<'r>(
    registry: &'r Registry,
    text: &str,
    is_private: bool,
    prefix: &str,
    default_case_sensitive: bool,
) -> Result<Option<Match<'r>>, DispatchError> {
    let mut best: Option<(Match<'r>, usize)> = None;

    for entry in registry.iter() {
        let command = match entry {
            Entry::Command(cmd) => cmd,
            Entry::Alias(alias) => registry.resolve_alias(alias)?,
        };

        let full = full_invocation(entry.prefix_override(), prefix, entry.name());
        let case_sensitive =
            effective_case_sensitive(command.case_sensitive, default_case_sensitive);
        if strip_invocation(text, &full, case_sensitive).is_none() {
            continue;
        }
        if !command.visibility.allows(is_private) {
            continue;
        }

        let name_len = entry.name().chars().count();
        if best.as_ref().is_none_or(|(_, len)| name_len > *len) {
            best = Some((Match { entry, command }, name_len));
        }
    }

    Ok(best.map(|(m, _)| m))
}

/// If `text` invokes `full`, return what follows it.
///
/// The remainder is empty for an exact match and starts with the
/// separating space otherwise.
pub fn strip_invocation<'t>(text: &'t str, full: &str, case_sensitive: bool) -> Option<&'t str> {
    let rest = if case_sensitive {
        text.strip_prefix(full)?
    } else {
        strip_prefix_caseless(text, full)?
    };
    (rest.is_empty() || rest.starts_with(' ')).then_some(rest)
}

/// Char-by-char case-insensitive prefix strip.
fn strip_prefix_caseless<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    let mut text_chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = text_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let offset = text_chars.next().map_or(text.len(), |(i, _)| i);
    Some(&text[offset..])
}
