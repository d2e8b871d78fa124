//! Ordered registry of commands and aliases.

use super::entry::{AliasEntry, CommandEntry, Entry};
use crate::error::DispatchError;

/// Insertion-ordered command and alias entries.
///
/// Ids are not required to be unique; lookups return the first match.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Aliases are not validated here.
    pub fn add(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// All command entries, skipping aliases.
    pub fn commands(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter().filter_map(Entry::as_command)
    }

    /// First entry with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// First command entry with the given id, skipping aliases.
    pub fn find_command(&self, id: &str) -> Option<&CommandEntry> {
        self.find_by_id(id).and_then(Entry::as_command)
    }

    /// Resolve an alias to the command it points at.
    ///
    /// Fails if the target is missing or is itself an alias.
    pub fn resolve_alias(&self, alias: &AliasEntry) -> Result<&CommandEntry, DispatchError> {
        match self.find_by_id(&alias.alias_to) {
            Some(Entry::Command(cmd)) => Ok(cmd),
            Some(Entry::Alias(_)) => Err(DispatchError::AliasToAlias {
                alias: alias.id.clone(),
                target: alias.alias_to.clone(),
            }),
            None => Err(DispatchError::AliasTargetMissing {
                alias: alias.id.clone(),
                target: alias.alias_to.clone(),
            }),
        }
    }

    /// Help lines in registration order, padded to the longest invocation.
    ///
    /// Commands print their description; aliases print their target id.
    pub fn help_lines(&self, prefix: &str) -> Vec<String> {
        let invocations: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.full_invocation(prefix))
            .collect();
        let longest = invocations
            .iter()
            .map(|inv| inv.chars().count())
            .max()
            .unwrap_or(0);

        self.entries
            .iter()
            .zip(invocations)
            .map(|(entry, invocation)| {
                let detail = match entry {
                    Entry::Command(cmd) => cmd.description.clone().unwrap_or_default(),
                    Entry::Alias(alias) => format!("→ {}", alias.alias_to),
                };
                format!("{invocation:<longest$} {detail}").trim_end().to_string()
            })
            .collect()
    }
}
