//! Command manifest loader.
//!
//! Walks a directory of TOML manifests and registers one entry per file.
//! Command names come from the file's path:
//!
//! ```text
//! commands/ping.toml                 -> !ping
//! commands/sub/action.toml           -> !sub action
//! commands/sub/action/index.toml     -> !sub action
//! commands/(admin)/kick.toml         -> !kick
//! commands/index.toml                -> !index
//! commands/_draft.toml               -> (skipped)
//! ```
//!
//! A manifest with `alias_to` becomes an alias; anything else is a command
//! whose handler is looked up in a [`HandlerTable`] by its `handler` key,
//! or by the command id when no key is given.

use super::context::{Context, Handler};
use super::dispatch::Dispatcher;
use super::entry::{AliasEntry, ArgType, CommandEntry, Entry, Visibility};
use crate::error::{HandlerResult, LoaderError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const MANIFEST_EXTENSION: &str = ".toml";

/// Handlers available to manifests, by key.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler function under `key`.
    pub fn insert<F>(&mut self, key: impl Into<String>, handler: F)
    where
        F: Fn(&Context<'_>, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        self.handlers.insert(key.into(), Arc::new(handler));
    }

    /// Register an already shared handler under `key`.
    pub fn insert_shared(&mut self, key: impl Into<String>, handler: Arc<dyn Handler>) {
        self.handlers.insert(key.into(), handler);
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// One manifest file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    name: Option<String>,
    id: Option<String>,
    description: Option<String>,
    #[serde(alias = "aliasTo")]
    alias_to: Option<String>,
    prefix_override: Option<String>,
    case_sensitive: Option<bool>,
    #[serde(default)]
    arg_type: ArgType,
    #[serde(default)]
    visibility: Visibility,
    handler: Option<String>,
}

impl Manifest {
    fn into_entry(self, name: String, handlers: &HandlerTable) -> Result<Entry, LoaderError> {
        let id = self.id.unwrap_or_else(|| name.clone());

        if let Some(alias_to) = self.alias_to {
            return Ok(AliasEntry {
                name,
                id,
                alias_to,
                prefix_override: self.prefix_override,
                case_sensitive: self.case_sensitive,
            }
            .into());
        }

        let key = self.handler.as_deref().unwrap_or(&id);
        let handler = handlers.get(key);
        if handler.is_none() {
            debug!(id = %id, key = %key, "No handler registered under key");
        }

        let command: CommandEntry = CommandEntry::builder(name)
            .id(id.clone())
            .description(self.description)
            .handler(handler)
            .prefix_override(self.prefix_override)
            .case_sensitive(self.case_sensitive)
            .arg_type(self.arg_type)
            .visibility(self.visibility)
            .build()?;
        Ok(command.into())
    }
}

/// Load every manifest under `dir` into `dispatcher`.
///
/// Directory entries are visited in file-name order so registration order
/// (and therefore tie-breaking) is stable. Returns the number of entries
/// registered.
pub fn load_commands(
    dispatcher: &mut Dispatcher,
    dir: impl AsRef<Path>,
    handlers: &HandlerTable,
) -> Result<usize, LoaderError> {
    let dir = dir.as_ref();
    let count = load_dir(dispatcher, dir, &[], handlers)?;
    info!(dir = %dir.display(), count, "Loaded command manifests");
    Ok(count)
}

fn load_dir(
    dispatcher: &mut Dispatcher,
    dir: &Path,
    parents: &[String],
    handlers: &HandlerTable,
) -> Result<usize, LoaderError> {
    let io_err = |source| LoaderError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut count = 0;
    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_err)?;
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_file() {
            let Some(stem) = file_name.strip_suffix(MANIFEST_EXTENSION) else {
                continue;
            };
            if file_name.starts_with('_') {
                continue;
            }

            let content = fs::read_to_string(&path).map_err(|source| LoaderError::Io {
                path: path.clone(),
                source,
            })?;
            let manifest: Manifest =
                toml::from_str(&content).map_err(|source| LoaderError::Manifest {
                    path: path.clone(),
                    source,
                })?;

            let name = manifest
                .name
                .clone()
                .unwrap_or_else(|| infer_name(parents, stem));
            dispatcher.add_command(manifest.into_entry(name, handlers)?);
            count += 1;
        } else if file_type.is_dir() {
            if is_group(&file_name) {
                count += load_dir(dispatcher, &path, parents, handlers)?;
            } else {
                let mut nested = parents.to_vec();
                nested.push(file_name);
                count += load_dir(dispatcher, &path, &nested, handlers)?;
            }
        }
    }

    Ok(count)
}

/// `(name)` directories group files without naming them.
fn is_group(dir_name: &str) -> bool {
    dir_name.len() >= 2 && dir_name.starts_with('(') && dir_name.ends_with(')')
}

/// Command name for a manifest `stem` nested under `parents`.
///
/// `index` names its directory, except at the root where it is a command
/// called `index`.
pub fn infer_name(parents: &[String], stem: &str) -> String {
    let mut segments: Vec<&str> = parents.iter().map(String::as_str).collect();
    if stem != "index" || parents.is_empty() {
        segments.push(stem);
    }
    segments.join(" ")
}
