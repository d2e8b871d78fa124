//! Prefix command system.
//!
//! - [`entry`]: command and alias entries, argument and visibility policies
//! - [`registry`]: insertion-ordered entry storage and alias resolution
//! - [`matcher`]: longest-name matching with case and visibility rules
//! - [`args`]: pipe and space/quote argument tokenizers
//! - [`dispatch`]: the [`Dispatcher`], alias re-dispatch and handler isolation
//! - [`loader`]: registering entries from a directory of TOML manifests

pub mod args;
pub mod context;
pub mod dispatch;
pub mod entry;
pub mod loader;
pub mod matcher;
pub mod registry;

pub use args::{DelimiterSplitter, parse_args, parse_args_spaces, tokenize};
pub use context::{Context, Handler};
pub use dispatch::Dispatcher;
pub use entry::{AliasEntry, ArgType, CommandBuilder, CommandEntry, Entry, Visibility};
pub use loader::{HandlerTable, load_commands};
pub use matcher::{Match, find_match};
pub use registry::Registry;
