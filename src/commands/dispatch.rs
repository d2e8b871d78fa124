//! Command dispatch.
//!
//! The [`Dispatcher`] owns the registry and the dispatcher-wide defaults.
//! Registration needs `&mut self`; dispatch only needs `&self`, so the
//! registry is frozen once messages start flowing.

use super::args::tokenize;
use super::context::Context;
use super::entry::{Entry, effective_case_sensitive, full_invocation};
use super::matcher::{find_match, strip_invocation};
use super::registry::Registry;
use crate::classify::{ChanTypes, ChannelClassifier};
use crate::client::Client;
use crate::config::Config;
use crate::error::{DispatchError, HandlerError};
use crate::message::Message;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, debug_span, error, trace};

/// How many alias rewrites one message may go through.
const MAX_ALIAS_DEPTH: usize = 1;

/// Matches messages against registered commands and runs their handlers.
pub struct Dispatcher {
    registry: Registry,
    prefix: String,
    case_sensitive: bool,
    default_listeners: bool,
    client: Arc<dyn Client>,
    classifier: Box<dyn ChannelClassifier>,
    /// Invocation counters by command id.
    command_counts: Mutex<HashMap<String, u64>>,
}

impl Dispatcher {
    /// Create a dispatcher with the default options (`!` prefix,
    /// case-insensitive, `#` channels).
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self::from_config(client, &Config::default())
    }

    /// Create a dispatcher from the bot configuration.
    pub fn from_config(client: Arc<dyn Client>, config: &Config) -> Self {
        Self {
            registry: Registry::new(),
            prefix: config.prefix.clone(),
            case_sensitive: config.case_sensitive,
            default_listeners: config.default_listeners,
            client,
            classifier: Box::new(ChanTypes::new(config.chantypes.clone())),
            command_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the channel classifier.
    pub fn with_classifier(mut self, classifier: impl ChannelClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Register a command or alias.
    pub fn add_command(&mut self, entry: impl Into<Entry>) {
        let entry = entry.into();
        debug!(name = %entry.name(), id = %entry.id(), "Registered command");
        self.registry.add(entry);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn client(&self) -> &Arc<dyn Client> {
        &self.client
    }

    /// Whether a message to `target` counts as private.
    pub fn is_private(&self, target: &str) -> bool {
        self.classifier.is_private(target)
    }

    /// Listener for incoming PRIVMSGs.
    ///
    /// Does nothing when `default_listeners` is off, so embedders can route
    /// messages through [`run_commands`](Self::run_commands) themselves.
    pub fn handle_privmsg(&self, msg: &Message) -> Result<(), DispatchError> {
        if !self.default_listeners {
            return Ok(());
        }
        self.run_commands(msg, &msg.text, self.is_private(&msg.target))
    }

    /// Match `content` and run the selected command.
    ///
    /// No match is not an error. Handler failures are logged and
    /// swallowed; only broken aliases are reported.
    pub fn run_commands(
        &self,
        msg: &Message,
        content: &str,
        is_private: bool,
    ) -> Result<(), DispatchError> {
        self.run_commands_at(msg, content, is_private, 0)
    }

    fn run_commands_at(
        &self,
        msg: &Message,
        content: &str,
        is_private: bool,
        depth: usize,
    ) -> Result<(), DispatchError> {
        let Some(found) = find_match(
            &self.registry,
            content,
            is_private,
            &self.prefix,
            self.case_sensitive,
        )?
        else {
            trace!(text = %content, "No command matched");
            return Ok(());
        };

        if let Entry::Alias(alias) = found.entry {
            if !alias.alias_to.is_empty() {
                if depth >= MAX_ALIAS_DEPTH {
                    return Err(DispatchError::AliasDepthExceeded {
                        alias: alias.id.clone(),
                    });
                }

                // Rewrite the alias invocation into the target's and match
                // again, so the remainder can reach the target's subcommands.
                let alias_full = found.entry.full_invocation(&self.prefix);
                let target_full = full_invocation(
                    found.command.prefix_override.as_deref(),
                    &self.prefix,
                    &found.command.name,
                );
                let case_sensitive =
                    effective_case_sensitive(found.command.case_sensitive, self.case_sensitive);
                let rest = strip_invocation(content, &alias_full, case_sensitive).unwrap_or("");
                let rewritten = format!("{target_full}{rest}");

                debug!(alias = %alias.id, from = %content, to = %rewritten, "Re-dispatching alias");
                return self.run_commands_at(msg, &rewritten, is_private, depth + 1);
            }
        }

        self.invoke(found.entry.id(), msg, content, is_private);
        Ok(())
    }

    /// Run the command with `id` directly, skipping matching.
    ///
    /// Arguments are sliced from `msg.text` as if it started with the
    /// command's full invocation.
    pub fn run_command(&self, id: &str, msg: &Message) {
        self.invoke(id, msg, &msg.text, self.is_private(&msg.target));
    }

    fn invoke(&self, id: &str, msg: &Message, content: &str, is_private: bool) {
        let Some(command) = self.registry.find_command(id) else {
            debug!(id = %id, "No command with this id");
            return;
        };

        let full = full_invocation(command.prefix_override.as_deref(), &self.prefix, &command.name);
        let args = tokenize(args_after(content, &full), command.arg_type);

        *self
            .command_counts
            .lock()
            .entry(command.id.clone())
            .or_insert(0) += 1;

        let span = debug_span!(
            "irc.command",
            command = %full,
            id = %command.id,
            target = %msg.target,
            nick = msg.nick.as_deref(),
            private = is_private,
        );
        let _enter = span.enter();

        let ctx = Context {
            message: msg,
            text: content,
            command: &full,
            is_private,
            client: self.client.as_ref(),
            dispatcher: self,
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| command.handler.handle(&ctx, &args)))
            .unwrap_or_else(|payload| Err(HandlerError::Panicked(panic_message(payload.as_ref()))));

        if let Err(e) = result {
            error!(
                command = %full,
                args = ?args,
                error = %e,
                code = e.error_code(),
                "Error running command"
            );
        }
    }

    /// Help lines for every registered entry.
    pub fn help_lines(&self) -> Vec<String> {
        self.registry.help_lines(&self.prefix)
    }

    /// Usage counts of commands run at least once, most used first.
    pub fn command_stats(&self) -> Vec<(String, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .lock()
            .iter()
            .map(|(id, count)| (id.clone(), *count))
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats
    }
}

/// Everything after `full` and one separating character.
fn args_after<'t>(content: &'t str, full: &str) -> &'t str {
    let skip = full.chars().count() + 1;
    content
        .char_indices()
        .nth(skip)
        .map_or("", |(i, _)| &content[i..])
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
