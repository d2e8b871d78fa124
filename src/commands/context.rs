//! Command handler context and the handler trait.

use super::dispatch::Dispatcher;
use crate::client::Client;
use crate::error::HandlerResult;
use crate::message::Message;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The message that triggered the command.
    pub message: &'a Message,
    /// Text the command was matched against (rewritten by aliases).
    pub text: &'a str,
    /// Full invocation that matched, e.g. `"!sub action"`.
    pub command: &'a str,
    /// Whether the message arrived privately.
    pub is_private: bool,
    /// Client to reply through.
    pub client: &'a dyn Client,
    /// The dispatcher running this command, for invoking other commands.
    pub dispatcher: &'a Dispatcher,
}

impl Context<'_> {
    /// Reply in the channel, or to the sender when private.
    pub fn reply(&self, text: &str) {
        self.client
            .say(self.message.reply_target(self.is_private), text);
    }

    /// Reply with a NOTICE instead of a PRIVMSG.
    pub fn reply_notice(&self, text: &str) {
        self.client
            .notice(self.message.reply_target(self.is_private), text);
    }

    /// Sender nickname, or `*` when unknown.
    pub fn nick(&self) -> &str {
        self.message.nick.as_deref().unwrap_or("*")
    }
}

/// A command body.
///
/// Implemented for every `Fn(&Context, &[String]) -> HandlerResult`, so
/// plain functions and closures can be registered directly.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &Context<'_>, args: &[String]) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Context<'_>, &[String]) -> HandlerResult + Send + Sync,
{
    fn handle(&self, ctx: &Context<'_>, args: &[String]) -> HandlerResult {
        self(ctx, args)
    }
}
