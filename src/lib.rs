//! slirc-cmd - prefix command dispatch for Straylight IRC bots.
//!
//! Messages such as `!sub action "two words" x` are matched against a
//! registry of commands and aliases, tokenized, and handed to the bound
//! handler.
//!
//! ```
//! use slirc_cmd::{CommandEntry, Dispatcher, LineClient, Message};
//! use std::sync::Arc;
//!
//! let client = Arc::new(LineClient::new(std::io::sink()));
//! let mut dispatcher = Dispatcher::new(client);
//! dispatcher.add_command(CommandEntry::new("ping", |ctx, _args| {
//!     ctx.reply("pong");
//!     Ok(())
//! }));
//!
//! let msg = Message::from_nick("alice", "#straylight", "!ping");
//! dispatcher.handle_privmsg(&msg).unwrap();
//! ```

pub mod classify;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod message;

pub use classify::{ChanTypes, ChannelClassifier};
pub use client::{Client, LineClient};
pub use commands::{
    AliasEntry, ArgType, CommandEntry, Context, Dispatcher, Entry, Handler, HandlerTable,
    Registry, Visibility, load_commands, parse_args, parse_args_spaces,
};
pub use config::{Config, ConfigError};
pub use error::{DispatchError, HandlerError, HandlerResult, LoaderError, ParseError, RegistrationError};
pub use message::Message;
