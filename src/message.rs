//! Incoming chat messages and raw IRC line parsing.
//!
//! Only `PRIVMSG` matters to the dispatcher, so the parser produces a
//! [`Message`] for those and skips everything else.

use crate::error::ParseError;
use nom::{
    IResult,
    bytes::complete::{take_until, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    sequence::preceded,
};

/// A message delivered to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender nickname, if the line carried a prefix.
    pub nick: Option<String>,
    /// Sender username (the part after `!`).
    pub user: Option<String>,
    /// Sender host (the part after `@`).
    pub host: Option<String>,
    /// Delivery target: a channel, or the bot's own nick for private messages.
    pub target: String,
    /// Message text.
    pub text: String,
}

impl Message {
    /// Create a message with no sender information.
    pub fn new(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            nick: None,
            user: None,
            host: None,
            target: target.into(),
            text: text.into(),
        }
    }

    /// Create a message sent by `nick`.
    pub fn from_nick(
        nick: impl Into<String>,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            nick: Some(nick.into()),
            ..Self::new(target, text)
        }
    }

    /// Copy of this message carrying different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Where a reply should go: the channel, or the sender when private.
    pub fn reply_target(&self, is_private: bool) -> &str {
        match (&self.nick, is_private) {
            (Some(nick), true) => nick,
            _ => &self.target,
        }
    }

    /// Parse a raw IRC line.
    ///
    /// Returns `Ok(None)` for well-formed lines that are not `PRIVMSG`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let parsed = match parse_message(line) {
            Ok((_, parsed)) => parsed,
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(ParseError::Malformed {
                    line: line.to_string(),
                    position: line.len() - e.input.len(),
                });
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(ParseError::Malformed {
                    line: line.to_string(),
                    position: line.len(),
                });
            }
        };

        if !parsed.command.eq_ignore_ascii_case("PRIVMSG") {
            return Ok(None);
        }

        let [target, text, ..] = parsed.params.as_slice() else {
            return Err(ParseError::MissingParams(line.to_string()));
        };

        let (nick, user, host) = split_prefix(parsed.prefix);
        Ok(Some(Self {
            nick,
            user,
            host,
            target: (*target).to_string(),
            text: (*text).to_string(),
        }))
    }
}

/// Split `nick!user@host` into its parts.
fn split_prefix(prefix: Option<&str>) -> (Option<String>, Option<String>, Option<String>) {
    let Some(prefix) = prefix else {
        return (None, None, None);
    };
    let (rest, host) = match prefix.split_once('@') {
        Some((rest, host)) => (rest, Some(host.to_string())),
        None => (prefix, None),
    };
    let (nick, user) = match rest.split_once('!') {
        Some((nick, user)) => (nick, Some(user.to_string())),
        None => (rest, None),
    };
    (Some(nick.to_string()), user, host)
}

/// A parsed line with borrowed slices.
struct ParsedLine<'a> {
    prefix: Option<&'a str>,
    command: &'a str,
    params: Vec<&'a str>,
}

/// Parse IRCv3 message tags (the part after `@` and before the first space).
fn parse_tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_until(" "))(input)
}

/// Parse message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command name (letters or a numeric).
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric())(input)
}

/// Parse parameters, including the `:`-prefixed trailing one.
///
/// Consecutive spaces count as one separator.
fn parse_params(input: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut rest = input;

    while rest.starts_with(' ') {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }

        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    params
}

/// Parse `[@tags] [:prefix] <command> [params...] [:trailing]`.
fn parse_message(input: &str) -> IResult<&str, ParsedLine<'_>> {
    let (input, _tags) = opt(parse_tags)(input)?;
    let (input, _) = space0(input)?;
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;
    let (input, command) = parse_command(input)?;
    let params = parse_params(input);

    Ok((
        "",
        ParsedLine {
            prefix,
            command,
            params,
        },
    ))
}
