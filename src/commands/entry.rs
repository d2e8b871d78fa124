//! Registry entries: commands and aliases.

use super::context::{Context, Handler};
use crate::error::{HandlerResult, RegistrationError};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// How the argument string after a command is tokenized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Split on unescaped `|`.
    Pipes,
    /// Split on whitespace, honouring `"quoted strings"`.
    Spaces,
    /// The whole argument string as a single argument.
    One,
    /// `Pipes` if an unescaped `|` is present, `Spaces` otherwise.
    #[default]
    Auto,
}

/// Where a command may be invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Channels and private messages.
    #[default]
    Always,
    /// Channels only.
    ChannelOnly,
    /// Private messages only.
    PmOnly,
}

impl Visibility {
    /// Whether a message with the given privacy may run the command.
    #[inline]
    pub fn allows(self, is_private: bool) -> bool {
        match self {
            Self::Always => true,
            Self::ChannelOnly => !is_private,
            Self::PmOnly => is_private,
        }
    }
}

/// An invokable command.
#[derive(Clone)]
pub struct CommandEntry {
    pub name: String,
    pub id: String,
    pub description: Option<String>,
    pub handler: Arc<dyn Handler>,
    pub prefix_override: Option<String>,
    pub case_sensitive: Option<bool>,
    pub arg_type: ArgType,
    pub visibility: Visibility,
}

impl CommandEntry {
    /// Create a command whose id equals its name.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context<'_>, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: None,
            handler: Arc::new(handler),
            prefix_override: None,
            case_sensitive: None,
            arg_type: ArgType::default(),
            visibility: Visibility::default(),
        }
    }

    /// Start building a command. `build` fails without a handler.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            id: None,
            description: None,
            handler: None,
            prefix_override: None,
            case_sensitive: None,
            arg_type: ArgType::default(),
            visibility: Visibility::default(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn prefix_override(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_override = Some(prefix.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    pub fn arg_type(mut self, arg_type: ArgType) -> Self {
        self.arg_type = arg_type;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("description", &self.description)
            .field("prefix_override", &self.prefix_override)
            .field("case_sensitive", &self.case_sensitive)
            .field("arg_type", &self.arg_type)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CommandEntry`] when the handler is supplied separately,
/// e.g. looked up from a [`HandlerTable`](super::HandlerTable).
pub struct CommandBuilder {
    name: String,
    id: Option<String>,
    description: Option<String>,
    handler: Option<Arc<dyn Handler>>,
    prefix_override: Option<String>,
    case_sensitive: Option<bool>,
    arg_type: ArgType,
    visibility: Visibility,
}

impl CommandBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn handler(mut self, handler: Option<Arc<dyn Handler>>) -> Self {
        self.handler = handler;
        self
    }

    pub fn prefix_override(mut self, prefix: Option<String>) -> Self {
        self.prefix_override = prefix;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: Option<bool>) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn arg_type(mut self, arg_type: ArgType) -> Self {
        self.arg_type = arg_type;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn build(self) -> Result<CommandEntry, RegistrationError> {
        let id = self.id.unwrap_or_else(|| self.name.clone());
        let handler = self
            .handler
            .ok_or_else(|| RegistrationError::MissingHandler(id.clone()))?;
        Ok(CommandEntry {
            name: self.name,
            id,
            description: self.description,
            handler,
            prefix_override: self.prefix_override,
            case_sensitive: self.case_sensitive,
            arg_type: self.arg_type,
            visibility: self.visibility,
        })
    }
}

/// A redirect to another command's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub id: String,
    pub alias_to: String,
    pub prefix_override: Option<String>,
    /// Carried for introspection; matching reads the target's setting.
    pub case_sensitive: Option<bool>,
}

impl AliasEntry {
    /// Create an alias whose id equals its name.
    pub fn new(name: impl Into<String>, alias_to: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            alias_to: alias_to.into(),
            prefix_override: None,
            case_sensitive: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn prefix_override(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_override = Some(prefix.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }
}

/// A registered command or alias.
#[derive(Debug, Clone)]
pub enum Entry {
    Command(CommandEntry),
    Alias(AliasEntry),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Self::Command(cmd) => &cmd.name,
            Self::Alias(alias) => &alias.name,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Command(cmd) => &cmd.id,
            Self::Alias(alias) => &alias.id,
        }
    }

    pub fn prefix_override(&self) -> Option<&str> {
        match self {
            Self::Command(cmd) => cmd.prefix_override.as_deref(),
            Self::Alias(alias) => alias.prefix_override.as_deref(),
        }
    }

    pub fn as_command(&self) -> Option<&CommandEntry> {
        match self {
            Self::Command(cmd) => Some(cmd),
            Self::Alias(_) => None,
        }
    }

    pub fn as_alias(&self) -> Option<&AliasEntry> {
        match self {
            Self::Command(_) => None,
            Self::Alias(alias) => Some(alias),
        }
    }

    /// Prefix plus name, as typed by a user.
    pub fn full_invocation(&self, default_prefix: &str) -> String {
        full_invocation(self.prefix_override(), default_prefix, self.name())
    }
}

impl From<CommandEntry> for Entry {
    fn from(cmd: CommandEntry) -> Self {
        Self::Command(cmd)
    }
}

impl From<AliasEntry> for Entry {
    fn from(alias: AliasEntry) -> Self {
        Self::Alias(alias)
    }
}

/// The entry's prefix, falling back to the dispatcher-wide one.
#[inline]
pub fn effective_prefix<'a>(prefix_override: Option<&'a str>, default_prefix: &'a str) -> &'a str {
    prefix_override.unwrap_or(default_prefix)
}

/// The entry's case sensitivity, falling back to the dispatcher-wide default.
#[inline]
pub fn effective_case_sensitive(case_sensitive: Option<bool>, default: bool) -> bool {
    case_sensitive.unwrap_or(default)
}

/// `prefix + name` with the prefix resolved through [`effective_prefix`].
pub fn full_invocation(prefix_override: Option<&str>, default_prefix: &str, name: &str) -> String {
    format!("{}{}", effective_prefix(prefix_override, default_prefix), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Context<'_>, _: &[String]) -> HandlerResult {
        Ok(())
    }

    #[test]
    fn test_visibility_allows() {
        assert!(Visibility::Always.allows(true));
        assert!(Visibility::Always.allows(false));
        assert!(Visibility::ChannelOnly.allows(false));
        assert!(!Visibility::ChannelOnly.allows(true));
        assert!(Visibility::PmOnly.allows(true));
        assert!(!Visibility::PmOnly.allows(false));
    }

    #[test]
    fn test_command_defaults() {
        let cmd = CommandEntry::new("sub action", noop);
        assert_eq!(cmd.id, "sub action");
        assert_eq!(cmd.arg_type, ArgType::Auto);
        assert_eq!(cmd.visibility, Visibility::Always);
        assert_eq!(cmd.prefix_override, None);
        assert_eq!(cmd.case_sensitive, None);
    }

    #[test]
    fn test_builder_requires_handler() {
        let err = CommandEntry::builder("ping").build().unwrap_err();
        assert_eq!(err, RegistrationError::MissingHandler("ping".to_string()));

        let cmd = CommandEntry::builder("ping")
            .id("core.ping")
            .handler(Some(Arc::new(noop)))
            .arg_type(ArgType::One)
            .build()
            .unwrap();
        assert_eq!(cmd.id, "core.ping");
        assert_eq!(cmd.arg_type, ArgType::One);
    }

    #[test]
    fn test_full_invocation_precedence() {
        let plain: Entry = CommandEntry::new("ping", noop).into();
        assert_eq!(plain.full_invocation("!"), "!ping");

        let overridden: Entry = CommandEntry::new("ping", noop).prefix_override(".").into();
        assert_eq!(overridden.full_invocation("!"), ".ping");

        // An empty override is still an override.
        let bare: Entry = AliasEntry::new("p", "ping").prefix_override("").into();
        assert_eq!(bare.full_invocation("!"), "p");
    }

    #[test]
    fn test_effective_case_sensitive() {
        assert!(effective_case_sensitive(None, true));
        assert!(!effective_case_sensitive(Some(false), true));
        assert!(effective_case_sensitive(Some(true), false));
    }

    #[test]
    fn test_arg_type_and_visibility_deserialize() {
        #[derive(Deserialize)]
        struct Probe {
            arg_type: ArgType,
            visibility: Visibility,
        }
        let probe: Probe =
            toml::from_str("arg_type = \"pipes\"\nvisibility = \"pm-only\"").unwrap();
        assert_eq!(probe.arg_type, ArgType::Pipes);
        assert_eq!(probe.visibility, Visibility::PmOnly);
    }
}
