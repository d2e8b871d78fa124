//! Channel vs. private delivery classification.

/// Decides whether a delivery target is a private message.
pub trait ChannelClassifier: Send + Sync {
    /// `true` when `target` is not a channel.
    fn is_private(&self, target: &str) -> bool;
}

/// Classifies targets by their leading channel-type character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChanTypes(String);

impl ChanTypes {
    pub fn new(chantypes: impl Into<String>) -> Self {
        Self(chantypes.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChanTypes {
    fn default() -> Self {
        Self::new("#")
    }
}

impl ChannelClassifier for ChanTypes {
    fn is_private(&self, target: &str) -> bool {
        !target
            .chars()
            .next()
            .is_some_and(|first| self.0.contains(first))
    }
}

impl<F> ChannelClassifier for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_private(&self, target: &str) -> bool {
        self(target)
    }
}
