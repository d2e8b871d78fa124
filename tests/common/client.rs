//! Test client and handler recorders.

use parking_lot::Mutex;
use slirc_cmd::{Client, Context, HandlerResult, Message};
use std::sync::Arc;

/// A client that keeps every line it is asked to send.
#[derive(Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `(target, text)` pairs in send order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }
}

impl Client for RecordingClient {
    fn say(&self, target: &str, text: &str) {
        self.sent.lock().push((target.to_string(), text.to_string()));
    }
}

/// Handler invocations: `(label, args)` in call order.
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<(String, Vec<String>)>>>);

#[allow(dead_code)]
impl Calls {
    pub fn take(&self) -> Vec<(String, Vec<String>)> {
        std::mem::take(&mut *self.0.lock())
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.lock().iter().map(|(label, _)| label.clone()).collect()
    }
}

/// A handler that records its label and arguments into `calls`.
#[allow(dead_code)]
pub fn recorder(
    calls: &Calls,
    label: &str,
) -> impl Fn(&Context<'_>, &[String]) -> HandlerResult + Send + Sync + 'static {
    let calls = calls.clone();
    let label = label.to_string();
    move |_ctx: &Context<'_>, args: &[String]| {
        calls.0.lock().push((label.clone(), args.to_vec()));
        Ok(())
    }
}

#[allow(dead_code)]
pub fn channel_msg(text: &str) -> Message {
    Message::from_nick("alice", "#straylight", text)
}

#[allow(dead_code)]
pub fn private_msg(text: &str) -> Message {
    Message::from_nick("alice", "slirc-bot", text)
}
