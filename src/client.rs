//! The outbound side of the chat connection, as seen by handlers.

use parking_lot::Mutex;
use std::io::Write;
use tracing::warn;

/// Something that can deliver messages on behalf of a handler.
pub trait Client: Send + Sync {
    /// Send a PRIVMSG to `target`.
    fn say(&self, target: &str, text: &str);

    /// Send a NOTICE to `target`.
    fn notice(&self, target: &str, text: &str) {
        self.say(target, text);
    }
}

/// Writes raw IRC lines to any writer.
///
/// Used by the console binary to print replies on stdout. Write failures
/// are logged and dropped.
pub struct LineClient<W> {
    out: Mutex<W>,
}

impl<W: Write> LineClient<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the client and return the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn send_line(&self, command: &str, target: &str, text: &str) {
        let mut out = self.out.lock();
        // One line per newline-separated chunk; IRC lines can't embed CR/LF.
        for line in text.split(['\r', '\n']).filter(|l| !l.is_empty()) {
            if let Err(e) = write!(out, "{command} {target} :{line}\r\n") {
                warn!(to = %target, error = %e, "Failed to write line");
                return;
            }
        }
        if let Err(e) = out.flush() {
            warn!(error = %e, "Failed to flush output");
        }
    }
}

impl<W: Write + Send> Client for LineClient<W> {
    fn say(&self, target: &str, text: &str) {
        self.send_line("PRIVMSG", target, text);
    }

    fn notice(&self, target: &str, text: &str) {
        self.send_line("NOTICE", target, text);
    }
}
