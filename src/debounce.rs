// src/debounce.rs

use std::time::{Duration, Instant};

/// Identifies one arming of a [`Debouncer`]. Later armings get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DebounceToken(u64);

#[derive(Debug, Clone, Copy)]
struct Armed {
    token: DebounceToken,
    deadline: Instant,
}

/// A single delayed task that is cancelled and restarted on every request.
///
/// Only the most recent arming can fire, so requests arriving inside the
/// window coalesce into one flush.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    armed: Option<Armed>,
    issued: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, armed: None, issued: 0 }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending deadline with `now + delay`.
    pub fn restart(&mut self, now: Instant) -> DebounceToken {
        self.issued += 1;
        let token = DebounceToken(self.issued);
        self.armed = Some(Armed { token, deadline: now + self.delay });
        token
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// True only for the token of the current arming.
    pub fn is_current(&self, token: DebounceToken) -> bool {
        self.armed.is_some_and(|a| a.token == token)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.armed.is_some_and(|a| now >= a.deadline)
    }
}
