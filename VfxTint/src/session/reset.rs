//! Press-and-hold reset gesture
//!
//! Reset is destructive and not undoable, so it only fires after the trigger
//! has been held for the full hold duration. Releasing earlier cancels it.

use std::time::{Duration, Instant};

/// Default hold time before a reset commits.
pub const DEFAULT_RESET_HOLD: Duration = Duration::from_millis(2000);

/// Result of polling a [`ResetHold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPoll {
    /// Nothing armed.
    Idle,
    /// Armed; holds the time still to wait.
    Pending(Duration),
    /// Deadline reached. Reported once, then the hold disarms itself.
    Fired,
}

/// A delayed reset that can be aborted before its deadline.
#[derive(Debug, Clone, Default)]
pub struct ResetHold {
    deadline: Option<Instant>,
}

impl ResetHold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the reset at `now`, firing after `hold`.
    pub fn press(&mut self, now: Instant, hold: Duration) {
        self.deadline = Some(now + hold);
    }

    /// Abort an armed reset. Returns true if one was pending.
    pub fn release(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> ResetPoll {
        match self.deadline {
            None => ResetPoll::Idle,
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                ResetPoll::Fired
            }
            Some(deadline) => ResetPoll::Pending(deadline - now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_deadline_once() {
        let start = Instant::now();
        let mut hold = ResetHold::new();
        hold.press(start, DEFAULT_RESET_HOLD);

        assert_eq!(
            hold.poll(start + Duration::from_millis(500)),
            ResetPoll::Pending(Duration::from_millis(1500))
        );
        assert_eq!(hold.poll(start + DEFAULT_RESET_HOLD), ResetPoll::Fired);
        assert_eq!(hold.poll(start + Duration::from_secs(5)), ResetPoll::Idle);
    }

    #[test]
    fn test_release_cancels() {
        let start = Instant::now();
        let mut hold = ResetHold::new();
        hold.press(start, DEFAULT_RESET_HOLD);
        assert!(hold.release());
        assert_eq!(hold.poll(start + Duration::from_secs(3)), ResetPoll::Idle);
        assert!(!hold.release());
    }
}
