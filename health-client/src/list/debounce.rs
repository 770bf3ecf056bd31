//! Debounced input.

use std::time::{Duration, Instant};

/// Holds the latest pushed value until no new value has arrived for
/// `delay`. Time is passed in explicitly so callers (and tests) drive it.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.delay);
    }

    /// The settled value, once the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Settle immediately (e.g. the user pressed Enter)
    pub fn flush(&mut self) -> Option<T> {
        self.deadline = None;
        self.pending.take()
    }

    /// When the pending value will settle
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[test]
    fn test_only_last_value_settles() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push("a", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
        debouncer.push("an", start + Duration::from_millis(100));
        assert_eq!(debouncer.poll(start + Duration::from_millis(450)), None);
        debouncer.push("anh", start + Duration::from_millis(450));

        assert_eq!(debouncer.poll(start + Duration::from_millis(849)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(850)), Some("anh"));
        assert_eq!(debouncer.poll(start + Duration::from_millis(2_000)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_flush_settles_immediately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(String::from("lan"), start);
        assert_eq!(debouncer.pending().map(String::as_str), Some("lan"));
        assert_eq!(debouncer.flush().as_deref(), Some("lan"));
        assert!(debouncer.deadline().is_none());
        assert_eq!(debouncer.poll(start + DELAY), None);
    }
}
