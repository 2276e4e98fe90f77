//! Autoplay timing for a carousel.
//!
//! Each carousel exclusively owns at most one repeating timer. In a
//! single-threaded event loop that timer is a deadline the loop polls,
//! not an OS timer: [`Autoplay::take_fire`] reports a due deadline and
//! re-arms it in one step, so a slow frame can never queue double fires.

use std::time::{Duration, Instant};

/// Deadline-based repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autoplay {
    enabled: bool,
    delay: Duration,
    next_fire: Option<Instant>,
}

impl Autoplay {
    /// Create a timer with the configured cadence. Starts unarmed.
    pub const fn new(enabled: bool, delay: Duration) -> Self {
        Self {
            enabled,
            delay,
            next_fire: None,
        }
    }

    /// A timer that never fires, for galleries without autoplay.
    pub const fn disabled() -> Self {
        Self::new(false, Duration::from_millis(0))
    }

    /// Whether autoplay is configured at all.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a deadline is currently armed.
    pub const fn is_armed(&self) -> bool {
        self.next_fire.is_some()
    }

    /// The configured firing cadence.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the first deadline. No-op when autoplay is not configured.
    pub fn start(&mut self, now: Instant) {
        if self.enabled {
            self.next_fire = Some(now + self.delay);
        }
    }

    /// Cancel any outstanding deadline.
    pub const fn pause(&mut self) {
        self.next_fire = None;
    }

    /// Re-arm after a pause.
    ///
    /// Idempotent: only arms when autoplay is configured and no deadline
    /// is outstanding, so calling resume twice never stacks fires. The new
    /// deadline is a full `delay` out, so a pause/resume pair restores the
    /// original cadence rather than accelerating it.
    pub fn resume(&mut self, now: Instant) {
        if self.enabled && self.next_fire.is_none() {
            self.next_fire = Some(now + self.delay);
        }
    }

    /// Report whether the deadline is due, re-arming it if so.
    pub fn take_fire(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(deadline) if now >= deadline => {
                self.next_fire = Some(now + self.delay);
                true
            }
            _ => false,
        }
    }

    /// The armed deadline, if any. Used by the event loop to bound its
    /// poll timeout.
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next_fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_start_arms_only_when_enabled() {
        let now = Instant::now();

        let mut off = Autoplay::disabled();
        off.start(now);
        assert!(!off.is_armed());

        let mut on = Autoplay::new(true, DELAY);
        on.start(now);
        assert!(on.is_armed());
    }

    #[test]
    fn test_fire_due_exactly_at_deadline() {
        let now = Instant::now();
        let mut timer = Autoplay::new(true, DELAY);
        timer.start(now);

        assert!(!timer.take_fire(now));
        assert!(!timer.take_fire(now + DELAY - Duration::from_millis(1)));
        assert!(timer.take_fire(now + DELAY));
    }

    #[test]
    fn test_fire_re_arms_from_fire_time() {
        let now = Instant::now();
        let mut timer = Autoplay::new(true, DELAY);
        timer.start(now);

        let late = now + DELAY + Duration::from_millis(120);
        assert!(timer.take_fire(late));
        assert_eq!(timer.next_deadline(), Some(late + DELAY));
    }

    #[test]
    fn test_pause_cancels_outstanding_deadline() {
        let now = Instant::now();
        let mut timer = Autoplay::new(true, DELAY);
        timer.start(now);
        timer.pause();

        assert!(!timer.is_armed());
        assert!(!timer.take_fire(now + DELAY * 4));
    }

    #[test]
    fn test_resume_is_idempotent() {
        let now = Instant::now();
        let mut timer = Autoplay::new(true, DELAY);
        timer.start(now);
        timer.pause();

        timer.resume(now);
        let deadline = timer.next_deadline();
        timer.resume(now + Duration::from_millis(200));

        // The second resume must not replace the armed deadline.
        assert_eq!(timer.next_deadline(), deadline);
    }

    #[test]
    fn test_pause_resume_restores_original_cadence() {
        let now = Instant::now();
        let mut timer = Autoplay::new(true, DELAY);
        timer.start(now);

        let paused_at = now + Duration::from_millis(400);
        timer.pause();
        timer.resume(paused_at);

        // Next fire is a full delay after the resume, never earlier.
        assert!(!timer.take_fire(paused_at + DELAY - Duration::from_millis(1)));
        assert!(timer.take_fire(paused_at + DELAY));
    }

    #[test]
    fn test_resume_without_enable_stays_unarmed() {
        let mut timer = Autoplay::disabled();
        timer.resume(Instant::now());
        assert!(!timer.is_armed());
    }
}
