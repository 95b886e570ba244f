//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait that allows injecting mock clocks
//! in tests while using the real monotonic clock in production.

use std::time::Instant;

/// Abstraction over a monotonic clock.
///
/// The debounce filter compares successive readings, so implementations
/// must never go backwards.
///
/// # Example
///
/// ```
/// use vsync_relay::time::{Clock, MonotonicClock};
///
/// let clock = MonotonicClock;
/// let first = clock.now();
/// assert!(clock.now() >= first);
/// ```
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    /// A mock clock for testing that returns controlled time values.
    struct MockClock {
        base: Instant,
        offset: Cell<Duration>,
    }

    impl MockClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Cell::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            self.offset.set(self.offset.get() + by);
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            self.base + self.offset.get()
        }
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock;
        let before = Instant::now();
        let first = clock.now();
        let second = clock.now();
        let after = Instant::now();

        assert!(first >= before);
        assert!(second >= first);
        assert!(after >= second);
    }

    #[test]
    fn monotonic_clock_is_default_and_copy() {
        let clock1 = MonotonicClock;
        let clock2 = clock1;
        let _ = clock1.now();
        let _ = clock2.now();
        let _ = MonotonicClock::default().now();
    }

    #[test]
    fn mock_clock_can_advance() {
        let clock = MockClock::new();
        let start = clock.now();

        clock.advance(Duration::from_micros(100));
        assert_eq!(clock.now() - start, Duration::from_micros(100));

        clock.advance(Duration::from_millis(10));
        assert_eq!(
            clock.now() - start,
            Duration::from_micros(100) + Duration::from_millis(10)
        );
    }

    #[test]
    fn reference_to_clock_is_a_clock() {
        fn read<C: Clock>(clock: C) -> Instant {
            clock.now()
        }

        let clock = MockClock::new();
        clock.advance(Duration::from_secs(1));
        assert_eq!(read(&clock), clock.now());
    }
}
