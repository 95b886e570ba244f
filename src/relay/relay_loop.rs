//! The relay loop: warm-up, debounce, forward.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::DebounceFilter;
use crate::config::ValidatedConfig;
use crate::serial::{PulseSink, TransportError};
use crate::shutdown::ShutdownSignal;
use crate::time::Clock;
use crate::vsync::{VsyncSource, WaitError, WaitStatus};

/// Byte written to the serial port for every forwarded edge.
pub const MARKER_BYTE: u8 = 0xAA;

/// Error that stops the relay loop.
///
/// There is no retry: the loop ends and the owned sink is closed.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The wait call failed.
    #[error(transparent)]
    Wait(#[from] WaitError),

    /// Writing the marker byte failed.
    #[error(transparent)]
    Write(#[from] TransportError),
}

/// Relay parameters taken from the validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySettings {
    /// Minimum spacing between two forwarded pulses
    pub pulse_threshold: Duration,
    /// Number of wait calls discarded before forwarding starts
    pub warmup: u64,
}

impl From<&ValidatedConfig> for RelaySettings {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            pulse_threshold: config.pulse_threshold,
            warmup: config.warmup,
        }
    }
}

/// Where the loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayPhase {
    /// Discarding wait results unconditionally
    WarmingUp {
        /// Wait calls still to discard
        remaining: u64,
    },
    /// Debouncing and forwarding accepted edges
    Running,
    /// Interrupt observed; terminal
    ShuttingDown,
}

/// What a single wait result led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Discarded during warm-up, whatever the status
    WarmupDiscarded,
    /// Non-accept status
    Ignored,
    /// Accepted edge inside the debounce window
    Debounced,
    /// Marker byte written
    Pulsed,
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Wait calls discarded during warm-up
    pub warmup_discarded: u64,
    /// Non-accept statuses
    pub ignored: u64,
    /// Edges rejected by the debounce filter
    pub debounced: u64,
    /// Marker bytes written
    pub pulses: u64,
}

impl RelayStats {
    fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::WarmupDiscarded => self.warmup_discarded += 1,
            StepOutcome::Ignored => self.ignored += 1,
            StepOutcome::Debounced => self.debounced += 1,
            StepOutcome::Pulsed => self.pulses += 1,
        }
    }
}

impl fmt::Display for RelayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pulse(s) sent, {} debounced, {} ignored, {} warm-up",
            self.pulses, self.debounced, self.ignored, self.warmup_discarded
        )
    }
}

/// Single-threaded relay from a [`VsyncSource`] to a [`PulseSink`].
///
/// The loop owns both ends. [`RelayLoop::run`] consumes it, so the sink is
/// dropped (and the serial port closed) however the loop ends.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vsync_relay::relay::{RelayLoop, RelaySettings};
/// use vsync_relay::serial::{PulseSink, TransportError};
/// use vsync_relay::shutdown::ShutdownSignal;
/// use vsync_relay::time::MonotonicClock;
/// use vsync_relay::vsync::{VsyncSource, WaitError, WaitStatus};
///
/// struct OneShot(ShutdownSignal);
///
/// impl VsyncSource for OneShot {
///     fn wait(&mut self) -> Result<WaitStatus, WaitError> {
///         if self.0.is_requested() {
///             return Ok(WaitStatus::Ignored(0));
///         }
///         Ok(WaitStatus::Accept)
///     }
/// }
///
/// struct Collect(Vec<u8>);
///
/// impl PulseSink for Collect {
///     fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
///         self.0.push(byte);
///         Ok(())
///     }
/// }
///
/// let shutdown = ShutdownSignal::new();
/// shutdown.request();
/// let settings = RelaySettings { pulse_threshold: Duration::from_micros(500), warmup: 0 };
/// let relay = RelayLoop::new(OneShot(shutdown.clone()), Collect(Vec::new()), MonotonicClock, settings);
///
/// let stats = relay.run(&shutdown).unwrap();
/// assert_eq!(stats.pulses, 0);
/// ```
#[derive(Debug)]
pub struct RelayLoop<W, S, C> {
    source: W,
    sink: S,
    clock: C,
    debounce: DebounceFilter,
    phase: RelayPhase,
    stats: RelayStats,
}

impl<W, S, C> RelayLoop<W, S, C>
where
    W: VsyncSource,
    S: PulseSink,
    C: Clock,
{
    /// Creates a loop that starts in warm-up if `settings.warmup > 0`.
    pub fn new(source: W, sink: S, clock: C, settings: RelaySettings) -> Self {
        let phase = if settings.warmup == 0 {
            RelayPhase::Running
        } else {
            RelayPhase::WarmingUp {
                remaining: settings.warmup,
            }
        };

        Self {
            source,
            sink,
            clock,
            debounce: DebounceFilter::new(settings.pulse_threshold),
            phase,
            stats: RelayStats::default(),
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> RelayPhase {
        self.phase
    }

    /// Counters so far.
    pub const fn stats(&self) -> RelayStats {
        self.stats
    }

    /// Debounce state, including the last accepted instant.
    pub const fn debounce(&self) -> &DebounceFilter {
        &self.debounce
    }

    /// Runs until `shutdown` is raised or an error occurs.
    ///
    /// The signal is checked before every wait call and again after it
    /// returns, so an interrupt that arrives during a blocked wait never
    /// produces another write.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError`] if a wait call or a write fails.
    pub fn run(mut self, shutdown: &ShutdownSignal) -> Result<RelayStats, RelayError> {
        tracing::info!(
            "Starting VSync relay (pulse_threshold={}s, warmup={} frames)",
            self.debounce.threshold().as_secs_f64(),
            self.warmup_remaining(),
        );

        while !shutdown.is_requested() {
            let status = self.source.wait()?;
            if shutdown.is_requested() {
                break;
            }
            self.step(status)?;
        }

        self.phase = RelayPhase::ShuttingDown;
        tracing::info!("Exiting on user request");
        Ok(self.stats)
    }

    /// Applies one wait result.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Write`] if the marker byte cannot be written.
    pub fn step(&mut self, status: WaitStatus) -> Result<StepOutcome, RelayError> {
        let outcome = match self.phase {
            RelayPhase::WarmingUp { remaining } => {
                self.finish_warmup_call(remaining);
                StepOutcome::WarmupDiscarded
            }
            RelayPhase::Running => self.forward(status)?,
            RelayPhase::ShuttingDown => StepOutcome::Ignored,
        };

        self.stats.record(outcome);
        Ok(outcome)
    }

    fn finish_warmup_call(&mut self, remaining: u64) {
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            tracing::debug!("Warm-up complete, forwarding pulses");
            self.phase = RelayPhase::Running;
        } else {
            self.phase = RelayPhase::WarmingUp { remaining };
        }
    }

    fn forward(&mut self, status: WaitStatus) -> Result<StepOutcome, RelayError> {
        if let WaitStatus::Ignored(code) = status {
            tracing::trace!("Ignoring wait status {code}");
            return Ok(StepOutcome::Ignored);
        }

        if !self.debounce.accept(self.clock.now()) {
            tracing::trace!("Debounced duplicate VSync edge");
            return Ok(StepOutcome::Debounced);
        }

        self.sink.write_byte(MARKER_BYTE)?;
        tracing::debug!("Pulse {} sent", self.stats.pulses + 1);
        Ok(StepOutcome::Pulsed)
    }

    const fn warmup_remaining(&self) -> u64 {
        match self.phase {
            RelayPhase::WarmingUp { remaining } => remaining,
            RelayPhase::Running | RelayPhase::ShuttingDown => 0,
        }
    }
}
