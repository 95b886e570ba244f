//! Relay loop that turns VSync edges into serial pulses.
//!
//! # Lifecycle
//!
//! ```text
//! WarmingUp{n} --n wait calls--> Running --interrupt--> ShuttingDown
//!      \____________________interrupt_____________________/
//! ```
//!
//! - **Warm-up** discards the first `warmup` wait calls regardless of status.
//!   It counts raw calls, not accepted edges, and never touches the debounce
//!   state.
//! - **Running** drops non-accept statuses, drops accepted edges that come
//!   within `pulse_threshold` of the last forwarded one, and writes
//!   [`MARKER_BYTE`] for the rest.
//! - **Shutting down** is entered when the [`ShutdownSignal`](crate::shutdown::ShutdownSignal)
//!   is raised; the loop returns and its sink is dropped.

mod debounce;
mod relay_loop;


pub use debounce::DebounceFilter;
pub use relay_loop::{
    MARKER_BYTE, RelayError, RelayLoop, RelayPhase, RelaySettings, RelayStats, StepOutcome,
};
