#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure playback system deciding whether the simulation advances on a frame.

use planet_sandbox_core::Command;
use tracing::debug;

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackInput {
    /// Indicates whether the player toggled pause on this frame.
    pub toggle_pause: bool,
    /// Indicates whether the player requested a single step on this frame.
    pub step: bool,
}

impl PlaybackInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(toggle_pause: bool, step: bool) -> Self {
        Self { toggle_pause, step }
    }
}

/// Pause and single-step control over the tick cadence.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    paused: bool,
}

impl Playback {
    /// Creates a running playback controller.
    #[must_use]
    pub const fn new() -> Self {
        Self { paused: false }
    }

    /// Consumes frame input and emits at most one `Command::Tick`.
    ///
    /// Pause toggles are applied before deciding. A step request only has an
    /// effect while paused.
    pub fn handle(&mut self, input: PlaybackInput, out: &mut Vec<Command>) {
        if input.toggle_pause {
            self.paused = !self.paused;
            debug!(paused = self.paused, "playback toggled");
        }

        if !self.paused || input.step {
            out.push(Command::Tick);
        }
    }

    /// Reports whether frames without input advance the simulation.
    #[must_use]
    pub const fn is_advance_enabled(&self) -> bool {
        !self.paused
    }
}
