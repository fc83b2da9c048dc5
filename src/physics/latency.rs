//! Actuation latency as a command queue.
//!
//! Real gimbal hardware does not react to a command in the same
//! timestep it is issued. The queue models a pure transport delay: a
//! fixed-depth FIFO prefilled with neutral commands, so the command
//! issued at step `t` takes effect at step `t + depth`. Depth zero is
//! a pass-through and the default.

use std::collections::VecDeque;

use crate::action::ControlCommand;

/// Fixed-depth FIFO of pending control commands.
#[derive(Clone, Debug)]
pub struct CommandQueue {
    queue: VecDeque<ControlCommand>,
    depth: usize,
}

impl CommandQueue {
    /// Queue delaying every command by `depth` steps. Depth 0 is a
    /// pass-through.
    pub fn new(depth: usize) -> Self {
        let mut queue = VecDeque::with_capacity(depth + 1);
        queue.extend(std::iter::repeat_n(ControlCommand::neutral(), depth));
        Self { queue, depth }
    }

    /// Queue for a delay of `delay` seconds at timestep `dt`, rounded
    /// to the nearest whole step. Non-positive delays pass through.
    pub fn from_delay(delay: f64, dt: f64) -> Self {
        let depth = if delay > 0.0 && dt > 0.0 {
            (delay / dt).round() as usize
        } else {
            0
        };
        Self::new(depth)
    }

    /// Submit the freshly decoded command; returns the command that
    /// takes effect this step (the one submitted `depth` steps ago).
    pub fn exchange(&mut self, command: ControlCommand) -> ControlCommand {
        if self.depth == 0 {
            return command;
        }
        self.queue.push_back(command);
        // Prefill guarantees the queue is never empty at depth > 0.
        self.queue.pop_front().unwrap_or(ControlCommand::neutral())
    }

    /// Drop all pending commands and refill with neutral ones. Called
    /// at episode reset so stale commands never cross episodes.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.queue
            .extend(std::iter::repeat_n(ControlCommand::neutral(), self.depth));
    }

    /// Delay depth in steps.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
}
