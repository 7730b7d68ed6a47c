//! Nondeterministic choice among ready events.
//!
//! A worker that could handle any of several pending events must not pick one
//! by position, or every run would collapse into the same order and the
//! harness would have nothing to measure. `ReadyEvents` stages a set of
//! already-signalled channels and lets `crossbeam_channel::Select` pick one.
//!
//! `Select` breaks ready-ties with a thread-local generator that starts from
//! the same seed on every new thread, so the first select of a fresh thread
//! resolves to the same operation every time, and a race worker selects
//! exactly once on exactly such a thread. `choose` therefore registers the
//! receivers in an order shuffled through `rand` and maps the winning slot
//! back to its event index. The shuffle is uniform, so the composed pick is
//! uniform no matter how many selects the thread has already run.

use crossbeam_channel::{bounded, Receiver, Select};
use rand::seq::SliceRandom;

/// A set of events that are all ready the moment a worker looks at them.
///
/// Each event is a capacity-one channel holding exactly one signal. The
/// senders are dropped at staging time; a buffered signal stays receivable
/// after disconnection, so every channel is ready for the single `choose`
/// call. Consuming `self` in `choose` keeps a drained channel from ever
/// re-entering a selection.
pub struct ReadyEvents {
    events: Vec<Receiver<()>>,
}

impl ReadyEvents {
    /// Stages `count` events, each already signalled.
    ///
    /// Panics if `count` is zero: an empty selection has nothing to choose
    /// and would wait forever.
    pub fn stage(count: u32) -> ReadyEvents {
        assert!(count > 0, "cannot stage zero events");
        let mut events = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let (tx, rx) = bounded::<()>(1);
            let _ = tx.send(());
            events.push(rx);
        }
        ReadyEvents { events }
    }

    /// Consumes one signal and returns the index of the chosen event.
    ///
    /// Registration order is shuffled so the pick stays uniform even for the
    /// first select on a fresh thread.
    pub fn choose(self) -> u32 {
        let mut slots: Vec<usize> = (0..self.events.len()).collect();
        slots.shuffle(&mut rand::rng());

        let mut select = Select::new();
        for &slot in &slots {
            select.recv(&self.events[slot]);
        }
        let op = select.select();
        let chosen = slots[op.index()];
        let _ = op.recv(&self.events[chosen]);
        chosen as u32
    }

    /// Number of staged events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
