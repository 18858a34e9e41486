//! One-shot delayed callbacks: spawn scheduling, reload completion and the
//! victory delay.
//!
//! Every timer is stamped with the run generation that armed it. The engine
//! bumps its generation whenever a run starts, stops or ends, so a timer that
//! outlives its run is recognised on firing and dropped.

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Attempt a spawn and re-arm.
    Spawn,
    /// Refill the magazine.
    ReloadComplete,
    /// Finalize a cleared campaign level.
    Victory,
}

/// A pending one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    /// Sim time (ms) at or after which the timer fires.
    pub due_ms: u64,
    /// Run generation at arming time.
    pub generation: u64,
    seq: u64,
}

/// Pending timers, fired in `(due_ms, arming order)` order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer. At most one timer per kind is pending; re-arming a kind
    /// replaces the previous one.
    pub fn arm(&mut self, kind: TimerKind, due_ms: u64, generation: u64) {
        self.cancel(kind);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            kind,
            due_ms,
            generation,
            seq,
        });
    }

    /// Cancel the pending timer of `kind`. Returns whether one was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.kind != kind);
        self.timers.len() != before
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|timer| timer.kind == kind)
    }

    /// Due time of the pending timer of `kind`, if any.
    pub fn due_ms(&self, kind: TimerKind) -> Option<u64> {
        self.timers
            .iter()
            .find(|timer| timer.kind == kind)
            .map(|timer| timer.due_ms)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove and return the earliest timer due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= now_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
            .map(|(index, _)| index)?;
        Some(self.timers.swap_remove(index))
    }
}
