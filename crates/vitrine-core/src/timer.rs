#![allow(dead_code)]
//! Deadline wheel driving every deferred effect in the core.
//!
//! Entries carry an absolute engine-time deadline and drain in
//! (deadline, schedule order). There is no cancellation: stale lightbox
//! deadlines are filtered by epoch at fire time instead (gallery.rs).

use crate::fetch::FetchOutcome;
use crate::ids::TargetId;

/// Payload of one deferred effect.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerKind {
    /// Apply a triggered reveal after its registration delay.
    RevealApply { target: TargetId },
    /// Append the next typewriter character.
    TypewriterTick { target: TargetId },
    /// Arm the overlay enter transition shortly after mount.
    OverlayEnter { epoch: u32 },
    /// Tear the overlay down once the exit transition has played.
    OverlayTeardown { epoch: u32 },
    /// Deliver a simulated fetch outcome.
    FetchSettle { page: u32, outcome: FetchOutcome },
    /// Start fading the preloader after the post-load hold.
    PreloaderFade { target: TargetId },
    /// Hide the preloader once the fade has played.
    PreloaderHide { target: TargetId },
}

#[derive(Clone, Debug)]
struct TimerEntry {
    deadline: f64,
    seq: u64,
    kind: TimerKind,
}

/// Append-only deadline store. Small enough that a linear scan beats keeping
/// a heap ordered under the churn of typewriter chains.
#[derive(Default, Debug)]
pub struct TimerWheel {
    entries: Vec<TimerEntry>,
    next_seq: u64,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: f64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(TimerEntry {
            deadline,
            seq,
            kind,
        });
    }

    /// Remove and return the earliest due entry with its deadline, if any.
    /// Ties drain in schedule order.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, TimerKind)> {
        let mut best: Option<usize> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.deadline > now {
                continue;
            }
            match best {
                None => best = Some(i),
                Some(j) => {
                    let b = &self.entries[j];
                    if (entry.deadline, entry.seq) < (b.deadline, b.seq) {
                        best = Some(i);
                    }
                }
            }
        }
        best.map(|i| {
            let entry = self.entries.remove(i);
            (entry.deadline, entry.kind)
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
