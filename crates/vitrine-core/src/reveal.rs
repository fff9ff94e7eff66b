#![allow(dead_code)]
//! One-shot reveal scheduling: class reveals, counters, typewriter, parallax.
//!
//! A target triggers at most once per page lifetime. Idempotence is decided
//! at signal time (the `triggered` flag flips before the delayed application
//! is scheduled), so repeated visibility signals can never double-apply.

use hashbrown::HashMap;

use crate::config::Config;
use crate::data::{EffectSpec, RevealSpec};
use crate::ids::TargetId;
use crate::outputs::{Change, CoreEvent, Outputs};
use crate::pacing::Throttle;
use crate::timer::{TimerKind, TimerWheel};

/// One registered element's reveal state.
#[derive(Debug)]
struct RevealTarget {
    spec: RevealSpec,
    /// Flips false -> true exactly once, at signal time.
    triggered: bool,
}

/// Active counter run; advanced by whole frames each update.
#[derive(Debug)]
struct CounterRun {
    target: TargetId,
    value: f64,
    increment: f64,
    goal: i64,
    carry_ms: f64,
}

/// Active typewriter run; characters append on wheel ticks.
#[derive(Debug)]
struct TypewriterRun {
    target: TargetId,
    chars: Vec<char>,
    next_index: usize,
    char_delay_ms: f64,
}

/// Schedules entrance animations for registered targets.
pub struct RevealScheduler {
    targets: HashMap<TargetId, RevealTarget>,
    /// Parallax pairs (target, speed); scroll-driven, never observed.
    parallax: Vec<(TargetId, f64)>,
    counters: Vec<CounterRun>,
    typewriters: Vec<TypewriterRun>,
    scroll_gate: Throttle,
    reveal_threshold: f32,
    focus_threshold: f32,
    frame_interval_ms: f64,
}

impl RevealScheduler {
    pub fn new(cfg: &Config) -> Self {
        Self {
            targets: HashMap::new(),
            parallax: Vec::new(),
            counters: Vec::new(),
            typewriters: Vec::new(),
            scroll_gate: Throttle::new(cfg.parallax_throttle_ms),
            reveal_threshold: cfg.reveal_threshold,
            focus_threshold: cfg.focus_threshold,
            frame_interval_ms: cfg.frame_interval_ms,
        }
    }

    /// Register one target and emit its observation request. Parallax
    /// targets skip observation and join the scroll-driven list instead.
    pub fn register(&mut self, id: TargetId, spec: RevealSpec, out: &mut Outputs) {
        match &spec.effect {
            EffectSpec::Parallax { speed } => {
                self.parallax.push((id, *speed));
                return;
            }
            EffectSpec::Classes => {
                out.push_change(Change::AddClass {
                    target: id,
                    class: "scroll-reveal".to_string(),
                });
            }
            EffectSpec::Typewriter { .. } => {
                // The text animates in from nothing.
                out.push_change(Change::SetText {
                    target: id,
                    text: String::new(),
                });
            }
            EffectSpec::Counter { .. } => {}
        }

        let threshold = if spec.kind.wants_focus_threshold() {
            self.focus_threshold
        } else {
            self.reveal_threshold
        };
        out.push_change(Change::Observe {
            target: id,
            threshold,
        });
        self.targets.insert(
            id,
            RevealTarget {
                spec,
                triggered: false,
            },
        );
    }

    /// Handle a visibility crossing. Returns false when the target is not
    /// one of ours so the caller can route it elsewhere.
    pub fn on_visibility(
        &mut self,
        id: TargetId,
        now: f64,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) -> bool {
        let target = match self.targets.get_mut(&id) {
            Some(t) => t,
            None => return false,
        };
        if target.triggered {
            // Repeat signal before the host applied the unobserve.
            return true;
        }
        target.triggered = true;
        out.push_change(Change::Unobserve { target: id });
        wheel.schedule(
            now + target.spec.delay_ms,
            TimerKind::RevealApply { target: id },
        );
        true
    }

    /// Apply a triggered reveal once its delay has elapsed.
    pub fn apply(
        &mut self,
        id: TargetId,
        fired_at: f64,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) {
        let target = match self.targets.get(&id) {
            Some(t) => t,
            None => {
                log::warn!("reveal apply for unknown target {id:?}");
                return;
            }
        };
        let kind = target.spec.kind;
        match target.spec.effect.clone() {
            EffectSpec::Classes => {
                out.push_change(Change::AddClass {
                    target: id,
                    class: "revealed".to_string(),
                });
                if let Some(class) = kind.animation_class() {
                    out.push_change(Change::AddClass {
                        target: id,
                        class: class.to_string(),
                    });
                }
            }
            EffectSpec::Counter { target: goal, duration_ms } => {
                if goal <= 0 || duration_ms <= 0.0 {
                    // Nothing to count up through; land on the goal at once.
                    out.push_change(Change::SetText {
                        target: id,
                        text: goal.to_string(),
                    });
                    out.push_event(CoreEvent::CounterFinished {
                        target: id,
                        value: goal,
                    });
                } else {
                    let increment = goal as f64 / (duration_ms / self.frame_interval_ms);
                    self.counters.push(CounterRun {
                        target: id,
                        value: 0.0,
                        increment,
                        goal,
                        carry_ms: 0.0,
                    });
                }
            }
            EffectSpec::Typewriter { text, char_delay_ms } => {
                let chars: Vec<char> = text.chars().collect();
                if chars.is_empty() {
                    out.push_event(CoreEvent::TypewriterFinished { target: id });
                } else {
                    let mut run = TypewriterRun {
                        target: id,
                        chars,
                        next_index: 0,
                        char_delay_ms,
                    };
                    // First character lands with the application itself.
                    Self::append_next_char(&mut run, fired_at, wheel, out);
                    if run.next_index < run.chars.len() {
                        self.typewriters.push(run);
                    } else {
                        out.push_event(CoreEvent::TypewriterFinished { target: id });
                    }
                }
            }
            // Parallax never registers an observation, so no apply arrives.
            EffectSpec::Parallax { .. } => {}
        }
        out.push_event(CoreEvent::RevealFired { target: id, kind });
    }

    /// Handle one typewriter wheel tick.
    pub fn typewriter_tick(
        &mut self,
        id: TargetId,
        fired_at: f64,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) {
        let pos = match self.typewriters.iter().position(|r| r.target == id) {
            Some(p) => p,
            None => return,
        };
        let run = &mut self.typewriters[pos];
        Self::append_next_char(run, fired_at, wheel, out);
        if run.next_index >= run.chars.len() {
            out.push_event(CoreEvent::TypewriterFinished { target: id });
            self.typewriters.swap_remove(pos);
        }
    }

    /// Append one character and, when more remain, chain the next tick from
    /// this tick's deadline so cadence never drifts.
    fn append_next_char(
        run: &mut TypewriterRun,
        fired_at: f64,
        wheel: &mut TimerWheel,
        out: &mut Outputs,
    ) {
        let ch = run.chars[run.next_index];
        run.next_index += 1;
        out.push_change(Change::AppendText {
            target: run.target,
            text: ch.to_string(),
        });
        if run.next_index < run.chars.len() {
            wheel.schedule(
                fired_at + run.char_delay_ms,
                TimerKind::TypewriterTick { target: run.target },
            );
        }
    }

    /// Advance active counters by whole elapsed frames. Runs before signals
    /// so a counter started this tick waits for the next frame, like the
    /// animation-frame callback it models.
    pub fn advance_counters(&mut self, dt: f64, out: &mut Outputs) {
        let frame = self.frame_interval_ms;
        let mut finished: Vec<usize> = Vec::new();
        for (i, run) in self.counters.iter_mut().enumerate() {
            run.carry_ms += dt;
            let steps = (run.carry_ms / frame).floor() as u32;
            if steps == 0 {
                continue;
            }
            run.carry_ms -= steps as f64 * frame;
            let mut done = false;
            for _ in 0..steps {
                run.value += run.increment;
                if run.value >= run.goal as f64 {
                    done = true;
                    break;
                }
            }
            if done {
                out.push_change(Change::SetText {
                    target: run.target,
                    text: run.goal.to_string(),
                });
                out.push_event(CoreEvent::CounterFinished {
                    target: run.target,
                    value: run.goal,
                });
                finished.push(i);
            } else {
                // Displayed value is always the floor until the final frame.
                out.push_change(Change::SetText {
                    target: run.target,
                    text: format!("{}", run.value.floor() as i64),
                });
            }
        }
        for i in finished.into_iter().rev() {
            self.counters.swap_remove(i);
        }
    }

    /// Throttled parallax pass over the current scroll offset.
    pub fn on_scroll(&mut self, now: f64, scroll_y: f64, out: &mut Outputs) {
        if self.parallax.is_empty() || !self.scroll_gate.allow(now) {
            return;
        }
        for (id, speed) in &self.parallax {
            let y = -(scroll_y * speed);
            out.push_change(Change::SetStyle {
                target: *id,
                property: "transform".to_string(),
                value: format!("translateY({y}px)"),
            });
        }
    }

    /// Whether `id` belongs to this scheduler (observed or parallax).
    pub fn owns(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id) || self.parallax.iter().any(|(t, _)| *t == id)
    }

    /// Trigger state for a registered observed target.
    pub fn is_triggered(&self, id: TargetId) -> Option<bool> {
        self.targets.get(&id).map(|t| t.triggered)
    }

    /// Number of counter/typewriter runs still animating.
    pub fn active_runs(&self) -> usize {
        self.counters.len() + self.typewriters.len()
    }
}
