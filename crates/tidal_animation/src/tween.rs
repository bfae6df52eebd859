//! Tween driver
//!
//! A [`Tween`] owns one running animation and advances it once per tick:
//!
//! ```text
//! Created -> AwaitingDelay -> Running -> (loop boundary -> Running)* -> Finished
//!                  any state -> Aborted   (target dropped or invalid)
//!                  any state -> Cancelled (explicit cancel)
//! ```
//!
//! Start values are captured when the delay elapses, not at creation, so a
//! tween queued behind another one on the same property starts from wherever
//! the first one left it.

use std::cell::RefCell;
use std::rc::Weak;

use crate::clock::UpdateChannel;
use crate::easing::{EaseAdvance, Easing};
use crate::params::{fire, LoopType, TweenParams};
use crate::property::{Animatable, Track};

/// Weak reference to the object a tween drives
pub type TargetRef = Weak<RefCell<dyn Animatable>>;

/// Lifecycle state of a tween
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Built but not started
    Created,
    /// Started, waiting for the delay to elapse
    AwaitingDelay,
    /// Start values captured, interpolating
    Running,
    /// Last cycle completed, finish callbacks fired
    Finished,
    /// Target went away
    Aborted,
    /// Removed through a handle
    Cancelled,
}

impl TweenState {
    /// Whether the tween is done and should be deregistered
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TweenState::Finished | TweenState::Aborted | TweenState::Cancelled
        )
    }
}

/// A single running animation
pub struct Tween {
    target: TargetRef,
    /// Seconds per cycle (never negative)
    duration: f32,
    params: TweenParams,
    ease_advance: EaseAdvance,
    state: TweenState,
    /// Clock reading at `start`
    created_at: f64,
    /// Clock reading at which the current cycle began
    cycle_start: f64,
    /// Progress of the last applied tick, before easing
    progress: f32,
    loops_completed: u32,
    tracks: Vec<Box<dyn Track>>,
}

impl Tween {
    pub(crate) fn new(
        target: TargetRef,
        duration: f32,
        params: TweenParams,
        ease_advance: EaseAdvance,
    ) -> Self {
        Self {
            target,
            duration: duration.max(0.0),
            params,
            ease_advance,
            state: TweenState::Created,
            created_at: 0.0,
            cycle_start: 0.0,
            progress: 0.0,
            loops_completed: 0,
            tracks: Vec::new(),
        }
    }

    /// Record the creation time and fire on-start callbacks
    pub(crate) fn start(&mut self, now: f64) {
        if self.state != TweenState::Created {
            return;
        }

        self.created_at = now;
        self.cycle_start = now + f64::from(self.params.delay());
        self.state = TweenState::AwaitingDelay;

        fire(&mut self.params.callbacks.start);
    }

    /// Advance the tween to `now` (seconds on its channel's clock).
    ///
    /// Returns the state after the tick.
    pub(crate) fn tick(&mut self, now: f64) -> TweenState {
        if self.state.is_terminal() || self.state == TweenState::Created {
            return self.state;
        }

        if !self.target_alive() {
            tracing::trace!(label = ?self.label(), "tween target gone, aborting");
            self.state = TweenState::Aborted;
            return self.state;
        }

        if self.state == TweenState::AwaitingDelay {
            if now - self.created_at < f64::from(self.params.delay()) {
                return self.state;
            }
            if !self.capture() {
                // Target busy; try again next tick
                return self.state;
            }
            self.state = TweenState::Running;
        }

        self.progress = if self.duration <= 0.0 {
            1.0
        } else {
            (((now - self.cycle_start) / f64::from(self.duration)) as f32).clamp(0.0, 1.0)
        };

        if !self.apply(self.params.easing().apply(self.progress)) {
            // Nothing written; the boundary is retried on the next tick
            return self.state;
        }
        fire(&mut self.params.callbacks.update);

        if self.progress >= 1.0 {
            self.complete_cycle();
        }

        self.state
    }

    pub(crate) fn cancel(&mut self) {
        self.state = TweenState::Cancelled;
    }

    fn complete_cycle(&mut self) {
        self.loops_completed = self.loops_completed.saturating_add(1);

        if self.params.loops().is_exhausted(self.loops_completed) {
            self.state = TweenState::Finished;
            fire(&mut self.params.callbacks.finish);
            return;
        }

        self.cycle_start += f64::from(self.duration);

        if self.params.loop_type() == LoopType::Yoyo {
            for track in &mut self.tracks {
                track.swap();
            }
        }

        let next = self.params.easing().next(self.ease_advance);
        self.params.set_easing(next);

        tracing::trace!(
            label = ?self.label(),
            loops_completed = self.loops_completed,
            easing = ?next,
            "tween loop boundary"
        );

        fire(&mut self.params.callbacks.end_of_cycle);
    }

    /// Read start values from the target. Returns false if the target is
    /// currently borrowed elsewhere.
    fn capture(&mut self) -> bool {
        let Some(target) = self.target.upgrade() else {
            return false;
        };
        let Ok(target) = target.try_borrow() else {
            tracing::warn!(label = ?self.label(), "tween target is borrowed, deferring start");
            return false;
        };

        self.tracks = self
            .params
            .bindings()
            .iter()
            .filter_map(|binding| {
                let track = binding.capture(&*target);
                if track.is_none() {
                    tracing::warn!(
                        label = ?self.params.label(),
                        property = ?binding.kind(),
                        "tween target does not expose property, skipping"
                    );
                }
                track
            })
            .collect();

        true
    }

    /// Write eased values to the target. The borrow ends before callbacks run.
    ///
    /// Returns false if nothing could be written.
    fn apply(&self, eased: f32) -> bool {
        let Some(target) = self.target.upgrade() else {
            return false;
        };
        let Ok(mut target) = target.try_borrow_mut() else {
            tracing::warn!(label = ?self.label(), "tween target is borrowed, skipping frame");
            return false;
        };

        for track in &self.tracks {
            track.apply(&mut *target, eased);
        }
        true
    }

    fn target_alive(&self) -> bool {
        match self.target.upgrade() {
            Some(target) => target.try_borrow().map_or(true, |t| t.is_valid()),
            None => false,
        }
    }

    pub(crate) fn is_bound_to(&self, target: &TargetRef) -> bool {
        Weak::ptr_eq(&self.target, target)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn state(&self) -> TweenState {
        self.state
    }

    /// Raw (un-eased) progress through the current cycle, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn loops_completed(&self) -> u32 {
        self.loops_completed
    }

    /// Easing used for the current cycle
    pub fn easing(&self) -> Easing {
        self.params.easing()
    }

    pub fn label(&self) -> Option<&str> {
        self.params.label()
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn update_channel(&self) -> UpdateChannel {
        self.params.update_channel()
    }

    pub fn params(&self) -> &TweenParams {
        &self.params
    }
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("label", &self.label())
            .field("state", &self.state)
            .field("duration", &self.duration)
            .field("progress", &self.progress)
            .field("loops_completed", &self.loops_completed)
            .field("easing", &self.easing())
            .field(
                "tracks",
                &self.tracks.iter().map(|t| t.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
