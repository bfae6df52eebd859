//! Tween scheduler
//!
//! Owns every live tween and drives them from the host's update passes.

use std::cell::RefCell;
use std::rc::Weak;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{new_key_type, SlotMap};

use crate::clock::{TweenClock, UpdateChannel};
use crate::config::TweenConfig;
use crate::params::TweenParams;
use crate::property::Animatable;
use crate::tween::{TargetRef, Tween, TweenState};

new_key_type! {
    pub struct TweenId;
}

/// Source of per-scheduler serial numbers
static NEXT_SCHEDULER: AtomicU64 = AtomicU64::new(0);

/// Handle to a tween registered with a [`TweenScheduler`].
///
/// Only the scheduler that issued a handle resolves it; other schedulers
/// treat it as unknown.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TweenHandle {
    scheduler: u64,
    id: TweenId,
    label: String,
}

impl TweenHandle {
    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Remove the tween without firing any callbacks
    pub fn cancel(&self, scheduler: &mut TweenScheduler) -> bool {
        scheduler.cancel(self)
    }
}

/// Registry of running tweens
pub struct TweenScheduler {
    tweens: SlotMap<TweenId, Tween>,
    /// Creation order, used as tick order
    order: Vec<TweenId>,
    clock: TweenClock,
    config: TweenConfig,
    next_label: u64,
    /// Stamped into every handle this scheduler issues
    serial: u64,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::with_config(TweenConfig::default())
    }

    pub fn with_config(config: TweenConfig) -> Self {
        let mut clock = TweenClock::new();
        clock.set_time_scale(f64::from(config.time_scale));

        Self {
            tweens: SlotMap::with_key(),
            order: Vec::new(),
            clock,
            config,
            next_label: 0,
            serial: NEXT_SCHEDULER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Start tweening `target` over `duration` seconds.
    ///
    /// On-start callbacks run before this returns. Returns `None` if the
    /// target is already gone or reports itself invalid.
    pub fn create<T: Animatable + 'static>(
        &mut self,
        target: &Weak<RefCell<T>>,
        duration: f32,
        mut params: TweenParams,
    ) -> Option<TweenHandle> {
        let target: TargetRef = target.clone();

        let valid = target
            .upgrade()
            .is_some_and(|t| t.try_borrow().map_or(true, |t| t.is_valid()));
        if !valid {
            tracing::trace!(label = ?params.label(), "tween target is gone, not creating");
            return None;
        }

        if params.label().is_none() {
            params.set_label(format!("{}-{}", self.config.label_prefix, self.next_label));
            self.next_label += 1;
        }

        let channel = params.update_channel();
        let mut tween = Tween::new(target, duration, params, self.config.ease_advance);
        let label = tween.label().unwrap_or_default().to_string();

        tracing::debug!(
            label = %label,
            duration,
            channel = ?channel,
            easing = ?tween.easing(),
            "tween created"
        );

        tween.start(self.clock.now(channel));

        let id = self.tweens.insert(tween);
        self.order.push(id);

        Some(TweenHandle {
            scheduler: self.serial,
            id,
            label,
        })
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Advance scaled and real time by `dt` seconds of wall time
    pub fn advance(&mut self, dt: f64) {
        self.clock.advance(dt);
    }

    /// Advance the fixed-step clock
    pub fn advance_fixed(&mut self, step: f64) {
        self.clock.advance_fixed(step);
    }

    /// Set the scaled-time multiplier; 0.0 pauses everything except
    /// [`UpdateChannel::FrameRealTime`] tweens
    pub fn set_time_scale(&mut self, scale: f64) {
        self.clock.set_time_scale(scale);
    }

    pub fn time_scale(&self) -> f64 {
        self.clock.time_scale()
    }

    pub fn clock(&self) -> &TweenClock {
        &self.clock
    }

    // =========================================================================
    // Ticking
    // =========================================================================

    /// Drive every tween on `channel` once, in creation order, then drop the
    /// ones that ended. Returns how many were removed.
    pub fn tick(&mut self, channel: UpdateChannel) -> usize {
        let now = self.clock.now(channel);

        for id in &self.order {
            if let Some(tween) = self.tweens.get_mut(*id) {
                if tween.update_channel() == channel {
                    tween.tick(now);
                }
            }
        }

        self.remove_terminal()
    }

    /// Advance the clock by `dt` and run the per-frame passes
    /// (`Frame`, `FrameRealTime`, then `PostFrame`)
    pub fn update(&mut self, dt: f64) -> usize {
        self.advance(dt);
        self.tick(UpdateChannel::Frame)
            + self.tick(UpdateChannel::FrameRealTime)
            + self.tick(UpdateChannel::PostFrame)
    }

    fn remove_terminal(&mut self) -> usize {
        let tweens = &mut self.tweens;
        let before = self.order.len();

        self.order.retain(|id| {
            let state = match tweens.get(*id) {
                Some(tween) => tween.state(),
                None => return false,
            };
            if !state.is_terminal() {
                return true;
            }

            if let Some(tween) = tweens.remove(*id) {
                match state {
                    TweenState::Finished => {
                        tracing::debug!(label = ?tween.label(), "tween finished")
                    }
                    _ => tracing::trace!(label = ?tween.label(), state = ?state, "tween removed"),
                }
            }
            false
        });

        before - self.order.len()
    }

    // =========================================================================
    // Cancellation
    // =========================================================================

    /// Remove a tween without firing any callbacks. Returns false if it
    /// already ended.
    pub fn cancel(&mut self, handle: &TweenHandle) -> bool {
        if handle.scheduler != self.serial {
            return false;
        }
        match self.tweens.remove(handle.id) {
            Some(mut tween) => {
                tween.cancel();
                self.order.retain(|id| *id != handle.id);
                tracing::debug!(label = %handle.label, "tween cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every tween driving `target`. Returns how many were removed.
    pub fn cancel_target<T: Animatable + 'static>(&mut self, target: &Weak<RefCell<T>>) -> usize {
        let target: TargetRef = target.clone();

        let handles: Vec<TweenHandle> = self
            .iter()
            .filter(|(_, tween)| tween.is_bound_to(&target))
            .map(|(id, tween)| TweenHandle {
                scheduler: self.serial,
                id,
                label: tween.label().unwrap_or_default().to_string(),
            })
            .collect();

        handles.iter().filter(|handle| self.cancel(handle)).count()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn get(&self, handle: &TweenHandle) -> Option<&Tween> {
        if handle.scheduler != self.serial {
            return None;
        }
        self.tweens.get(handle.id)
    }

    /// Whether the tween is still registered and has not ended
    pub fn is_active(&self, handle: &TweenHandle) -> bool {
        self.get(handle)
            .is_some_and(|tween| !tween.state().is_terminal())
    }

    /// Number of registered tweens
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn has_active_tweens(&self) -> bool {
        self.tweens
            .values()
            .any(|tween| !tween.state().is_terminal())
    }

    /// Registered tweens in creation order
    pub fn iter(&self) -> impl Iterator<Item = (TweenId, &Tween)> {
        self.order
            .iter()
            .filter_map(move |id| self.tweens.get(*id).map(|tween| (*id, tween)))
    }

    /// First registered tween with the given label
    pub fn find_by_label(&self, label: &str) -> Option<TweenHandle> {
        self.iter()
            .find(|(_, tween)| tween.label() == Some(label))
            .map(|(id, _)| TweenHandle {
                scheduler: self.serial,
                id,
                label: label.to_string(),
            })
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TweenScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenScheduler")
            .field("tweens", &self.tweens.len())
            .field("clock", &self.clock)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use std::cell::Cell;
    use std::rc::Rc;
    use tidal_core::Vec2;

    #[derive(Default)]
    struct Panel {
        alpha: f32,
        size: Vec2,
        hidden: bool,
    }

    impl Animatable for Panel {
        fn is_valid(&self) -> bool {
            !self.hidden
        }
        fn alpha(&self) -> Option<f32> {
            Some(self.alpha)
        }
        fn set_alpha(&mut self, value: f32) {
            self.alpha = value;
        }
        fn size_delta(&self) -> Option<Vec2> {
            Some(self.size)
        }
        fn set_size_delta(&mut self, value: Vec2) {
            self.size = value;
        }
    }

    fn panel() -> Rc<RefCell<Panel>> {
        Rc::new(RefCell::new(Panel::default()))
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler = TweenScheduler::new();
        assert!(scheduler.is_empty());
        assert!(!scheduler.has_active_tweens());
        assert_eq!(scheduler.time_scale(), 1.0);
    }

    #[test]
    fn test_create_registers_and_starts() {
        let mut scheduler = TweenScheduler::new();
        let target = panel();
        let started = Rc::new(Cell::new(false));
        let flag = started.clone();

        let handle = scheduler
            .create(
                &Rc::downgrade(&target),
                1.0,
                TweenParams::new().with_alpha(1.0).on_start(move || flag.set(true)),
            )
            .unwrap();

        assert!(started.get());
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.is_active(&handle));
        assert_eq!(
            scheduler.get(&handle).unwrap().state(),
            TweenState::AwaitingDelay
        );
    }

    #[test]
    fn test_create_rejects_dead_targets() {
        let mut scheduler = TweenScheduler::new();

        let target = panel();
        let weak = Rc::downgrade(&target);
        drop(target);
        assert!(scheduler.create(&weak, 1.0, TweenParams::new()).is_none());

        let hidden = Rc::new(RefCell::new(Panel {
            hidden: true,
            ..Default::default()
        }));
        assert!(scheduler
            .create(&Rc::downgrade(&hidden), 1.0, TweenParams::new())
            .is_none());

        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_default_labels() {
        let mut scheduler = TweenScheduler::new();
        let target = panel();
        let weak = Rc::downgrade(&target);

        let first = scheduler.create(&weak, 1.0, TweenParams::new()).unwrap();
        let named = scheduler
            .create(&weak, 1.0, TweenParams::new().with_id("fade"))
            .unwrap();
        let second = scheduler.create(&weak, 1.0, TweenParams::new()).unwrap();

        assert_eq!(first.label(), "tween-0");
        assert_eq!(named.label(), "fade");
        assert_eq!(second.label(), "tween-1");
        assert_eq!(scheduler.find_by_label("fade"), Some(named));
        assert_eq!(scheduler.find_by_label("missing"), None);
    }

    #[test]
    fn test_label_prefix_from_config() {
        let mut scheduler = TweenScheduler::with_config(TweenConfig {
            label_prefix: "hud".to_string(),
            ..TweenConfig::default()
        });
        let target = panel();
        let handle = scheduler
            .create(&Rc::downgrade(&target), 1.0, TweenParams::new())
            .unwrap();
        assert_eq!(handle.label(), "hud-0");
    }

    #[test]
    fn test_update_runs_to_completion() {
        let mut scheduler = TweenScheduler::new();
        let target = panel();
        let handle = scheduler
            .create(
                &Rc::downgrade(&target),
                1.0,
                TweenParams::new()
                    .with_alpha(1.0)
                    .with_size_delta(Vec2::new(200.0, 100.0)),
            )
            .unwrap();

        assert_eq!(scheduler.update(0.5), 0);
        assert_eq!(scheduler.get(&handle).unwrap().state(), TweenState::Running);
        assert_eq!(target.borrow().alpha, 0.5);
        assert_eq!(target.borrow().size, Vec2::new(100.0, 50.0));

        assert_eq!(scheduler.update(0.5), 1);
        assert_eq!(target.borrow().alpha, 1.0);
        assert!(scheduler.get(&handle).is_none());
        assert!(!scheduler.is_active(&handle));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_tick_only_drives_its_channel() {
        let mut scheduler = TweenScheduler::new();
        let target = panel();
        scheduler.create(
            &Rc::downgrade(&target),
            1.0,
            TweenParams::new()
                .with_alpha(1.0)
                .with_update_channel(UpdateChannel::FixedStep),
        );

        scheduler.update(0.5);
        assert_eq!(target.borrow().alpha, 0.0);

        // First fixed tick captures at fixed time 0
        scheduler.tick(UpdateChannel::FixedStep);
        scheduler.advance_fixed(0.25);
        scheduler.tick(UpdateChannel::FixedStep);
        assert_eq!(target.borrow().alpha, 0.25);
    }

    #[test]
    fn test_time_scale_pauses_frame_but_not_real_time() {
        let mut scheduler = TweenScheduler::new();
        let scaled = panel();
        let real = panel();

        scheduler.create(&Rc::downgrade(&scaled), 1.0, TweenParams::new().with_alpha(1.0));
        scheduler.create(
            &Rc::downgrade(&real),
            1.0,
            TweenParams::new()
                .with_alpha(1.0)
                .with_update_channel(UpdateChannel::FrameRealTime),
        );

        scheduler.update(0.0);
        scheduler.set_time_scale(0.0);
        scheduler.update(0.5);

        assert_eq!(scaled.borrow().alpha, 0.0);
        assert_eq!(real.borrow().alpha, 0.5);
    }

    #[test]
    fn test_time_scale_from_config() {
        let scheduler = TweenScheduler::with_config(TweenConfig {
            time_scale: 0.5,
            ..TweenConfig::default()
        });
        assert_eq!(scheduler.time_scale(), 0.5);
        assert_eq!(scheduler.config().time_scale, 0.5);
    }

    #[test]
    fn test_ease_advance_from_config() {
        let mut scheduler = TweenScheduler::with_config(TweenConfig {
            ease_advance: crate::easing::EaseAdvance::Clamp,
            ..TweenConfig::default()
        });
        let target = panel();
        let handle = scheduler
            .create(
                &Rc::downgrade(&target),
                1.0,
                TweenParams::new()
                    .with_alpha(1.0)
                    .with_loops(-1)
                    .with_easing(Easing::EaseOutInBack),
            )
            .unwrap();

        scheduler.update(0.0);
        scheduler.update(1.0);
        scheduler.update(1.0);
        let tween = scheduler.get(&handle).unwrap();
        assert_eq!(tween.loops_completed(), 2);
        assert_eq!(tween.easing(), Easing::EaseOutInBack);
    }

    #[test]
    fn test_cancel_is_silent() {
        let mut scheduler = TweenScheduler::new();
        let target = panel();
        let finished = Rc::new(Cell::new(false));
        let flag = finished.clone();

        let handle = scheduler
            .create(
                &Rc::downgrade(&target),
                1.0,
                TweenParams::new()
                    .with_alpha(1.0)
                    .on_finish(move || flag.set(true)),
            )
            .unwrap();
        scheduler.update(0.5);

        assert!(handle.cancel(&mut scheduler));
        assert!(!scheduler.cancel(&handle));
        assert!(scheduler.is_empty());

        scheduler.update(1.0);
        assert_eq!(target.borrow().alpha, 0.5);
        assert!(!finished.get());
    }

    #[test]
    fn test_cancel_target() {
        let mut scheduler = TweenScheduler::new();
        let a = panel();
        let b = panel();

        scheduler.create(&Rc::downgrade(&a), 1.0, TweenParams::new().with_alpha(1.0));
        scheduler.create(
            &Rc::downgrade(&a),
            1.0,
            TweenParams::new().with_size_delta(Vec2::ONE),
        );
        scheduler.create(&Rc::downgrade(&b), 1.0, TweenParams::new().with_alpha(1.0));

        assert_eq!(scheduler.cancel_target(&Rc::downgrade(&a)), 2);
        assert_eq!(scheduler.len(), 1);

        scheduler.update(0.5);
        assert_eq!(a.borrow().alpha, 0.0);
        assert_eq!(b.borrow().alpha, 0.5);
    }

    #[test]
    fn test_dropped_target_is_removed_on_next_tick() {
        let mut scheduler = TweenScheduler::new();
        let target = panel();
        scheduler.create(&Rc::downgrade(&target), 1.0, TweenParams::new().with_alpha(1.0));
        scheduler.update(0.25);

        drop(target);
        assert_eq!(scheduler.update(0.25), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_handles_belong_to_their_scheduler() {
        let mut first = TweenScheduler::new();
        let mut second = TweenScheduler::new();
        let a = panel();
        let b = panel();

        let handle = first
            .create(&Rc::downgrade(&a), 1.0, TweenParams::new().with_alpha(1.0))
            .unwrap();
        second.create(&Rc::downgrade(&b), 1.0, TweenParams::new().with_alpha(1.0));

        assert!(second.get(&handle).is_none());
        assert!(!second.is_active(&handle));
        assert!(!second.cancel(&handle));
        assert_eq!(second.len(), 1);

        assert!(first.cancel(&handle));
        assert!(first.is_empty());
    }

    #[test]
    fn test_iter_in_creation_order() {
        let mut scheduler = TweenScheduler::new();
        let target = panel();
        let weak = Rc::downgrade(&target);

        for name in ["a", "b", "c"] {
            scheduler.create(&weak, 1.0, TweenParams::new().with_id(name));
        }

        let labels: Vec<_> = scheduler
            .iter()
            .filter_map(|(_, tween)| tween.label())
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }
}
