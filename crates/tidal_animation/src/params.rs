//! Tween parameters
//!
//! A [`TweenParams`] describes one animation request: which properties go
//! where, how long to wait, how to loop, which easing and update channel to
//! use, and who to notify along the way. It is built with chained calls and
//! handed to [`TweenScheduler::create`](crate::TweenScheduler::create).
//!
//! ```rust
//! use tidal_animation::{Easing, LoopType, TweenParams};
//!
//! let params = TweenParams::new()
//!     .with_alpha(0.0)
//!     .with_delay(0.5)
//!     .with_easing(Easing::EaseOutQuad)
//!     .with_loops_and_type(1, LoopType::Yoyo)
//!     .on_finish(|| println!("faded out and back"));
//!
//! assert_eq!(params.bindings().len(), 1);
//! ```

use std::fmt;

use smallvec::SmallVec;
use tidal_core::{Color, Quat, Vec2, Vec3};

use crate::clock::UpdateChannel;
use crate::config::TweenConfig;
use crate::easing::Easing;
use crate::property::PropertyBinding;

/// A lifecycle callback
pub type Callback = Box<dyn FnMut()>;

pub(crate) type CallbackList = SmallVec<[Callback; 2]>;

/// How a tween behaves when a loop completes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopType {
    /// Jump back to the start value and play forward again
    #[default]
    Restart,
    /// Swap start and end values each loop
    Yoyo,
}

/// Number of extra cycles after the first one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    /// `Finite(0)` plays once
    Finite(u32),
    Infinite,
}

impl LoopCount {
    /// Normalize a signed count: anything negative loops forever
    pub fn from_count(count: i32) -> Self {
        u32::try_from(count)
            .map(LoopCount::Finite)
            .unwrap_or(LoopCount::Infinite)
    }

    /// Whether a tween that completed `completed` cycles is done
    pub fn is_exhausted(self, completed: u32) -> bool {
        match self {
            LoopCount::Finite(loops) => completed > loops,
            LoopCount::Infinite => false,
        }
    }
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(0)
    }
}

/// Lifecycle callback lists, each fired in registration order
#[derive(Default)]
pub(crate) struct Callbacks {
    pub start: CallbackList,
    pub update: CallbackList,
    pub end_of_cycle: CallbackList,
    pub finish: CallbackList,
}

pub(crate) fn fire(callbacks: &mut CallbackList) {
    for callback in callbacks.iter_mut() {
        callback();
    }
}

/// Parameters for a single tween
#[derive(Default)]
pub struct TweenParams {
    bindings: Vec<PropertyBinding>,
    delay: f32,
    loops: LoopCount,
    loop_type: LoopType,
    easing: Easing,
    update_channel: UpdateChannel,
    label: Option<String>,
    pub(crate) callbacks: Callbacks,
}

impl TweenParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the defaults in a configuration
    pub fn from_config(config: &TweenConfig) -> Self {
        Self::new()
            .with_easing(config.default_easing)
            .with_update_channel(config.default_update_channel)
            .with_delay(config.default_delay)
    }

    // =========================================================================
    // Scalar settings
    // =========================================================================

    /// Seconds to wait before capturing start values and moving
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Label used to identify the tween (text or numbers)
    pub fn with_id(mut self, label: impl fmt::Display) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_update_channel(mut self, channel: UpdateChannel) -> Self {
        self.update_channel = channel;
        self
    }

    /// Extra cycles after the first; negative means forever.
    ///
    /// Keeps the current loop type.
    pub fn with_loops(mut self, count: i32) -> Self {
        self.loops = LoopCount::from_count(count);
        self
    }

    pub fn with_loops_and_type(mut self, count: i32, loop_type: LoopType) -> Self {
        self.loops = LoopCount::from_count(count);
        self.loop_type = loop_type;
        self
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Called once when the tween is created, before any delay
    pub fn on_start<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.start.push(Box::new(callback));
        self
    }

    /// Called every tick after values were applied
    pub fn on_update<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.update.push(Box::new(callback));
        self
    }

    /// Called at every loop boundary that is followed by another cycle
    pub fn on_end_of_cycle<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.end_of_cycle.push(Box::new(callback));
        self
    }

    /// Called once when the last cycle completes
    pub fn on_finish<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.finish.push(Box::new(callback));
        self
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn with_property(mut self, binding: PropertyBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn with_position(self, end: Vec3) -> Self {
        self.with_property(PropertyBinding::Position(end))
    }

    pub fn with_local_position(self, end: Vec3) -> Self {
        self.with_property(PropertyBinding::LocalPosition(end))
    }

    pub fn with_rotation(self, end: Quat) -> Self {
        self.with_property(PropertyBinding::Rotation(end))
    }

    /// Rotate to the given Euler angles (degrees)
    pub fn with_euler_angles(self, end: Vec3) -> Self {
        self.with_property(PropertyBinding::EulerAngles(end))
    }

    pub fn with_local_scale(self, end: Vec3) -> Self {
        self.with_property(PropertyBinding::LocalScale(end))
    }

    pub fn with_sprite_color(self, end: Color) -> Self {
        self.with_property(PropertyBinding::SpriteColor(end))
    }

    pub fn with_text_color(self, end: Color) -> Self {
        self.with_property(PropertyBinding::TextColor(end))
    }

    pub fn with_anchored_position(self, end: Vec2) -> Self {
        self.with_property(PropertyBinding::AnchoredPosition(end))
    }

    pub fn with_size_delta(self, end: Vec2) -> Self {
        self.with_property(PropertyBinding::SizeDelta(end))
    }

    pub fn with_alpha(self, end: f32) -> Self {
        self.with_property(PropertyBinding::Alpha(end))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn loops(&self) -> LoopCount {
        self.loops
    }

    pub fn loop_type(&self) -> LoopType {
        self.loop_type
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn update_channel(&self) -> UpdateChannel {
        self.update_channel
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = Some(label);
    }
}

impl fmt::Debug for TweenParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenParams")
            .field("bindings", &self.bindings)
            .field("delay", &self.delay)
            .field("loops", &self.loops)
            .field("loop_type", &self.loop_type)
            .field("easing", &self.easing)
            .field("update_channel", &self.update_channel)
            .field("label", &self.label)
            .field("on_start", &self.callbacks.start.len())
            .field("on_update", &self.callbacks.update.len())
            .field("on_end_of_cycle", &self.callbacks.end_of_cycle.len())
            .field("on_finish", &self.callbacks.finish.len())
            .finish()
    }
}
