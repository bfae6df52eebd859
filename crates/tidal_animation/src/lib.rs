//! Tidal Animation System
//!
//! Time-based property tweening for objects the host owns.
//!
//! # Features
//!
//! - **Easing Library**: 41 curves (linear plus ten families in out, in,
//!   in-out and out-in shapes)
//! - **Fluent Parameters**: properties, delay, loops, easing, update channel
//!   and lifecycle callbacks built with chained calls
//! - **Loops**: restart or yoyo, finite or infinite
//! - **Update Channels**: frame, post-frame, fixed-step and real-time passes
//! - **Weak Targets**: tweens stop quietly when their target goes away
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tidal_animation::{Animatable, Easing, TweenParams, TweenScheduler};
//!
//! struct Fader {
//!     alpha: f32,
//! }
//!
//! impl Animatable for Fader {
//!     fn alpha(&self) -> Option<f32> {
//!         Some(self.alpha)
//!     }
//!     fn set_alpha(&mut self, value: f32) {
//!         self.alpha = value;
//!     }
//! }
//!
//! let fader = Rc::new(RefCell::new(Fader { alpha: 1.0 }));
//! let mut scheduler = TweenScheduler::new();
//!
//! scheduler.create(
//!     &Rc::downgrade(&fader),
//!     2.0,
//!     TweenParams::new().with_alpha(0.0).with_easing(Easing::Linear),
//! );
//!
//! scheduler.update(0.0);
//! scheduler.update(1.0);
//! assert_eq!(fader.borrow().alpha, 0.5);
//! ```

pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod params;
pub mod property;
pub mod scheduler;
pub mod tween;

pub use clock::{TweenClock, UpdateChannel};
pub use config::TweenConfig;
pub use easing::{EaseAdvance, Easing};
pub use error::{Result, TweenError};
pub use params::{Callback, LoopCount, LoopType, TweenParams};
pub use property::{Animatable, PropertyBinding, PropertyKind};
pub use scheduler::{TweenHandle, TweenId, TweenScheduler};
pub use tween::{Tween, TweenState};
