//! Tidal Core Types
//!
//! Value types shared by the tween engine and the host application:
//!
//! - **Geometry**: `Vec2`, `Vec3` and unit quaternion rotations (`Quat`)
//! - **Color**: linear RGBA colors
//! - **Interpolation**: the [`Lerp`] trait, implemented per value shape
//!
//! # Example
//!
//! ```rust
//! use tidal_core::{Lerp, Vec3};
//!
//! let a = Vec3::ZERO;
//! let b = Vec3::new(10.0, 0.0, -4.0);
//! assert_eq!(a.lerp(b, 0.5), Vec3::new(5.0, 0.0, -2.0));
//! ```

pub mod color;
pub mod geometry;
pub mod lerp;

pub use color::Color;
pub use geometry::{Quat, Vec2, Vec3};
pub use lerp::Lerp;
