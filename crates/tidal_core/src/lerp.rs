//! Interpolation between two values of the same shape
//!
//! `t` is the eased progress. Scalars and vectors extrapolate when `t`
//! leaves [0, 1] (elastic and back curves overshoot on purpose); colors clamp
//! `t` since an out-of-gamut channel has no visual meaning; rotations follow
//! the shortest arc.

use crate::color::Color;
use crate::geometry::{Quat, Vec2, Vec3};

/// A value that can be blended toward another value of the same type
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: f32, t: f32) -> f32 {
        self + (to - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        self + (to - self) * t
    }
}

impl Lerp for Color {
    fn lerp(self, to: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgba(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
            self.a + (to.a - self.a) * t,
        )
    }
}

impl Lerp for Quat {
    fn lerp(self, to: Quat, t: f32) -> Quat {
        self.slerp(to, t)
    }
}
