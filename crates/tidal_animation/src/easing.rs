//! Easing functions for tweens
//!
//! Every curve maps normalized progress in [0, 1] to eased progress. The
//! endpoints are exact (`0 -> 0`, `1 -> 1`); elastic, bounce and back curves
//! are allowed to leave [0, 1] in between.
//!
//! Declaration order matters: a looping tween steps to the next variant at
//! every loop boundary (see [`EaseAdvance`]).

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Elastic period
const ELASTIC_PERIOD: f32 = 0.3;
/// Back overshoot amount
const BACK_OVERSHOOT: f32 = 1.70158;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseOutExpo,
    EaseInExpo,
    EaseInOutExpo,
    EaseOutInExpo,
    EaseOutCirc,
    EaseInCirc,
    EaseInOutCirc,
    EaseOutInCirc,
    EaseOutQuad,
    EaseInQuad,
    EaseInOutQuad,
    EaseOutInQuad,
    EaseOutSine,
    EaseInSine,
    EaseInOutSine,
    EaseOutInSine,
    EaseOutCubic,
    EaseInCubic,
    EaseInOutCubic,
    EaseOutInCubic,
    EaseOutQuart,
    EaseInQuart,
    EaseInOutQuart,
    EaseOutInQuart,
    EaseOutQuint,
    EaseInQuint,
    EaseInOutQuint,
    EaseOutInQuint,
    EaseOutElastic,
    EaseInElastic,
    EaseInOutElastic,
    EaseOutInElastic,
    EaseOutBounce,
    EaseInBounce,
    EaseInOutBounce,
    EaseOutInBounce,
    EaseOutBack,
    EaseInBack,
    EaseInOutBack,
    EaseOutInBack,
}

/// What happens to a tween's easing when a loop completes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseAdvance {
    /// Step to the next variant; after the last one comes `Linear` again
    #[default]
    Wrap,
    /// Step to the next variant and stay on the last one once reached
    Clamp,
    /// Keep the same easing for every loop
    Hold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Expo,
    Circ,
    Quad,
    Sine,
    Cubic,
    Quart,
    Quint,
    Elastic,
    Bounce,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    Out,
    In,
    InOut,
    OutIn,
}

impl Easing {
    /// Every easing, in declaration order
    pub const ALL: [Easing; 41] = [
        Easing::Linear,
        Easing::EaseOutExpo,
        Easing::EaseInExpo,
        Easing::EaseInOutExpo,
        Easing::EaseOutInExpo,
        Easing::EaseOutCirc,
        Easing::EaseInCirc,
        Easing::EaseInOutCirc,
        Easing::EaseOutInCirc,
        Easing::EaseOutQuad,
        Easing::EaseInQuad,
        Easing::EaseInOutQuad,
        Easing::EaseOutInQuad,
        Easing::EaseOutSine,
        Easing::EaseInSine,
        Easing::EaseInOutSine,
        Easing::EaseOutInSine,
        Easing::EaseOutCubic,
        Easing::EaseInCubic,
        Easing::EaseInOutCubic,
        Easing::EaseOutInCubic,
        Easing::EaseOutQuart,
        Easing::EaseInQuart,
        Easing::EaseInOutQuart,
        Easing::EaseOutInQuart,
        Easing::EaseOutQuint,
        Easing::EaseInQuint,
        Easing::EaseInOutQuint,
        Easing::EaseOutInQuint,
        Easing::EaseOutElastic,
        Easing::EaseInElastic,
        Easing::EaseInOutElastic,
        Easing::EaseOutInElastic,
        Easing::EaseOutBounce,
        Easing::EaseInBounce,
        Easing::EaseInOutBounce,
        Easing::EaseOutInBounce,
        Easing::EaseOutBack,
        Easing::EaseInBack,
        Easing::EaseInOutBack,
        Easing::EaseOutInBack,
    ];

    /// Position of this variant in [`Easing::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The easing a loop boundary switches to
    pub fn next(self, advance: EaseAdvance) -> Easing {
        let last = Self::ALL.len() - 1;
        match advance {
            EaseAdvance::Hold => self,
            EaseAdvance::Wrap => Self::ALL[(self.index() + 1) % Self::ALL.len()],
            EaseAdvance::Clamp => Self::ALL[(self.index() + 1).min(last)],
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        // Endpoints are always exact
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let Some((family, shape)) = self.parts() else {
            return t;
        };

        match shape {
            Shape::In => ease_in(family, t),
            Shape::Out => ease_out(family, t),
            Shape::InOut => {
                if t < 0.5 {
                    ease_in(family, t * 2.0) * 0.5
                } else {
                    ease_out(family, t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }
            Shape::OutIn => {
                if t < 0.5 {
                    ease_out(family, t * 2.0) * 0.5
                } else {
                    ease_in(family, t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }
        }
    }

    fn parts(self) -> Option<(Family, Shape)> {
        const FAMILIES: [Family; 10] = [
            Family::Expo,
            Family::Circ,
            Family::Quad,
            Family::Sine,
            Family::Cubic,
            Family::Quart,
            Family::Quint,
            Family::Elastic,
            Family::Bounce,
            Family::Back,
        ];
        const SHAPES: [Shape; 4] = [Shape::Out, Shape::In, Shape::InOut, Shape::OutIn];

        // Linear sits at 0, then each family contributes Out, In, InOut, OutIn
        let index = self.index().checked_sub(1)?;
        Some((FAMILIES[index / 4], SHAPES[index % 4]))
    }
}

fn ease_in(family: Family, t: f32) -> f32 {
    match family {
        Family::Expo => {
            if t <= 0.0 {
                0.0
            } else {
                2f32.powf(10.0 * (t - 1.0))
            }
        }
        Family::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
        Family::Quad => t * t,
        Family::Sine => 1.0 - (t * FRAC_PI_2).cos(),
        Family::Cubic => t * t * t,
        Family::Quart => t * t * t * t,
        Family::Quint => t * t * t * t * t,
        Family::Elastic => {
            if t <= 0.0 {
                return 0.0;
            }
            if t >= 1.0 {
                return 1.0;
            }
            let s = ELASTIC_PERIOD / 4.0;
            let t = t - 1.0;
            -(2f32.powf(10.0 * t) * ((t - s) * (2.0 * PI) / ELASTIC_PERIOD).sin())
        }
        Family::Bounce => 1.0 - bounce_out(1.0 - t),
        Family::Back => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
    }
}

fn ease_out(family: Family, t: f32) -> f32 {
    match family {
        Family::Expo => {
            if t >= 1.0 {
                1.0
            } else {
                1.0 - 2f32.powf(-10.0 * t)
            }
        }
        Family::Circ => {
            let t = t - 1.0;
            (1.0 - t * t).max(0.0).sqrt()
        }
        Family::Quad => 1.0 - (1.0 - t) * (1.0 - t),
        Family::Sine => (t * FRAC_PI_2).sin(),
        Family::Cubic => 1.0 + (t - 1.0).powi(3),
        Family::Quart => 1.0 - (t - 1.0).powi(4),
        Family::Quint => 1.0 + (t - 1.0).powi(5),
        Family::Elastic => {
            if t <= 0.0 {
                return 0.0;
            }
            if t >= 1.0 {
                return 1.0;
            }
            let s = ELASTIC_PERIOD / 4.0;
            2f32.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
        }
        Family::Bounce => bounce_out(t),
        Family::Back => {
            let t = t - 1.0;
            t * t * ((BACK_OVERSHOOT + 1.0) * t + BACK_OVERSHOOT) + 1.0
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}
