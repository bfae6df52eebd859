//! Animatable properties
//!
//! The host implements [`Animatable`] on its object types; that trait is the
//! get/set table the tween driver dispatches through. A [`PropertyBinding`]
//! pairs a property with its end value, and the shape of that value is fixed
//! by the variant, so a rotation can never be bound to a color.
//!
//! At the moment a tween's delay elapses every binding is turned into a
//! [`Track`], which remembers the captured start value and writes
//! interpolated values back through the accessors.

use serde::{Deserialize, Serialize};
use tidal_core::{Color, Lerp, Quat, Vec2, Vec3};

/// Get/set accessors for every property a tween can drive.
///
/// Getters return `None` when the object has no such property; bindings on
/// such properties are skipped. Setters for unsupported properties are never
/// called.
pub trait Animatable {
    /// Whether the object is still alive from the host's point of view.
    ///
    /// A tween whose target reports `false` aborts on its next tick.
    fn is_valid(&self) -> bool {
        true
    }

    fn position(&self) -> Option<Vec3> {
        None
    }
    fn set_position(&mut self, _value: Vec3) {}

    fn local_position(&self) -> Option<Vec3> {
        None
    }
    fn set_local_position(&mut self, _value: Vec3) {}

    /// Also used by [`PropertyKind::EulerAngles`]
    fn rotation(&self) -> Option<Quat> {
        None
    }
    fn set_rotation(&mut self, _value: Quat) {}

    fn local_scale(&self) -> Option<Vec3> {
        None
    }
    fn set_local_scale(&mut self, _value: Vec3) {}

    fn sprite_color(&self) -> Option<Color> {
        None
    }
    fn set_sprite_color(&mut self, _value: Color) {}

    fn text_color(&self) -> Option<Color> {
        None
    }
    fn set_text_color(&mut self, _value: Color) {}

    fn anchored_position(&self) -> Option<Vec2> {
        None
    }
    fn set_anchored_position(&mut self, _value: Vec2) {}

    fn size_delta(&self) -> Option<Vec2> {
        None
    }
    fn set_size_delta(&mut self, _value: Vec2) {}

    fn alpha(&self) -> Option<f32> {
        None
    }
    fn set_alpha(&mut self, _value: f32) {}
}

/// Which property of the target a binding drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Position,
    LocalPosition,
    Rotation,
    /// Rotation given as Euler angles in degrees
    EulerAngles,
    LocalScale,
    SpriteColor,
    TextColor,
    AnchoredPosition,
    SizeDelta,
    Alpha,
}

/// A property paired with the value it should reach
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyBinding {
    Position(Vec3),
    LocalPosition(Vec3),
    Rotation(Quat),
    EulerAngles(Vec3),
    LocalScale(Vec3),
    SpriteColor(Color),
    TextColor(Color),
    AnchoredPosition(Vec2),
    SizeDelta(Vec2),
    Alpha(f32),
}

impl PropertyBinding {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyBinding::Position(_) => PropertyKind::Position,
            PropertyBinding::LocalPosition(_) => PropertyKind::LocalPosition,
            PropertyBinding::Rotation(_) => PropertyKind::Rotation,
            PropertyBinding::EulerAngles(_) => PropertyKind::EulerAngles,
            PropertyBinding::LocalScale(_) => PropertyKind::LocalScale,
            PropertyBinding::SpriteColor(_) => PropertyKind::SpriteColor,
            PropertyBinding::TextColor(_) => PropertyKind::TextColor,
            PropertyBinding::AnchoredPosition(_) => PropertyKind::AnchoredPosition,
            PropertyBinding::SizeDelta(_) => PropertyKind::SizeDelta,
            PropertyBinding::Alpha(_) => PropertyKind::Alpha,
        }
    }

    /// Read the current value from `target` and build a track toward the
    /// bound end value. Returns `None` if the target lacks the property.
    pub(crate) fn capture(&self, target: &dyn Animatable) -> Option<Box<dyn Track>> {
        let kind = self.kind();
        match *self {
            PropertyBinding::Position(end) => {
                ValueTrack::capture(kind, target, end, |t| t.position(), |t, v| t.set_position(v))
            }
            PropertyBinding::LocalPosition(end) => ValueTrack::capture(
                kind,
                target,
                end,
                |t| t.local_position(),
                |t, v| t.set_local_position(v),
            ),
            PropertyBinding::Rotation(end) => {
                ValueTrack::capture(kind, target, end, |t| t.rotation(), |t, v| t.set_rotation(v))
            }
            PropertyBinding::EulerAngles(degrees) => ValueTrack::capture(
                kind,
                target,
                Quat::from_euler(degrees),
                |t| t.rotation(),
                |t, v| t.set_rotation(v),
            ),
            PropertyBinding::LocalScale(end) => ValueTrack::capture(
                kind,
                target,
                end,
                |t| t.local_scale(),
                |t, v| t.set_local_scale(v),
            ),
            PropertyBinding::SpriteColor(end) => ValueTrack::capture(
                kind,
                target,
                end,
                |t| t.sprite_color(),
                |t, v| t.set_sprite_color(v),
            ),
            PropertyBinding::TextColor(end) => ValueTrack::capture(
                kind,
                target,
                end,
                |t| t.text_color(),
                |t, v| t.set_text_color(v),
            ),
            PropertyBinding::AnchoredPosition(end) => ValueTrack::capture(
                kind,
                target,
                end,
                |t| t.anchored_position(),
                |t, v| t.set_anchored_position(v),
            ),
            PropertyBinding::SizeDelta(end) => ValueTrack::capture(
                kind,
                target,
                end,
                |t| t.size_delta(),
                |t, v| t.set_size_delta(v),
            ),
            PropertyBinding::Alpha(end) => {
                ValueTrack::capture(kind, target, end, |t| t.alpha(), |t, v| t.set_alpha(v))
            }
        }
    }
}

/// A captured binding that can write interpolated values to its target
pub(crate) trait Track {
    fn kind(&self) -> PropertyKind;

    /// Write `start.lerp(end, t)` to the target
    fn apply(&self, target: &mut dyn Animatable, t: f32);

    /// Exchange start and end (yoyo loops)
    fn swap(&mut self);
}

type Getter<V> = fn(&dyn Animatable) -> Option<V>;
type Setter<V> = fn(&mut dyn Animatable, V);

/// One [`Track`] implementation per value shape
struct ValueTrack<V: Lerp> {
    kind: PropertyKind,
    start: V,
    end: V,
    set: Setter<V>,
}

impl<V: Lerp + 'static> ValueTrack<V> {
    fn capture(
        kind: PropertyKind,
        target: &dyn Animatable,
        end: V,
        get: Getter<V>,
        set: Setter<V>,
    ) -> Option<Box<dyn Track>> {
        let start = get(target)?;
        Some(Box::new(Self {
            kind,
            start,
            end,
            set,
        }))
    }
}

impl<V: Lerp> Track for ValueTrack<V> {
    fn kind(&self) -> PropertyKind {
        self.kind
    }

    fn apply(&self, target: &mut dyn Animatable, t: f32) {
        (self.set)(target, self.start.lerp(self.end, t));
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sprite {
        position: Vec3,
        rotation: Quat,
        color: Color,
        alpha: f32,
    }

    impl Animatable for Sprite {
        fn position(&self) -> Option<Vec3> {
            Some(self.position)
        }
        fn set_position(&mut self, value: Vec3) {
            self.position = value;
        }
        fn rotation(&self) -> Option<Quat> {
            Some(self.rotation)
        }
        fn set_rotation(&mut self, value: Quat) {
            self.rotation = value;
        }
        fn sprite_color(&self) -> Option<Color> {
            Some(self.color)
        }
        fn set_sprite_color(&mut self, value: Color) {
            self.color = value;
        }
        fn alpha(&self) -> Option<f32> {
            Some(self.alpha)
        }
        fn set_alpha(&mut self, value: f32) {
            self.alpha = value;
        }
    }

    #[test]
    fn test_binding_kind() {
        assert_eq!(PropertyBinding::Alpha(0.0).kind(), PropertyKind::Alpha);
        assert_eq!(
            PropertyBinding::EulerAngles(Vec3::ZERO).kind(),
            PropertyKind::EulerAngles
        );
        assert_eq!(
            PropertyBinding::SizeDelta(Vec2::ONE).kind(),
            PropertyKind::SizeDelta
        );
    }

    #[test]
    fn test_capture_and_apply() {
        let mut sprite = Sprite {
            position: Vec3::new(0.0, 10.0, 0.0),
            ..Default::default()
        };

        let track = PropertyBinding::Position(Vec3::new(4.0, 10.0, 0.0))
            .capture(&sprite)
            .expect("sprite has a position");
        assert_eq!(track.kind(), PropertyKind::Position);

        track.apply(&mut sprite, 0.5);
        assert_eq!(sprite.position, Vec3::new(2.0, 10.0, 0.0));

        track.apply(&mut sprite, 1.0);
        assert_eq!(sprite.position, Vec3::new(4.0, 10.0, 0.0));
    }

    #[test]
    fn test_capture_missing_property() {
        let sprite = Sprite::default();
        assert!(PropertyBinding::TextColor(Color::RED)
            .capture(&sprite)
            .is_none());
        assert!(PropertyBinding::LocalScale(Vec3::ONE)
            .capture(&sprite)
            .is_none());
    }

    #[test]
    fn test_swap_reverses_direction() {
        let mut sprite = Sprite {
            alpha: 1.0,
            ..Default::default()
        };

        let mut track = PropertyBinding::Alpha(0.0).capture(&sprite).unwrap();
        track.apply(&mut sprite, 1.0);
        assert_eq!(sprite.alpha, 0.0);

        track.swap();
        track.apply(&mut sprite, 0.25);
        assert_eq!(sprite.alpha, 0.25);
        track.apply(&mut sprite, 1.0);
        assert_eq!(sprite.alpha, 1.0);
    }

    #[test]
    fn test_euler_angles_drive_rotation() {
        let mut sprite = Sprite::default();

        let track = PropertyBinding::EulerAngles(Vec3::new(0.0, 90.0, 0.0))
            .capture(&sprite)
            .unwrap();
        track.apply(&mut sprite, 1.0);

        let expected = Quat::from_axis_angle(Vec3::UP, std::f32::consts::FRAC_PI_2);
        assert!(sprite.rotation.angle_between(expected) < 1e-4);

        track.apply(&mut sprite, 0.5);
        let halfway = Quat::from_axis_angle(Vec3::UP, std::f32::consts::FRAC_PI_4);
        assert!(sprite.rotation.angle_between(halfway) < 1e-4);
    }

    #[test]
    fn test_bindings_from_toml() {
        #[derive(Deserialize)]
        struct Preset {
            bindings: Vec<PropertyBinding>,
        }

        let preset: Preset = toml::from_str(
            r#"bindings = [{ alpha = 0.5 }, { anchored_position = { x = 10.0, y = -4.0 } }]"#,
        )
        .unwrap();

        assert_eq!(
            preset.bindings,
            vec![
                PropertyBinding::Alpha(0.5),
                PropertyBinding::AnchoredPosition(Vec2::new(10.0, -4.0)),
            ]
        );
    }

    #[test]
    fn test_color_track_clamps_overshoot() {
        let mut sprite = Sprite {
            color: Color::BLACK,
            ..Default::default()
        };

        let track = PropertyBinding::SpriteColor(Color::WHITE)
            .capture(&sprite)
            .unwrap();
        track.apply(&mut sprite, 1.3);
        assert_eq!(sprite.color, Color::WHITE);
    }
}
