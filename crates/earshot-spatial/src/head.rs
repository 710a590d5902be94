//! Spherical head model and azimuth conventions.
//!
//! Azimuth is measured in degrees from straight ahead. Angles in `[0, 180]`
//! place the source on the listener's right, `(180, 360)` on the left, and
//! any other value is first wrapped into `[0, 360)`. So -90 and 270 both
//! mean hard left.

use crate::error::{Result, SpatialError};
use core::f32::consts::PI;

/// Default head radius in metres.
pub const DEFAULT_HEAD_RADIUS: f32 = 0.09;
/// Default speed of sound in m/s.
pub const DEFAULT_SPEED_OF_SOUND: f32 = 343.0;
/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// One ear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ear {
    /// Left ear.
    Left,
    /// Right ear.
    Right,
}

impl Ear {
    /// The other ear.
    pub fn opposite(self) -> Self {
        match self {
            Ear::Left => Ear::Right,
            Ear::Right => Ear::Left,
        }
    }
}

/// Rigid spherical head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadModel {
    radius: f32,
    speed_of_sound: f32,
    sample_rate: f32,
}

impl Default for HeadModel {
    fn default() -> Self {
        Self {
            radius: DEFAULT_HEAD_RADIUS,
            speed_of_sound: DEFAULT_SPEED_OF_SOUND,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl HeadModel {
    /// Build a head model, rejecting non-positive or non-finite parameters.
    pub fn new(radius: f32, speed_of_sound: f32, sample_rate: f32) -> Result<Self> {
        for (name, value) in [
            ("radius", radius),
            ("speed_of_sound", speed_of_sound),
            ("sample_rate", sample_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpatialError::InvalidHeadModel { name, value });
            }
        }
        Ok(Self {
            radius,
            speed_of_sound,
            sample_rate,
        })
    }

    /// Head radius in metres.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Speed of sound in m/s.
    pub fn speed_of_sound(&self) -> f32 {
        self.speed_of_sound
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Head-shadow corner `beta = 2c / r`, in rad/s.
    pub fn corner_rad_per_sec(&self) -> f32 {
        2.0 * self.speed_of_sound / self.radius
    }

    /// Head-shadow corner in Hz.
    pub fn corner_hz(&self) -> f32 {
        self.corner_rad_per_sec() / (2.0 * PI)
    }
}

/// Wrap an azimuth into `[0, 360)`. Non-finite input maps to 0.
pub fn wrap_degrees(angle_deg: f32) -> f32 {
    if !angle_deg.is_finite() {
        return 0.0;
    }
    let wrapped = angle_deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Ear nearest to a source at `angle_deg` and the source's lateral angle
/// from the front, in `[0, 180]` degrees.
///
/// ```rust
/// use earshot_spatial::{Ear, lateral_angle};
///
/// assert_eq!(lateral_angle(90.0), (Ear::Right, 90.0));
/// assert_eq!(lateral_angle(-90.0), (Ear::Left, 90.0));
/// ```
pub fn lateral_angle(angle_deg: f32) -> (Ear, f32) {
    let wrapped = wrap_degrees(angle_deg);
    if wrapped <= 180.0 {
        (Ear::Right, wrapped)
    } else {
        (Ear::Left, 360.0 - wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let head = HeadModel::default();
        assert_eq!(head.radius(), 0.09);
        assert_eq!(head.speed_of_sound(), 343.0);
        assert_eq!(head.sample_rate(), 44100.0);
        assert!((head.corner_rad_per_sec() - 7622.22).abs() < 0.01);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            HeadModel::new(0.0, 343.0, 44100.0),
            Err(SpatialError::InvalidHeadModel {
                name: "radius",
                value: 0.0
            })
        );
        assert!(HeadModel::new(0.09, -1.0, 44100.0).is_err());
        assert!(HeadModel::new(0.09, 343.0, f32::NAN).is_err());
        assert!(HeadModel::new(0.1, 340.0, 48000.0).is_ok());
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(450.0), 90.0);
        assert_eq!(wrap_degrees(f32::INFINITY), 0.0);
        let tiny = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_lateral_angle_sides() {
        assert_eq!(lateral_angle(0.0), (Ear::Right, 0.0));
        assert_eq!(lateral_angle(180.0), (Ear::Right, 180.0));
        assert_eq!(lateral_angle(270.0), (Ear::Left, 90.0));
        assert_eq!(lateral_angle(350.0), (Ear::Left, 10.0));
        assert_eq!(Ear::Left.opposite(), Ear::Right);
    }
}
