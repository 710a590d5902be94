//! Interaural time difference.
//!
//! The path-length difference around a rigid sphere for a distant source at
//! lateral angle `theta` gives a delay of
//!
//! ```text
//! dt = (r / c) * (theta + sin(theta))
//! ```
//!
//! which is rounded to whole samples. The near ear hears the source at
//! sample 0; the far ear `round(dt * fs)` samples later.

use crate::head::{Ear, HeadModel, lateral_angle};

/// Per-ear delay impulses for one source direction.
///
/// Both sequences have length `far delay + 1`. The near ear has its unit
/// impulse at index 0; the far ear at its delay.
#[derive(Debug, Clone, PartialEq)]
pub struct ItdPair {
    /// Left-ear delay impulse.
    pub left: Vec<f32>,
    /// Right-ear delay impulse.
    pub right: Vec<f32>,
    /// Left-ear delay in samples.
    pub left_delay: usize,
    /// Right-ear delay in samples.
    pub right_delay: usize,
}

impl ItdPair {
    /// Ear that receives the source first.
    pub fn near_ear(&self) -> Ear {
        if self.left_delay < self.right_delay {
            Ear::Left
        } else {
            Ear::Right
        }
    }

    /// Interaural delay in samples.
    pub fn delay_samples(&self) -> usize {
        self.left_delay.abs_diff(self.right_delay)
    }

    /// Delay applied to `ear`, in samples.
    pub fn delay(&self, ear: Ear) -> usize {
        match ear {
            Ear::Left => self.left_delay,
            Ear::Right => self.right_delay,
        }
    }
}

/// Interaural delay in seconds for a lateral angle in radians.
pub fn woodworth_delay_seconds(model: &HeadModel, lateral_rad: f32) -> f32 {
    (model.radius() / model.speed_of_sound()) * (lateral_rad + lateral_rad.sin())
}

/// Interaural delay in whole samples for a source at `angle_deg`.
pub fn delay_samples(model: &HeadModel, angle_deg: f32) -> usize {
    let (_, lateral_deg) = lateral_angle(angle_deg);
    let dt = woodworth_delay_seconds(model, lateral_deg.to_radians());
    (dt.abs() * model.sample_rate()).round() as usize
}

/// Build the per-ear delay impulses for a source at `angle_deg`.
///
/// # Example
/// ```rust
/// use earshot_spatial::{HeadModel, interaural_delay};
///
/// let itd = interaural_delay(&HeadModel::default(), 90.0);
/// assert_eq!(itd.right_delay, 0);
/// assert_eq!(itd.left_delay, 30);
/// assert_eq!(itd.left.len(), 31);
/// ```
pub fn interaural_delay(model: &HeadModel, angle_deg: f32) -> ItdPair {
    let (near, _) = lateral_angle(angle_deg);
    let delay = delay_samples(model, angle_deg);

    let (left_delay, right_delay) = match near {
        Ear::Right => (delay, 0),
        Ear::Left => (0, delay),
    };

    let mut left = vec![0.0; delay + 1];
    let mut right = vec![0.0; delay + 1];
    left[left_delay] = 1.0;
    right[right_delay] = 1.0;

    ItdPair {
        left,
        right,
        left_delay,
        right_delay,
    }
}
