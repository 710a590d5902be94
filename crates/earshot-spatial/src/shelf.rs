//! Head-shadow shelving filter.
//!
//! Each ear is modelled by the first-order analog section
//!
//! ```text
//!          alpha * s + beta
//! H(s) = ----------------,   beta = 2c / r
//!             s + beta
//! ```
//!
//! with `alpha_left = 1 - sin(theta)` and `alpha_right = 1 + sin(theta)`.
//! The gain is 1 at DC and tends to `alpha` at high frequencies: the ear
//! facing the source gets up to +6 dB of treble, the shadowed ear loses it.
//!
//! ## Discretization
//!
//! Bilinear transform prewarped at the corner frequency,
//! `s = K (1 - z^-1) / (1 + z^-1)` with `K = beta / tan(beta / (2 fs))`:
//!
//! ```text
//! b0 = (alpha K + beta) / (K + beta)
//! b1 = (beta - alpha K) / (K + beta)
//! a1 = (beta - K) / (K + beta)
//! ```
//!
//! The digital filter has unity DC gain, gain `alpha` at Nyquist, and matches
//! the analog magnitude exactly at `beta` rad/s. When the corner is so high
//! that `beta / (2 fs)` reaches `pi/2`, the prewarp angle is clamped to
//! [`MAX_PREWARP_ANGLE`].

use crate::head::{Ear, HeadModel};
use core::f32::consts::{PI, TAU};
use earshot_core::{FirstOrderCoefficients, linear_to_db};

/// Upper bound on the prewarp angle `beta / (2 fs)`.
pub const MAX_PREWARP_ANGLE: f32 = 0.49 * PI;

/// Analog shelf parameters for one source direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfParameters {
    /// High-frequency gain of the left ear.
    pub alpha_left: f32,
    /// High-frequency gain of the right ear.
    pub alpha_right: f32,
    /// Corner frequency in rad/s.
    pub beta: f32,
}

impl ShelfParameters {
    /// Parameters for a source at `angle_deg`.
    pub fn for_angle(model: &HeadModel, angle_deg: f32) -> Self {
        let s = angle_deg.to_radians().sin();
        let s = if s.is_finite() { s } else { 0.0 };
        Self {
            alpha_left: 1.0 - s,
            alpha_right: 1.0 + s,
            beta: model.corner_rad_per_sec(),
        }
    }

    /// High-frequency gain for `ear`.
    pub fn alpha(&self, ear: Ear) -> f32 {
        match ear {
            Ear::Left => self.alpha_left,
            Ear::Right => self.alpha_right,
        }
    }

    /// Analog magnitude for `ear` at `freq_hz`.
    pub fn analog_magnitude(&self, ear: Ear, freq_hz: f32) -> f32 {
        analog_magnitude(self.alpha(ear), self.beta, freq_hz)
    }
}

/// `|H(j w)|` of the analog shelf at `freq_hz`.
pub fn analog_magnitude(alpha: f32, beta: f32, freq_hz: f32) -> f32 {
    let omega = TAU * freq_hz;
    let num = (alpha * omega).hypot(beta);
    let den = omega.hypot(beta);
    num / den
}

/// Analog shelf magnitude in dB, clamped at -200 dB.
pub fn analog_magnitude_db(alpha: f32, beta: f32, freq_hz: f32) -> f32 {
    linear_to_db(analog_magnitude(alpha, beta, freq_hz))
}

/// Prewarped bilinear design of the shelf.
pub fn design_shelf(alpha: f32, beta: f32, sample_rate: f32) -> FirstOrderCoefficients {
    let warp = (beta / (2.0 * sample_rate)).min(MAX_PREWARP_ANGLE);
    let k = beta / warp.tan();

    FirstOrderCoefficients::new(alpha * k + beta, beta - alpha * k, k + beta, beta - k)
}

/// Discrete shelf coefficients for both ears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarCoefficients {
    /// Left-ear filter.
    pub left: FirstOrderCoefficients,
    /// Right-ear filter.
    pub right: FirstOrderCoefficients,
}

impl EarCoefficients {
    /// Design both ears for a source at `angle_deg`.
    pub fn for_angle(model: &HeadModel, angle_deg: f32) -> Self {
        let params = ShelfParameters::for_angle(model, angle_deg);
        Self::from_parameters(&params, model.sample_rate())
    }

    /// Design both ears from explicit shelf parameters.
    pub fn from_parameters(params: &ShelfParameters, sample_rate: f32) -> Self {
        Self {
            left: design_shelf(params.alpha_left, params.beta, sample_rate),
            right: design_shelf(params.alpha_right, params.beta, sample_rate),
        }
    }

    /// Coefficients for `ear`.
    pub fn ear(&self, ear: Ear) -> FirstOrderCoefficients {
        match ear {
            Ear::Left => self.left,
            Ear::Right => self.right,
        }
    }
}
