//! Combined head-related impulse response.
//!
//! Each ear's kernel is the shelf filter's impulse response (truncated to
//! [`IIR_RESPONSE_LEN`] samples) delayed by that ear's interaural delay.
//! Both kernels are zero-padded to the same length, so a mono signal run
//! through them yields a time-aligned stereo pair.

use crate::head::{Ear, HeadModel};
use crate::itd::{ItdPair, interaural_delay};
use crate::shelf::{EarCoefficients, ShelfParameters};
use earshot_core::{StereoSamples, fir_filter};

/// Length of the truncated shelf impulse response, in samples.
pub const IIR_RESPONSE_LEN: usize = 512;

/// Per-ear FIR kernels for one source direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Hrir {
    /// Source azimuth in degrees, as requested.
    pub angle_deg: f32,
    /// Left-ear kernel.
    pub left: Vec<f32>,
    /// Right-ear kernel.
    pub right: Vec<f32>,
    /// Delay impulses the kernels were built from.
    pub itd: ItdPair,
    /// Analog shelf parameters.
    pub shelf: ShelfParameters,
    /// Discrete shelf coefficients.
    pub coefficients: EarCoefficients,
}

impl Hrir {
    /// Build the kernels for a source at `angle_deg`.
    ///
    /// # Example
    /// ```rust
    /// use earshot_spatial::{HeadModel, Hrir, IIR_RESPONSE_LEN};
    ///
    /// let hrir = Hrir::generate(&HeadModel::default(), -90.0);
    /// assert_eq!(hrir.left.len(), hrir.right.len());
    /// assert_eq!(hrir.len(), IIR_RESPONSE_LEN + 30);
    /// ```
    pub fn generate(model: &HeadModel, angle_deg: f32) -> Self {
        let itd = interaural_delay(model, angle_deg);
        let shelf = ShelfParameters::for_angle(model, angle_deg);
        let coefficients = EarCoefficients::from_parameters(&shelf, model.sample_rate());

        let mut left = delayed(
            &coefficients.left.impulse_response(IIR_RESPONSE_LEN),
            itd.left_delay,
        );
        let mut right = delayed(
            &coefficients.right.impulse_response(IIR_RESPONSE_LEN),
            itd.right_delay,
        );

        let len = left.len().max(right.len());
        left.resize(len, 0.0);
        right.resize(len, 0.0);

        tracing::trace!(angle_deg, len, delay = itd.delay_samples(), "generated HRIR");

        Self {
            angle_deg,
            left,
            right,
            itd,
            shelf,
            coefficients,
        }
    }

    /// Kernel length in samples (same for both ears).
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True when the kernels are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Kernel for `ear`.
    pub fn kernel(&self, ear: Ear) -> &[f32] {
        match ear {
            Ear::Left => &self.left,
            Ear::Right => &self.right,
        }
    }

    /// Filter a mono signal through both kernels.
    ///
    /// Each channel has the same length as `signal`.
    pub fn apply(&self, signal: &[f32]) -> StereoSamples {
        StereoSamples::new(
            fir_filter(&self.left, signal),
            fir_filter(&self.right, signal),
        )
    }
}

/// `response` preceded by `delay` zeros.
fn delayed(response: &[f32], delay: usize) -> Vec<f32> {
    let mut out = vec![0.0; delay];
    out.extend_from_slice(response);
    out
}
