//! Stereo audio buffer for rendered output.
//!
//! [`StereoSamples`] holds a pair of `Vec<f32>` buffers (left/right channels)
//! and provides the few operations the renderers need: appending, padding
//! with silence, joint normalization and interleaving for WAV output.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::math::peak_abs;

/// A pair of stereo audio buffers (left and right channels).
///
/// Each channel is a `Vec<f32>` of equal length.
///
/// # Example
///
/// ```rust
/// use earshot_core::StereoSamples;
///
/// let samples = StereoSamples::new(vec![1.0; 4], vec![0.5; 4]);
/// assert_eq!(samples.len(), 4);
/// assert_eq!(samples.to_interleaved()[..4], [1.0, 0.5, 1.0, 0.5]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Create new stereo samples from left and right channels.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "Channels must have same length");
        Self { left, right }
    }

    /// Get the number of samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Check if the buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Append another stereo buffer to the end of this one.
    pub fn extend(&mut self, other: &StereoSamples) {
        self.left.extend_from_slice(&other.left);
        self.right.extend_from_slice(&other.right);
    }

    /// Append `len` samples of silence to both channels.
    pub fn push_silence(&mut self, len: usize) {
        let new_len = self.left.len() + len;
        self.left.resize(new_len, 0.0);
        self.right.resize(new_len, 0.0);
    }

    /// Largest absolute value across both channels.
    pub fn peak(&self) -> f32 {
        peak_abs(&self.left).max(peak_abs(&self.right))
    }

    /// Scale both channels by the same gain so the joint peak is 1.0.
    ///
    /// Keeps the interaural level difference intact. Returns the applied gain
    /// (1.0 for silence).
    pub fn normalize(&mut self) -> f32 {
        let peak = self.peak();
        if peak <= 0.0 {
            return 1.0;
        }
        let gain = 1.0 / peak;
        for s in self.left.iter_mut().chain(self.right.iter_mut()) {
            *s *= gain;
        }
        gain
    }

    /// Frames laid out `L R L R ...`, the order WAV files store them in.
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(&l, &r)| [l, r])
            .collect()
    }
}
