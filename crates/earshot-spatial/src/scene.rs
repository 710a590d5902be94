//! Moving-source rendering.
//!
//! A source steps through a list of azimuths. At each stop a fresh burst of
//! the source signal is rendered through that direction's [`Hrir`] and
//! followed by a short silence. The whole sequence is normalized jointly so
//! the louder ear peaks at 1.0.

use crate::error::{Result, SpatialError};
use crate::head::HeadModel;
use crate::hrir::Hrir;
use earshot_core::StereoSamples;

/// Default azimuth sweep, left to right, in degrees.
pub const DEFAULT_ANGLES: [f32; 7] = [-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0];
/// Default burst duration in seconds.
pub const DEFAULT_BURST_SECS: f32 = 0.25;
/// Default silence between bursts in seconds.
pub const DEFAULT_GAP_SECS: f32 = 0.05;

/// A source hopping through a sequence of directions.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingSource {
    angles: Vec<f32>,
    burst_secs: f32,
    gap_secs: f32,
}

impl Default for MovingSource {
    fn default() -> Self {
        Self {
            angles: DEFAULT_ANGLES.to_vec(),
            burst_secs: DEFAULT_BURST_SECS,
            gap_secs: DEFAULT_GAP_SECS,
        }
    }
}

impl MovingSource {
    /// Create a scene. Needs at least one angle, a positive burst and a
    /// non-negative gap.
    pub fn new(angles: Vec<f32>, burst_secs: f32, gap_secs: f32) -> Result<Self> {
        if angles.is_empty() {
            return Err(SpatialError::InvalidScene("no angles given".into()));
        }
        if !burst_secs.is_finite() || burst_secs <= 0.0 {
            return Err(SpatialError::InvalidScene(format!(
                "burst duration must be positive, got {burst_secs}"
            )));
        }
        if !gap_secs.is_finite() || gap_secs < 0.0 {
            return Err(SpatialError::InvalidScene(format!(
                "gap duration must be non-negative, got {gap_secs}"
            )));
        }
        Ok(Self {
            angles,
            burst_secs,
            gap_secs,
        })
    }

    /// Azimuths visited, in order.
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Burst length in samples at `sample_rate`.
    pub fn burst_len(&self, sample_rate: f32) -> usize {
        (self.burst_secs * sample_rate) as usize
    }

    /// Gap length in samples at `sample_rate`.
    pub fn gap_len(&self, sample_rate: f32) -> usize {
        (self.gap_secs * sample_rate) as usize
    }

    /// Total rendered length in samples.
    pub fn total_len(&self, sample_rate: f32) -> usize {
        self.angles.len() * (self.burst_len(sample_rate) + self.gap_len(sample_rate))
    }

    /// Render the scene.
    ///
    /// `source` is called once per angle with the burst length and must
    /// return that many mono samples (shorter bursts are zero-padded, longer
    /// ones truncated).
    pub fn render<F>(&self, model: &HeadModel, mut source: F) -> StereoSamples
    where
        F: FnMut(usize) -> Vec<f32>,
    {
        let fs = model.sample_rate();
        let burst_len = self.burst_len(fs);
        let gap_len = self.gap_len(fs);

        let mut out = StereoSamples::default();
        for &angle in &self.angles {
            let mut burst = source(burst_len);
            burst.resize(burst_len, 0.0);

            let rendered = Hrir::generate(model, angle).apply(&burst);
            tracing::debug!(angle, samples = burst_len, "rendered burst");

            out.extend(&rendered);
            out.push_silence(gap_len);
        }

        out.normalize();
        out
    }
}

/// Render a mono signal at a fixed azimuth.
pub fn spatialize(model: &HeadModel, angle_deg: f32, signal: &[f32]) -> StereoSamples {
    Hrir::generate(model, angle_deg).apply(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clicks(len: usize) -> Vec<f32> {
        (0..len).map(|i| if i % 50 == 0 { 1.0 } else { 0.0 }).collect()
    }

    #[test]
    fn test_default_scene() {
        let scene = MovingSource::default();
        assert_eq!(scene.angles().len(), 7);
        assert_eq!(scene.burst_len(44100.0), 11025);
        assert_eq!(scene.gap_len(44100.0), 2205);
    }

    #[test]
    fn test_rejects_bad_scene() {
        assert!(MovingSource::new(vec![], 0.25, 0.05).is_err());
        assert!(MovingSource::new(vec![0.0], 0.0, 0.05).is_err());
        assert!(MovingSource::new(vec![0.0], 0.25, -1.0).is_err());
        assert!(MovingSource::new(vec![0.0], 0.25, 0.0).is_ok());
    }

    #[test]
    fn test_render_length_and_peak() {
        let head = HeadModel::default();
        let scene = MovingSource::new(vec![-90.0, 0.0, 90.0], 0.01, 0.005).unwrap();
        let out = scene.render(&head, clicks);

        assert_eq!(out.len(), scene.total_len(44100.0));
        assert!((out.peak() - 1.0).abs() < 1e-6);

        // Gap after the first burst is silent
        let burst = scene.burst_len(44100.0);
        let gap = scene.gap_len(44100.0);
        assert!(out.left[burst..burst + gap].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_short_source_is_padded() {
        let head = HeadModel::default();
        let scene = MovingSource::new(vec![0.0], 0.01, 0.0).unwrap();
        let out = scene.render(&head, |_| vec![1.0]);
        assert_eq!(out.len(), scene.burst_len(44100.0));
    }

    #[test]
    fn test_spatialize_front_is_mono() {
        let out = spatialize(&HeadModel::default(), 0.0, &clicks(200));
        assert_eq!(out.left, out.right);
    }
}
