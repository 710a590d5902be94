//! Frequency-response tables: analog shelf vs its discrete design.

use crate::head::{Ear, HeadModel};
use crate::shelf::{EarCoefficients, ShelfParameters, analog_magnitude_db};
use earshot_core::linear_to_db;

/// `points` frequencies spaced evenly on a log axis from `start` to `stop`.
///
/// Returns an empty grid for zero points and `[start]` for one point.
pub fn log_spaced(start: f32, stop: f32, points: usize) -> Vec<f32> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let (lo, hi) = (start.ln(), stop.ln());
            let step = (hi - lo) / (points - 1) as f32;
            (0..points).map(|i| (lo + step * i as f32).exp()).collect()
        }
    }
}

/// Magnitudes at one frequency, all in dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    /// Frequency in Hz.
    pub frequency_hz: f32,
    /// Analog left-ear magnitude.
    pub analog_left_db: f32,
    /// Analog right-ear magnitude.
    pub analog_right_db: f32,
    /// Digital left-ear magnitude.
    pub digital_left_db: f32,
    /// Digital right-ear magnitude.
    pub digital_right_db: f32,
}

/// Response of both ears for one source direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTable {
    /// Source azimuth in degrees.
    pub angle_deg: f32,
    /// One row per grid frequency.
    pub points: Vec<ResponsePoint>,
}

impl ResponseTable {
    /// Evaluate analog and digital magnitudes at `frequencies`.
    pub fn compute(model: &HeadModel, angle_deg: f32, frequencies: &[f32]) -> Self {
        let shelf = ShelfParameters::for_angle(model, angle_deg);
        let coeffs = EarCoefficients::from_parameters(&shelf, model.sample_rate());
        let fs = model.sample_rate();

        let points = frequencies
            .iter()
            .map(|&f| ResponsePoint {
                frequency_hz: f,
                analog_left_db: analog_magnitude_db(shelf.alpha(Ear::Left), shelf.beta, f),
                analog_right_db: analog_magnitude_db(shelf.alpha(Ear::Right), shelf.beta, f),
                digital_left_db: linear_to_db(coeffs.left.magnitude_at(f, fs)),
                digital_right_db: linear_to_db(coeffs.right.magnitude_at(f, fs)),
            })
            .collect();

        Self { angle_deg, points }
    }

    /// Default grid: `points` log-spaced frequencies from 20 Hz to Nyquist.
    pub fn audio_band(model: &HeadModel, angle_deg: f32, points: usize) -> Self {
        let grid = log_spaced(20.0, model.sample_rate() / 2.0, points);
        Self::compute(model, angle_deg, &grid)
    }

    /// Largest analog/digital difference over the grid and both ears, in dB.
    pub fn max_deviation_db(&self) -> f32 {
        self.points
            .iter()
            .map(|p| {
                (p.analog_left_db - p.digital_left_db)
                    .abs()
                    .max((p.analog_right_db - p.digital_right_db).abs())
            })
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_spaced_endpoints() {
        let grid = log_spaced(20.0, 20000.0, 4);
        assert_eq!(grid.len(), 4);
        assert!((grid[0] - 20.0).abs() < 1e-3);
        assert!((grid[1] - 200.0).abs() < 0.05);
        assert!((grid[3] - 20000.0).abs() < 1.0);
        assert!(log_spaced(1.0, 2.0, 0).is_empty());
        assert_eq!(log_spaced(5.0, 2.0, 1), vec![5.0]);
    }

    #[test]
    fn test_front_is_flat() {
        let table = ResponseTable::audio_band(&HeadModel::default(), 0.0, 32);
        for p in &table.points {
            assert!(p.analog_left_db.abs() < 1e-4);
            assert!(p.digital_right_db.abs() < 1e-4);
        }
    }

    #[test]
    fn test_low_band_agrees() {
        let head = HeadModel::default();
        let grid = log_spaced(20.0, head.corner_hz(), 16);
        let table = ResponseTable::compute(&head, 90.0, &grid);
        assert!(table.max_deviation_db() < 0.5, "{}", table.max_deviation_db());
    }

    #[test]
    fn test_shadowed_ear_falls_off() {
        let table = ResponseTable::audio_band(&HeadModel::default(), 60.0, 64);
        let last = table.points.last().unwrap();
        assert!(last.analog_left_db < -10.0);
        assert!(last.analog_right_db > 4.0);
    }
}
