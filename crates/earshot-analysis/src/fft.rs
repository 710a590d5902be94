//! Real-signal FFT and analysis windows.

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Analysis window applied before the transform.
///
/// Every window here is a generalized cosine sum
/// `w[i] = a0 - a1 cos(x) + a2 cos(2x) - a3 cos(3x)` with `x = 2 pi i / n`
/// (periodic form), so they differ only in their coefficient sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// No shaping. The harmonic analyzer's default.
    #[default]
    Rectangular,
    /// Raised cosine.
    Hann,
    /// Hamming, with a non-zero edge.
    Hamming,
    /// Classic three-term Blackman.
    Blackman,
    /// Four-term Blackman-Harris, lowest sidelobes of the set.
    BlackmanHarris,
}

impl Window {
    /// All windows, in the order listed in help text.
    pub const ALL: [Window; 5] = [
        Window::Rectangular,
        Window::Hann,
        Window::Hamming,
        Window::Blackman,
        Window::BlackmanHarris,
    ];

    /// Name accepted by [`Window::from_str`] and stored in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Window::Rectangular => "rectangular",
            Window::Hann => "hann",
            Window::Hamming => "hamming",
            Window::Blackman => "blackman",
            Window::BlackmanHarris => "blackman-harris",
        }
    }

    fn cosine_terms(&self) -> [f32; 4] {
        match self {
            Window::Rectangular => [1.0, 0.0, 0.0, 0.0],
            Window::Hann => [0.5, 0.5, 0.0, 0.0],
            Window::Hamming => [0.54, 0.46, 0.0, 0.0],
            Window::Blackman => [0.42, 0.5, 0.08, 0.0],
            Window::BlackmanHarris => [0.35875, 0.48829, 0.14128, 0.01168],
        }
    }

    /// Weight of sample `i` in a frame of `n`.
    pub fn weight(&self, i: usize, n: usize) -> f32 {
        let [a0, a1, a2, a3] = self.cosine_terms();
        if n == 0 || (a1 == 0.0 && a2 == 0.0 && a3 == 0.0) {
            return a0;
        }
        let x = TAU * i as f32 / n as f32;
        a0 - a1 * x.cos() + a2 * (2.0 * x).cos() - a3 * (3.0 * x).cos()
    }

    /// Multiply `frame` by the window in place.
    pub fn apply(&self, frame: &mut [f32]) {
        if *self == Window::Rectangular {
            return;
        }
        let n = frame.len();
        for (i, x) in frame.iter_mut().enumerate() {
            *x *= self.weight(i, n);
        }
    }

}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A window name that matches none of [`Window::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown window '{0}' (expected one of: {names})", names = window_names())]
pub struct UnknownWindow(pub String);

/// Comma-separated names of [`Window::ALL`].
pub fn window_names() -> String {
    Window::ALL.map(|w| w.name()).join(", ")
}

impl FromStr for Window {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "rectangular" | "rect" | "none" => Ok(Window::Rectangular),
            "hann" | "hanning" => Ok(Window::Hann),
            "hamming" => Ok(Window::Hamming),
            "blackman" => Ok(Window::Blackman),
            "blackman-harris" | "blackmanharris" => Ok(Window::BlackmanHarris),
            _ => Err(UnknownWindow(s.to_string())),
        }
    }
}

/// Planned transform pair for one frame length.
///
/// Planning is the expensive part, so an analyzer keeps one of these and
/// reuses it for every file.
pub struct Fft {
    forward: Arc<dyn rustfft::Fft<f32>>,
    inverse: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Plan forward and inverse transforms of length `size`.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        Self {
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
            size,
        }
    }

    /// Frame length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative frequency bins, `size / 2 + 1`.
    pub fn bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Transform the first `size` samples of `signal`.
    ///
    /// Shorter input is zero-padded. Returns bins `0..=size/2` (DC through
    /// Nyquist); the mirrored half of a real signal's spectrum is dropped.
    pub fn forward(&self, signal: &[f32]) -> Vec<Complex<f32>> {
        let mut frame = vec![Complex::<f32>::default(); self.size];
        for (slot, &x) in frame.iter_mut().zip(signal) {
            slot.re = x;
        }
        self.forward.process(&mut frame);
        frame.truncate(self.bins());
        frame
    }

    /// Real signal of `size` samples whose half spectrum is `bins`.
    ///
    /// Missing bins are treated as zero. The upper half is filled with the
    /// conjugate mirror, which keeps the output real for odd sizes too.
    pub fn inverse(&self, bins: &[Complex<f32>]) -> Vec<f32> {
        let n = self.size;
        let mut frame = vec![Complex::<f32>::default(); n];
        for (k, &bin) in bins.iter().take(self.bins().min(n)).enumerate() {
            frame[k] = bin;
            if k > 0 && n - k > n / 2 {
                frame[n - k] = bin.conj();
            }
        }
        self.inverse.process(&mut frame);

        let scale = (n as f32).recip();
        frame.into_iter().map(|c| c.re * scale).collect()
    }
}
