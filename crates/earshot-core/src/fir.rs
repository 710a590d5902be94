//! Finite impulse response filtering.
//!
//! [`fir_filter`] keeps the output the same length as the input: a causal
//! filter that is simply stopped when the input ends. This is how a rendered
//! burst keeps its length when a head-related kernel is applied. O(N·M);
//! kernels here are a few hundred taps at most.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Filter `input` through the FIR `kernel`, output truncated to `input.len()`.
///
/// ```text
/// y[n] = sum_k kernel[k] * input[n - k],   0 <= n < input.len()
/// ```
///
/// # Example
/// ```rust
/// use earshot_core::fir_filter;
///
/// // A one-sample delay
/// let y = fir_filter(&[0.0, 1.0], &[1.0, 2.0, 3.0]);
/// assert_eq!(y, vec![0.0, 1.0, 2.0]);
/// ```
pub fn fir_filter(kernel: &[f32], input: &[f32]) -> Vec<f32> {
    let mut output = Vec::with_capacity(input.len());
    for n in 0..input.len() {
        let taps = kernel.len().min(n + 1);
        let mut acc = 0.0f32;
        for k in 0..taps {
            acc += kernel[k] * input[n - k];
        }
        output.push(acc);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fir_unit_impulse_reproduces_kernel() {
        let kernel = [0.5, 0.25, -0.125];
        let mut impulse = vec![0.0; 6];
        impulse[0] = 1.0;
        let y = fir_filter(&kernel, &impulse);
        assert_eq!(y, vec![0.5, 0.25, -0.125, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn fir_output_matches_input_length() {
        let y = fir_filter(&[1.0; 10], &[1.0, 1.0, 1.0]);
        assert_eq!(y, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_kernel_gives_silence() {
        assert_eq!(fir_filter(&[], &[1.0, 2.0]), vec![0.0, 0.0]);
        assert!(fir_filter(&[1.0], &[]).is_empty());
    }
}
