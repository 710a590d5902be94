//! Property-based tests for the spherical-head model.
//!
//! Delay monotonicity and mirroring, shelf gains at the band edges, and
//! HRIR shape, over randomized angles and head geometries.

use earshot_spatial::{
    Ear, EarCoefficients, HeadModel, Hrir, IIR_RESPONSE_LEN, ShelfParameters, delay_samples,
    interaural_delay,
};
use proptest::prelude::*;

fn head() -> impl Strategy<Value = HeadModel> {
    (0.05f32..0.15, 300.0f32..360.0, prop::sample::select(vec![22050.0f32, 44100.0, 48000.0]))
        .prop_map(|(r, c, fs)| HeadModel::new(r, c, fs).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Delay never decreases as the source moves from front to back on the right.
    #[test]
    fn itd_non_decreasing_on_right(model in head(), a in 0u16..180) {
        let lo = delay_samples(&model, f32::from(a));
        let hi = delay_samples(&model, f32::from(a + 1));
        prop_assert!(hi >= lo, "{} deg: {} > {} deg: {}", a, lo, a + 1, hi);
    }

    /// A source at 360 - a is the left/right mirror of a source at a.
    #[test]
    fn itd_mirrors_left_hemisphere(model in head(), a in 1u16..180) {
        let right = interaural_delay(&model, f32::from(a));
        let left = interaural_delay(&model, 360.0 - f32::from(a));
        prop_assert_eq!(&right.left, &left.right);
        prop_assert_eq!(&right.right, &left.left);
    }

    /// Exactly one impulse per ear, and one of them at sample 0.
    #[test]
    fn itd_shape(model in head(), angle in -720.0f32..720.0) {
        let itd = interaural_delay(&model, angle);
        prop_assert_eq!(itd.left.len(), itd.right.len());
        prop_assert_eq!(itd.left.len(), itd.delay_samples() + 1);
        prop_assert_eq!(itd.left.iter().filter(|&&x| x == 1.0).count(), 1);
        prop_assert_eq!(itd.right.iter().filter(|&&x| x == 1.0).count(), 1);
        prop_assert!(itd.left[0] == 1.0 || itd.right[0] == 1.0);
    }

    /// Unity gain at DC, alpha at Nyquist, pole inside the unit circle.
    #[test]
    fn shelf_band_edges(model in head(), angle in -180.0f32..180.0) {
        let params = ShelfParameters::for_angle(&model, angle);
        let coeffs = EarCoefficients::for_angle(&model, angle);
        for ear in [Ear::Left, Ear::Right] {
            let c = coeffs.ear(ear);
            prop_assert!(c.is_stable());
            prop_assert!((c.dc_gain() - 1.0).abs() < 1e-4);
            prop_assert!((c.nyquist_gain() - params.alpha(ear)).abs() < 1e-4);
        }
        prop_assert!((params.alpha_left + params.alpha_right - 2.0).abs() < 1e-5);
    }

    /// Both kernels have equal length: the truncated response plus the delay.
    #[test]
    fn hrir_lengths(model in head(), angle in -360.0f32..360.0) {
        let hrir = Hrir::generate(&model, angle);
        prop_assert_eq!(hrir.left.len(), hrir.right.len());
        prop_assert_eq!(hrir.len(), IIR_RESPONSE_LEN + hrir.itd.delay_samples());
    }

    /// Rendering preserves the input length and yields finite samples.
    #[test]
    fn hrir_apply_finite(
        angle in -180.0f32..180.0,
        input in prop::collection::vec(-1.0f32..=1.0, 0..600),
    ) {
        let out = Hrir::generate(&HeadModel::default(), angle).apply(&input);
        prop_assert_eq!(out.len(), input.len());
        prop_assert!(out.left.iter().chain(&out.right).all(|x| x.is_finite()));
    }
}
