//! Earshot Core - DSP primitives shared by the analysis and spatial crates
//!
//! This crate provides the small numeric building blocks that both earshot
//! pipelines are assembled from. Everything here is a pure function of its
//! inputs or a tiny stateful filter.
//!
//! # Filters
//!
//! - [`FirstOrderCoefficients`] - Normalized one-pole/one-zero IIR coefficients
//! - [`FirstOrderFilter`] - Direct Form I realization of those coefficients
//! - [`fir_filter`] - Finite impulse response filtering
//!
//! # Buffers
//!
//! - [`StereoSamples`] - Left/right channel pair used for rendered output
//!
//! # Utilities
//!
//! - Level conversions: [`linear_to_db`], [`level_db`]
//! - Pitch intervals: [`cents`], [`semitones`]
//! - Buffer helpers: [`peak_abs`], [`normalize_peak`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! earshot-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use earshot_core::{FirstOrderCoefficients, FirstOrderFilter};
//!
//! // A pure gain of 0.5 expressed as a first-order section
//! let coeffs = FirstOrderCoefficients::new(0.5, 0.0, 1.0, 0.0);
//! let mut filter = FirstOrderFilter::new(coeffs);
//! assert_eq!(filter.process(1.0), 0.5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod fir;
pub mod first_order;
pub mod math;
pub mod stereo;

pub use fir::fir_filter;
pub use first_order::{FirstOrderCoefficients, FirstOrderFilter};
pub use math::{
    cents, flush_denormal, level_db, linear_to_db, normalize_peak, peak_abs,
    semitones,
};
pub use stereo::StereoSamples;
