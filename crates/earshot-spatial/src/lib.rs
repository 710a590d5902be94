//! Earshot Spatial - spherical-head binaural rendering
//!
//! A lightweight HRTF built from two physical effects of a rigid sphere:
//!
//! - [`itd`] - Interaural time difference (Woodworth path-length model)
//! - [`shelf`] - Head-shadow shelving filter, analog prototype and prewarped
//!   bilinear design
//! - [`hrir`] - Both effects combined into per-ear FIR kernels
//! - [`response`] - Analog vs digital magnitude tables
//! - [`scene`] - Rendering a source that hops between directions
//!
//! ## Azimuth convention
//!
//! Degrees, 0 straight ahead, positive to the right. Angles are wrapped into
//! `[0, 360)`: `[0, 180]` is the right hemisphere, `(180, 360)` the left.
//!
//! ## Example
//!
//! ```rust
//! use earshot_spatial::{HeadModel, Hrir};
//!
//! let head = HeadModel::default();
//! let hrir = Hrir::generate(&head, 30.0);
//! let stereo = hrir.apply(&[1.0, 0.0, 0.0, 0.0]);
//! assert_eq!(stereo.len(), 4);
//! ```

pub mod error;
pub mod head;
pub mod hrir;
pub mod itd;
pub mod response;
pub mod scene;
pub mod shelf;

pub use error::{Result, SpatialError};
pub use head::{
    DEFAULT_HEAD_RADIUS, DEFAULT_SAMPLE_RATE, DEFAULT_SPEED_OF_SOUND, Ear, HeadModel,
    lateral_angle, wrap_degrees,
};
pub use hrir::{Hrir, IIR_RESPONSE_LEN};
pub use itd::{ItdPair, delay_samples, interaural_delay, woodworth_delay_seconds};
pub use response::{ResponsePoint, ResponseTable, log_spaced};
pub use scene::{
    DEFAULT_ANGLES, DEFAULT_BURST_SECS, DEFAULT_GAP_SECS, MovingSource, spatialize,
};
pub use shelf::{
    EarCoefficients, MAX_PREWARP_ANGLE, ShelfParameters, analog_magnitude, analog_magnitude_db,
    design_shelf,
};
