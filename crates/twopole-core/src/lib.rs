//! Twopole Core - recursive filter kernels for real-time audio
//!
//! Two independent second-order IIR kernels, each advanced one sample at a
//! time with no allocation and no error paths.
//!
//! # Kernels
//!
//! - [`Biquad`] - Direct Form I biquad with an RBJ cookbook lowpass designer
//! - [`StateVariableFilter`] - Two-integrator-loop SVF yielding low, mid and
//!   high outputs simultaneously, built on [`UnitDelay`] registers
//!
//! # Harness
//!
//! - [`FilterProcessor`] - Stereo block driver that reads [`FilterControls`]
//!   every sample and routes the chosen [`Kernel`] to both channels
//!
//! # Utilities
//!
//! - [`note_to_frequency`], [`note_to_svf_coefficient`] - Pitch controls
//! - [`db_to_linear`], [`linear_to_db`] - Level controls
//!
//! # Failure model
//!
//! Nothing in this crate returns an error. Invalid coefficients (cutoff above
//! Nyquist, `q == 0`, SVF gains outside the stable region) degrade the output
//! silently: it aliases, diverges, or turns to NaN. Callers validate before
//! they design.
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build without the standard library:
//!
//! ```toml
//! [dependencies]
//! twopole-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use twopole_core::{Biquad, StateVariableFilter, note_to_frequency};
//!
//! let mut biquad = Biquad::new();
//! biquad.design_lowpass(note_to_frequency(60.0), 0.707, 48000.0);
//! let y = biquad.process(1.0);
//!
//! let mut svf = StateVariableFilter::new();
//! svf.step(y, 0.3, 0.7);
//! let (low, mid, high) = (svf.low(), svf.mid(), svf.high());
//! # let _ = (low, mid, high);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod math;
pub mod processor;
pub mod svf;
pub mod unit_delay;

pub use biquad::{Biquad, BiquadCoefficients};
pub use math::{
    A4_FREQUENCY, A4_NOTE, SVF_NOTE_SCALE, db_to_linear, linear_to_db, note_to_frequency,
    note_to_svf_coefficient,
};
pub use processor::{FilterControls, FilterProcessor, Kernel};
pub use svf::{StateVariableFilter, SvfOutput};
pub use unit_delay::UnitDelay;
