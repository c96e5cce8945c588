//! Session configuration for the twopole filter harness.
//!
//! Holds what a host supplies at session start (sample rate, block size,
//! kernel choice) together with the initial live controls, and checks them
//! before any of it reaches the kernels, which never validate on their own.
//!
//! # Features
//!
//! - **Sessions**: Load and save [`SessionConfig`] as TOML
//! - **Validation**: Control ranges ([`NOTE_RANGE`], [`Q_RANGE`],
//!   [`GAIN_DB_RANGE`]) and the biquad's `q > 0` and below-Nyquist
//!   preconditions
//! - **Construction**: [`SessionConfig::build_processor`] returns a prepared
//!   [`FilterProcessor`](twopole_core::FilterProcessor)
//!
//! # Example
//!
//! ```rust,no_run
//! use twopole_config::{ControlSettings, KernelKind, SessionConfig};
//!
//! let session = SessionConfig::new("Lowpass sweep")
//!     .with_kernel(KernelKind::Biquad)
//!     .with_controls(ControlSettings { note: 72.0, q: 0.707, gain_db: -12.0 });
//! session.save("sessions/sweep.toml").unwrap();
//!
//! let mut processor = SessionConfig::load("sessions/sweep.toml")
//!     .unwrap()
//!     .build_processor()
//!     .unwrap();
//! let mut left = [0.0_f32; 512];
//! let mut right = [0.0_f32; 512];
//! processor.process_block(&mut left, &mut right);
//! ```

mod error;
mod session;

/// Parameter ranges and session validation.
pub mod validation;

pub use error::ConfigError;
pub use session::{ControlSettings, KernelKind, SessionConfig};
pub use validation::{
    GAIN_DB_RANGE, NOTE_RANGE, ParamRange, Q_RANGE, ValidationError, ValidationResult,
    validate_controls, validate_session,
};
