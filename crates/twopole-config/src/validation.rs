//! Parameter ranges and session validation.
//!
//! The filter kernels never check their inputs. These are the checks a caller
//! runs before handing controls to a [`FilterProcessor`](twopole_core::FilterProcessor).
//!
//! # Example
//!
//! ```rust
//! use twopole_config::{NOTE_RANGE, Q_RANGE};
//!
//! assert!(NOTE_RANGE.contains(69.0));
//! assert_eq!(Q_RANGE.clamp(9.0), 4.0);
//! ```

use thiserror::Error;
use twopole_core::note_to_frequency;

use crate::session::{ControlSettings, KernelKind, SessionConfig};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate of zero.
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,

    /// Block size of zero.
    #[error("block size must be greater than zero")]
    InvalidBlockSize,

    /// Control value out of range (or not finite).
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Q of zero with the biquad kernel, which divides by it.
    #[error("q must be greater than zero for the biquad kernel")]
    ZeroResonance,

    /// Biquad cutoff at or above Nyquist for the session's sample rate.
    #[error("cutoff {frequency} Hz must be below Nyquist ({nyquist} Hz) for the biquad kernel")]
    CutoffAboveNyquist {
        /// Cutoff derived from the note control.
        frequency: f32,
        /// Half the sample rate.
        nyquist: f32,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Inclusive range and default of one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Default value.
    pub default: f32,
}

impl ParamRange {
    /// Whether `value` is finite and inside `[min, max]`.
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Clamp `value` into `[min, max]`. NaN maps to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Check `value` against the range, naming it `param` in the error.
    pub fn check(&self, param: &str, value: f32) -> ValidationResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                param: param.to_string(),
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Cutoff note control.
pub const NOTE_RANGE: ParamRange = ParamRange {
    min: -2.0,
    max: 129.0,
    default: 40.0,
};

/// Resonance / Q control.
pub const Q_RANGE: ParamRange = ParamRange {
    min: 0.0,
    max: 4.0,
    default: 0.7,
};

/// Output gain control in dB.
pub const GAIN_DB_RANGE: ParamRange = ParamRange {
    min: -65.0,
    max: -1.0,
    default: -65.0,
};

/// Validate controls for the given kernel and sample rate, collecting every
/// failure.
///
/// The biquad additionally needs `q > 0` and a cutoff strictly below Nyquist.
/// The Nyquist check is skipped when `sample_rate` is zero, which
/// [`validate_session`] reports on its own.
pub fn validate_controls(
    controls: &ControlSettings,
    kernel: KernelKind,
    sample_rate: u32,
) -> ValidationResult<()> {
    let mut errors = Vec::new();

    for (param, range, value) in [
        ("note", NOTE_RANGE, controls.note),
        ("q", Q_RANGE, controls.q),
        ("gain_db", GAIN_DB_RANGE, controls.gain_db),
    ] {
        if let Err(e) = range.check(param, value) {
            errors.push(e);
        }
    }

    if kernel == KernelKind::Biquad {
        if controls.q == 0.0 {
            errors.push(ValidationError::ZeroResonance);
        }

        let frequency = note_to_frequency(controls.note);
        let nyquist = sample_rate as f32 / 2.0;
        if sample_rate > 0 && frequency >= nyquist {
            errors.push(ValidationError::CutoffAboveNyquist { frequency, nyquist });
        }
    }

    collect(errors)
}

/// Validate a whole session, collecting every failure.
pub fn validate_session(session: &SessionConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if session.sample_rate == 0 {
        errors.push(ValidationError::InvalidSampleRate);
    }
    if session.block_size == 0 {
        errors.push(ValidationError::InvalidBlockSize);
    }
    match validate_controls(&session.controls, session.kernel, session.sample_rate) {
        Ok(()) => {}
        Err(ValidationError::Multiple(nested)) => errors.extend(nested),
        Err(e) => errors.push(e),
    }

    let result = collect(errors);
    if let Err(ref e) = result {
        tracing::warn!(session = %session.name, error = %e, "session failed validation");
    }
    result
}

fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
