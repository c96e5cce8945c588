//! Conversions from host control units to the physical units the kernels use.
//!
//! All functions are allocation-free, `#[inline]`, and built on `libm` so they
//! stay available without `std`.
//!
//! # Pitch
//!
//! - [`note_to_frequency`] - MIDI-style note number to Hz (A4 = note 69 = 440 Hz)
//! - [`note_to_svf_coefficient`] - Note number to the SVF integrator gain `wct`
//!
//! # Level
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain

use libm::{expf, logf, powf};

/// Reference pitch of note 69 (A4) in Hz.
pub const A4_FREQUENCY: f32 = 440.0;

/// Note number that sounds at [`A4_FREQUENCY`].
pub const A4_NOTE: f32 = 69.0;

/// Divisor the harness applies to the note control to obtain the SVF's
/// normalized cutoff coefficient.
pub const SVF_NOTE_SCALE: f32 = 127.0;

/// Convert a note number to frequency in Hz.
///
/// `440 · 2^((note − 69) / 12)`, monotonically increasing in `note`.
/// Fractional notes are allowed.
///
/// # Example
/// ```rust
/// use twopole_core::note_to_frequency;
///
/// assert!((note_to_frequency(69.0) - 440.0).abs() < 1e-4);
/// assert!((note_to_frequency(81.0) - 880.0).abs() < 1e-2);
/// ```
#[inline]
pub fn note_to_frequency(note: f32) -> f32 {
    A4_FREQUENCY * powf(2.0, (note - A4_NOTE) / 12.0)
}

/// Map the note control onto the SVF's per-sample integrator gain.
///
/// The mapping is linear (`note / 127`), so the usable note range 0..127
/// lands in the stable region `wct ∈ (0, 1)`. Values outside it are passed
/// through unchanged.
#[inline]
pub fn note_to_svf_coefficient(note: f32) -> f32 {
    note / SVF_NOTE_SCALE
}

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use twopole_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored there, so silence reports -200 dB
/// instead of negative infinity.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_to_frequency_reference() {
        assert!((note_to_frequency(69.0) - 440.0).abs() < 1e-4);
        assert!((note_to_frequency(57.0) - 220.0).abs() < 1e-3);
        assert!((note_to_frequency(60.0) - 261.6256).abs() < 1e-2);
    }

    #[test]
    fn test_note_to_frequency_monotonic() {
        let mut previous = note_to_frequency(-2.0);
        for i in -1..=129 {
            let f = note_to_frequency(i as f32);
            assert!(f > previous, "not increasing at note {i}: {f} <= {previous}");
            previous = f;
        }
    }

    #[test]
    fn test_note_to_svf_coefficient() {
        assert_eq!(note_to_svf_coefficient(0.0), 0.0);
        assert_eq!(note_to_svf_coefficient(127.0), 1.0);
        assert!((note_to_svf_coefficient(40.0) - 0.31496063).abs() < 1e-6);
    }

    #[test]
    fn test_db_to_linear() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
        assert!((db_to_linear(-40.0) - 0.01).abs() < 1e-6);
        assert!((db_to_linear(-65.0) - 5.623_413e-4).abs() < 1e-8);
    }

    #[test]
    fn test_linear_to_db_inverse() {
        for db in [-65.0, -24.0, -6.0, 0.0, 12.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 1e-3, "{db} dB came back as {back}");
        }
        assert!((linear_to_db(0.0) + 200.0).abs() < 1e-3);
    }
}
