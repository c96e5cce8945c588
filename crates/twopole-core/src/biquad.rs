//! Biquad (bi-quadratic) filter section.
//!
//! A single second-order IIR stage in Direct Form I, with a lowpass designer
//! based on the RBJ Audio EQ Cookbook.
//!
//! Coefficients are always stored normalized so the implicit `a0` is 1. The
//! designer divides by `a0` exactly once per update.
//!
//! # Preconditions
//!
//! Nothing is validated here. `sample_rate > 0`, `f0` in `(0, sample_rate/2)`
//! and `q > 0` are the caller's responsibility: outside that region the filter
//! aliases, becomes unstable, or (for `q == 0`) fills with NaN, and the
//! history stays poisoned until [`Biquad::clear`].

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// One set of biquad coefficients.
///
/// `a0` is kept explicitly so that an unnormalized cookbook set can be carried
/// around and inspected before it reaches a [`Biquad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficient for `x[n]`.
    pub b0: f32,
    /// Feedforward coefficient for `x[n-1]`.
    pub b1: f32,
    /// Feedforward coefficient for `x[n-2]`.
    pub b2: f32,
    /// Leading feedback coefficient.
    pub a0: f32,
    /// Feedback coefficient for `y[n-1]`.
    pub a1: f32,
    /// Feedback coefficient for `y[n-2]`.
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough set: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Unnormalized cookbook lowpass.
    ///
    /// # Arguments
    ///
    /// * `f0` - Cutoff frequency in Hz
    /// * `q` - Q factor (0.707 gives a Butterworth response)
    /// * `sample_rate` - Sample rate in Hz
    pub fn lowpass(f0: f32, q: f32, sample_rate: f32) -> Self {
        let w0 = 2.0 * PI * f0 / sample_rate;
        let cos_w0 = cosf(w0);
        let alpha = sinf(w0) / (2.0 * q);

        Self {
            b0: (1.0 - cos_w0) / 2.0,
            b1: 1.0 - cos_w0,
            b2: (1.0 - cos_w0) / 2.0,
            a0: 1.0 + alpha,
            a1: -2.0 * cos_w0,
            a2: 1.0 - alpha,
        }
    }

    /// Divide every coefficient by `a0`, leaving `a0 == 1`.
    pub fn normalized(self) -> Self {
        let a0 = self.a0;
        Self {
            b0: self.b0 / a0,
            b1: self.b1 / a0,
            b2: self.b2 / a0,
            a0: 1.0,
            a1: self.a1 / a0,
            a2: self.a2 / a0,
        }
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Second-order IIR section.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// The recursion only holds if [`process`](Self::process) sees every sample
/// exactly once, in order. Skipped or reordered calls corrupt the history and
/// there is no way to recover short of [`clear`](Self::clear).
///
/// # Example
///
/// ```rust
/// use twopole_core::Biquad;
///
/// let mut lp = Biquad::new();
/// lp.design_lowpass(1000.0, 0.707, 48000.0);
///
/// let mut y = 0.0;
/// for _ in 0..4000 {
///     y = lp.process(1.0);
/// }
/// assert!((y - 1.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients, already divided by a0
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients and zeroed history.
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Derive lowpass coefficients from cutoff, Q and sample rate.
    ///
    /// History registers are left untouched so the filter can be redesigned
    /// every sample while running.
    pub fn design_lowpass(&mut self, f0: f32, q: f32, sample_rate: f32) {
        self.set_coefficients(BiquadCoefficients::lowpass(f0, q, sample_rate));
    }

    /// Install a coefficient set, normalizing by its `a0`.
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        let c = coefficients.normalized();
        self.b0 = c.b0;
        self.b1 = c.b1;
        self.b2 = c.b2;
        self.a1 = c.a1;
        self.a2 = c.a2;
    }

    /// The stored coefficients. `a0` is always 1.
    pub fn coefficients(&self) -> BiquadCoefficients {
        BiquadCoefficients {
            b0: self.b0,
            b1: self.b1,
            b2: self.b2,
            a0: 1.0,
            a1: self.a1,
            a2: self.a2,
        }
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, x0: f32) -> f32 {
        let y0 = self.b0 * x0 + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x0;
        self.y2 = self.y1;
        self.y1 = y0;

        y0
    }

    /// Clears the delay lines without changing coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}
