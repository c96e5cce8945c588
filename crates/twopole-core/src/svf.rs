//! State Variable Filter kernel.
//!
//! Two cascaded discrete integrators in a feedback loop, after J. O. Smith,
//! "Digital State-Variable Filters" (CCRMA). One call to
//! [`step`](StateVariableFilter::step) yields lowpass, highpass and a
//! band-like "mid" output simultaneously.
//!
//! # Topology
//!
//! ```text
//!           +--[mul -q]<---------------------------+
//!           |                                      |
//! -->[sum 1]+-->[high]--[mul wct]-->[sum 3]---->[z2]--+--> mid
//!      A                              A            |  |
//!      |                              +------------+  |
//!      |                                              |
//!      +--[mul -1]--[low]<--[sum 2]<--[mul wct]<------+
//!                              A
//!                              +--[z1]<-- low
//! ```
//!
//! Every right-hand side reads the registers as they were *before* the step.
//! Both registers are committed only after all outputs are computed; reading
//! a register after its write would compute a different filter.
//!
//! # Coefficients
//!
//! - `wct`: per-sample integrator gain, stable inside `(0, 1)`
//! - `q`: resonance feedback, damping grows with `q`
//!
//! Neither is range-checked. The linear system is stable while `wct · q > 0`
//! and `wct² + 2·wct·q < 4`; outside that, output grows or rings without
//! any error being reported.
//!
//! # Denormals
//!
//! State is not flushed. As the signal decays toward silence the registers
//! can enter the subnormal range, which is slow on some FPUs.

use crate::UnitDelay;

/// Which of the three simultaneous outputs to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SvfOutput {
    /// Low-pass output, the second integrator's accumulator.
    #[default]
    Lowpass,
    /// "Mid" output: the band integrator's value from the previous step.
    Bandpass,
    /// High-pass output, the input minus both feedback paths.
    Highpass,
}

/// Two-integrator-loop state variable filter.
///
/// Coefficients are supplied on every [`step`](Self::step), so the host can
/// modulate them per sample without any setter calls.
///
/// # Example
///
/// ```rust
/// use twopole_core::{StateVariableFilter, SvfOutput};
///
/// let mut svf = StateVariableFilter::new();
/// svf.step(1.0, 0.5, 0.7);
/// assert_eq!(svf.high(), 1.0);
/// assert_eq!(svf.output(SvfOutput::Lowpass), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StateVariableFilter {
    z1: UnitDelay,
    z2: UnitDelay,
    low: f32,
    mid: f32,
    high: f32,
}

impl StateVariableFilter {
    /// Create a filter with all registers at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the filter by one sample.
    pub fn step(&mut self, input: f32, wct: f32, q: f32) {
        let z1 = self.z1.peek();
        let z2 = self.z2.peek();

        let low = wct * z2 + z1;
        let high = input - low - q * z2;
        let band = wct * high + z2;

        self.mid = z2;
        self.low = low;
        self.high = high;

        self.z1.read_and_advance(low);
        self.z2.read_and_advance(band);
    }

    /// Low-pass output of the last step.
    #[inline]
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Band-like output of the last step.
    ///
    /// This is the band integrator *before* the step, one sample behind the
    /// band-pass output of the analog prototype.
    #[inline]
    pub fn mid(&self) -> f32 {
        self.mid
    }

    /// High-pass output of the last step.
    #[inline]
    pub fn high(&self) -> f32 {
        self.high
    }

    /// Output of the last step selected by `output`.
    #[inline]
    pub fn output(&self, output: SvfOutput) -> f32 {
        match output {
            SvfOutput::Lowpass => self.low,
            SvfOutput::Bandpass => self.mid,
            SvfOutput::Highpass => self.high,
        }
    }

    /// Clear both integrators and the three outputs.
    pub fn reset(&mut self) {
        self.z1.reset();
        self.z2.reset();
        self.low = 0.0;
        self.mid = 0.0;
        self.high = 0.0;
    }
}
