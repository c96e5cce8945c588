//! Reference harness that drives one of the kernels over stereo blocks.
//!
//! Mirrors what a host plugin does around the filter core: read the live
//! controls, mono-sum each frame, run the active kernel once per frame and
//! write the same filtered sample to both channels.
//!
//! Controls are applied as-is on every sample. There is no smoothing and no
//! range checking here; `twopole-config` validates a session before it builds
//! a processor.

use crate::math::{db_to_linear, note_to_frequency, note_to_svf_coefficient};
use crate::{Biquad, StateVariableFilter};

/// Which kernel the processor routes audio through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Kernel {
    /// Cookbook lowpass biquad, redesigned from the controls every sample.
    Biquad,
    /// Two-integrator SVF, lowpass output.
    #[default]
    StateVariable,
}

/// The three live control values read once per sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterControls {
    /// Cutoff as a note number (69 = 440 Hz).
    pub note: f32,
    /// Resonance / Q.
    pub q: f32,
    /// Output gain in decibels.
    ///
    /// Scales the output of both kernels. The plugin this harness stands in
    /// for only applied it on its biquad path and left the SVF unscaled, so
    /// with the -65 dB default an SVF session here is far quieter than there.
    pub gain_db: f32,
}

impl Default for FilterControls {
    fn default() -> Self {
        Self {
            note: 40.0,
            q: 0.7,
            gain_db: -65.0,
        }
    }
}

/// Stereo-in, stereo-out wrapper around [`Biquad`] and [`StateVariableFilter`].
///
/// Both kernels are owned so switching never allocates. Only the active one
/// is advanced.
///
/// # Example
///
/// ```rust
/// use twopole_core::{FilterControls, FilterProcessor, Kernel};
///
/// let mut processor = FilterProcessor::new(48000.0, Kernel::StateVariable);
/// processor.set_controls(FilterControls { note: 64.0, q: 0.7, gain_db: 0.0 });
///
/// let mut left = [0.5_f32; 64];
/// let mut right = [0.5_f32; 64];
/// processor.process_block(&mut left, &mut right);
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone)]
pub struct FilterProcessor {
    sample_rate: f32,
    kernel: Kernel,
    controls: FilterControls,
    biquad: Biquad,
    svf: StateVariableFilter,
}

impl FilterProcessor {
    /// Create a processor with default controls.
    pub fn new(sample_rate: f32, kernel: Kernel) -> Self {
        Self {
            sample_rate,
            kernel,
            controls: FilterControls::default(),
            biquad: Biquad::new(),
            svf: StateVariableFilter::new(),
        }
    }

    /// Session start: set the sample rate and clear all filter state.
    pub fn prepare(&mut self, sample_rate: f32) {
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, kernel = ?self.kernel, "filter processor prepared");
        self.sample_rate = sample_rate;
        self.reset();
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Route audio through `kernel`. Switching clears both kernels.
    pub fn set_kernel(&mut self, kernel: Kernel) {
        if kernel != self.kernel {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = ?self.kernel, to = ?kernel, "filter kernel switched");
            self.kernel = kernel;
            self.reset();
        }
    }

    /// Active kernel.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Replace the live controls. Takes effect from the next sample.
    pub fn set_controls(&mut self, controls: FilterControls) {
        self.controls = controls;
    }

    /// Live controls.
    pub fn controls(&self) -> FilterControls {
        self.controls
    }

    /// Clear the history of both kernels.
    pub fn reset(&mut self) {
        self.biquad.clear();
        self.svf.reset();
    }

    /// Filter one mono sample through the active kernel and apply output gain.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let FilterControls { note, q, gain_db } = self.controls;

        let filtered = match self.kernel {
            Kernel::Biquad => {
                self.biquad
                    .design_lowpass(note_to_frequency(note), q, self.sample_rate);
                self.biquad.process(input)
            }
            Kernel::StateVariable => {
                self.svf.step(input, note_to_svf_coefficient(note), q);
                self.svf.low()
            }
        };

        filtered * db_to_linear(gain_db)
    }

    /// Filter a stereo block in place.
    ///
    /// Each frame is mono-summed, filtered once, and the result written to
    /// both channels. If the slices differ in length only the shorter prefix
    /// is processed.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let mono = (*l + *r) / 2.0;
            let out = self.process_sample(mono);
            *l = out;
            *r = out;
        }
    }
}

impl Default for FilterProcessor {
    fn default() -> Self {
        Self::new(48000.0, Kernel::default())
    }
}
