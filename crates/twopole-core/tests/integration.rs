//! Integration tests for twopole-core.
//!
//! Verifies the kernels with signal-level measurements (sine RMS through each
//! filter) and checks the harness routing end to end.

use twopole_core::{
    Biquad, FilterControls, FilterProcessor, Kernel, StateVariableFilter, SvfOutput,
    note_to_frequency,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

/// Generate a sine wave buffer at the given frequency and sample rate.
fn generate_sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / sample_rate))
        .collect()
}

/// Measure RMS amplitude of a signal buffer.
fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / signal.len() as f32)
}

/// Convert linear amplitude to dB.
fn to_db(linear: f32) -> f32 {
    20.0 * libm::log10f(linear.max(1e-10))
}

// ============================================================================
// 1. Biquad frequency response
// ============================================================================

fn measure_biquad_response(cutoff: f32, q: f32, freq_hz: f32) -> f32 {
    let num_samples = 9600;
    let settle_samples = 4800;
    let input = generate_sine(freq_hz, SAMPLE_RATE, num_samples);

    let mut biquad = Biquad::new();
    biquad.design_lowpass(cutoff, q, SAMPLE_RATE);
    let output: Vec<f32> = input.iter().map(|&s| biquad.process(s)).collect();

    to_db(rms(&output[settle_samples..]) / rms(&input[settle_samples..]))
}

#[test]
fn biquad_lowpass_frequency_response() {
    let cutoff = 1000.0;

    let passband = measure_biquad_response(cutoff, 0.707, 100.0);
    assert!(passband.abs() < 0.5, "100 Hz should pass, got {passband:.2} dB");

    let at_cutoff = measure_biquad_response(cutoff, 0.707, cutoff);
    assert!(
        (at_cutoff + 3.0).abs() < 0.5,
        "Butterworth cutoff should sit near -3 dB, got {at_cutoff:.2} dB"
    );

    // 12 dB/oct: roughly -24 dB two octaves up
    let stopband = measure_biquad_response(cutoff, 0.707, 4000.0);
    assert!(stopband < -20.0, "4 kHz should be attenuated, got {stopband:.2} dB");
}

#[test]
fn biquad_resonance_peaks_at_cutoff() {
    let flat = measure_biquad_response(2000.0, 0.707, 2000.0);
    let resonant = measure_biquad_response(2000.0, 4.0, 2000.0);
    assert!(
        resonant > flat + 10.0,
        "Q = 4 should boost the cutoff: {resonant:.2} dB vs {flat:.2} dB"
    );
}

// ============================================================================
// 2. SVF outputs
// ============================================================================

fn measure_svf_response(wct: f32, q: f32, output: SvfOutput, freq_hz: f32) -> f32 {
    let num_samples = 9600;
    let settle_samples = 4800;
    let input = generate_sine(freq_hz, SAMPLE_RATE, num_samples);

    let mut svf = StateVariableFilter::new();
    let filtered: Vec<f32> = input
        .iter()
        .map(|&s| {
            svf.step(s, wct, q);
            svf.output(output)
        })
        .collect();

    to_db(rms(&filtered[settle_samples..]) / rms(&input[settle_samples..]))
}

#[test]
fn svf_lowpass_rejects_high_frequencies() {
    let wct = 0.05;
    let low = measure_svf_response(wct, 0.7, SvfOutput::Lowpass, 50.0);
    let high = measure_svf_response(wct, 0.7, SvfOutput::Lowpass, 12000.0);
    assert!(low.abs() < 1.0, "50 Hz should pass lowpass, got {low:.2} dB");
    assert!(high < -20.0, "12 kHz should be rejected, got {high:.2} dB");
}

#[test]
fn svf_highpass_rejects_low_frequencies() {
    let wct = 0.05;
    let low = measure_svf_response(wct, 0.7, SvfOutput::Highpass, 50.0);
    let high = measure_svf_response(wct, 0.7, SvfOutput::Highpass, 12000.0);
    assert!(low < -20.0, "50 Hz should be rejected by highpass, got {low:.2} dB");
    assert!(high > -3.0, "12 kHz should pass highpass, got {high:.2} dB");
}

#[test]
fn svf_low_and_high_track_input_on_step() {
    // On every step: high + low + q * (old z2) == input, and mid is old z2.
    let q = 0.7;
    let mut svf = StateVariableFilter::new();
    for (n, x) in generate_sine(440.0, SAMPLE_RATE, 512).into_iter().enumerate() {
        svf.step(x, 0.3, q);
        let sum = svf.high() + svf.low() + q * svf.mid();
        assert!((sum - x).abs() < 1e-5, "sample {n}: {sum} vs {x}");
    }
}

// ============================================================================
// 3. Harness
// ============================================================================

#[test]
fn processor_blocks_match_single_pass() {
    let controls = FilterControls {
        note: 72.0,
        q: 1.0,
        gain_db: -6.0,
    };
    let signal = generate_sine(note_to_frequency(84.0), SAMPLE_RATE, 1024);

    for kernel in [Kernel::Biquad, Kernel::StateVariable] {
        let mut whole = FilterProcessor::new(SAMPLE_RATE, kernel);
        whole.set_controls(controls);
        let mut left = signal.clone();
        let mut right = signal.clone();
        whole.process_block(&mut left, &mut right);

        let mut chunked = FilterProcessor::new(SAMPLE_RATE, kernel);
        chunked.set_controls(controls);
        let mut chunked_left = signal.clone();
        let mut chunked_right = signal.clone();
        for (l, r) in chunked_left.chunks_mut(64).zip(chunked_right.chunks_mut(64)) {
            chunked.process_block(l, r);
        }

        assert_eq!(left, chunked_left, "{kernel:?} depends on block size");
        assert_eq!(left, right);
    }
}

#[test]
fn processor_mono_sums_stereo_input() {
    let mut processor = FilterProcessor::new(SAMPLE_RATE, Kernel::Biquad);
    processor.set_controls(FilterControls {
        note: 100.0,
        q: 0.707,
        gain_db: 0.0,
    });

    // Opposite-polarity channels cancel before the filter.
    let sine = generate_sine(220.0, SAMPLE_RATE, 256);
    let mut left = sine.clone();
    let mut right: Vec<f32> = sine.iter().map(|s| -s).collect();
    processor.process_block(&mut left, &mut right);

    assert!(left.iter().all(|&s| s == 0.0));
    assert!(right.iter().all(|&s| s == 0.0));
}

#[test]
fn processor_default_gain_is_quiet() {
    let mut processor = FilterProcessor::default();
    let mut left = vec![1.0; 4800];
    let mut right = vec![1.0; 4800];
    processor.process_block(&mut left, &mut right);

    // -65 dB ≈ 5.6e-4 of full scale once the lowpass has settled
    let settled = left[4799];
    assert!((settled - 5.623e-4).abs() < 1e-5, "got {settled}");
}
