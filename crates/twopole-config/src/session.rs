//! Session file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use twopole_core::{FilterControls, FilterProcessor, Kernel};

use crate::error::ConfigError;
use crate::validation::{GAIN_DB_RANGE, NOTE_RANGE, Q_RANGE, validate_session};

/// Kernel selection as written in session files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    /// Cookbook lowpass biquad.
    Biquad,
    /// Two-integrator state variable filter.
    #[default]
    StateVariable,
}

impl From<KernelKind> for Kernel {
    fn from(kind: KernelKind) -> Self {
        match kind {
            KernelKind::Biquad => Kernel::Biquad,
            KernelKind::StateVariable => Kernel::StateVariable,
        }
    }
}

impl From<Kernel> for KernelKind {
    fn from(kernel: Kernel) -> Self {
        match kernel {
            Kernel::Biquad => KernelKind::Biquad,
            Kernel::StateVariable => KernelKind::StateVariable,
        }
    }
}

/// Initial values of the three live controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Cutoff as a note number.
    pub note: f32,
    /// Resonance / Q.
    pub q: f32,
    /// Output gain in dB.
    pub gain_db: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            note: NOTE_RANGE.default,
            q: Q_RANGE.default,
            gain_db: GAIN_DB_RANGE.default,
        }
    }
}

impl From<ControlSettings> for FilterControls {
    fn from(settings: ControlSettings) -> Self {
        Self {
            note: settings.note,
            q: settings.q,
            gain_db: settings.gain_db,
        }
    }
}

impl From<FilterControls> for ControlSettings {
    fn from(controls: FilterControls) -> Self {
        Self {
            note: controls.note,
            q: controls.q,
            gain_db: controls.gain_db,
        }
    }
}

/// Everything the harness needs at session start.
///
/// # TOML Format
///
/// ```toml
/// name = "Default"
/// sample_rate = 48000
/// block_size = 512
/// kernel = "state_variable"
///
/// [controls]
/// note = 40.0
/// q = 0.7
/// gain_db = -65.0
/// ```
///
/// Every field is optional in the file and falls back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session.
    pub name: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Largest block the host will drive.
    ///
    /// Advisory host metadata: it is validated and persisted, but
    /// [`build_processor`](Self::build_processor) does not use it, since
    /// [`FilterProcessor::process_block`] accepts any length.
    pub block_size: usize,
    /// Active kernel.
    pub kernel: KernelKind,
    /// Initial control values.
    pub controls: ControlSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            sample_rate: 48000,
            block_size: 512,
            kernel: KernelKind::default(),
            controls: ControlSettings::default(),
        }
    }
}

impl SessionConfig {
    /// Create a session with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Select the kernel.
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the initial controls.
    pub fn with_controls(mut self, controls: ControlSettings) -> Self {
        self.controls = controls;
        self
    }

    /// Load a session from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let session: SessionConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %session.name, "session loaded");
        Ok(session)
    }

    /// Load a session from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the session to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "session saved");
        Ok(())
    }

    /// Convert the session to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check sample rate, block size and control ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_session(self)?;
        Ok(())
    }

    /// Validate, then build a prepared processor with the initial controls.
    pub fn build_processor(&self) -> Result<FilterProcessor, ConfigError> {
        self.validate()?;
        let mut processor = FilterProcessor::new(self.sample_rate as f32, self.kernel.into());
        processor.prepare(self.sample_rate as f32);
        processor.set_controls(self.controls.into());
        Ok(processor)
    }
}
