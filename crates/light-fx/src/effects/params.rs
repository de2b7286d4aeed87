//! Timing and intensity parameters for a multi-phase light effect.

use serde::{Deserialize, Serialize};

use crate::error::EffectError;
use crate::extensions::easing::Easing;

/// Everything an effect needs to know up front. Immutable once started.
///
/// All durations are in seconds. Loaded from JSON with any missing field
/// falling back to the storm-lightning preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParameters {
    /// Delay before the flicker starts. Zero skips the wait.
    pub wait_before_oscillation: f32,
    /// Full sine periods during the flicker.
    pub oscillation_count: f32,
    /// Peak value of the flicker. The flicker floor is 0.
    pub oscillation_intensity: f32,
    pub oscillation_duration: f32,
    /// Time to rise from the flicker's last value to the peak.
    pub ramp_up_duration: f32,
    pub peak_intensity: f32,
    /// Time the peak is held. Zero skips the hold.
    pub peak_hold_duration: f32,
    /// Time to fall from the peak back to the original value.
    pub ramp_down_duration: f32,
    pub ramp_up_easing: Easing,
    pub ramp_down_easing: Easing,
}

impl EffectParameters {
    /// A short flicker followed by a bright strike and a slower fade.
    pub fn storm_lightning() -> Self {
        Self {
            wait_before_oscillation: 0.5,
            oscillation_count: 3.0,
            oscillation_intensity: 1.5,
            oscillation_duration: 0.4,
            ramp_up_duration: 0.05,
            peak_intensity: 8.0,
            peak_hold_duration: 0.08,
            ramp_down_duration: 0.6,
            ramp_up_easing: Easing::Linear,
            ramp_down_easing: Easing::Linear,
        }
    }

    /// Parse parameters from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn with_wait(mut self, seconds: f32) -> Self {
        self.wait_before_oscillation = seconds;
        self
    }

    pub fn with_oscillation(mut self, count: f32, intensity: f32, duration: f32) -> Self {
        self.oscillation_count = count;
        self.oscillation_intensity = intensity;
        self.oscillation_duration = duration;
        self
    }

    pub fn with_ramp_up(mut self, duration: f32) -> Self {
        self.ramp_up_duration = duration;
        self
    }

    pub fn with_peak(mut self, intensity: f32, hold: f32) -> Self {
        self.peak_intensity = intensity;
        self.peak_hold_duration = hold;
        self
    }

    pub fn with_ramp_down(mut self, duration: f32) -> Self {
        self.ramp_down_duration = duration;
        self
    }

    pub fn with_ramp_easing(mut self, up: Easing, down: Easing) -> Self {
        self.ramp_up_easing = up;
        self.ramp_down_easing = down;
        self
    }

    /// Sum of every phase duration.
    pub fn total_duration(&self) -> f32 {
        self.wait_before_oscillation
            + self.oscillation_duration
            + self.ramp_up_duration
            + self.peak_hold_duration
            + self.ramp_down_duration
    }

    /// Check every field. The first offending field is reported.
    pub fn validate(&self) -> Result<(), EffectError> {
        non_negative("wait_before_oscillation", self.wait_before_oscillation)?;
        non_negative("peak_hold_duration", self.peak_hold_duration)?;
        non_negative("oscillation_count", self.oscillation_count)?;

        // These three divide the elapsed time.
        positive("oscillation_duration", self.oscillation_duration)?;
        positive("ramp_up_duration", self.ramp_up_duration)?;
        positive("ramp_down_duration", self.ramp_down_duration)?;

        finite("oscillation_intensity", self.oscillation_intensity)?;
        finite("peak_intensity", self.peak_intensity)?;
        Ok(())
    }
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self::storm_lightning()
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), EffectError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EffectError::param(name, value, "must be finite"))
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), EffectError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(EffectError::param(name, value, "must be >= 0"));
    }
    Ok(())
}

fn positive(name: &'static str, value: f32) -> Result<(), EffectError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(EffectError::param(name, value, "must be > 0"));
    }
    Ok(())
}
