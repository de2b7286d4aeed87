//! Multi-phase effect sequencer.
//!
//! Drives one scalar through a fixed timeline:
//!
//! ```text
//! wait -> oscillate -> ramp to peak -> hold -> ramp to base -> done
//! ```
//!
//! The sequencer never suspends on its own. The caller invokes `advance`
//! once per tick with the elapsed time, and the return value says whether
//! another call is needed.
//!
//! When a single `dt` crosses a phase boundary, the time past the boundary
//! is dropped rather than carried into the next phase. Callers that need
//! frame-accurate timing under large or uneven deltas should sub-step
//! (see [`FixedTimestep`](crate::core::time::FixedTimestep)).
//!
//! Phase clocks accumulate in `f64`. Steps far below a phase's length
//! still add up, but a `dt` under roughly 1e-16 of the elapsed time is
//! lost to rounding and cannot finish a phase on its own.

use std::f32::consts::TAU;
use std::fmt;

use crate::core::delay::DelayTimer;
use crate::error::EffectError;
use crate::extensions::easing::{ease, remap};
use crate::extensions::property::ScalarProperty;
use super::params::EffectParameters;

/// Where an effect is in its timeline. Phases only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectPhase {
    /// Created but not yet bound to a value.
    Idle,
    WaitingBeforeOscillation,
    Oscillating,
    RampingToPeak,
    Holding,
    RampingToBase,
    Completed,
}

/// A single running effect and everything it needs to step itself.
pub struct EffectSequencer {
    params: EffectParameters,
    phase: EffectPhase,
    /// Time spent in the current ramp or oscillation phase.
    elapsed_in_phase: f64,
    /// Value the property held at `begin`. Restored on completion.
    original_value: f32,
    /// Interpolation source for the current ramp.
    value_at_phase_start: f32,
    /// Last value written or snapshotted, for transition logs.
    last_value: f32,
    /// Shared by the wait and hold phases.
    timer: DelayTimer,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl EffectSequencer {
    /// Validate `params` and create an idle sequencer.
    pub fn new(params: EffectParameters) -> Result<Self, EffectError> {
        params.validate()?;
        Ok(Self {
            params,
            phase: EffectPhase::Idle,
            elapsed_in_phase: 0.0,
            original_value: 0.0,
            value_at_phase_start: 0.0,
            last_value: 0.0,
            timer: DelayTimer::new(params.wait_before_oscillation),
            on_complete: None,
        })
    }

    /// Validate `params`, snapshot `target` and begin the effect.
    pub fn start<P>(params: EffectParameters, target: &mut P) -> Result<Self, EffectError>
    where
        P: ScalarProperty + ?Sized,
    {
        let mut effect = Self::new(params)?;
        effect.begin(target)?;
        Ok(effect)
    }

    /// Run `callback` once, when the effect completes or is cancelled.
    pub fn with_on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Snapshot the target's value and leave `Idle`.
    ///
    /// With no pre-oscillation wait the effect goes straight to
    /// `Oscillating`. Consumes no time.
    pub fn begin<P>(&mut self, target: &mut P) -> Result<(), EffectError>
    where
        P: ScalarProperty + ?Sized,
    {
        if self.phase != EffectPhase::Idle {
            return Err(EffectError::call(format!(
                "begin called in phase {:?}; an effect can only be started once",
                self.phase
            )));
        }

        self.original_value = target.get();
        self.value_at_phase_start = self.original_value;
        self.last_value = self.original_value;
        log::debug!(
            "effect started: original={} total={}s",
            self.original_value,
            self.params.total_duration()
        );

        if self.params.wait_before_oscillation > 0.0 {
            self.timer.reset(self.params.wait_before_oscillation);
            self.enter(EffectPhase::WaitingBeforeOscillation);
        } else {
            self.enter(EffectPhase::Oscillating);
        }
        Ok(())
    }

    /// Step the effect by `dt` seconds, writing the new value to `target`.
    ///
    /// Returns `Ok(true)` while more calls are needed and `Ok(false)` once
    /// the effect has completed. Calling it again after completion is a
    /// no-op. A negative or non-finite `dt` is rejected and leaves the
    /// effect untouched.
    pub fn advance<P>(&mut self, dt: f32, target: &mut P) -> Result<bool, EffectError>
    where
        P: ScalarProperty + ?Sized,
    {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EffectError::call(format!("dt must be finite and >= 0, got {dt}")));
        }

        match self.phase {
            EffectPhase::Idle => {
                return Err(EffectError::call("advance called before begin"));
            }
            EffectPhase::Completed => return Ok(false),

            EffectPhase::WaitingBeforeOscillation => {
                if !self.timer.tick(dt) {
                    self.enter(EffectPhase::Oscillating);
                }
            }

            EffectPhase::Oscillating => {
                let duration = f64::from(self.params.oscillation_duration);
                self.elapsed_in_phase += f64::from(dt);
                let value = self.oscillation_value(self.elapsed_in_phase.min(duration) as f32);
                log::trace!("oscillating: t={} value={}", self.elapsed_in_phase, value);
                self.write(target, value);

                if self.elapsed_in_phase >= duration {
                    self.value_at_phase_start = target.get();
                    self.last_value = self.value_at_phase_start;
                    self.enter(EffectPhase::RampingToPeak);
                }
            }

            EffectPhase::RampingToPeak => {
                let duration = f64::from(self.params.ramp_up_duration);
                let peak = self.params.peak_intensity;
                self.elapsed_in_phase += f64::from(dt);
                let value = ease(
                    self.value_at_phase_start,
                    peak,
                    (self.elapsed_in_phase / duration) as f32,
                    self.params.ramp_up_easing,
                );
                self.write(target, value);

                if self.elapsed_in_phase >= duration {
                    self.write(target, peak);
                    self.timer.reset(self.params.peak_hold_duration);
                    self.enter(EffectPhase::Holding);
                    if self.params.peak_hold_duration <= 0.0 {
                        self.finish_hold(target);
                    }
                }
            }

            EffectPhase::Holding => {
                if !self.timer.tick(dt) {
                    self.finish_hold(target);
                }
            }

            EffectPhase::RampingToBase => {
                let duration = f64::from(self.params.ramp_down_duration);
                self.elapsed_in_phase += f64::from(dt);
                let value = ease(
                    self.value_at_phase_start,
                    self.original_value,
                    (self.elapsed_in_phase / duration) as f32,
                    self.params.ramp_down_easing,
                );
                self.write(target, value);

                if self.elapsed_in_phase >= duration {
                    self.complete(target);
                }
            }
        }

        Ok(self.phase != EffectPhase::Completed)
    }

    /// Abort the effect: restore the original value and complete now.
    ///
    /// An idle effect never touched its target, so only the phase and the
    /// notification change. Cancelling a completed effect does nothing.
    pub fn cancel<P>(&mut self, target: &mut P)
    where
        P: ScalarProperty + ?Sized,
    {
        match self.phase {
            EffectPhase::Completed => {}
            EffectPhase::Idle => {
                log::debug!("idle effect cancelled");
                self.finish();
            }
            phase => {
                log::debug!("effect cancelled in {:?}", phase);
                self.complete(target);
            }
        }
    }

    /// Flicker value at `t` seconds into the oscillation.
    ///
    /// The sine is rectified onto [0, 1] before scaling, so the output
    /// stays between 0 and `oscillation_intensity`.
    pub fn oscillation_value(&self, t: f32) -> f32 {
        let p = &self.params;
        let theta = TAU * p.oscillation_count * t / p.oscillation_duration;
        remap(theta.sin(), -1.0, 1.0, 0.0, 1.0) * p.oscillation_intensity
    }

    pub fn phase(&self) -> EffectPhase {
        self.phase
    }

    pub fn params(&self) -> &EffectParameters {
        &self.params
    }

    /// The value captured at `begin`.
    pub fn original_value(&self) -> f32 {
        self.original_value
    }

    /// Time spent in the current phase.
    pub fn elapsed_in_phase(&self) -> f32 {
        match self.phase {
            EffectPhase::WaitingBeforeOscillation | EffectPhase::Holding => self.timer.elapsed(),
            _ => self.elapsed_in_phase as f32,
        }
    }

    /// Sum of every phase duration.
    pub fn total_duration(&self) -> f32 {
        self.params.total_duration()
    }

    /// Started and not yet finished.
    pub fn is_running(&self) -> bool {
        !matches!(self.phase, EffectPhase::Idle | EffectPhase::Completed)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == EffectPhase::Completed
    }

    fn finish_hold<P>(&mut self, target: &mut P)
    where
        P: ScalarProperty + ?Sized,
    {
        self.value_at_phase_start = target.get();
        self.last_value = self.value_at_phase_start;
        self.enter(EffectPhase::RampingToBase);
    }

    fn complete<P>(&mut self, target: &mut P)
    where
        P: ScalarProperty + ?Sized,
    {
        self.write(target, self.original_value);
        self.finish();
    }

    fn finish(&mut self) {
        self.enter(EffectPhase::Completed);
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    fn write<P>(&mut self, target: &mut P, value: f32)
    where
        P: ScalarProperty + ?Sized,
    {
        target.set(value);
        self.last_value = value;
    }

    fn enter(&mut self, next: EffectPhase) {
        debug_assert!(next >= self.phase, "phase moved backwards: {:?} -> {:?}", self.phase, next);
        log::debug!("effect phase {:?} -> {:?} at value {}", self.phase, next, self.last_value);
        self.phase = next;
        self.elapsed_in_phase = 0.0;
    }
}

impl fmt::Debug for EffectSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectSequencer")
            .field("phase", &self.phase)
            .field("elapsed_in_phase", &self.elapsed_in_phase())
            .field("original_value", &self.original_value)
            .field("value_at_phase_start", &self.value_at_phase_start)
            .field("params", &self.params)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}
