//! Multi-phase light effects.
//!
//! `EffectSequencer` steps a single scalar through its timeline;
//! `EffectRunner` keeps many of them going against a `LightState`.

pub mod params;
pub mod sequencer;
pub mod runner;

pub use params::EffectParameters;
pub use sequencer::{EffectPhase, EffectSequencer};
pub use runner::{EffectId, EffectRunner};
