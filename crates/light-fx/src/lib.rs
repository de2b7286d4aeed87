//! Timed multi-phase light effects for real-time engines.
//!
//! A storm-lightning flash is the canonical use: wait, flicker, spike to a
//! peak, hold, fade back. The sequencer is engine-agnostic; it drives any
//! [`ScalarProperty`] from a caller-supplied `dt`.
//!
//! ```
//! use light_fx::{EffectParameters, EffectSequencer};
//!
//! let mut brightness = 0.2_f32;
//! let mut flash = EffectSequencer::start(EffectParameters::storm_lightning(), &mut brightness)?;
//! while flash.advance(1.0 / 60.0, &mut brightness)? {}
//! assert_eq!(brightness, 0.2);
//! # Ok::<(), light_fx::EffectError>(())
//! ```

pub mod core;
pub mod effects;
pub mod error;
pub mod extensions;
pub mod systems;

// Re-export key types at crate root for convenience
pub use crate::core::delay::DelayTimer;
pub use crate::core::time::FixedTimestep;
pub use effects::{EffectId, EffectParameters, EffectPhase, EffectRunner, EffectSequencer};
pub use error::EffectError;
pub use extensions::{Easing, lerp, ease, remap, ScalarProperty, Accessor};
pub use systems::lighting::{PointLight, LightId, LightState};
