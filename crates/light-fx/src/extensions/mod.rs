// extensions/mod.rs
//
// Small helpers shared by the effects: easing math and the property seam.
// Neither knows anything about phases or lights.

pub mod easing;
pub mod property;

pub use easing::{Easing, lerp, ease, remap};
pub use property::{ScalarProperty, Accessor};
