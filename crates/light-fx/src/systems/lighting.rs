//! Lights as effect targets.
//!
//! The host engine owns real lights. This is the slice of one the effect
//! runner needs: a handle and an intensity it can drive.

use crate::extensions::property::ScalarProperty;

/// Handle to a light in a [`LightState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(pub u32);

/// A light whose intensity effects animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub intensity: f32,
}

impl PointLight {
    pub fn new(intensity: f32) -> Self {
        Self { intensity }
    }
}

/// Effects drive a light through its intensity.
impl ScalarProperty for PointLight {
    fn get(&self) -> f32 {
        self.intensity
    }

    fn set(&mut self, value: f32) {
        self.intensity = value;
    }
}

/// Lights addressed by `LightId`. Ids are never reused.
#[derive(Debug)]
pub struct LightState {
    lights: Vec<(LightId, PointLight)>,
    next_id: u32,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a light. The returned id stays valid until the light is removed.
    pub fn add(&mut self, light: PointLight) -> LightId {
        let id = LightId(self.next_id);
        self.next_id += 1;
        self.lights.push((id, light));
        id
    }

    /// Remove a light, returning it if it existed.
    pub fn remove(&mut self, id: LightId) -> Option<PointLight> {
        let idx = self.lights.iter().position(|(i, _)| *i == id)?;
        Some(self.lights.swap_remove(idx).1)
    }

    pub fn get(&self, id: LightId) -> Option<&PointLight> {
        self.lights.iter().find(|(i, _)| *i == id).map(|(_, l)| l)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut PointLight> {
        self.lights.iter_mut().find(|(i, _)| *i == id).map(|(_, l)| l)
    }

    pub fn contains(&self, id: LightId) -> bool {
        self.get(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
