// effects/runner.rs
//
// Runs many light effects side by side, one per light.
// Knows lights only by LightId; the LightState is passed in on every call.
//
// Usage:
//   let mut runner = EffectRunner::new();
//   runner.add_with_event(lamp, EffectParameters::storm_lightning(), THUNDER, &mut lights)?;
//   runner.tick(dt, &mut lights)?;          // advances every effect
//   for event in runner.drain_completed() { /* play thunder */ }

use std::collections::HashMap;

use crate::core::time::FixedTimestep;
use crate::error::EffectError;
use crate::systems::lighting::{LightId, LightState};
use super::params::EffectParameters;
use super::sequencer::EffectSequencer;

/// Handle to a running effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u32);

#[derive(Debug)]
struct RunningEffect {
    light: LightId,
    sequencer: EffectSequencer,
    /// Pushed to the completion queue when the effect ends.
    event: Option<u32>,
}

/// Owns every active effect and steps them against a [`LightState`].
#[derive(Debug, Default)]
pub struct EffectRunner {
    effects: HashMap<EffectId, RunningEffect>,
    next_id: u32,
    completed_events: Vec<u32>,
}

impl EffectRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an effect on `light`.
    ///
    /// A light runs one effect at a time. An effect already running on the
    /// light is cancelled first, so the new one snapshots the light's real
    /// base intensity rather than a mid-flash value.
    pub fn add(
        &mut self,
        light: LightId,
        params: EffectParameters,
        lights: &mut LightState,
    ) -> Result<EffectId, EffectError> {
        self.insert(light, params, None, lights)
    }

    /// Like [`add`](Self::add), and report `event_id` through
    /// [`drain_completed`](Self::drain_completed) when the effect ends.
    pub fn add_with_event(
        &mut self,
        light: LightId,
        params: EffectParameters,
        event_id: u32,
        lights: &mut LightState,
    ) -> Result<EffectId, EffectError> {
        self.insert(light, params, Some(event_id), lights)
    }

    fn insert(
        &mut self,
        light: LightId,
        params: EffectParameters,
        event: Option<u32>,
        lights: &mut LightState,
    ) -> Result<EffectId, EffectError> {
        let mut sequencer = EffectSequencer::new(params)?;
        if !lights.contains(light) {
            return Err(EffectError::call(format!("no light with id {}", light.0)));
        }

        self.cancel_light(light, lights);

        let target = lights
            .get_mut(light)
            .ok_or_else(|| EffectError::call(format!("no light with id {}", light.0)))?;
        sequencer.begin(target)?;

        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.effects.insert(id, RunningEffect { light, sequencer, event });
        log::debug!("effect {} started on light {}", id.0, light.0);
        Ok(id)
    }

    /// Advance every effect by `dt` and write the results to `lights`.
    /// Returns the number of effects that finished this tick.
    ///
    /// A negative or non-finite `dt` is rejected before any effect moves.
    pub fn tick(&mut self, dt: f32, lights: &mut LightState) -> Result<usize, EffectError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EffectError::call(format!("dt must be finite and >= 0, got {dt}")));
        }

        let mut finished = Vec::new();
        for (&id, effect) in self.effects.iter_mut() {
            match lights.get_mut(effect.light) {
                Some(light) => {
                    if !effect.sequencer.advance(dt, light)? {
                        finished.push(id);
                    }
                }
                None => {
                    log::warn!(
                        "light {} vanished under effect {}; dropping it",
                        effect.light.0,
                        id.0
                    );
                    finished.push(id);
                }
            }
        }

        // Stable event order regardless of map iteration order.
        finished.sort_unstable();
        let count = finished.len();
        for id in finished {
            if let Some(effect) = self.effects.remove(&id) {
                self.completed_events.extend(effect.event);
            }
        }
        Ok(count)
    }

    /// Feed a variable frame delta through `timestep` and run one `tick`
    /// per fixed step. Returns the total number of effects that finished.
    pub fn tick_fixed(
        &mut self,
        frame_dt: f32,
        timestep: &mut FixedTimestep,
        lights: &mut LightState,
    ) -> Result<usize, EffectError> {
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            return Err(EffectError::call(format!(
                "frame dt must be finite and >= 0, got {frame_dt}"
            )));
        }

        let steps = timestep.accumulate(frame_dt);
        let mut finished = 0;
        for _ in 0..steps {
            finished += self.tick(timestep.dt(), lights)?;
        }
        Ok(finished)
    }

    /// Stop an effect now, restoring its light. Returns whether it existed.
    pub fn cancel(&mut self, id: EffectId, lights: &mut LightState) -> bool {
        let Some(mut effect) = self.effects.remove(&id) else {
            return false;
        };
        if let Some(light) = lights.get_mut(effect.light) {
            effect.sequencer.cancel(light);
        }
        self.completed_events.extend(effect.event);
        true
    }

    /// Stop whatever effect is running on `light`. Returns whether one was.
    pub fn cancel_light(&mut self, light: LightId, lights: &mut LightState) -> bool {
        let found = self
            .effects
            .iter()
            .find(|(_, e)| e.light == light)
            .map(|(&id, _)| id);
        match found {
            Some(id) => self.cancel(id, lights),
            None => false,
        }
    }

    /// Stop every effect, restoring all lights.
    pub fn cancel_all(&mut self, lights: &mut LightState) {
        let mut ids: Vec<EffectId> = self.effects.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            self.cancel(id, lights);
        }
    }

    /// Inspect a running effect.
    pub fn get(&self, id: EffectId) -> Option<&EffectSequencer> {
        self.effects.get(&id).map(|e| &e.sequencer)
    }

    /// Whether an effect is currently driving `light`.
    pub fn is_animating(&self, light: LightId) -> bool {
        self.effects.values().any(|e| e.light == light)
    }

    /// Drain completion events in the order effects ended.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::sequencer::EffectPhase;
    use crate::systems::lighting::PointLight;

    fn lamp(lights: &mut LightState, intensity: f32) -> LightId {
        lights.add(PointLight::new(intensity))
    }

    fn quick() -> EffectParameters {
        EffectParameters::default()
            .with_wait(0.0)
            .with_oscillation(1.0, 1.0, 0.5)
            .with_ramp_up(0.25)
            .with_peak(6.0, 0.25)
            .with_ramp_down(0.5)
    }

    fn intensity(lights: &LightState, id: LightId) -> f32 {
        lights.get(id).map(|l| l.intensity).unwrap()
    }

    #[test]
    fn effect_runs_and_restores_light() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 0.2);
        let mut runner = EffectRunner::new();
        runner.add_with_event(sky, quick(), 7, &mut lights).unwrap();
        assert!(runner.is_animating(sky));

        let mut finished = 0;
        for _ in 0..200 {
            finished += runner.tick(0.05, &mut lights).unwrap();
        }

        assert_eq!(finished, 1);
        assert!(runner.is_empty());
        assert_eq!(intensity(&lights, sky), 0.2);
        assert_eq!(runner.drain_completed().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn reaches_peak_mid_effect() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 0.0);
        let mut runner = EffectRunner::new();
        let id = runner.add(sky, quick(), &mut lights).unwrap();

        runner.tick(0.5, &mut lights).unwrap();
        runner.tick(0.25, &mut lights).unwrap();
        assert_eq!(runner.get(id).map(|e| e.phase()), Some(EffectPhase::Holding));
        assert_eq!(intensity(&lights, sky), 6.0);
    }

    #[test]
    fn independent_lights_run_concurrently() {
        let mut lights = LightState::new();
        let a = lamp(&mut lights, 1.0);
        let b = lamp(&mut lights, 2.0);
        let mut runner = EffectRunner::new();
        runner.add_with_event(a, quick(), 1, &mut lights).unwrap();
        runner
            .add_with_event(b, quick().with_wait(1.0), 2, &mut lights)
            .unwrap();
        assert_eq!(runner.len(), 2);

        runner.tick(0.1, &mut lights).unwrap();
        assert_ne!(intensity(&lights, a), 1.0);
        assert_eq!(intensity(&lights, b), 2.0);

        for _ in 0..100 {
            runner.tick(0.05, &mut lights).unwrap();
        }
        assert!(runner.is_empty());
        assert_eq!(intensity(&lights, a), 1.0);
        assert_eq!(intensity(&lights, b), 2.0);
        assert_eq!(runner.drain_completed().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn restarting_a_light_keeps_true_base() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 0.3);
        let mut runner = EffectRunner::new();
        let first = runner.add_with_event(sky, quick(), 1, &mut lights).unwrap();
        runner.tick(0.6, &mut lights).unwrap();
        assert!((intensity(&lights, sky) - 0.3).abs() > 0.1);

        let second = runner.add(sky, quick(), &mut lights).unwrap();
        assert!(runner.get(first).is_none());
        assert_eq!(runner.get(second).map(|e| e.original_value()), Some(0.3));
        assert_eq!(runner.len(), 1);
        assert_eq!(runner.drain_completed().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn cancel_light_restores_immediately() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 0.3);
        let mut runner = EffectRunner::new();
        runner.add_with_event(sky, quick(), 4, &mut lights).unwrap();
        runner.tick(0.6, &mut lights).unwrap();

        assert!(runner.cancel_light(sky, &mut lights));
        assert_eq!(intensity(&lights, sky), 0.3);
        assert!(!runner.is_animating(sky));
        assert!(!runner.cancel_light(sky, &mut lights));
        assert_eq!(runner.drain_completed().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn cancel_all_restores_everything() {
        let mut lights = LightState::new();
        let a = lamp(&mut lights, 1.0);
        let b = lamp(&mut lights, 2.0);
        let mut runner = EffectRunner::new();
        runner.add(a, quick(), &mut lights).unwrap();
        runner.add(b, quick(), &mut lights).unwrap();
        runner.tick(0.6, &mut lights).unwrap();

        runner.cancel_all(&mut lights);
        assert!(runner.is_empty());
        assert_eq!(intensity(&lights, a), 1.0);
        assert_eq!(intensity(&lights, b), 2.0);
    }

    #[test]
    fn removed_light_drops_effect() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 1.0);
        let mut runner = EffectRunner::new();
        runner.add_with_event(sky, quick(), 9, &mut lights).unwrap();

        lights.remove(sky);
        assert_eq!(runner.tick(0.1, &mut lights).unwrap(), 1);
        assert!(runner.is_empty());
        assert_eq!(runner.drain_completed().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn unknown_light_rejected() {
        let mut lights = LightState::new();
        let mut runner = EffectRunner::new();
        let err = runner.add(LightId(42), quick(), &mut lights).unwrap_err();
        assert!(matches!(err, EffectError::InvalidCall(_)));
        assert!(runner.is_empty());
    }

    #[test]
    fn invalid_params_start_nothing() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 1.0);
        let mut runner = EffectRunner::new();
        let err = runner.add(sky, quick().with_ramp_down(0.0), &mut lights).unwrap_err();
        assert!(matches!(err, EffectError::InvalidParameter { .. }));
        assert!(runner.is_empty());
        assert_eq!(intensity(&lights, sky), 1.0);
    }

    #[test]
    fn negative_dt_moves_nothing() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 1.0);
        let mut runner = EffectRunner::new();
        let id = runner.add(sky, quick(), &mut lights).unwrap();
        runner.tick(0.1, &mut lights).unwrap();
        let before = intensity(&lights, sky);

        assert!(runner.tick(-0.1, &mut lights).is_err());
        assert_eq!(intensity(&lights, sky), before);
        assert_eq!(runner.get(id).map(|e| e.elapsed_in_phase()), Some(0.1));
    }

    #[test]
    fn fixed_steps_split_long_frames() {
        let mut lights = LightState::new();
        let sky = lamp(&mut lights, 0.0);
        let mut runner = EffectRunner::new();
        let id = runner.add(sky, quick(), &mut lights).unwrap();
        let mut timestep = FixedTimestep::new(0.125);

        // One 0.5s frame = four 0.125s steps, exactly the oscillation.
        runner.tick_fixed(0.5, &mut timestep, &mut lights).unwrap();
        assert_eq!(runner.get(id).map(|e| e.phase()), Some(EffectPhase::RampingToPeak));

        assert!(runner.tick_fixed(-1.0, &mut timestep, &mut lights).is_err());
    }
}
