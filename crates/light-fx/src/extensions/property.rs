// extensions/property.rs
//
// The seam between an effect and whatever scalar it animates.
// Effects only ever see this trait, never the host object behind it.

/// A mutable scalar an effect can drive.
///
/// `get` is called only at snapshot points, `set` on every step.
/// Both are assumed infallible and free of side effects beyond the value.
pub trait ScalarProperty {
    fn get(&self) -> f32;
    fn set(&mut self, value: f32);
}

impl ScalarProperty for f32 {
    fn get(&self) -> f32 {
        *self
    }

    fn set(&mut self, value: f32) {
        *self = value;
    }
}

impl<P: ScalarProperty + ?Sized> ScalarProperty for &mut P {
    fn get(&self) -> f32 {
        (**self).get()
    }

    fn set(&mut self, value: f32) {
        (**self).set(value);
    }
}

/// Adapts a getter/setter closure pair into a [`ScalarProperty`].
///
/// ```
/// use std::cell::Cell;
/// use light_fx::{Accessor, ScalarProperty};
///
/// let brightness = Cell::new(0.3);
/// let mut prop = Accessor::new(|| brightness.get(), |v| brightness.set(v));
/// prop.set(0.8);
/// assert_eq!(prop.get(), 0.8);
/// ```
pub struct Accessor<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> Accessor<G, S>
where
    G: Fn() -> f32,
    S: FnMut(f32),
{
    pub fn new(getter: G, setter: S) -> Self {
        Self { getter, setter }
    }
}

impl<G, S> ScalarProperty for Accessor<G, S>
where
    G: Fn() -> f32,
    S: FnMut(f32),
{
    fn get(&self) -> f32 {
        (self.getter)()
    }

    fn set(&mut self, value: f32) {
        (self.setter)(value);
    }
}
