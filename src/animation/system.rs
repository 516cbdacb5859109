use slotmap::{SlotMap, new_key_type};

use crate::animation::component::AnimatorComponent;

new_key_type! {
    pub struct AnimatorKey;
}

/// Animation system.
///
/// Owns every [`AnimatorComponent`] and drives them once per frame.
/// Components are independent, so update order between them is unspecified.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    components: SlotMap<AnimatorKey, AnimatorComponent>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: AnimatorComponent) -> AnimatorKey {
        self.components.insert(component)
    }

    pub fn remove(&mut self, key: AnimatorKey) -> Option<AnimatorComponent> {
        self.components.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: AnimatorKey) -> Option<&AnimatorComponent> {
        self.components.get(key)
    }

    pub fn get_mut(&mut self, key: AnimatorKey) -> Option<&mut AnimatorComponent> {
        self.components.get_mut(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimatorKey, &AnimatorComponent)> {
        self.components.iter()
    }

    /// Updates all animator components.
    ///
    /// # Arguments
    /// * `dt` - Delta time per frame (in seconds)
    #[inline]
    pub fn update(&mut self, dt: f32) {
        for (_key, component) in &mut self.components {
            component.update(dt);
        }
    }
}
