use std::sync::Arc;

use crate::animation::animator::Animator;
use crate::animation::settings::AnimatorSettings;
use crate::scene::Skeleton;

/// Attaches an [`Animator`] to an entity.
///
/// A disabled component keeps its pose and skinning matrices frozen.
#[derive(Debug, Clone)]
pub struct AnimatorComponent {
    pub animator: Animator,
    pub enabled: bool,
}

impl AnimatorComponent {
    #[must_use]
    pub fn new(skeleton: Arc<Skeleton>) -> Self {
        Self::from_animator(Animator::new(skeleton))
    }

    #[must_use]
    pub fn with_settings(skeleton: Arc<Skeleton>, settings: AnimatorSettings) -> Self {
        Self::from_animator(Animator::with_settings(skeleton, settings))
    }

    #[must_use]
    pub fn from_animator(animator: Animator) -> Self {
        Self {
            animator,
            enabled: true,
        }
    }

    #[inline]
    pub fn update(&mut self, dt: f32) {
        if self.enabled {
            self.animator.update(dt);
        }
    }
}
