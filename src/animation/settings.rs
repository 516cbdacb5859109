//! Animator Settings
//!
//! Construction-time configuration for an [`Animator`](super::Animator).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bonework::animation::{Animator, AnimatorSettings};
//!
//! // Default: one layer at normal speed
//! let animator = Animator::new(skeleton.clone());
//!
//! // Upper-body layer on top of locomotion, slowed down
//! let settings = AnimatorSettings {
//!     layer_count: 2,
//!     speed: 0.5,
//! };
//! let animator = Animator::with_settings(skeleton, settings);
//! ```
//!
//! Settings derive serde traits; missing fields fall back to their defaults,
//! so `{"layer_count": 3}` is a valid configuration.

use serde::{Deserialize, Serialize};

/// Fixed number of layer slots per animator.
pub const MAX_LAYERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorSettings {
    /// Global playback speed multiplier applied to every layer.
    pub speed: f32,
    /// Number of layers composed each update, clamped to `1..=MAX_LAYERS`.
    pub layer_count: usize,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            layer_count: 1,
        }
    }
}
