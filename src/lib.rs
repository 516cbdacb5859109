//! Skeletal animation core.
//!
//! Samples keyframe clips into per-bone poses, composes playback layers
//! (including timed crossfades) and derives the skinning matrices a GPU
//! renderer consumes.
//!
//! Per frame: [`Animator::update`] resets the pose to the bind pose, blends
//! each active layer on top in order, composes world transforms down the
//! [`Skeleton`] and multiplies them by the inverse-bind matrices.

pub mod animation;
pub mod errors;
pub mod scene;

pub use animation::{
    AnimationChannel, AnimationClip, AnimationLayer, AnimationSystem, Animator, AnimatorComponent,
    AnimatorKey, AnimatorSettings, BlendMode, InterpolationMode, KeyframeTrack, MAX_LAYERS,
    PlaybackState, TargetProperty,
};
pub use errors::{AnimationError, Result};
pub use scene::{Bone, MAX_BONES, Skeleton, Transform};
