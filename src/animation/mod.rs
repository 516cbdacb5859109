//! Skeletal animation: keyframe tracks, clips, playback layers and the
//! animator that turns them into skinning matrices.

pub mod animator;
pub mod clip;
pub mod component;
pub mod layer;
pub mod settings;
pub mod system;
pub mod tracks;
pub mod values;

pub use animator::Animator;
pub use clip::{AnimationChannel, AnimationClip, ChannelData, TargetProperty};
pub use component::AnimatorComponent;
pub use layer::{AnimationLayer, BlendMode, PlaybackState};
pub use settings::{AnimatorSettings, MAX_LAYERS};
pub use system::{AnimationSystem, AnimatorKey};
pub use tracks::{InterpolationMode, KeyframeSpan, KeyframeTrack, Tangents};
pub use values::Interpolatable;
