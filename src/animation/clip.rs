use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::scene::Transform;

/// Transform component a channel writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetProperty {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
    Scale,       // Maps to transform.scale
}

/// Keyframe data tagged by the property it animates.
#[derive(Debug, Clone)]
pub enum ChannelData {
    Translation(KeyframeTrack<Vec3>),
    Rotation(KeyframeTrack<Quat>),
    Scale(KeyframeTrack<Vec3>),
}

/// Keyframes driving one property of one bone.
#[derive(Debug, Clone)]
pub struct AnimationChannel {
    pub bone_index: usize,
    pub data: ChannelData,
}

impl AnimationChannel {
    #[must_use]
    pub fn translation(bone_index: usize, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            bone_index,
            data: ChannelData::Translation(track),
        }
    }

    #[must_use]
    pub fn rotation(bone_index: usize, track: KeyframeTrack<Quat>) -> Self {
        Self {
            bone_index,
            data: ChannelData::Rotation(track),
        }
    }

    #[must_use]
    pub fn scale(bone_index: usize, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            bone_index,
            data: ChannelData::Scale(track),
        }
    }

    #[must_use]
    pub fn target(&self) -> TargetProperty {
        match self.data {
            ChannelData::Translation(_) => TargetProperty::Translation,
            ChannelData::Rotation(_) => TargetProperty::Rotation,
            ChannelData::Scale(_) => TargetProperty::Scale,
        }
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        match &self.data {
            ChannelData::Translation(track) | ChannelData::Scale(track) => track.interpolation(),
            ChannelData::Rotation(track) => track.interpolation(),
        }
    }

    /// Time of the final keyframe, `None` if the channel has no keys.
    #[must_use]
    pub fn last_time(&self) -> Option<f32> {
        match &self.data {
            ChannelData::Translation(track) | ChannelData::Scale(track) => track.last_time(),
            ChannelData::Rotation(track) => track.last_time(),
        }
    }

    /// Writes the targeted property of `out` at `time`.
    ///
    /// The other two properties are left untouched, so `out` must already hold
    /// a sensible pose (normally the bind pose).
    pub fn sample(&self, time: f32, out: &mut Transform) {
        match &self.data {
            ChannelData::Translation(track) => {
                if let Some(position) = track.sample(time) {
                    out.position = position;
                }
            }
            ChannelData::Rotation(track) => {
                if let Some(rotation) = track.sample(time) {
                    out.rotation = rotation;
                }
            }
            ChannelData::Scale(track) => {
                if let Some(scale) = track.sample(time) {
                    out.scale = scale;
                }
            }
        }
    }
}

/// A named set of channels, read-only once built.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    duration: f32,
    pub looping: bool,
    pub channels: Vec<AnimationChannel>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: &str, channels: Vec<AnimationChannel>, looping: bool) -> Self {
        let duration = Self::compute_duration(&channels);
        Self {
            name: name.to_string(),
            duration,
            looping,
            channels,
        }
    }

    /// Length of the clip, derived from its channels at construction.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Max last-keyframe time across channels; zero when nothing is keyed.
    #[must_use]
    pub fn compute_duration(channels: &[AnimationChannel]) -> f32 {
        channels
            .iter()
            .filter_map(AnimationChannel::last_time)
            .fold(0.0_f32, f32::max)
    }

    /// Maps playback time onto the clip's timeline.
    ///
    /// Looping clips wrap, others clamp to `[0, duration]`.
    #[must_use]
    pub fn local_time(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        if self.looping {
            time.rem_euclid(self.duration)
        } else {
            time.clamp(0.0, self.duration)
        }
    }

    /// Samples every channel into `pose`, indexed by bone.
    ///
    /// Channels targeting a bone past the end of `pose` are skipped.
    pub fn sample(&self, time: f32, pose: &mut [Transform]) {
        let time = self.local_time(time);

        for channel in &self.channels {
            if let Some(out) = pose.get_mut(channel.bone_index) {
                channel.sample(time, out);
            }
        }
    }
}
