use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationClip;
use crate::scene::{MAX_BONES, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// How a layer combines with the layers beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Replace lower layers, scaled by layer weight.
    #[default]
    Override,
    /// Add on top of lower layers. Not implemented yet: blends like
    /// [`Override`](Self::Override).
    Additive,
}

/// In-flight transition towards another clip.
#[derive(Debug, Clone)]
struct Crossfade {
    target: Arc<AnimationClip>,
    target_time: f32,
    progress: f32,
    duration: f32,
}

/// Advances `time` by `delta`, wrapping when the clip loops.
///
/// The result is always finite: an overflowing clock restarts a looping clip
/// and pins a non-looping one to its nearest end.
fn advance_clip_time(clip: &AnimationClip, time: f32, delta: f32) -> f32 {
    let duration = clip.duration();
    let time = time + delta;

    if !time.is_finite() {
        return if !clip.looping && time > 0.0 {
            duration
        } else {
            0.0
        };
    }

    if clip.looping && duration > 0.0 {
        time.rem_euclid(duration)
    } else {
        time
    }
}

/// A single playback track: one clip, its clock, and an optional crossfade.
#[derive(Debug, Clone)]
pub struct AnimationLayer {
    clip: Option<Arc<AnimationClip>>,
    time: f32,
    speed: f32,
    weight: f32,
    state: PlaybackState,
    pub blend_mode: BlendMode,

    crossfade: Option<Crossfade>,
}

impl Default for AnimationLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationLayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clip: None,
            time: 0.0,
            speed: 1.0,
            weight: 1.0,
            state: PlaybackState::Stopped,
            blend_mode: BlendMode::Override,
            crossfade: None,
        }
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Starts `clip` from the beginning, dropping any crossfade in flight.
    pub fn play(&mut self, clip: Arc<AnimationClip>) {
        self.clip = Some(clip);
        self.time = 0.0;
        self.state = PlaybackState::Playing;
        self.crossfade = None;
    }

    /// Blends from the current clip to `clip` over `duration` seconds.
    ///
    /// Without a current clip, or with a non-positive duration, this is a
    /// plain [`play`](Self::play).
    pub fn cross_fade(&mut self, clip: Arc<AnimationClip>, duration: f32) {
        if self.clip.is_none() || duration <= 0.0 {
            self.play(clip);
            return;
        }

        self.crossfade = Some(Crossfade {
            target: clip,
            target_time: 0.0,
            progress: 0.0,
            duration,
        });
        self.state = PlaybackState::Playing;
    }

    /// Stops playback, rewinds and releases the clip.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.time = 0.0;
        self.clip = None;
        self.crossfade = None;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn unpause(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Core logic: advance time.
    pub fn update(&mut self, dt: f32) {
        if self.state != PlaybackState::Playing {
            return;
        }

        let delta = dt * self.speed;
        if let Some(clip) = &self.clip {
            self.time = advance_clip_time(clip, self.time, delta);
        }

        let Some(fade) = &mut self.crossfade else {
            return;
        };

        fade.target_time = advance_clip_time(&fade.target, fade.target_time, delta);
        fade.progress += dt / fade.duration;

        // Swap once, however far progress overshoots
        if fade.progress >= 1.0
            && let Some(fade) = self.crossfade.take()
        {
            log::trace!("Crossfade to '{}' complete", fade.target.name);
            self.clip = Some(fade.target);
            self.time = fade.target_time;
        }
    }

    /// Samples the layer into `pose`.
    ///
    /// During a crossfade both clips are sampled from the incoming pose and
    /// blended by transition progress. Bones past [`MAX_BONES`] keep the
    /// current clip's values.
    pub fn sample(&self, pose: &mut [Transform]) {
        let Some(clip) = &self.clip else {
            return;
        };

        let Some(fade) = &self.crossfade else {
            clip.sample(self.time, pose);
            return;
        };

        // Seed the target buffer before the current clip overwrites `pose`,
        // so the target sample never sees current-clip values.
        let count = pose.len().min(MAX_BONES);
        let mut target_pose = [Transform::IDENTITY; MAX_BONES];
        target_pose[..count].copy_from_slice(&pose[..count]);

        clip.sample(self.time, pose);
        fade.target.sample(fade.target_time, &mut target_pose[..count]);

        let t = fade.progress.clamp(0.0, 1.0);
        for (current, target) in pose.iter_mut().zip(&target_pose[..count]) {
            *current = current.blend(target, t);
        }
    }

    // ========================================================================
    // Getters & Setters
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[inline]
    #[must_use]
    pub fn is_crossfading(&self) -> bool {
        self.crossfade.is_some()
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    #[must_use]
    pub fn target_clip(&self) -> Option<&Arc<AnimationClip>> {
        self.crossfade.as_ref().map(|fade| &fade.target)
    }

    #[must_use]
    pub fn target_time(&self) -> Option<f32> {
        self.crossfade.as_ref().map(|fade| fade.target_time)
    }

    /// Crossfade progress in `[0, 1)`, zero when no crossfade is running.
    #[must_use]
    pub fn transition_progress(&self) -> f32 {
        self.crossfade.as_ref().map_or(0.0, |fade| fade.progress)
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Seeks the current clip.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the blend weight, clamped to `[0, 1]`.
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight.clamp(0.0, 1.0);
    }

    /// True once a non-looping clip has played to its end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.clip
            .as_ref()
            .is_some_and(|clip| !clip.looping && self.time >= clip.duration())
    }
}
