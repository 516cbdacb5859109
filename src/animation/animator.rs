use std::sync::Arc;

use glam::{Affine3A, Mat4};
use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::animation::layer::{AnimationLayer, BlendMode};
use crate::animation::settings::{AnimatorSettings, MAX_LAYERS};
use crate::scene::{Skeleton, Transform};

/// Composes up to [`MAX_LAYERS`] layers against a skeleton and produces the
/// per-bone skinning matrices for the renderer.
///
/// Layers are applied strictly in index order, each one blending onto the
/// pose accumulated by the layers before it.
///
/// Operations that name a clip or a layer report "not found" through a
/// `bool` return instead of an error.
#[derive(Debug, Clone)]
pub struct Animator {
    skeleton: Arc<Skeleton>,

    // === Per-bone buffers, sized once from the skeleton ===
    current_pose: Vec<Transform>,
    scratch_pose: Vec<Transform>,
    world_transforms: Vec<Affine3A>,
    skinning_matrices: Vec<Mat4>,

    layers: [AnimationLayer; MAX_LAYERS],
    layer_count: usize,

    clips: FxHashMap<String, Arc<AnimationClip>>,
    speed: f32,
}

impl Animator {
    #[must_use]
    pub fn new(skeleton: Arc<Skeleton>) -> Self {
        Self::with_settings(skeleton, AnimatorSettings::default())
    }

    #[must_use]
    pub fn with_settings(skeleton: Arc<Skeleton>, settings: AnimatorSettings) -> Self {
        let bone_count = skeleton.bone_count();
        let bind_pose = skeleton.bind_pose();

        let mut animator = Self {
            current_pose: bind_pose.clone(),
            scratch_pose: bind_pose,
            world_transforms: vec![Affine3A::IDENTITY; bone_count],
            skinning_matrices: vec![Mat4::IDENTITY; bone_count],
            skeleton,
            layers: std::array::from_fn(|_| AnimationLayer::new()),
            layer_count: settings.layer_count.clamp(1, MAX_LAYERS),
            clips: FxHashMap::default(),
            speed: settings.speed,
        };

        // Skinning matrices are valid (bind pose) before the first update
        animator.compute_matrices();
        animator
    }

    // ========================================================================
    // Clip registry
    // ========================================================================

    /// Registers `clip` under `name`; a later registration replaces it.
    pub fn add_clip(&mut self, name: &str, clip: Arc<AnimationClip>) {
        if self.clips.insert(name.to_string(), clip).is_some() {
            log::debug!("Animator: replaced clip registered as '{name}'");
        }
    }

    pub fn remove_clip(&mut self, name: &str) -> Option<Arc<AnimationClip>> {
        self.clips.remove(name)
    }

    #[must_use]
    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    #[must_use]
    pub fn clip(&self, name: &str) -> Option<&Arc<AnimationClip>> {
        self.clips.get(name)
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Plays `name` on layer 0.
    #[must_use]
    pub fn play(&mut self, name: &str) -> bool {
        self.play_on_layer(0, name)
    }

    /// Plays `name` on `layer`, activating the layer if needed.
    ///
    /// Returns `false` if the clip is unregistered or `layer >= MAX_LAYERS`.
    #[must_use]
    pub fn play_on_layer(&mut self, layer: usize, name: &str) -> bool {
        let Some(clip) = self.resolve_clip(name) else {
            return false;
        };
        let Some(slot) = self.activate_layer(layer) else {
            return false;
        };
        slot.play(clip);
        true
    }

    /// Crossfades layer 0 to `name` over `duration` seconds.
    #[must_use]
    pub fn cross_fade(&mut self, name: &str, duration: f32) -> bool {
        self.cross_fade_on_layer(0, name, duration)
    }

    #[must_use]
    pub fn cross_fade_on_layer(&mut self, layer: usize, name: &str, duration: f32) -> bool {
        let Some(clip) = self.resolve_clip(name) else {
            return false;
        };
        let Some(slot) = self.activate_layer(layer) else {
            return false;
        };
        slot.cross_fade(clip, duration);
        true
    }

    pub fn stop_layer(&mut self, layer: usize) -> bool {
        self.with_layer(layer, AnimationLayer::stop)
    }

    pub fn pause_layer(&mut self, layer: usize) -> bool {
        self.with_layer(layer, AnimationLayer::pause)
    }

    pub fn unpause_layer(&mut self, layer: usize) -> bool {
        self.with_layer(layer, AnimationLayer::unpause)
    }

    /// Stops every layer.
    pub fn stop_all(&mut self) {
        for layer in &mut self.layers {
            layer.stop();
        }
    }

    /// Sets a layer's weight, clamped to `[0, 1]`.
    ///
    /// Only active layers accept settings; activate one with
    /// [`play_on_layer`](Self::play_on_layer) or [`set_layer_count`](Self::set_layer_count).
    pub fn set_layer_weight(&mut self, layer: usize, weight: f32) -> bool {
        self.with_layer(layer, |slot| slot.set_weight(weight))
    }

    pub fn set_layer_speed(&mut self, layer: usize, speed: f32) -> bool {
        self.with_layer(layer, |slot| slot.set_speed(speed))
    }

    pub fn set_layer_blend_mode(&mut self, layer: usize, mode: BlendMode) -> bool {
        if mode == BlendMode::Additive {
            log::warn!("Animator: additive blending is not implemented, layer {layer} blends as override");
        }
        self.with_layer(layer, |slot| slot.blend_mode = mode)
    }

    /// Sets how many layers are composed, clamped to `1..=MAX_LAYERS`.
    pub fn set_layer_count(&mut self, count: usize) {
        self.layer_count = count.clamp(1, MAX_LAYERS);
    }

    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances every active layer by `dt` seconds and rebuilds the pose,
    /// world transforms and skinning matrices.
    pub fn update(&mut self, dt: f32) {
        let dt = dt * self.speed;

        // 1. Start from the bind pose
        self.skeleton.bind_pose_into(&mut self.current_pose);

        // 2. Accumulate layers in order
        for layer in &mut self.layers[..self.layer_count] {
            layer.update(dt);

            let weight = layer.weight();
            if weight <= 0.0 || layer.clip().is_none() {
                continue;
            }

            if layer.blend_mode == BlendMode::Override && weight >= 1.0 {
                layer.sample(&mut self.current_pose);
            } else {
                self.scratch_pose.copy_from_slice(&self.current_pose);
                layer.sample(&mut self.scratch_pose);
                for (current, sampled) in self.current_pose.iter_mut().zip(&self.scratch_pose) {
                    *current = current.blend(sampled, weight);
                }
            }
        }

        // 3-4. Hierarchy and skinning
        self.compute_matrices();
    }

    fn compute_matrices(&mut self) {
        self.skeleton
            .compute_world_transforms(&self.current_pose, &mut self.world_transforms);
        self.skeleton
            .compute_skinning_matrices(&self.world_transforms, &mut self.skinning_matrices);
    }

    // ========================================================================
    // Getters
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    /// Skinning matrices from the last [`update`](Self::update), one per bone.
    #[inline]
    #[must_use]
    pub fn skinning_matrices(&self) -> &[Mat4] {
        &self.skinning_matrices
    }

    /// Skinning matrices as raw bytes, ready for a GPU buffer upload.
    #[inline]
    #[must_use]
    pub fn skinning_matrices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.skinning_matrices)
    }

    #[inline]
    #[must_use]
    pub fn world_transforms(&self) -> &[Affine3A] {
        &self.world_transforms
    }

    #[inline]
    #[must_use]
    pub fn current_pose(&self) -> &[Transform] {
        &self.current_pose
    }

    #[must_use]
    pub fn layer(&self, layer: usize) -> Option<&AnimationLayer> {
        self.layers.get(layer)
    }

    pub fn layer_mut(&mut self, layer: usize) -> Option<&mut AnimationLayer> {
        self.layers.get_mut(layer)
    }

    #[inline]
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn is_playing(&self, layer: usize) -> bool {
        self.layers.get(layer).is_some_and(AnimationLayer::is_playing)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn resolve_clip(&self, name: &str) -> Option<Arc<AnimationClip>> {
        let clip = self.clips.get(name).cloned();
        if clip.is_none() {
            log::debug!("Animator: no clip registered as '{name}'");
        }
        clip
    }

    fn activate_layer(&mut self, layer: usize) -> Option<&mut AnimationLayer> {
        if layer >= MAX_LAYERS {
            log::debug!("Animator: layer {layer} out of range (max {MAX_LAYERS})");
            return None;
        }
        self.layer_count = self.layer_count.max(layer + 1);
        Some(&mut self.layers[layer])
    }

    /// Applies `f` to an active layer; `false` for layers outside `0..layer_count`.
    fn with_layer(&mut self, layer: usize, f: impl FnOnce(&mut AnimationLayer)) -> bool {
        match self.layers[..self.layer_count].get_mut(layer) {
            Some(slot) => {
                f(slot);
                true
            }
            None => false,
        }
    }
}
