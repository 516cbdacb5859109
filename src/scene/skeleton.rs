use glam::{Affine3A, Mat4};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::errors::{AnimationError, Result};
use crate::scene::Transform;

/// Maximum number of bones a skeleton may hold.
///
/// Matches the size of the joint matrix array in the skinning shader.
pub const MAX_BONES: usize = 128;

#[derive(Debug, Clone, Default)]
pub struct Bone {
    pub name: String,
    /// Parent bone index, `None` for roots. Always smaller than this bone's own index.
    pub parent: Option<usize>,
    /// Rest-pose local transform.
    pub local_bind: Transform,
}

impl Bone {
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Bone hierarchy stored as a flat array in topological order.
///
/// Every parent precedes its children, so world transforms are computed in a
/// single forward pass. A skeleton is built once at load time and then shared
/// read-only (usually behind an `Arc`) by every animator that drives it.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub name: String,

    // === Core Data ===
    // bones[i] corresponds to joints[i] in the shader
    bones: Vec<Bone>,
    name_to_index: FxHashMap<String, usize>,

    // Inverse Bind Matrices
    // Purpose: transforms vertices from Mesh space to bone local space
    inverse_bind_matrices: Vec<Affine3A>,

    root_bones: SmallVec<[usize; 4]>,
}

impl Skeleton {
    /// Creates a skeleton of `bone_count` unnamed root bones at identity.
    ///
    /// Bones are then filled in with [`set_bone`](Self::set_bone).
    pub fn new(name: &str, bone_count: usize) -> Result<Self> {
        if bone_count > MAX_BONES {
            return Err(AnimationError::TooManyBones {
                count: bone_count,
                max: MAX_BONES,
            });
        }

        log::debug!("Creating skeleton '{name}' with {bone_count} bones");

        Ok(Self {
            name: name.to_string(),
            bones: vec![Bone::default(); bone_count],
            name_to_index: FxHashMap::default(),
            inverse_bind_matrices: vec![Affine3A::IDENTITY; bone_count],
            root_bones: (0..bone_count).collect(),
        })
    }

    /// Defines bone `index`.
    ///
    /// Fails if `index` is out of range, or if `parent` does not precede
    /// `index` (the single-pass world transform computation relies on it).
    pub fn set_bone(
        &mut self,
        index: usize,
        name: &str,
        parent: Option<usize>,
        local_bind: Transform,
    ) -> Result<()> {
        let bone_count = self.bones.len();
        if index >= bone_count {
            return Err(AnimationError::BoneIndexOutOfBounds { index, bone_count });
        }
        if let Some(parent) = parent
            && parent >= index
        {
            return Err(AnimationError::InvalidParent {
                bone: index,
                parent,
            });
        }

        let bone = &mut self.bones[index];
        if !bone.name.is_empty() && self.name_to_index.get(&bone.name) == Some(&index) {
            self.name_to_index.remove(&bone.name);
        }

        bone.name = name.to_string();
        bone.parent = parent;
        bone.local_bind = local_bind;
        self.name_to_index.insert(name.to_string(), index);

        Ok(())
    }

    pub fn set_inverse_bind_matrix(&mut self, index: usize, matrix: Affine3A) -> Result<()> {
        let bone_count = self.bones.len();
        let slot = self
            .inverse_bind_matrices
            .get_mut(index)
            .ok_or(AnimationError::BoneIndexOutOfBounds { index, bone_count })?;
        *slot = matrix;
        Ok(())
    }

    /// Replaces all inverse-bind matrices; the length must equal the bone count.
    pub fn set_inverse_bind_matrices(&mut self, matrices: Vec<Affine3A>) -> Result<()> {
        if matrices.len() != self.bones.len() {
            return Err(AnimationError::InverseBindCountMismatch {
                expected: self.bones.len(),
                actual: matrices.len(),
            });
        }
        self.inverse_bind_matrices = matrices;
        Ok(())
    }

    /// Derives inverse-bind matrices from the bind pose.
    ///
    /// For assets that ship without explicit inverse-bind data. Afterwards the
    /// bind pose yields identity skinning matrices.
    pub fn compute_inverse_bind_matrices(&mut self) {
        let bind_pose = self.bind_pose();
        let mut world = vec![Affine3A::IDENTITY; self.bones.len()];
        self.compute_world_transforms(&bind_pose, &mut world);

        for (inverse_bind, world) in self.inverse_bind_matrices.iter_mut().zip(&world) {
            *inverse_bind = world.inverse();
        }
    }

    /// Rebuilds the list of root bone indices.
    pub fn compute_root_bones(&mut self) {
        self.root_bones.clear();
        self.root_bones.extend(
            self.bones
                .iter()
                .enumerate()
                .filter(|(_, bone)| bone.is_root())
                .map(|(i, _)| i),
        );
    }

    // ========================================================================
    // Getters
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Affine3A] {
        &self.inverse_bind_matrices
    }

    /// Root bone indices as of the last [`compute_root_bones`](Self::compute_root_bones).
    #[inline]
    #[must_use]
    pub fn root_bones(&self) -> &[usize] {
        &self.root_bones
    }

    // ========================================================================
    // Pose math
    // ========================================================================

    /// Copies the bind pose into `out_pose`.
    pub fn bind_pose_into(&self, out_pose: &mut [Transform]) {
        for (out, bone) in out_pose.iter_mut().zip(&self.bones) {
            *out = bone.local_bind;
        }
    }

    #[must_use]
    pub fn bind_pose(&self) -> Vec<Transform> {
        self.bones.iter().map(|bone| bone.local_bind).collect()
    }

    /// Composes local transforms down the hierarchy.
    ///
    /// One pass in storage order: roots take their local matrix, every other
    /// bone is `world[parent] * local`.
    pub fn compute_world_transforms(&self, local_pose: &[Transform], out_world: &mut [Affine3A]) {
        let count = self.bones.len().min(local_pose.len()).min(out_world.len());

        for i in 0..count {
            let local = local_pose[i].to_affine();
            out_world[i] = match self.bones[i].parent {
                Some(parent) => out_world[parent] * local,
                None => local,
            };
        }
    }

    /// `skinning[i] = world[i] * inverse_bind[i]`.
    pub fn compute_skinning_matrices(&self, world_transforms: &[Affine3A], out_skinning: &mut [Mat4]) {
        for ((out, world), inverse_bind) in out_skinning
            .iter_mut()
            .zip(world_transforms)
            .zip(&self.inverse_bind_matrices)
        {
            *out = Mat4::from(*world * *inverse_bind);
        }
    }
}
