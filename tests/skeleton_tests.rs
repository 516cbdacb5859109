//! Skeleton Tests
//!
//! Tests for:
//! - Bone definition and validation (index range, parent ordering, bone cap)
//! - Root bone discovery and name lookup
//! - World transform composition down the hierarchy
//! - Skinning matrices and inverse-bind derivation

use glam::{Affine3A, Mat4, Quat, Vec3};

use bonework::errors::AnimationError;
use bonework::scene::{MAX_BONES, Skeleton, Transform};

const EPSILON: f32 = 1e-5;

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

/// root -> child1 (+X 1) -> child2 (+Y 1)
fn chain_skeleton() -> Skeleton {
    let mut skeleton = Skeleton::new("chain", 3).unwrap();
    skeleton
        .set_bone(0, "root", None, Transform::IDENTITY)
        .unwrap();
    skeleton
        .set_bone(1, "child1", Some(0), Transform::from_translation(Vec3::X))
        .unwrap();
    skeleton
        .set_bone(2, "child2", Some(1), Transform::from_translation(Vec3::Y))
        .unwrap();
    skeleton.compute_root_bones();
    skeleton
}

// ============================================================================
// Construction & Validation
// ============================================================================

#[test]
fn set_bone_out_of_bounds() {
    let mut skeleton = Skeleton::new("s", 2).unwrap();
    let err = skeleton
        .set_bone(2, "extra", None, Transform::IDENTITY)
        .unwrap_err();
    assert_eq!(
        err,
        AnimationError::BoneIndexOutOfBounds {
            index: 2,
            bone_count: 2
        }
    );
}

#[test]
fn set_bone_rejects_parent_after_child() {
    let mut skeleton = Skeleton::new("s", 3).unwrap();
    let err = skeleton
        .set_bone(1, "a", Some(2), Transform::IDENTITY)
        .unwrap_err();
    assert_eq!(err, AnimationError::InvalidParent { bone: 1, parent: 2 });

    // A bone cannot parent itself either
    let err = skeleton
        .set_bone(1, "a", Some(1), Transform::IDENTITY)
        .unwrap_err();
    assert_eq!(err, AnimationError::InvalidParent { bone: 1, parent: 1 });
}

#[test]
fn bone_count_is_capped() {
    assert!(Skeleton::new("max", MAX_BONES).is_ok());
    let err = Skeleton::new("too_big", MAX_BONES + 1).unwrap_err();
    assert_eq!(
        err,
        AnimationError::TooManyBones {
            count: MAX_BONES + 1,
            max: MAX_BONES
        }
    );
}

#[test]
fn inverse_bind_count_must_match() {
    let mut skeleton = Skeleton::new("s", 2).unwrap();
    let err = skeleton
        .set_inverse_bind_matrices(vec![Affine3A::IDENTITY])
        .unwrap_err();
    assert_eq!(
        err,
        AnimationError::InverseBindCountMismatch {
            expected: 2,
            actual: 1
        }
    );
    assert!(
        skeleton
            .set_inverse_bind_matrix(5, Affine3A::IDENTITY)
            .is_err()
    );
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn find_bone_by_name() {
    let skeleton = chain_skeleton();
    assert_eq!(skeleton.find_bone("root"), Some(0));
    assert_eq!(skeleton.find_bone("child2"), Some(2));
    assert_eq!(skeleton.find_bone("missing"), None);
    assert_eq!(skeleton.bone(1).unwrap().parent, Some(0));
}

#[test]
fn renaming_a_bone_drops_old_name() {
    let mut skeleton = chain_skeleton();
    skeleton
        .set_bone(2, "hand", Some(1), Transform::IDENTITY)
        .unwrap();
    assert_eq!(skeleton.find_bone("hand"), Some(2));
    assert_eq!(skeleton.find_bone("child2"), None);
}

#[test]
fn compute_root_bones_finds_every_root() {
    let mut skeleton = Skeleton::new("two_roots", 4).unwrap();
    skeleton.set_bone(0, "a", None, Transform::IDENTITY).unwrap();
    skeleton.set_bone(1, "a1", Some(0), Transform::IDENTITY).unwrap();
    skeleton.set_bone(2, "b", None, Transform::IDENTITY).unwrap();
    skeleton.set_bone(3, "b1", Some(2), Transform::IDENTITY).unwrap();
    skeleton.compute_root_bones();
    assert_eq!(skeleton.root_bones(), &[0, 2]);
}

// ============================================================================
// Hierarchy Math
// ============================================================================

#[test]
fn chain_world_transforms() {
    let skeleton = chain_skeleton();
    let pose = skeleton.bind_pose();
    let mut world = vec![Affine3A::IDENTITY; skeleton.bone_count()];
    skeleton.compute_world_transforms(&pose, &mut world);

    let child2: Vec3 = world[2].translation.into();
    assert!(approx_vec3(child2, Vec3::new(1.0, 1.0, 0.0)), "got {child2}");
    let child1: Vec3 = world[1].translation.into();
    assert!(approx_vec3(child1, Vec3::X), "got {child1}");
}

#[test]
fn parent_rotation_carries_children() {
    let skeleton = chain_skeleton();
    let mut pose = skeleton.bind_pose();
    // Rotating the root 90 degrees about Z turns +X into +Y and +Y into -X
    pose[0].rotation = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);

    let mut world = vec![Affine3A::IDENTITY; 3];
    skeleton.compute_world_transforms(&pose, &mut world);

    let child2: Vec3 = world[2].translation.into();
    assert!(approx_vec3(child2, Vec3::new(-1.0, 1.0, 0.0)), "got {child2}");
}

#[test]
fn bind_pose_into_copies_local_binds() {
    let skeleton = chain_skeleton();
    let mut pose = vec![Transform::from_translation(Vec3::splat(9.0)); 3];
    skeleton.bind_pose_into(&mut pose);
    assert_eq!(pose[0], Transform::IDENTITY);
    assert_eq!(pose[1].position, Vec3::X);
    assert_eq!(pose[2].position, Vec3::Y);
}

#[test]
fn skinning_is_world_times_inverse_bind() {
    let mut skeleton = Skeleton::new("one", 1).unwrap();
    skeleton.set_bone(0, "b", None, Transform::IDENTITY).unwrap();
    let inverse_bind = Affine3A::from_translation(Vec3::new(0.0, -2.0, 0.0));
    skeleton.set_inverse_bind_matrix(0, inverse_bind).unwrap();

    let world = [Affine3A::from_translation(Vec3::new(3.0, 0.0, 0.0))];
    let mut skinning = [Mat4::ZERO];
    skeleton.compute_skinning_matrices(&world, &mut skinning);

    let expected = Mat4::from(world[0] * inverse_bind);
    assert!(skinning[0].abs_diff_eq(expected, EPSILON));
}

#[test]
fn derived_inverse_binds_give_identity_skinning_at_bind_pose() {
    let mut skeleton = chain_skeleton();
    skeleton.compute_inverse_bind_matrices();

    let pose = skeleton.bind_pose();
    let mut world = vec![Affine3A::IDENTITY; 3];
    let mut skinning = vec![Mat4::ZERO; 3];
    skeleton.compute_world_transforms(&pose, &mut world);
    skeleton.compute_skinning_matrices(&world, &mut skinning);

    for (i, m) in skinning.iter().enumerate() {
        assert!(m.abs_diff_eq(Mat4::IDENTITY, EPSILON), "bone {i}: {m}");
    }
}
