//! Bone hierarchy and pose transforms.

pub mod skeleton;
pub mod transform;

pub use skeleton::{Bone, MAX_BONES, Skeleton};
pub use transform::Transform;
