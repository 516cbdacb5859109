//! Error Types
//!
//! This module defines the error types used throughout the animation core.
//!
//! # Overview
//!
//! [`AnimationError`] covers programmer-input failures detected while building
//! skeletons and keyframe tracks:
//! - Bone indices outside the skeleton
//! - Hierarchies that violate parent-before-child ordering
//! - Keyframe arrays with mismatched lengths or unsorted times
//!
//! Routine lookups (an unregistered clip name, a layer index past the end)
//! are not errors: the [`Animator`](crate::animation::Animator) reports them
//! with a `bool` return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bonework::errors::{AnimationError, Result};
//!
//! fn build() -> Result<()> {
//!     let mut skeleton = Skeleton::new("hero", 2)?;
//!     skeleton.set_bone(1, "spine", Some(0), Transform::IDENTITY)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the animation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    // ========================================================================
    // Skeleton Errors
    // ========================================================================
    /// A bone index does not address a bone of the skeleton.
    #[error("Bone index out of bounds: {index} (bone count: {bone_count})")]
    BoneIndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Number of bones in the skeleton
        bone_count: usize,
    },

    /// The skeleton exceeds the number of bones the skinning shader supports.
    #[error("Too many bones: {count} (maximum: {max})")]
    TooManyBones { count: usize, max: usize },

    /// A bone's parent does not precede it in storage order.
    #[error("Bone {bone} has invalid parent {parent}: parents must precede their children")]
    InvalidParent { bone: usize, parent: usize },

    /// Inverse-bind matrices do not line up with the bone array.
    #[error("Inverse bind matrix count mismatch: expected {expected}, got {actual}")]
    InverseBindCountMismatch { expected: usize, actual: usize },

    // ========================================================================
    // Keyframe Errors
    // ========================================================================
    /// A value or tangent array does not match the keyframe time array.
    #[error("Keyframe count mismatch: {times} times but {values} {what}")]
    KeyframeCountMismatch {
        /// Which array disagrees ("values", "in tangents", ...)
        what: &'static str,
        times: usize,
        values: usize,
    },

    /// Keyframe times are not strictly ascending.
    #[error("Keyframe times must be strictly ascending (violated at index {index})")]
    KeyframesNotAscending { index: usize },
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
