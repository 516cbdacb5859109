use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;
use crate::errors::{AnimationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    Step,
    #[default]
    Linear,
    CubicSpline,
}

/// Per-keyframe tangents for cubic-spline tracks.
#[derive(Debug, Clone)]
pub struct Tangents<T> {
    pub in_tangents: Vec<T>,
    pub out_tangents: Vec<T>,
}

/// Location of a sample time between two keyframes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeSpan {
    pub prev: usize,
    pub next: usize,
    /// Normalized position between `prev` and `next`, in `[0, 1)`.
    pub t: f32,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    tangents: Option<Tangents<T>>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track, checking that `times` is strictly ascending and that
    /// `values` has one entry per time.
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Result<Self> {
        if values.len() != times.len() {
            return Err(AnimationError::KeyframeCountMismatch {
                what: "values",
                times: times.len(),
                values: values.len(),
            });
        }
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AnimationError::KeyframesNotAscending { index: index + 1 });
        }

        Ok(Self {
            times,
            values,
            tangents: None,
            interpolation,
        })
    }

    /// Builds a cubic-spline track with explicit in/out tangents.
    pub fn with_tangents(
        times: Vec<f32>,
        values: Vec<T>,
        in_tangents: Vec<T>,
        out_tangents: Vec<T>,
    ) -> Result<Self> {
        for (what, len) in [
            ("in tangents", in_tangents.len()),
            ("out tangents", out_tangents.len()),
        ] {
            if len != times.len() {
                return Err(AnimationError::KeyframeCountMismatch {
                    what,
                    times: times.len(),
                    values: len,
                });
            }
        }

        let mut track = Self::new(times, values, InterpolationMode::CubicSpline)?;
        track.tangents = Some(Tangents {
            in_tangents,
            out_tangents,
        });
        Ok(track)
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn tangents(&self) -> Option<&Tangents<T>> {
        self.tangents.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn last_time(&self) -> Option<f32> {
        self.times.last().copied()
    }

    /// Finds the keyframe pair surrounding `time`.
    ///
    /// Times at or before the first key pin to key 0, times at or after the
    /// last key pin to the last key; both cases report `t = 0`. A NaN time
    /// pins to key 0.
    #[must_use]
    pub fn locate(&self, time: f32) -> Option<KeyframeSpan> {
        let len = self.times.len();
        if len == 0 {
            return None;
        }

        let last = len - 1;
        // NaN pins to the first key
        if len == 1 || time.is_nan() || time <= self.times[0] {
            return Some(KeyframeSpan {
                prev: 0,
                next: 0,
                t: 0.0,
            });
        }
        if time >= self.times[last] {
            return Some(KeyframeSpan {
                prev: last,
                next: last,
                t: 0.0,
            });
        }

        // partition_point finds the first index where t > time, i.e. next
        let next = self.times.partition_point(|&t| t <= time);
        let prev = next - 1;
        let t0 = self.times[prev];
        let t1 = self.times[next];

        Some(KeyframeSpan {
            prev,
            next,
            t: ((time - t0) / (t1 - t0)).clamp(0.0, 1.0),
        })
    }

    /// Samples the track at `time`. Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        let span = self.locate(time)?;
        let v0 = self.values[span.prev];

        if span.prev == span.next {
            return Some(v0);
        }
        let v1 = self.values[span.next];

        let value = match (self.interpolation, &self.tangents) {
            (InterpolationMode::Step, _) => v0,
            (InterpolationMode::CubicSpline, Some(tangents)) => {
                let dt = self.times[span.next] - self.times[span.prev];
                T::interpolate_cubic(
                    v0,
                    tangents.out_tangents[span.prev],
                    tangents.in_tangents[span.next],
                    v1,
                    span.t,
                    dt,
                )
            }
            // Cubic tracks without tangents degrade to linear
            (InterpolationMode::Linear | InterpolationMode::CubicSpline, _) => {
                T::interpolate_linear(v0, v1, span.t)
            }
        };

        Some(value)
    }
}
