//! Penetration depth bookkeeping for the SAT solvers

use crate::foundation::math::{down, Vec3};
use crate::physics::VERTICAL_AXIS_EPSILON;

/// Scalar projection of a vertex set onto an axis
#[derive(Debug, Clone, Copy)]
pub struct ProjectionRange {
    /// Smallest projection
    pub min: f32,
    /// Largest projection
    pub max: f32,
}

impl ProjectionRange {
    /// Project a set of vertices onto a unit axis
    pub fn project<'a, I>(axis: Vec3, vertices: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for vertex in vertices {
            let p = axis.dot(vertex);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Signed 1-D overlap of `self` against `other` along the projection
    /// axis, or `None` when the ranges are disjoint.
    ///
    /// The sign encodes the escape direction: moving `self` by
    /// `axis * amount` clears the overlap. When one range is fully nested
    /// in the other, the exit is taken through whichever boundary produces
    /// the smaller escape (closest-exit); this tie-break is load-bearing
    /// for anti-tunneling on deeply nested boxes and must not change.
    pub fn overlap_amount(&self, other: &ProjectionRange) -> Option<f32> {
        if self.max < other.min || other.max < self.min {
            return None;
        }
        let push_positive = other.max - self.min;
        let push_negative = self.max - other.min;
        if push_positive < push_negative {
            Some(push_positive)
        } else {
            Some(-push_negative)
        }
    }
}

/// Minimum-penetration result of a SAT or sphere-triangle test
#[derive(Debug, Clone, Copy)]
pub struct CollisionDepth {
    /// Signed penetration amount; `axis * amount` is the escape displacement
    pub amount: f32,
    /// Unit escape axis
    pub axis: Vec3,
    /// Pure-Y displacement that would clear the penetration, when one exists
    pub vertical_escape: Option<f32>,
}

impl CollisionDepth {
    /// Build a depth entry, deriving the vertical escape from the axis:
    /// `amount / (axis . -Y)`, undefined for near-horizontal axes.
    pub fn from_axis(amount: f32, axis: Vec3) -> Self {
        let denom = axis.dot(&down());
        let vertical_escape = if denom.abs() < VERTICAL_AXIS_EPSILON {
            None
        } else {
            Some(amount / denom)
        };
        Self {
            amount,
            axis,
            vertical_escape,
        }
    }

    /// Build a depth entry with an explicitly computed vertical escape
    pub fn with_vertical(amount: f32, axis: Vec3, vertical_escape: Option<f32>) -> Self {
        Self {
            amount,
            axis,
            vertical_escape,
        }
    }

    /// Escape displacement along the separating axis
    pub fn displacement(&self) -> Vec3 {
        self.axis * self.amount
    }

    /// Keep whichever entry has the smaller penetration magnitude.
    ///
    /// This is the SAT contract: the true penetration depth is the minimum
    /// over all candidate axes that still show overlap.
    pub fn apply_if_smaller(best: &mut Option<CollisionDepth>, candidate: CollisionDepth) {
        match best {
            Some(current) if current.amount.abs() <= candidate.amount.abs() => {}
            _ => *best = Some(candidate),
        }
    }
}
