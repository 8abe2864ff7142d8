use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{GeometryError, ParseError, Result};
use crate::geometry::{Plane3D, Point3D, UnitVector3D};
use crate::math::{parse, PARALLEL_TOLERANCE};

use super::{Curve, CurveDomain, LineSegment3D};

/// An infinite line through two distinct points.
///
/// The points fix the line's position and orientation; operations that
/// take a `must_be_on_segment` flag can also treat it as the bounded
/// stretch between them. Parametric form: `P(t) = start_point + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "crate::geometry::repr::Endpoints", into = "crate::geometry::repr::Endpoints")
)]
pub struct Line3D {
    start_point: Point3D,
    end_point: Point3D,
    direction: UnitVector3D,
}

impl Line3D {
    /// Creates a line through `start_point` and `end_point`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoincidentPoints`] if the points are equal,
    /// or [`GeometryError::ZeroVector`] if they are distinct but closer than
    /// `f64::EPSILON`. The bound is absolute, not relative to the coordinates.
    pub fn new(start_point: Point3D, end_point: Point3D) -> Result<Self> {
        if start_point == end_point {
            return Err(GeometryError::CoincidentPoints.into());
        }
        let direction = start_point.vector_to(&end_point).normalize()?;
        Ok(Self {
            start_point,
            end_point,
            direction,
        })
    }

    #[must_use]
    pub fn start_point(&self) -> &Point3D {
        &self.start_point
    }

    #[must_use]
    pub fn end_point(&self) -> &Point3D {
        &self.end_point
    }

    /// Returns the distance between the two defining points.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start_point.distance_to(&self.end_point)
    }

    /// Returns the unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> &UnitVector3D {
        &self.direction
    }

    /// Returns the point on this line closest to `p`.
    ///
    /// With `must_be_on_segment` the result is clamped between the two
    /// defining points.
    #[must_use]
    pub fn closest_point_to(&self, p: &Point3D, must_be_on_segment: bool) -> Point3D {
        let along = self.start_point.vector_to(p).dot_product(&self.direction.to_vector());
        let t = if must_be_on_segment {
            along.clamp(0.0, self.length())
        } else {
            along
        };
        self.start_point + self.direction * t
    }

    /// Returns the pair of closest points `(on self, on other)`.
    ///
    /// Solves the normal equations of the two lines for the parameters of
    /// the closest pair. Parallel lines have no unique pair; the start point
    /// of `self` and its projection onto `other` are returned instead.
    ///
    /// With `must_be_on_segments` the unbounded answer is kept only if both
    /// points lie between their line's defining points. Otherwise every
    /// endpoint is projected onto the other segment and the closest of the
    /// four pairs wins (first one on ties).
    #[must_use]
    pub fn closest_points_between(
        &self,
        other: &Line3D,
        must_be_on_segments: bool,
    ) -> (Point3D, Point3D) {
        let unbounded = self.closest_points_on_infinite_lines(other);
        if !must_be_on_segments || (self.spans(&unbounded.0) && other.spans(&unbounded.1)) {
            return unbounded;
        }

        trace!("closest points fall outside a segment, testing endpoints");
        let candidates = [
            (self.start_point, other.closest_point_to(&self.start_point, true)),
            (self.end_point, other.closest_point_to(&self.end_point, true)),
            (self.closest_point_to(&other.start_point, true), other.start_point),
            (self.closest_point_to(&other.end_point, true), other.end_point),
        ];

        let mut best = candidates[0];
        let mut best_distance = best.0.distance_to(&best.1);
        for candidate in &candidates[1..] {
            let distance = candidate.0.distance_to(&candidate.1);
            if distance < best_distance {
                best = *candidate;
                best_distance = distance;
            }
        }
        best
    }

    fn closest_points_on_infinite_lines(&self, other: &Line3D) -> (Point3D, Point3D) {
        let parallel = (self.start_point, other.closest_point_to(&self.start_point, false));
        if self.is_parallel_to(other, PARALLEL_TOLERANCE) {
            trace!("lines are parallel, projecting start point");
            return parallel;
        }

        let u = self.direction.to_vector();
        let v = other.direction.to_vector();
        let w0 = other.start_point.vector_to(&self.start_point);

        let a = u.dot_product(&u);
        let b = u.dot_product(&v);
        let c = v.dot_product(&v);
        let d = u.dot_product(&w0);
        let e = v.dot_product(&w0);

        let denominator = a * c - b * b;
        if denominator <= f64::EPSILON {
            trace!(denominator, "near-parallel lines, projecting start point");
            return parallel;
        }

        let sc = (b * e - c * d) / denominator;
        let tc = (a * e - b * d) / denominator;
        (
            self.start_point + self.direction * sc,
            other.start_point + other.direction * tc,
        )
    }

    /// Returns true if `p` is no farther than the length from either defining point.
    fn spans(&self, p: &Point3D) -> bool {
        let length = self.length();
        p.distance_to(&self.start_point) <= length && p.distance_to(&self.end_point) <= length
    }

    /// Returns true if `|1 - |u·v|| <= tolerance` for the two directions.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Line3D, tolerance: f64) -> bool {
        self.direction.is_parallel_to(&other.direction, tolerance)
    }

    /// Returns true if the lines are within `angle_tolerance` radians of parallel,
    /// in either orientation.
    #[must_use]
    pub fn is_parallel_to_within_angle(&self, other: &Line3D, angle_tolerance: f64) -> bool {
        self.direction
            .is_parallel_to_within_angle(&other.direction, angle_tolerance)
    }

    /// Returns the shortest line from this (infinite) line to `p`.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` lies on this line.
    pub fn line_to(&self, p: &Point3D) -> Result<Line3D> {
        Line3D::new(self.closest_point_to(p, false), *p)
    }

    /// Projects this line onto `plane` along the plane normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is perpendicular to the plane.
    pub fn project_on(&self, plane: &Plane3D) -> Result<Line3D> {
        plane.project_line(self)
    }

    /// See [`Plane3D::intersection_with_line`].
    ///
    /// # Errors
    ///
    /// Returns an error if the line lies in the plane.
    pub fn intersection_with(&self, plane: &Plane3D, tolerance: f64) -> Result<Option<Point3D>> {
        plane.intersection_with_line(self, tolerance)
    }

    /// Compares both defining points within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &Line3D, tolerance: f64) -> bool {
        self.start_point.equals(&other.start_point, tolerance)
            && self.end_point.equals(&other.end_point, tolerance)
    }
}

impl Curve for Line3D {
    fn evaluate(&self, t: f64) -> Result<Point3D> {
        Ok(self.start_point + self.direction * t)
    }

    fn tangent(&self, _t: f64) -> Result<UnitVector3D> {
        Ok(self.direction)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl From<LineSegment3D> for Line3D {
    fn from(segment: LineSegment3D) -> Self {
        Self {
            start_point: *segment.start_point(),
            end_point: *segment.end_point(),
            direction: *segment.direction(),
        }
    }
}

impl fmt::Display for Line3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.start_point, self.end_point)
    }
}

impl FromStr for Line3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let groups = parse::tuples::<3>(s, 2)?;
        let [sx, sy, sz] = groups[0];
        let [ex, ey, ez] = groups[1];
        Self::new(Point3D::new(sx, sy, sz), Point3D::new(ex, ey, ez))
            .map_err(|e| ParseError::malformed(s, e.to_string()))
    }
}
