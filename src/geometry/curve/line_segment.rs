use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, ParseError, Result};
use crate::geometry::{Plane3D, Point3D, UnitVector3D, Vector3D};
use crate::math::parse;

use super::{Curve, CurveDomain, Line3D};

/// A bounded straight segment between two distinct points.
///
/// Parametric form: `P(t) = start_point + t * direction` for `t` in `[0, length]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "crate::geometry::repr::Endpoints", into = "crate::geometry::repr::Endpoints")
)]
pub struct LineSegment3D {
    start_point: Point3D,
    end_point: Point3D,
    direction: UnitVector3D,
}

impl LineSegment3D {
    /// Creates a segment from `start_point` to `end_point`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoincidentPoints`] if the points are equal,
    /// or [`GeometryError::ZeroVector`] if they are distinct but closer than
    /// `f64::EPSILON`.
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

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start_point.distance_to(&self.end_point)
    }

    #[must_use]
    pub fn direction(&self) -> &UnitVector3D {
        &self.direction
    }

    #[must_use]
    pub fn mid_point(&self) -> Point3D {
        Point3D::mid_point(&self.start_point, &self.end_point)
    }

    /// Returns the point on the segment closest to `p`.
    #[must_use]
    pub fn closest_point_to(&self, p: &Point3D) -> Point3D {
        Line3D::from(*self).closest_point_to(p, true)
    }

    /// Returns the closest pair of points `(on self, on other)`, both on their segments.
    #[must_use]
    pub fn closest_points_between(&self, other: &LineSegment3D) -> (Point3D, Point3D) {
        Line3D::from(*self).closest_points_between(&Line3D::from(*other), true)
    }

    /// Returns the shortest segment connecting this segment to `other`.
    ///
    /// Returns `None` when the segments touch, since the connecting segment
    /// would have zero length.
    #[must_use]
    pub fn try_shortest_line_to(&self, other: &LineSegment3D) -> Option<LineSegment3D> {
        let (a, b) = self.closest_points_between(other);
        LineSegment3D::new(a, b).ok()
    }

    /// Returns the shortest segment from this segment to `p`.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` lies on the segment.
    pub fn shortest_line_to(&self, p: &Point3D) -> Result<LineSegment3D> {
        LineSegment3D::new(self.closest_point_to(p), *p)
    }

    /// Returns this segment moved by `offset`.
    #[must_use]
    pub fn translate_by(&self, offset: &Vector3D) -> LineSegment3D {
        Self {
            start_point: self.start_point + *offset,
            end_point: self.end_point + *offset,
            direction: self.direction,
        }
    }

    #[must_use]
    pub fn is_parallel_to(&self, other: &LineSegment3D, tolerance: f64) -> bool {
        self.direction.is_parallel_to(&other.direction, tolerance)
    }

    #[must_use]
    pub fn is_parallel_to_within_angle(&self, other: &LineSegment3D, angle_tolerance: f64) -> bool {
        self.direction
            .is_parallel_to_within_angle(&other.direction, angle_tolerance)
    }

    /// See [`Plane3D::intersection_with_segment`].
    ///
    /// # Errors
    ///
    /// Returns an error if the segment lies in the plane.
    pub fn intersection_with(&self, plane: &Plane3D, tolerance: f64) -> Result<Option<Point3D>> {
        plane.intersection_with_segment(self, tolerance)
    }

    /// Compares both end points within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &LineSegment3D, tolerance: f64) -> bool {
        self.start_point.equals(&other.start_point, tolerance)
            && self.end_point.equals(&other.end_point, tolerance)
    }
}

impl Curve for LineSegment3D {
    fn evaluate(&self, t: f64) -> Result<Point3D> {
        self.domain().check("t", t)?;
        Ok(self.start_point + self.direction * t)
    }

    fn tangent(&self, t: f64) -> Result<UnitVector3D> {
        self.domain().check("t", t)?;
        Ok(self.direction)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length())
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl From<Line3D> for LineSegment3D {
    fn from(line: Line3D) -> Self {
        Self {
            start_point: *line.start_point(),
            end_point: *line.end_point(),
            direction: *line.direction(),
        }
    }
}

impl fmt::Display for LineSegment3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.start_point, self.end_point)
    }
}

impl FromStr for LineSegment3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let line: Line3D = s.parse()?;
        Ok(line.into())
    }
}
