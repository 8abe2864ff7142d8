use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::geometry::unit_vector::PARSE_UNIT_TOLERANCE;
use crate::geometry::{Plane3D, Point3D, UnitVector3D, Vector3D};
use crate::math::parse;

use super::{Curve, CurveDomain, LineSegment3D};

/// A line through a point with a fixed orientation.
///
/// `direction` gives the forward sense; most queries treat the ray as the
/// full infinite line and do not clamp to the forward half.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray3D {
    through_point: Point3D,
    direction: UnitVector3D,
}

impl Ray3D {
    /// Creates a ray through `through_point` heading along `direction`.
    #[must_use]
    pub fn new(through_point: Point3D, direction: UnitVector3D) -> Self {
        Self {
            through_point,
            direction,
        }
    }

    /// Creates a ray heading along a (not necessarily unit) vector.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` has zero length.
    pub fn from_vector(through_point: Point3D, direction: &Vector3D) -> Result<Self> {
        Ok(Self::new(through_point, direction.normalize()?))
    }

    /// Returns the line shared by two planes.
    ///
    /// # Errors
    ///
    /// Returns an error if the planes are parallel.
    pub fn intersection_of(plane1: &Plane3D, plane2: &Plane3D) -> Result<Self> {
        plane1.intersection_with_plane(plane2, f64::EPSILON)
    }

    #[must_use]
    pub fn through_point(&self) -> &Point3D {
        &self.through_point
    }

    #[must_use]
    pub fn direction(&self) -> &UnitVector3D {
        &self.direction
    }

    /// Returns the point on the ray's line closest to `p`.
    ///
    /// The foot may lie behind `through_point`.
    #[must_use]
    pub fn closest_point_to(&self, p: &Point3D) -> Point3D {
        let along = self.through_point.vector_to(p).project_on(&self.direction);
        self.through_point + along
    }

    /// Returns the segment from the ray's line to `p`, perpendicular to the ray.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` lies on the ray's line.
    pub fn shortest_line_to(&self, p: &Point3D) -> Result<LineSegment3D> {
        LineSegment3D::new(self.closest_point_to(p), *p)
    }

    /// See [`Plane3D::intersection_with_ray`].
    ///
    /// # Errors
    ///
    /// Returns an error if the ray is parallel to the plane.
    pub fn intersection_with(&self, plane: &Plane3D, tolerance: f64) -> Result<Point3D> {
        plane.intersection_with_ray(self, tolerance)
    }

    /// Returns true if both rays lie on the same line.
    #[must_use]
    pub fn is_collinear(&self, other: &Ray3D, tolerance: f64) -> bool {
        self.direction.is_parallel_to(&other.direction, tolerance)
            && self.closest_point_to(&other.through_point).distance_to(&other.through_point)
                <= tolerance
    }

    /// Compares point and direction componentwise within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &Ray3D, tolerance: f64) -> bool {
        self.through_point.equals(&other.through_point, tolerance)
            && self.direction.equals(&other.direction, tolerance)
    }
}

impl Curve for Ray3D {
    fn evaluate(&self, t: f64) -> Result<Point3D> {
        Ok(self.through_point + self.direction * t)
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

impl fmt::Display for Ray3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.through_point, self.direction)
    }
}

impl FromStr for Ray3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let groups = parse::tuples::<3>(s, 2)?;
        let [px, py, pz] = groups[0];
        let [dx, dy, dz] = groups[1];
        let direction = UnitVector3D::create(dx, dy, dz, PARSE_UNIT_TOLERANCE)
            .map_err(|e| ParseError::malformed(s, e.to_string()))?;
        Ok(Self::new(Point3D::new(px, py, pz), direction))
    }
}
