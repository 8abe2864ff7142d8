use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, ParseError, Result};
use crate::math::{parse, Matrix3};

use super::{CoordinateSystem3D, Plane3D, UnitVector3D, Vector3D};

/// A position in 3D space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The point `(0, 0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Creates a point at the head of `v` when its tail sits at the origin.
    #[must_use]
    pub fn from_vector(v: Vector3D) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Returns the position vector of this point.
    #[must_use]
    pub fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }

    /// Returns the vector from this point to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Point3D) -> Vector3D {
        *other - *self
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        self.vector_to(other).length()
    }

    /// Returns the arithmetic mean of `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty.
    pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3D>) -> Result<Self> {
        let mut count = 0_u32;
        let mut sum = Vector3D::zero();
        for p in points {
            sum = sum + p.to_vector();
            count += 1;
        }
        if count == 0 {
            return Err(GeometryError::Degenerate("centroid of no points".into()).into());
        }
        Ok(Self::from_vector(sum / f64::from(count)))
    }

    /// Returns the point halfway between `a` and `b`.
    #[must_use]
    pub fn mid_point(a: &Point3D, b: &Point3D) -> Self {
        Self::new(
            (a.x + b.x) * 0.5,
            (a.y + b.y) * 0.5,
            (a.z + b.z) * 0.5,
        )
    }

    /// Projects this point onto `plane` along the plane normal.
    #[must_use]
    pub fn project_on(&self, plane: &Plane3D) -> Self {
        plane.project(self)
    }

    /// Reflects this point through `plane`.
    #[must_use]
    pub fn mirror_about(&self, plane: &Plane3D) -> Self {
        plane.mirror_about(self)
    }

    /// Rotates this point about an axis through the origin.
    ///
    /// `angle` is in radians, counter-clockwise when looking down `about`.
    #[must_use]
    pub fn rotate(&self, about: &UnitVector3D, angle: f64) -> Self {
        CoordinateSystem3D::rotation(angle, about).transform_point(self)
    }

    /// Multiplies the position vector by `m`.
    #[must_use]
    pub fn transform_by(&self, m: &Matrix3) -> Self {
        Self::from_vector(self.to_vector().transform_by(m))
    }

    /// Returns the point common to three planes.
    ///
    /// # Errors
    ///
    /// Returns an error if any two of the planes are parallel, or the line
    /// shared by the first two is parallel to the third.
    pub fn intersection_of_planes(
        plane1: &Plane3D,
        plane2: &Plane3D,
        plane3: &Plane3D,
    ) -> Result<Self> {
        let ray = plane1.intersection_with_plane(plane2, f64::EPSILON)?;
        plane3.intersection_with_ray(&ray, f64::EPSILON)
    }

    /// Compares componentwise within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &Point3D, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl From<nalgebra::Point3<f64>> for Point3D {
    fn from(p: nalgebra::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Point3D> for nalgebra::Point3<f64> {
    fn from(p: Point3D) -> Self {
        nalgebra::Point3::new(p.x, p.y, p.z)
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        parse::write_tuple(f, &[self.x, self.y, self.z])
    }
}

impl FromStr for Point3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let [x, y, z] = parse::tuple::<3>(s)?;
        Ok(Self::new(x, y, z))
    }
}
