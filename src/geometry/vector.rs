use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result, SpatialError};
use crate::math::{parse, Matrix3};

use super::{CoordinateSystem3D, Plane3D, Point3D, Ray3D, UnitVector3D};

/// A free displacement vector in 3D space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[must_use]
    pub const fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[must_use]
    pub const fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[must_use]
    pub const fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scales this vector to unit length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::ZeroVector`] if the length is below machine epsilon.
    pub fn normalize(&self) -> Result<UnitVector3D> {
        UnitVector3D::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub fn scale_by(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    #[must_use]
    pub fn dot_product(&self, other: &Vector3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross_product(&self, other: &Vector3D) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns a unit vector perpendicular to this one.
    ///
    /// # Errors
    ///
    /// Returns an error for the zero vector.
    pub fn orthogonal(&self) -> Result<UnitVector3D> {
        Ok(self.normalize()?.orthogonal())
    }

    /// Returns true if both vectors point along the same line.
    ///
    /// Zero vectors are never parallel to anything.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Vector3D, tolerance: f64) -> bool {
        match (self.normalize(), other.normalize()) {
            (Ok(a), Ok(b)) => a.is_parallel_to(&b, tolerance),
            _ => false,
        }
    }

    /// Returns true if the normalized dot product is within `tolerance` of zero.
    ///
    /// Zero vectors are never perpendicular to anything.
    #[must_use]
    pub fn is_perpendicular_to(&self, other: &Vector3D, tolerance: f64) -> bool {
        match (self.normalize(), other.normalize()) {
            (Ok(a), Ok(b)) => a.is_perpendicular_to(&b, tolerance),
            _ => false,
        }
    }

    /// Returns the unsigned angle in `[0, π]`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector has zero length.
    pub fn angle_to(&self, other: &Vector3D) -> Result<f64> {
        Ok(self.normalize()?.angle_to(&other.normalize()?))
    }

    /// Returns the angle to `other` measured counter-clockwise around `about`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is zero or parallel to `about`.
    pub fn signed_angle_to(&self, other: &Vector3D, about: &UnitVector3D) -> Result<f64> {
        self.normalize()?.signed_angle_to(&other.normalize()?, about)
    }

    /// Returns the component of this vector along `direction`.
    #[must_use]
    pub fn project_on(&self, direction: &UnitVector3D) -> Self {
        let d = direction.to_vector();
        d.scale_by(self.dot_product(&d))
    }

    /// Projects this vector onto `plane`, see [`Plane3D::project_vector`].
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is parallel to the plane normal.
    pub fn project_on_plane(&self, plane: &Plane3D) -> Result<Ray3D> {
        plane.project_vector(self)
    }

    /// Rotates this vector about `about` by `angle` radians.
    #[must_use]
    pub fn rotate(&self, about: &UnitVector3D, angle: f64) -> Self {
        CoordinateSystem3D::rotation(angle, about).transform_vector(self)
    }

    /// Returns `m * self`.
    #[must_use]
    pub fn transform_by(&self, m: &Matrix3) -> Self {
        (m * nalgebra::Vector3::from(*self)).into()
    }

    #[must_use]
    pub fn to_point(&self) -> Point3D {
        Point3D::from_vector(*self)
    }

    /// Compares componentwise within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &Vector3D, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3D {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3D> for nalgebra::Vector3<f64> {
    fn from(v: Vector3D) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<UnitVector3D> for Vector3D {
    fn from(v: UnitVector3D) -> Self {
        v.to_vector()
    }
}

impl TryFrom<Vector3D> for UnitVector3D {
    type Error = SpatialError;

    fn try_from(v: Vector3D) -> Result<Self> {
        v.normalize()
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        parse::write_tuple(f, &[self.x, self.y, self.z])
    }
}

impl FromStr for Vector3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let [x, y, z] = parse::tuple::<3>(s)?;
        Ok(Self::new(x, y, z))
    }
}
