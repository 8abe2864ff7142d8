use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{GeometryError, OperationError, ParseError, Result};
use crate::math::{parse, Matrix3, PARALLEL_TOLERANCE, PLANE_PARALLEL_TOLERANCE, UNIT_EPSILON};

use super::Vector3D;

/// Maximum `|norm - 1|` accepted when reading a unit vector from text.
pub const PARSE_UNIT_TOLERANCE: f64 = 1e-4;

/// A direction in 3D space: a vector of length one.
///
/// Holding a `UnitVector3D` means the length has already been checked, so
/// callers never need to normalize it again.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vector3D", into = "Vector3D")
)]
pub struct UnitVector3D {
    x: f64,
    y: f64,
    z: f64,
}

impl UnitVector3D {
    /// Creates a unit vector by scaling `(x, y, z)` to length one.
    ///
    /// # Errors
    ///
    /// Returns an error if the input length is below machine epsilon.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::create(x, y, z, f64::INFINITY)
    }

    /// Creates a unit vector, rejecting input whose length deviates from one
    /// by more than `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the input length is below
    /// machine epsilon (or not a number), and [`GeometryError::NotUnitLength`]
    /// if it is outside `tolerance`.
    pub fn create(x: f64, y: f64, z: f64, tolerance: f64) -> Result<Self> {
        let norm = (x * x + y * y + z * z).sqrt();
        if norm.is_nan() || norm < f64::EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        let deviation = (norm - 1.0).abs();
        if deviation > tolerance {
            return Err(GeometryError::NotUnitLength {
                length: norm,
                tolerance,
            }
            .into());
        }
        if deviation <= UNIT_EPSILON {
            return Ok(Self { x, y, z });
        }
        Ok(Self {
            x: x / norm,
            y: y / norm,
            z: z / norm,
        })
    }

    /// Rescales a vector that is known to be close to unit length.
    fn renormalized(v: Vector3D) -> Self {
        let norm = v.length();
        Self {
            x: v.x / norm,
            y: v.y / norm,
            z: v.z / norm,
        }
    }

    #[must_use]
    pub const fn x_axis() -> Self {
        Self { x: 1.0, y: 0.0, z: 0.0 }
    }

    #[must_use]
    pub const fn y_axis() -> Self {
        Self { x: 0.0, y: 1.0, z: 0.0 }
    }

    #[must_use]
    pub const fn z_axis() -> Self {
        Self { x: 0.0, y: 0.0, z: 1.0 }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Returns the length, which is one up to rounding.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.to_vector().length()
    }

    #[must_use]
    pub fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    #[must_use]
    pub fn scale_by(&self, factor: f64) -> Vector3D {
        self.to_vector().scale_by(factor)
    }

    /// Returns the dot product clamped to `[-1, 1]`.
    #[must_use]
    pub fn dot_product(&self, other: &UnitVector3D) -> f64 {
        (self.x * other.x + self.y * other.y + self.z * other.z).clamp(-1.0, 1.0)
    }

    #[must_use]
    pub fn cross_product(&self, other: &UnitVector3D) -> Vector3D {
        self.to_vector().cross_product(&other.to_vector())
    }

    /// Returns some unit vector perpendicular to this one.
    ///
    /// No particular direction is guaranteed. One of two closed forms is
    /// picked so that the result never suffers cancellation near the axes.
    #[must_use]
    pub fn orthogonal(&self) -> Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let first = Vector3D::new(z, z, -x - y);
        let second = Vector3D::new(-y - z, x, x);
        // `second` vanishes for x = 0, y = -z; `first` is safe there.
        let candidate = if -x - y > 0.1 {
            first
        } else if second.length() < 0.1 {
            trace!(direction = %self, "orthogonal: second candidate too short, using (z, z, -x-y)");
            first
        } else {
            second
        };
        Self::renormalized(candidate)
    }

    /// Returns true if `|1 - |a·b|| <= tolerance`.
    #[must_use]
    pub fn is_parallel_to(&self, other: &UnitVector3D, tolerance: f64) -> bool {
        1.0 - self.dot_product(other).abs() <= tolerance
    }

    /// Returns true if the angle between the directions, or its supplement,
    /// is at most `angle_tolerance` radians.
    #[must_use]
    pub fn is_parallel_to_within_angle(&self, other: &UnitVector3D, angle_tolerance: f64) -> bool {
        let angle = self.angle_to(other);
        angle.min(PI - angle) <= angle_tolerance
    }

    /// Returns true if `|a·b| <= tolerance`.
    #[must_use]
    pub fn is_perpendicular_to(&self, other: &UnitVector3D, tolerance: f64) -> bool {
        self.dot_product(other).abs() <= tolerance
    }

    /// Returns the unsigned angle in `[0, π]` radians.
    #[must_use]
    pub fn angle_to(&self, other: &UnitVector3D) -> f64 {
        self.dot_product(other).acos()
    }

    /// Returns the angle to `other` measured counter-clockwise around `about`.
    ///
    /// Both directions are projected onto the plane perpendicular to `about`
    /// first; the sign follows the right-hand rule around `about`.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction is parallel to `about`.
    pub fn signed_angle_to(&self, other: &UnitVector3D, about: &UnitVector3D) -> Result<f64> {
        if self.is_parallel_to(about, PARALLEL_TOLERANCE)
            || other.is_parallel_to(about, PARALLEL_TOLERANCE)
        {
            return Err(OperationError::Parallel(
                "direction is parallel to the rotation axis".into(),
            )
            .into());
        }

        let from = (self.to_vector() - self.project_on(about)).normalize()?;
        let to = (other.to_vector() - other.project_on(about)).normalize()?;

        let dp = from.dot_product(&to);
        if (dp - 1.0).abs() < PLANE_PARALLEL_TOLERANCE {
            return Ok(0.0);
        }
        if (dp + 1.0).abs() < PLANE_PARALLEL_TOLERANCE {
            return Ok(PI);
        }

        let angle = dp.acos();
        let sign = from.cross_product(&to).dot_product(&about.to_vector());
        Ok(if sign < 0.0 { -angle } else { angle })
    }

    /// Returns the component of this direction along `direction`.
    #[must_use]
    pub fn project_on(&self, direction: &UnitVector3D) -> Vector3D {
        self.to_vector().project_on(direction)
    }

    /// Rotates this direction about `about` by `angle` radians.
    #[must_use]
    pub fn rotate(&self, about: &UnitVector3D, angle: f64) -> Self {
        Self::renormalized(self.to_vector().rotate(about, angle))
    }

    /// Returns `m * self`, rescaled to unit length.
    ///
    /// # Errors
    ///
    /// Returns an error if `m` collapses this direction to zero.
    pub fn transform_by(&self, m: &Matrix3) -> Result<Self> {
        self.to_vector().transform_by(m).normalize()
    }

    /// Returns the matrix `[v]×` such that `[v]× w = v × w`.
    #[must_use]
    pub fn cross_product_matrix(&self) -> Matrix3 {
        Matrix3::new(
            0.0, -self.z, self.y,
            self.z, 0.0, -self.x,
            -self.y, self.x, 0.0,
        )
    }

    /// Returns the outer product `v vᵀ`.
    #[must_use]
    pub fn unit_tensor_product(&self) -> Matrix3 {
        let v = nalgebra::Vector3::new(self.x, self.y, self.z);
        v * v.transpose()
    }

    /// Compares componentwise within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &UnitVector3D, tolerance: f64) -> bool {
        self.to_vector().equals(&other.to_vector(), tolerance)
    }
}

impl fmt::Display for UnitVector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        parse::write_tuple(f, &[self.x, self.y, self.z])
    }
}

impl FromStr for UnitVector3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let [x, y, z] = parse::tuple::<3>(s)?;
        Self::create(x, y, z, PARSE_UNIT_TOLERANCE)
            .map_err(|e| ParseError::malformed(s, e.to_string()))
    }
}
