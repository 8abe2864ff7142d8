mod circle;
mod line;
mod line_segment;
mod polyline;
mod ray;

pub use circle::Circle3D;
pub use line::Line3D;
pub use line_segment::LineSegment3D;
pub use polyline::PolyLine3D;
pub use ray::Ray3D;

use crate::error::{GeometryError, Result};
use crate::geometry::{Point3D, UnitVector3D};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns true if `t` lies in `[t_min, t_max]`.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_min && t <= self.t_max
    }

    /// Fails with [`GeometryError::ParameterOutOfRange`] unless `t` is in the domain.
    pub(crate) fn check(&self, parameter: &'static str, t: f64) -> Result<()> {
        if self.contains(t) {
            Ok(())
        } else {
            Err(GeometryError::ParameterOutOfRange {
                parameter,
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into())
        }
    }
}

/// Trait for parametric curves in 3D space.
///
/// Straight curves are parameterized by arc length from their start; the
/// circle by angle in radians.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn evaluate(&self, t: f64) -> Result<Point3D>;

    /// Computes the unit tangent at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<UnitVector3D>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}
