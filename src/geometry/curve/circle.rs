use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, ParseError, Result, SpatialError};
use crate::geometry::unit_vector::PARSE_UNIT_TOLERANCE;
use crate::geometry::{Plane3D, Point3D, Ray3D, UnitVector3D, Vector3D};
use crate::math::parse;

use super::{Curve, CurveDomain};

/// A full circle in 3D space.
///
/// The circle lies in the plane through `center` perpendicular to `axis`.
/// It is parameterized by angle in `[0, 2π]`:
///
/// `P(t) = center + radius * cos(t) * e1 + radius * sin(t) * e2`
///
/// where `e1 = axis.orthogonal()` and `e2 = axis × e1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "crate::geometry::repr::Disc", into = "crate::geometry::repr::Disc")
)]
pub struct Circle3D {
    center: Point3D,
    axis: UnitVector3D,
    radius: f64,
}

impl Circle3D {
    /// Creates a circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not finite.
    pub fn new(center: Point3D, axis: UnitVector3D, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::Degenerate(format!("invalid circle radius {radius}")).into());
        }
        Ok(Self {
            center,
            axis,
            radius,
        })
    }

    /// Creates the circle through three points.
    ///
    /// The center is where the perpendicular bisector of `p1 p2` (as a ray
    /// in the circle's plane) crosses the bisecting plane of `p2 p3`. The
    /// axis follows the right-hand rule over `p1 → p2 → p3`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or two of them coincide.
    pub fn from_points(p1: &Point3D, p2: &Point3D, p3: &Point3D) -> Result<Self> {
        let undefined = || -> SpatialError {
            GeometryError::Collinear(format!(
                "no circle passes through {p1}, {p2} and {p3}, are they collinear?"
            ))
            .into()
        };

        let chord1 = p1.vector_to(p2);
        let chord2 = p2.vector_to(p3);
        let axis = chord1
            .cross_product(&p1.vector_to(p3))
            .normalize()
            .map_err(|_| undefined())?;

        let bisector_direction = axis
            .to_vector()
            .cross_product(&chord1)
            .normalize()
            .map_err(|_| undefined())?;
        let bisector = Ray3D::new(Point3D::mid_point(p1, p2), bisector_direction);
        let bisecting_plane = Plane3D::from_normal_and_point(
            chord2.normalize().map_err(|_| undefined())?,
            Point3D::mid_point(p2, p3),
        );

        let center = bisecting_plane
            .intersection_with_ray(&bisector, f64::EPSILON)
            .map_err(|_| undefined())?;
        Self::new(center, axis, center.distance_to(p1))
    }

    /// Creates the circle centred between two points on a diameter.
    ///
    /// The points are not checked against `axis`.
    #[must_use]
    pub fn from_points_and_axis(p1: &Point3D, p2: &Point3D, axis: UnitVector3D) -> Self {
        let center = Point3D::mid_point(p1, p2);
        Self {
            center,
            axis,
            radius: center.distance_to(p1),
        }
    }

    #[must_use]
    pub fn center(&self) -> &Point3D {
        &self.center
    }

    #[must_use]
    pub fn axis(&self) -> &UnitVector3D {
        &self.axis
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    #[must_use]
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// The plane the circle lies in.
    #[must_use]
    pub fn plane(&self) -> Plane3D {
        Plane3D::from_normal_and_point(self.axis, self.center)
    }

    /// Returns the point at `angle` radians from the reference direction.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point3D {
        let (e1, e2) = self.basis();
        let (s, c) = angle.sin_cos();
        self.center + (e1 * c + e2 * s) * self.radius
    }

    // axis ⟂ e1, so e2 is unit length up to rounding.
    fn basis(&self) -> (UnitVector3D, Vector3D) {
        let e1 = self.axis.orthogonal();
        (e1, self.axis.cross_product(&e1))
    }

    /// Compares center, axis and radius within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &Circle3D, tolerance: f64) -> bool {
        self.center.equals(&other.center, tolerance)
            && self.axis.equals(&other.axis, tolerance)
            && (self.radius - other.radius).abs() <= tolerance
    }
}

impl Curve for Circle3D {
    fn evaluate(&self, t: f64) -> Result<Point3D> {
        self.domain().check("t", t)?;
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<UnitVector3D> {
        self.domain().check("t", t)?;
        let (e1, e2) = self.basis();
        let (s, c) = t.sin_cos();
        (e2 * c - e1 * s).normalize()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl fmt::Display for Circle3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, ", self.center, self.axis)?;
        parse::write_tuple(f, &[self.radius])
    }
}

impl FromStr for Circle3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let groups = parse::groups(s)?;
        let [center, axis, radius] = groups.as_slice() else {
            return Err(ParseError::malformed(
                s,
                format!("expected 3 groups, found {}", groups.len()),
            ));
        };
        let [cx, cy, cz] = parse::numbers::<3>(center, s)?;
        let [ax, ay, az] = parse::numbers::<3>(axis, s)?;
        let [r] = parse::numbers::<1>(radius, s)?;
        UnitVector3D::create(ax, ay, az, PARSE_UNIT_TOLERANCE)
            .and_then(|axis| Self::new(Point3D::new(cx, cy, cz), axis, r))
            .map_err(|e| ParseError::malformed(s, e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    #[test]
    fn measures() {
        let c = Circle3D::new(p(0.0, 0.0, 0.0), UnitVector3D::z_axis(), 2.5).unwrap();
        assert_abs_diff_eq!(c.diameter(), 5.0);
        assert_abs_diff_eq!(c.circumference(), 15.707_963_267_948_966, epsilon = 1e-12);
        assert_abs_diff_eq!(c.area(), 19.634_954_084_936_208, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_radius() {
        let z = UnitVector3D::z_axis();
        assert!(Circle3D::new(Point3D::origin(), z, -1.0).is_err());
        assert!(Circle3D::new(Point3D::origin(), z, f64::NAN).is_err());
        assert!(Circle3D::new(Point3D::origin(), z, 0.0).is_ok());
    }

    #[test]
    fn through_three_points() {
        let c = Circle3D::from_points(&p(1.0, 0.0, 3.0), &p(0.0, 1.0, 3.0), &p(-1.0, 0.0, 3.0)).unwrap();
        assert!(c.center().equals(&p(0.0, 0.0, 3.0), 1e-12), "center={}", c.center());
        assert_abs_diff_eq!(c.radius(), 1.0, epsilon = 1e-12);
        assert!(c.axis().equals(&UnitVector3D::z_axis(), 1e-12));
    }

    #[test]
    fn through_three_tilted_points() {
        let (a, b, d) = (p(2.0, 1.0, 0.0), p(0.0, 3.0, 1.0), p(-1.0, 0.0, 2.0));
        let c = Circle3D::from_points(&a, &b, &d).unwrap();
        for q in [a, b, d] {
            assert_abs_diff_eq!(c.center().distance_to(&q), c.radius(), epsilon = 1e-12);
        }
        assert_abs_diff_eq!(c.plane().signed_distance_to(&d), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_fail() {
        let err = Circle3D::from_points(&p(0.0, 0.0, 0.0), &p(-1.0, 0.0, 0.0), &p(1.0, 0.0, 0.0))
            .unwrap_err();
        assert!(err.to_string().contains("are they collinear?"));
        assert!(Circle3D::from_points(&p(0.0, 0.0, 0.0), &p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn from_diameter_points() {
        let c = Circle3D::from_points_and_axis(&p(0.0, -2.0, 0.0), &p(0.0, 2.0, 0.0), UnitVector3D::x_axis());
        assert_eq!(*c.center(), Point3D::origin());
        assert_abs_diff_eq!(c.radius(), 2.0);
    }

    #[test]
    fn points_lie_on_circle() {
        let axis = UnitVector3D::new(1.0, -1.0, 2.0).unwrap();
        let c = Circle3D::new(p(1.0, 2.0, 3.0), axis, 0.75).unwrap();
        for t in [0.0, 0.4, FRAC_PI_2, 3.0, TAU] {
            let q = c.evaluate(t).unwrap();
            assert_abs_diff_eq!(c.center().distance_to(&q), 0.75, epsilon = 1e-12);
            assert_abs_diff_eq!(c.plane().signed_distance_to(&q), 0.0, epsilon = 1e-12);
            let tangent = c.tangent(t).unwrap();
            assert!(tangent.is_perpendicular_to(&axis, 1e-12));
        }
        assert!(c.point_at(0.0).equals(&c.point_at(TAU), 1e-12));
        assert!(c.evaluate(7.0).is_err());
        assert!(c.is_closed());
    }

    #[test]
    fn parse_round_trip() {
        let c = Circle3D::new(p(0.5, -1.0, 2.0), UnitVector3D::new(1.0, 2.0, 2.0).unwrap(), 1.25).unwrap();
        assert_eq!(c.to_string(), format!("{}, {}, (1.25)", c.center(), c.axis()));
        assert_eq!(c.to_string().parse::<Circle3D>().unwrap(), c);
        assert!("(0, 0, 0), (0, 0, 1)".parse::<Circle3D>().is_err());
        assert!("(0, 0, 0), (0, 0, 1), (-2)".parse::<Circle3D>().is_err());
    }
}
