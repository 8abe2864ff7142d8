use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeometryError, OperationError, ParseError, Result};
use crate::geometry::{Line3D, LineSegment3D, Point3D, Ray3D, UnitVector3D, Vector3D};
use crate::math::{parse, Matrix3, TOLERANCE, UNIT_EPSILON};

use super::{Surface, SurfaceDomain};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is on the positive side (in the direction of the normal).
    Front,
    /// Point is on the negative side (opposite the normal).
    Back,
    /// Point lies on the plane (within tolerance).
    On,
}

/// An infinite plane in implicit form.
///
/// The plane is the set of points `p` with `normal · p + d = 0`, so `-d` is
/// the signed distance of the plane from the origin along `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane3D {
    normal: UnitVector3D,
    d: f64,
}

impl Plane3D {
    /// Creates the plane `normal · p + d = 0`.
    #[must_use]
    pub fn new(normal: UnitVector3D, d: f64) -> Self {
        Self { normal, d }
    }

    /// Creates the plane through `point` perpendicular to `normal`.
    #[must_use]
    pub fn from_normal_and_point(normal: UnitVector3D, point: Point3D) -> Self {
        Self::new(normal, -normal.to_vector().dot_product(&point.to_vector()))
    }

    /// Creates the plane `a x + b y + c z + d = 0`.
    ///
    /// `(a, b, c)` is scaled to the unit normal and `d` by the same factor.
    ///
    /// # Errors
    ///
    /// Returns an error if `(a, b, c)` is the zero vector.
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        let normal = UnitVector3D::new(a, b, c)?;
        let norm = (a * a + b * b + c * c).sqrt();
        let d = if (norm - 1.0).abs() <= UNIT_EPSILON { d } else { d / norm };
        Ok(Self::new(normal, d))
    }

    /// Creates the plane through three points.
    ///
    /// The normal follows the right-hand rule over `p1 → p2 → p3`.
    ///
    /// # Errors
    ///
    /// Returns an error if any two points coincide or all three are collinear.
    pub fn from_points(p1: Point3D, p2: Point3D, p3: Point3D) -> Result<Self> {
        if p1 == p2 || p1 == p3 || p2 == p3 {
            return Err(GeometryError::CoincidentPoints.into());
        }
        let cross = p1.vector_to(&p2).cross_product(&p1.vector_to(&p3));
        if cross.length() <= f64::EPSILON {
            return Err(GeometryError::Collinear("cannot span a plane".into()).into());
        }
        Ok(Self::from_normal_and_point(cross.normalize()?, p1))
    }

    /// The plane `z = 0`.
    #[must_use]
    pub fn xy() -> Self {
        Self::new(UnitVector3D::z_axis(), 0.0)
    }

    /// The plane `x = 0`.
    #[must_use]
    pub fn yz() -> Self {
        Self::new(UnitVector3D::x_axis(), 0.0)
    }

    /// The plane `y = 0`.
    #[must_use]
    pub fn zx() -> Self {
        Self::new(UnitVector3D::y_axis(), 0.0)
    }

    #[must_use]
    pub fn normal(&self) -> &UnitVector3D {
        &self.normal
    }

    #[must_use]
    pub fn a(&self) -> f64 {
        self.normal.x()
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.normal.y()
    }

    #[must_use]
    pub fn c(&self) -> f64 {
        self.normal.z()
    }

    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Returns the point of the plane closest to the origin.
    #[must_use]
    pub fn root_point(&self) -> Point3D {
        Point3D::from_vector(self.normal * -self.d)
    }

    /// Signed distance from the plane to `point`, positive on the normal side.
    #[must_use]
    pub fn signed_distance_to(&self, point: &Point3D) -> f64 {
        self.normal.to_vector().dot_product(&point.to_vector()) + self.d
    }

    #[must_use]
    pub fn absolute_distance_to(&self, point: &Point3D) -> f64 {
        self.signed_distance_to(point).abs()
    }

    /// Signed distance to a parallel plane.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotParallel`] if the normals are not parallel
    /// within `tolerance` (see [`crate::math::PLANE_PARALLEL_TOLERANCE`]).
    pub fn signed_distance_to_plane(&self, other: &Plane3D, tolerance: f64) -> Result<f64> {
        if !self.normal.is_parallel_to(&other.normal, tolerance) {
            return Err(OperationError::NotParallel("planes are not parallel".into()).into());
        }
        Ok(self.signed_distance_to(&other.root_point()))
    }

    /// Signed distance to a ray running parallel to the plane.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotParallel`] if the ray direction is not
    /// perpendicular to the normal within `tolerance`, since the distance
    /// would then vary along the ray.
    pub fn signed_distance_to_ray(&self, ray: &Ray3D, tolerance: f64) -> Result<f64> {
        if !ray.direction().is_perpendicular_to(&self.normal, tolerance) {
            return Err(OperationError::NotParallel("ray is not parallel to the plane".into()).into());
        }
        Ok(self.signed_distance_to(ray.through_point()))
    }

    /// Classifies `point` against the plane.
    #[must_use]
    pub fn classify(&self, point: &Point3D, tolerance: f64) -> PlaneSide {
        let dist = self.signed_distance_to(point);
        if dist > tolerance {
            PlaneSide::Front
        } else if dist < -tolerance {
            PlaneSide::Back
        } else {
            PlaneSide::On
        }
    }

    /// Projects `point` onto the plane along the normal.
    #[must_use]
    pub fn project(&self, point: &Point3D) -> Point3D {
        *point - self.normal * self.signed_distance_to(point)
    }

    /// Projects `point` onto the plane along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` is parallel to the plane.
    pub fn project_along(&self, point: &Point3D, direction: &UnitVector3D) -> Result<Point3D> {
        let denominator = self.normal.dot_product(direction);
        if denominator.abs() <= f64::EPSILON {
            return Err(OperationError::Parallel(
                "projection direction is parallel to the plane".into(),
            )
            .into());
        }
        Ok(*point - *direction * (self.signed_distance_to(point) / denominator))
    }

    /// Projects both defining points of `line` onto the plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is perpendicular to the plane.
    pub fn project_line(&self, line: &Line3D) -> Result<Line3D> {
        Line3D::new(self.project(line.start_point()), self.project(line.end_point()))
    }

    /// Projects both end points of `segment` onto the plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is perpendicular to the plane.
    pub fn project_segment(&self, segment: &LineSegment3D) -> Result<LineSegment3D> {
        LineSegment3D::new(
            self.project(segment.start_point()),
            self.project(segment.end_point()),
        )
    }

    /// Projects `ray` onto the plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the ray is perpendicular to the plane.
    pub fn project_ray(&self, ray: &Ray3D) -> Result<Ray3D> {
        let direction = self.project_vector(&ray.direction().to_vector())?;
        Ok(Ray3D::new(self.project(ray.through_point()), *direction.direction()))
    }

    /// Projects a free vector onto the plane.
    ///
    /// The head of the vector (with its tail at the origin) and the origin
    /// are both projected; the result is the ray from the projected origin
    /// towards the projected head.
    ///
    /// # Errors
    ///
    /// Returns an error if `vector` is parallel to the normal.
    pub fn project_vector(&self, vector: &Vector3D) -> Result<Ray3D> {
        let projected_head = self.project(&vector.to_point());
        let projected_origin = self.project(&Point3D::origin());
        Ray3D::from_vector(projected_origin, &projected_origin.vector_to(&projected_head))
    }

    /// Returns the line where this plane meets `other`.
    ///
    /// Both normals are stacked into a matrix whose singular-value
    /// decomposition gives a point on the line (through the pseudo-inverse)
    /// and its direction (the null-space singular vector).
    ///
    /// # Errors
    ///
    /// Returns an error if the second singular value is below `tolerance`,
    /// i.e. the planes are parallel.
    pub fn intersection_with_plane(&self, other: &Plane3D, tolerance: f64) -> Result<Ray3D> {
        let (n1, n2) = (self.normal, other.normal);
        // Third row of zeros makes the decomposition square so V is complete.
        let a = Matrix3::new(
            n1.x(), n1.y(), n1.z(),
            n2.x(), n2.y(), n2.z(),
            0.0, 0.0, 0.0,
        );
        let svd = a.svd(true, true);
        let s = svd.singular_values;
        if s[1] < tolerance {
            debug!(sigma = s[1], tolerance, "plane intersection rejected as parallel");
            return Err(OperationError::Parallel("planes are parallel".into()).into());
        }

        let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
            return Err(GeometryError::Degenerate("singular vectors unavailable".into()).into());
        };

        let mut sigma_plus = Matrix3::zeros();
        sigma_plus[(0, 0)] = 1.0 / s[0];
        sigma_plus[(1, 1)] = 1.0 / s[1];
        let rhs = nalgebra::Vector3::new(-self.d, -other.d, 0.0);
        let x = v_t.transpose() * sigma_plus * u.transpose() * rhs;

        let null = v_t.row(2);
        let direction = UnitVector3D::new(null[0], null[1], null[2])?;
        Ok(Ray3D::new(Point3D::new(x[0], x[1], x[2]), direction))
    }

    /// Returns where the infinite `line` crosses the plane.
    ///
    /// Returns `Ok(None)` when the line runs parallel to the plane.
    /// `tolerance` bounds `|direction · normal|`. Whether a parallel line
    /// lies in the plane is decided by [`TOLERANCE`], scaled by the start
    /// point's distance from the origin.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::LiesInPlane`] if the line lies in the plane.
    pub fn intersection_with_line(&self, line: &Line3D, tolerance: f64) -> Result<Option<Point3D>> {
        self.intersect_through(line.start_point(), line.end_point(), line.direction(), tolerance, false)
    }

    /// Returns where `segment` crosses the plane, if it does.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::LiesInPlane`] if the segment lies in the plane.
    pub fn intersection_with_segment(
        &self,
        segment: &LineSegment3D,
        tolerance: f64,
    ) -> Result<Option<Point3D>> {
        self.intersect_through(
            segment.start_point(),
            segment.end_point(),
            segment.direction(),
            tolerance,
            true,
        )
    }

    fn intersect_through(
        &self,
        start: &Point3D,
        end: &Point3D,
        direction: &UnitVector3D,
        tolerance: f64,
        bounded: bool,
    ) -> Result<Option<Point3D>> {
        if direction.is_perpendicular_to(&self.normal, tolerance) {
            let reach = TOLERANCE * (1.0 + start.to_vector().length());
            if self.absolute_distance_to(start) <= reach {
                return Err(OperationError::LiesInPlane.into());
            }
            return Ok(None);
        }

        let u = start.vector_to(end);
        let t = -self.signed_distance_to(start) / u.dot_product(&self.normal.to_vector());
        if bounded && !(0.0..=1.0).contains(&t) {
            return Ok(None);
        }
        Ok(Some(*start + u * t))
    }

    /// Returns where the line of `ray` crosses the plane.
    ///
    /// The crossing may lie behind the ray's through point.
    ///
    /// # Errors
    ///
    /// Returns an error if the ray direction is perpendicular to the normal.
    pub fn intersection_with_ray(&self, ray: &Ray3D, tolerance: f64) -> Result<Point3D> {
        if self.normal.is_perpendicular_to(ray.direction(), tolerance) {
            return Err(OperationError::Parallel("ray is parallel to the plane".into()).into());
        }
        let t = -self.signed_distance_to(ray.through_point()) / ray.direction().dot_product(&self.normal);
        Ok(*ray.through_point() + *ray.direction() * t)
    }

    /// Reflects `point` through the plane.
    #[must_use]
    pub fn mirror_about(&self, point: &Point3D) -> Point3D {
        *point - self.normal * (2.0 * self.signed_distance_to(point))
    }

    /// Compares normal and offset within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &Plane3D, tolerance: f64) -> bool {
        self.normal.equals(&other.normal, tolerance) && (self.d - other.d).abs() <= tolerance
    }
}

impl Surface for Plane3D {
    /// `P(u, v) = root + u * e1 + v * e2` with `e1 = normal.orthogonal()` and `e2 = normal × e1`.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3D> {
        let u_dir = self.normal.orthogonal();
        let v_dir = self.normal.cross_product(&u_dir);
        Ok(self.root_point() + u_dir * u + v_dir * v)
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<UnitVector3D> {
        Ok(self.normal)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY)
    }
}

impl fmt::Display for Plane3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        parse::write_tuple(f, &[self.a(), self.b(), self.c(), self.d])
    }
}

impl FromStr for Plane3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let [a, b, c, d] = parse::tuple::<4>(s)?;
        Self::from_coefficients(a, b, c, d).map_err(|e| ParseError::malformed(s, e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::SpatialError;
    use crate::math::PLANE_PARALLEL_TOLERANCE;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    fn u(x: f64, y: f64, z: f64) -> UnitVector3D {
        UnitVector3D::new(x, y, z).unwrap()
    }

    #[test]
    fn root_point_and_offset() {
        let plane = Plane3D::from_normal_and_point(UnitVector3D::z_axis(), p(4.0, -1.0, 3.0));
        assert_abs_diff_eq!(plane.d(), -3.0);
        assert_eq!(plane.root_point(), p(0.0, 0.0, 3.0));
        assert_abs_diff_eq!(plane.signed_distance_to(&p(0.0, 0.0, 5.0)), 2.0);
        assert_abs_diff_eq!(plane.signed_distance_to(&p(9.0, 9.0, 1.0)), -2.0);
    }

    #[test]
    fn from_coefficients_scales_offset() {
        let plane = Plane3D::from_coefficients(0.0, 0.0, 2.0, -6.0).unwrap();
        assert_eq!(*plane.normal(), UnitVector3D::z_axis());
        assert_abs_diff_eq!(plane.d(), -3.0);
        assert!(Plane3D::from_coefficients(0.0, 0.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn from_points() {
        let plane = Plane3D::from_points(p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(0.0, 1.0, 1.0)).unwrap();
        assert!(plane.normal().equals(&UnitVector3D::z_axis(), 1e-15));
        assert_abs_diff_eq!(plane.d(), -1.0);
    }

    #[test]
    fn from_points_rejects_degenerate_input() {
        let a = p(0.0, 0.0, 0.0);
        assert!(Plane3D::from_points(a, a, p(1.0, 0.0, 0.0)).is_err());
        assert!(Plane3D::from_points(a, p(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0)).is_err());
    }

    #[test]
    fn projection_is_idempotent() {
        let plane = Plane3D::from_normal_and_point(u(1.0, -2.0, 0.5), p(0.3, 1.0, -2.0));
        for q in [p(5.0, 1.0, 2.0), p(-3.0, 0.0, 0.0), p(0.1, 0.2, 0.3)] {
            let once = plane.project(&q);
            let twice = plane.project(&once);
            assert!(once.equals(&twice, 1e-12));
            assert_abs_diff_eq!(plane.signed_distance_to(&once), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn project_along_direction() {
        let plane = Plane3D::xy();
        let q = plane.project_along(&p(0.0, 0.0, 2.0), &u(1.0, 0.0, 1.0)).unwrap();
        assert!(q.equals(&p(-2.0, 0.0, 0.0), 1e-12), "q={q}");
        assert!(plane.project_along(&q, &UnitVector3D::x_axis()).is_err());
    }

    #[test]
    fn project_vector_and_ray() {
        let plane = Plane3D::from_normal_and_point(UnitVector3D::z_axis(), p(0.0, 0.0, 4.0));
        let ray = plane.project_vector(&Vector3D::new(3.0, 0.0, 7.0)).unwrap();
        assert_eq!(*ray.through_point(), p(0.0, 0.0, 4.0));
        assert_eq!(*ray.direction(), UnitVector3D::x_axis());
        assert!(plane.project_vector(&Vector3D::z_axis()).is_err());

        let tilted = Ray3D::new(p(1.0, 1.0, 0.0), u(0.0, 1.0, 1.0));
        let projected = plane.project_ray(&tilted).unwrap();
        assert_eq!(*projected.through_point(), p(1.0, 1.0, 4.0));
        assert!(projected.direction().equals(&UnitVector3D::y_axis(), 1e-15));
    }

    #[test]
    fn project_line_and_segment() {
        let plane = Plane3D::xy();
        let line = Line3D::new(p(0.0, 0.0, 1.0), p(1.0, 0.0, 3.0)).unwrap();
        let projected = plane.project_line(&line).unwrap();
        assert_eq!(*projected.end_point(), p(1.0, 0.0, 0.0));
        let vertical = LineSegment3D::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 2.0)).unwrap();
        assert!(plane.project_segment(&vertical).is_err());
    }

    #[test]
    fn perpendicular_planes_intersect_along_x() {
        let xy = Plane3D::from_normal_and_point(UnitVector3D::z_axis(), p(0.0, 0.0, 0.0));
        let xz = Plane3D::from_normal_and_point(UnitVector3D::y_axis(), p(0.0, 0.0, 0.0));
        let ray = xy.intersection_with_plane(&xz, f64::EPSILON).unwrap();
        assert!(ray.through_point().equals(&Point3D::origin(), 1e-12));
        assert!(ray.direction().is_parallel_to(&UnitVector3D::x_axis(), 1e-12));
    }

    #[test]
    fn offset_planes_intersect() {
        let a = Plane3D::from_normal_and_point(UnitVector3D::z_axis(), p(0.0, 0.0, 2.0));
        let b = Plane3D::from_normal_and_point(u(0.0, 1.0, 1.0), p(0.0, 3.0, 0.0));
        let ray = a.intersection_with_plane(&b, f64::EPSILON).unwrap();
        assert_abs_diff_eq!(a.signed_distance_to(ray.through_point()), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.signed_distance_to(ray.through_point()), 0.0, epsilon = 1e-12);
        assert!(ray.direction().is_parallel_to(&UnitVector3D::x_axis(), 1e-12));
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let a = Plane3D::xy();
        let b = Plane3D::from_normal_and_point(UnitVector3D::z_axis().negate(), p(0.0, 0.0, 5.0));
        assert!(a.intersection_with_plane(&b, 1e-12).is_err());
    }

    #[test]
    fn distance_between_parallel_planes() {
        let a = Plane3D::xy();
        let b = Plane3D::from_normal_and_point(UnitVector3D::z_axis(), p(1.0, 1.0, 5.0));
        assert_abs_diff_eq!(a.signed_distance_to_plane(&b, PLANE_PARALLEL_TOLERANCE).unwrap(), 5.0);
        assert!(a.signed_distance_to_plane(&Plane3D::yz(), PLANE_PARALLEL_TOLERANCE).is_err());
    }

    #[test]
    fn distance_to_parallel_ray() {
        let a = Plane3D::xy();
        let along = Ray3D::new(p(0.0, 0.0, -2.0), UnitVector3D::x_axis());
        assert_abs_diff_eq!(a.signed_distance_to_ray(&along, PLANE_PARALLEL_TOLERANCE).unwrap(), -2.0);
        let crossing = Ray3D::new(p(0.0, 0.0, -2.0), UnitVector3D::z_axis());
        assert!(a.signed_distance_to_ray(&crossing, PLANE_PARALLEL_TOLERANCE).is_err());
    }

    #[test]
    fn line_and_segment_intersections() {
        let plane = Plane3D::xy();

        let crossing = LineSegment3D::new(p(1.0, 1.0, -1.0), p(1.0, 1.0, 3.0)).unwrap();
        assert_eq!(
            plane.intersection_with_segment(&crossing, f64::EPSILON).unwrap(),
            Some(p(1.0, 1.0, 0.0))
        );

        let short = LineSegment3D::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 3.0)).unwrap();
        assert_eq!(plane.intersection_with_segment(&short, f64::EPSILON).unwrap(), None);
        let line = Line3D::from(short);
        assert_eq!(
            plane.intersection_with_line(&line, f64::EPSILON).unwrap(),
            Some(p(1.0, 1.0, 0.0))
        );

        let above = Line3D::new(p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0)).unwrap();
        assert_eq!(plane.intersection_with_line(&above, f64::EPSILON).unwrap(), None);

        let inside = Line3D::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)).unwrap();
        assert!(plane.intersection_with_line(&inside, f64::EPSILON).is_err());
    }

    #[test]
    fn lines_in_a_tilted_plane_lie_in_it() {
        let plane = Plane3D::from_normal_and_point(u(0.0, 0.6, 0.8), p(0.0, 0.0, 10.0));
        let offset = Vector3D::new(3.0, 0.0, 0.0);
        for q in [p(1.0, 2.0, 3.0), p(-7.3, 0.1, 12.9), p(4.4, -5.5, 6.6), p(0.3, 17.0, -2.0)] {
            let start = plane.project(&q);
            let line = Line3D::new(start, start + offset).unwrap();
            let err = plane.intersection_with_line(&line, f64::EPSILON).unwrap_err();
            assert!(matches!(err, SpatialError::Operation(OperationError::LiesInPlane)), "q={q}");
            let segment = LineSegment3D::from(line);
            assert!(plane.intersection_with_segment(&segment, f64::EPSILON).is_err(), "q={q}");

            let above = start + *plane.normal() * 1e-6;
            let lifted = Line3D::new(above, above + offset).unwrap();
            assert_eq!(plane.intersection_with_line(&lifted, f64::EPSILON).unwrap(), None);
        }

        let plane = Plane3D::from_normal_and_point(u(1.0, 2.0, 3.0), p(10.0, 0.0, 0.0));
        let coords = [-4.0, -0.7, 0.0, 1.3, 9.0];
        for &x in &coords {
            for &y in &coords {
                let a = plane.project(&p(x, y, 1.5));
                let b = plane.project(&p(y - 3.0, x + 2.0, -2.5));
                let line = Line3D::new(a, b).unwrap();
                let err = plane.intersection_with_line(&line, 1e-12).unwrap_err();
                assert!(matches!(err, SpatialError::Operation(OperationError::LiesInPlane)), "a={a} b={b}");
            }
        }
    }

    #[test]
    fn ray_intersection() {
        let plane = Plane3D::from_normal_and_point(UnitVector3D::z_axis(), p(0.0, 0.0, 1.0));
        let ray = Ray3D::new(p(0.0, 0.0, 3.0), u(1.0, 0.0, 1.0));
        let hit = plane.intersection_with_ray(&ray, f64::EPSILON).unwrap();
        assert!(hit.equals(&p(-2.0, 0.0, 1.0), 1e-12), "hit={hit}");

        let parallel = Ray3D::new(p(0.0, 0.0, 3.0), UnitVector3D::y_axis());
        assert!(plane.intersection_with_ray(&parallel, f64::EPSILON).is_err());
    }

    #[test]
    fn mirror_and_classify() {
        let plane = Plane3D::from_normal_and_point(UnitVector3D::x_axis(), p(1.0, 0.0, 0.0));
        assert_eq!(plane.mirror_about(&p(3.0, 2.0, 1.0)), p(-1.0, 2.0, 1.0));
        assert_eq!(plane.classify(&p(3.0, 0.0, 0.0), 1e-10), PlaneSide::Front);
        assert_eq!(plane.classify(&p(-3.0, 0.0, 0.0), 1e-10), PlaneSide::Back);
        assert_eq!(plane.classify(&p(1.0, 7.0, 0.0), 1e-10), PlaneSide::On);
    }

    #[test]
    fn evaluates_as_surface() {
        let plane = Plane3D::from_normal_and_point(u(1.0, 1.0, 1.0), p(1.0, 0.0, 0.0));
        for (s, t) in [(0.0, 0.0), (2.0, -1.0), (-0.5, 3.0)] {
            let q = Surface::evaluate(&plane, s, t).unwrap();
            assert_abs_diff_eq!(plane.signed_distance_to(&q), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn parse_round_trip() {
        let plane = Plane3D::from_normal_and_point(u(0.3, -1.0, 2.0), p(1.0, 2.0, 3.0));
        assert_eq!(plane.to_string().parse::<Plane3D>().unwrap(), plane);
        assert!("(0, 0, 0, 1)".parse::<Plane3D>().is_err());
    }
}
