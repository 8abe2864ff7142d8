//! Affine frames stored as 4x4 homogeneous transforms.
//!
//! The upper-left 3x3 block holds the X, Y and Z basis vectors as columns,
//! the last column holds the origin, and the bottom row is always
//! `[0, 0, 0, 1]`. Basis vectors need not be orthonormal.

use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, Vector4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeometryError, ParseError, Result};
use crate::geometry::{Line3D, LineSegment3D, Point3D, Ray3D, UnitVector3D, Vector3D};
use crate::math::{matrix3d, parse, Matrix3, Matrix4};

/// An origin and three basis vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "crate::geometry::repr::Frame", into = "crate::geometry::repr::Frame")
)]
pub struct CoordinateSystem3D {
    matrix: Matrix4,
}

impl CoordinateSystem3D {
    /// Creates a frame from its origin and basis vectors.
    ///
    /// Unit and free vectors are both accepted for the axes.
    #[must_use]
    pub fn new(
        origin: Point3D,
        x_axis: impl Into<Vector3D>,
        y_axis: impl Into<Vector3D>,
        z_axis: impl Into<Vector3D>,
    ) -> Self {
        let (x, y, z) = (x_axis.into(), y_axis.into(), z_axis.into());
        Self::from_homogeneous(Matrix4::new(
            x.x, y.x, z.x, origin.x,
            x.y, y.y, z.y, origin.y,
            x.z, y.z, z.z, origin.z,
            0.0, 0.0, 0.0, 1.0,
        ))
    }

    /// The world frame.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_homogeneous(Matrix4::identity())
    }

    /// Creates a frame from a general matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidMatrix`] unless `m` is 4x4 with a
    /// bottom row of `[0, 0, 0, 1]`.
    pub fn from_matrix(m: &DMatrix<f64>) -> Result<Self> {
        if m.nrows() != 4 || m.ncols() != 4 {
            return Err(GeometryError::InvalidMatrix(format!(
                "expected 4x4, got {}x{}",
                m.nrows(),
                m.ncols()
            ))
            .into());
        }
        #[allow(clippy::float_cmp)]
        let homogeneous = m[(3, 0)] == 0.0 && m[(3, 1)] == 0.0 && m[(3, 2)] == 0.0 && m[(3, 3)] == 1.0;
        if !homogeneous {
            return Err(GeometryError::InvalidMatrix("bottom row must be [0, 0, 0, 1]".into()).into());
        }
        Ok(Self::from_homogeneous(Matrix4::from_fn(|r, c| m[(r, c)])))
    }

    fn from_homogeneous(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    fn from_rotation(r: &Matrix3) -> Self {
        Self::from_homogeneous(r.to_homogeneous())
    }

    /// Rotation by `angle` radians around `axis` through the world origin.
    #[must_use]
    pub fn rotation(angle: f64, axis: &UnitVector3D) -> Self {
        Self::from_rotation(&matrix3d::rotation_around_arbitrary_vector(axis, angle))
    }

    /// Rotation around Z.
    #[must_use]
    pub fn yaw(angle: f64) -> Self {
        Self::from_rotation(&matrix3d::rotation_around_z_axis(angle))
    }

    /// Rotation around Y.
    #[must_use]
    pub fn pitch(angle: f64) -> Self {
        Self::from_rotation(&matrix3d::rotation_around_y_axis(angle))
    }

    /// Rotation around X.
    #[must_use]
    pub fn roll(angle: f64) -> Self {
        Self::from_rotation(&matrix3d::rotation_around_x_axis(angle))
    }

    /// Aircraft rotation: yaw is applied first, then pitch, then roll.
    #[must_use]
    pub fn rotation_yaw_pitch_roll(yaw: f64, pitch: f64, roll: f64) -> Self {
        let frame = Self::yaw(yaw).transform(&Self::identity());
        let frame = Self::pitch(pitch).transform(&frame);
        Self::roll(roll).transform(&frame)
    }

    #[must_use]
    pub fn translation(offset: &Vector3D) -> Self {
        let offset: nalgebra::Vector3<f64> = (*offset).into();
        Self::from_homogeneous(Matrix4::new_translation(&offset))
    }

    /// Smallest rotation turning `from` onto `to`.
    ///
    /// `axis` only matters when the directions are opposite; see
    /// [`matrix3d::rotation_to`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directions are opposite and `axis` is parallel to them.
    pub fn rotate_to(
        from: &UnitVector3D,
        to: &UnitVector3D,
        axis: Option<&UnitVector3D>,
    ) -> Result<Self> {
        Ok(Self::from_rotation(&matrix3d::rotation_to(from, to, axis)?))
    }

    /// Returns the frame `m` such that `m.transform(from) == to`.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is singular.
    pub fn create_mapping_coordinate_system(
        from: &CoordinateSystem3D,
        to: &CoordinateSystem3D,
    ) -> Result<Self> {
        let mut matrix = to.matrix * from.invert()?.matrix;
        matrix.set_row(3, &nalgebra::RowVector4::new(0.0, 0.0, 0.0, 1.0));
        Ok(Self::from_homogeneous(matrix))
    }

    #[must_use]
    pub fn origin(&self) -> Point3D {
        Point3D::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    #[must_use]
    pub fn x_axis(&self) -> Vector3D {
        self.basis(0)
    }

    #[must_use]
    pub fn y_axis(&self) -> Vector3D {
        self.basis(1)
    }

    #[must_use]
    pub fn z_axis(&self) -> Vector3D {
        self.basis(2)
    }

    fn basis(&self, column: usize) -> Vector3D {
        Vector3D::new(
            self.matrix[(0, column)],
            self.matrix[(1, column)],
            self.matrix[(2, column)],
        )
    }

    /// The 3x3 block holding the basis vectors as columns.
    #[must_use]
    pub fn base_change_matrix(&self) -> Matrix3 {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// Maps a point from local to world coordinates.
    #[must_use]
    pub fn transform_point(&self, p: &Point3D) -> Point3D {
        let h = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3D::new(h[0], h[1], h[2])
    }

    /// Maps a direction; the origin offset does not apply.
    #[must_use]
    pub fn transform_vector(&self, v: &Vector3D) -> Vector3D {
        v.transform_by(&self.base_change_matrix())
    }

    /// Maps a direction and renormalizes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the basis collapses the direction to zero.
    pub fn transform_unit_vector(&self, v: &UnitVector3D) -> Result<UnitVector3D> {
        self.transform_vector(&v.to_vector()).normalize()
    }

    /// # Errors
    ///
    /// Returns an error if the basis collapses the ray direction to zero.
    pub fn transform_ray(&self, ray: &Ray3D) -> Result<Ray3D> {
        Ok(Ray3D::new(
            self.transform_point(ray.through_point()),
            self.transform_unit_vector(ray.direction())?,
        ))
    }

    /// # Errors
    ///
    /// Returns an error if both defining points map to the same point.
    pub fn transform_line(&self, line: &Line3D) -> Result<Line3D> {
        Line3D::new(
            self.transform_point(line.start_point()),
            self.transform_point(line.end_point()),
        )
    }

    /// # Errors
    ///
    /// Returns an error if both end points map to the same point.
    pub fn transform_segment(&self, segment: &LineSegment3D) -> Result<LineSegment3D> {
        LineSegment3D::new(
            self.transform_point(segment.start_point()),
            self.transform_point(segment.end_point()),
        )
    }

    /// Composes two frames: the result applies `other` first, then `self`.
    #[must_use]
    pub fn transform(&self, other: &CoordinateSystem3D) -> Self {
        Self::from_homogeneous(self.matrix * other.matrix)
    }

    /// Maps a point from world to local coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is singular.
    pub fn transform_to_local(&self, p: &Point3D) -> Result<Point3D> {
        Ok(self.invert()?.transform_point(p))
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::SingularMatrix`] if the basis has zero volume.
    pub fn invert(&self) -> Result<Self> {
        match self.matrix.try_inverse() {
            Some(mut inverse) => {
                inverse.set_row(3, &nalgebra::RowVector4::new(0.0, 0.0, 0.0, 1.0));
                Ok(Self::from_homogeneous(inverse))
            }
            None => {
                debug!(frame = %self, "cannot invert singular coordinate system");
                Err(GeometryError::SingularMatrix.into())
            }
        }
    }

    /// Moves the origin by `offset` without touching the basis.
    #[must_use]
    pub fn offset_by(&self, offset: &Vector3D) -> Self {
        Self::new(
            self.origin() + *offset,
            self.x_axis(),
            self.y_axis(),
            self.z_axis(),
        )
    }

    /// Rotates the basis around `about`, keeping the origin in place.
    #[must_use]
    pub fn rotate_around_vector(&self, about: &UnitVector3D, angle: f64) -> Self {
        let r = Self::rotation(angle, about);
        Self::new(
            self.origin(),
            r.transform_vector(&self.x_axis()),
            r.transform_vector(&self.y_axis()),
            r.transform_vector(&self.z_axis()),
        )
    }

    /// Keeps the origin and replaces the basis with the world axes.
    #[must_use]
    pub fn reset_rotations(&self) -> Self {
        Self::new(
            self.origin(),
            Vector3D::x_axis(),
            Vector3D::y_axis(),
            Vector3D::z_axis(),
        )
    }

    /// Compares all sixteen entries within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &CoordinateSystem3D, tolerance: f64) -> bool {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Default for CoordinateSystem3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for CoordinateSystem3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.origin(),
            self.x_axis(),
            self.y_axis(),
            self.z_axis()
        )
    }
}

impl FromStr for CoordinateSystem3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let g = parse::tuples::<3>(s, 4)?;
        let v = |[x, y, z]: [f64; 3]| Vector3D::new(x, y, z);
        let [ox, oy, oz] = g[0];
        Ok(Self::new(Point3D::new(ox, oy, oz), v(g[1]), v(g[2]), v(g[3])))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    fn skewed() -> CoordinateSystem3D {
        CoordinateSystem3D::new(
            p(1.0, -2.0, 3.0),
            Vector3D::new(2.0, 0.0, 0.0),
            Vector3D::new(0.5, 1.0, 0.0),
            UnitVector3D::new(0.0, 1.0, 1.0).unwrap(),
        )
    }

    #[test]
    fn accessors_read_columns() {
        let cs = skewed();
        assert_eq!(cs.origin(), p(1.0, -2.0, 3.0));
        assert_eq!(cs.x_axis(), Vector3D::new(2.0, 0.0, 0.0));
        assert_eq!(cs.y_axis(), Vector3D::new(0.5, 1.0, 0.0));
        assert_eq!(cs.matrix().row(3).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn vectors_ignore_translation() {
        let cs = CoordinateSystem3D::translation(&Vector3D::new(5.0, 6.0, 7.0));
        assert_eq!(cs.transform_point(&p(1.0, 1.0, 1.0)), p(6.0, 7.0, 8.0));
        assert_eq!(cs.transform_vector(&Vector3D::new(1.0, 1.0, 1.0)), Vector3D::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn quarter_turn() {
        let cs = CoordinateSystem3D::rotation(FRAC_PI_2, &UnitVector3D::z_axis());
        assert!(cs.transform_point(&p(1.0, 0.0, 0.0)).equals(&p(0.0, 1.0, 0.0), 1e-15));
        let u = cs.transform_unit_vector(&UnitVector3D::y_axis()).unwrap();
        assert!(u.equals(&UnitVector3D::x_axis().negate(), 1e-15));
    }

    #[test]
    fn yaw_pitch_roll_order() {
        let (yaw, pitch, roll) = (0.3, -0.7, 1.1);
        let composed = CoordinateSystem3D::rotation_yaw_pitch_roll(yaw, pitch, roll);
        let expected = CoordinateSystem3D::roll(roll)
            .transform(&CoordinateSystem3D::pitch(pitch))
            .transform(&CoordinateSystem3D::yaw(yaw));
        assert!(composed.equals(&expected, 1e-14));

        let yaw_only = CoordinateSystem3D::rotation_yaw_pitch_roll(yaw, 0.0, 0.0);
        assert!(yaw_only.equals(&CoordinateSystem3D::rotation(yaw, &UnitVector3D::z_axis()), 1e-14));
    }

    #[test]
    fn invert_round_trip() {
        let cs = skewed();
        let inv = cs.invert().unwrap();
        for q in [p(0.0, 0.0, 0.0), p(1.5, -3.0, 2.0), p(100.0, 0.1, -7.0)] {
            let back = inv.transform_point(&cs.transform_point(&q));
            assert!(back.equals(&q, 1e-12), "q={q} back={back}");
        }
        assert!(cs.transform(&inv).equals(&CoordinateSystem3D::identity(), 1e-12));
    }

    #[test]
    fn singular_frame_cannot_invert() {
        let flat = CoordinateSystem3D::new(
            p(0.0, 0.0, 0.0),
            Vector3D::x_axis(),
            Vector3D::y_axis(),
            Vector3D::zero(),
        );
        assert!(flat.invert().is_err());
        assert!(flat.transform_to_local(&p(1.0, 1.0, 1.0)).is_err());
        assert!(flat.transform_unit_vector(&UnitVector3D::z_axis()).is_err());
    }

    #[test]
    fn from_matrix_validates_shape() {
        let ok = DMatrix::from_row_slice(4, 4, &[
            1.0, 0.0, 0.0, 2.0,
            0.0, 1.0, 0.0, 3.0,
            0.0, 0.0, 1.0, 4.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        let cs = CoordinateSystem3D::from_matrix(&ok).unwrap();
        assert_eq!(cs.origin(), p(2.0, 3.0, 4.0));

        assert!(CoordinateSystem3D::from_matrix(&DMatrix::identity(3, 3)).is_err());
        let mut bad = ok.clone();
        bad[(3, 0)] = 0.5;
        assert!(CoordinateSystem3D::from_matrix(&bad).is_err());
    }

    #[test]
    fn mapping_takes_one_frame_onto_another() {
        let from = skewed();
        let to = CoordinateSystem3D::rotation(0.4, &UnitVector3D::new(1.0, 1.0, 0.0).unwrap())
            .offset_by(&Vector3D::new(0.0, 9.0, 0.0));
        let mapping = CoordinateSystem3D::create_mapping_coordinate_system(&from, &to).unwrap();
        assert!(mapping.transform(&from).equals(&to, 1e-12));
    }

    #[test]
    fn rotate_to_maps_direction() {
        let from = UnitVector3D::new(1.0, 2.0, -1.0).unwrap();
        let to = from.negate();
        let cs = CoordinateSystem3D::rotate_to(&from, &to, None).unwrap();
        assert!(cs.transform_unit_vector(&from).unwrap().equals(&to, 1e-12));
    }

    #[test]
    fn frame_edits_return_new_values() {
        let cs = skewed();
        let moved = cs.offset_by(&Vector3D::new(1.0, 1.0, 1.0));
        assert_eq!(moved.origin(), p(2.0, -1.0, 4.0));
        assert_eq!(moved.x_axis(), cs.x_axis());

        let reset = cs.reset_rotations();
        assert_eq!(reset.origin(), cs.origin());
        assert_eq!(reset.base_change_matrix(), Matrix3::identity());

        let turned = CoordinateSystem3D::identity().rotate_around_vector(&UnitVector3D::x_axis(), FRAC_PI_2);
        assert!(turned.y_axis().equals(&Vector3D::z_axis(), 1e-15));
        assert_eq!(turned.origin(), Point3D::origin());
    }

    #[test]
    fn transforms_curves() {
        let cs = CoordinateSystem3D::translation(&Vector3D::new(0.0, 0.0, 1.0));
        let seg = LineSegment3D::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)).unwrap();
        let moved = cs.transform_segment(&seg).unwrap();
        assert_eq!(*moved.start_point(), p(0.0, 0.0, 1.0));
        let ray = cs.transform_ray(&Ray3D::new(p(0.0, 0.0, 0.0), UnitVector3D::y_axis())).unwrap();
        assert_eq!(*ray.direction(), UnitVector3D::y_axis());
        let line = cs.transform_line(&Line3D::from(seg)).unwrap();
        assert_eq!(*line.end_point(), p(1.0, 0.0, 1.0));
    }

    #[test]
    fn parse_round_trip() {
        let cs = skewed().rotate_around_vector(&UnitVector3D::y_axis(), 0.25);
        assert_eq!(cs.to_string().parse::<CoordinateSystem3D>().unwrap(), cs);
        assert!("(0, 0, 0), (1, 0, 0)".parse::<CoordinateSystem3D>().is_err());
    }
}
