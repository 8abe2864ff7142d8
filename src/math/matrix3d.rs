//! Builders for 3x3 rotation matrices.
//!
//! All angles are in radians and follow the right-hand rule: a positive
//! angle turns counter-clockwise when looking down the axis towards the
//! origin.

use std::f64::consts::PI;

use crate::error::Result;
use crate::geometry::UnitVector3D;

use super::Matrix3;

/// Rotation around the X axis.
#[must_use]
pub fn rotation_around_x_axis(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c,   -s,
        0.0, s,   c,
    )
}

/// Rotation around the Y axis.
#[must_use]
pub fn rotation_around_y_axis(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c,   0.0, s,
        0.0, 1.0, 0.0,
        -s,  0.0, c,
    )
}

/// Rotation around the Z axis.
#[must_use]
pub fn rotation_around_z_axis(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c,   -s,  0.0,
        s,   c,   0.0,
        0.0, 0.0, 1.0,
    )
}

/// Rotation around an arbitrary axis through the origin (Rodrigues).
///
/// `R = cos(θ) I + sin(θ) [a]× + (1 - cos(θ)) a aᵀ`
#[must_use]
pub fn rotation_around_arbitrary_vector(about: &UnitVector3D, angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3::identity() * c + about.cross_product_matrix() * s + about.unit_tensor_product() * (1.0 - c)
}

/// Smallest rotation that turns `from` onto `to`.
///
/// The axis is `from × to`, kept perpendicular to `from`, and the angle is
/// taken with `atan2` so that nearly aligned and nearly opposite pairs
/// stay exact. Only when the cross product vanishes are the directions
/// treated as equal (identity) or opposite. For opposite directions every
/// axis perpendicular to `from` works; `axis` picks one (its component
/// along `from` is discarded) and [`UnitVector3D::orthogonal`] is used when
/// it is `None`.
///
/// # Errors
///
/// Returns an error if the directions are opposite and `axis` is parallel to `from`.
pub fn rotation_to(
    from: &UnitVector3D,
    to: &UnitVector3D,
    axis: Option<&UnitVector3D>,
) -> Result<Matrix3> {
    let cross = from.cross_product(to);
    let dot = from.dot_product(to);
    let perpendicular = cross - cross.project_on(from);
    if let Ok(about) = perpendicular.normalize() {
        return Ok(rotation_around_arbitrary_vector(&about, cross.length().atan2(dot)));
    }
    if dot > 0.0 {
        return Ok(Matrix3::identity());
    }

    let about = match axis {
        Some(a) => (a.to_vector() - a.project_on(from)).normalize()?,
        None => from.orthogonal(),
    };
    Ok(rotation_around_arbitrary_vector(&about, PI))
}
