pub mod matrix3d;
pub mod parse;

/// 3x3 matrix type (rotation blocks, tensor products).
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 homogeneous transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Positional tolerance, per unit of distance from the origin, for deciding
/// that a point lies on a plane.
pub const TOLERANCE: f64 = 1e-10;

/// Default tolerance for `|1 - |a·b||` when testing two directions for parallelism.
pub const PARALLEL_TOLERANCE: f64 = 1e-10;

/// Tolerance used when a caller asserts two planes (or a plane and a ray) are parallel.
pub const PLANE_PARALLEL_TOLERANCE: f64 = 1e-15;

/// Maximum deviation of a norm from 1 that is accepted without rescaling.
///
/// Normalizing an already normalized vector is not idempotent in floating
/// point; components within this band are stored as given.
pub const UNIT_EPSILON: f64 = 4.0 * f64::EPSILON;
