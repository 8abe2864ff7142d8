pub mod coordinate_system;
pub mod curve;
mod ops;
pub mod point;
#[cfg(feature = "serde")]
mod repr;
pub mod surface;
pub mod unit_vector;
pub mod vector;

pub use coordinate_system::CoordinateSystem3D;
pub use curve::{Circle3D, Curve, CurveDomain, Line3D, LineSegment3D, PolyLine3D, Ray3D};
pub use point::Point3D;
pub use surface::{Plane3D, PlaneSide, Surface, SurfaceDomain};
pub use unit_vector::UnitVector3D;
pub use vector::Vector3D;
