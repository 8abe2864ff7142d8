pub mod error;
pub mod geometry;
pub mod math;

pub use error::{SpatialError, Result};
pub use geometry::{
    Circle3D, CoordinateSystem3D, Curve, CurveDomain, Line3D, LineSegment3D, Plane3D, PlaneSide,
    Point3D, PolyLine3D, Ray3D, Surface, SurfaceDomain, UnitVector3D, Vector3D,
};
pub use math::parse::TryParse;
